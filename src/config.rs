// ABOUTME: Environment-driven configuration for the chat backend.
// ABOUTME: Resolves credentials, model choice, and token budgets with defaults.

use std::str::FromStr;

use crate::context::{ContextSettings, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, Language};
use crate::error::ConfigError;
use crate::llm::{OPENAI_API_BASE, OpenAIClient};
use crate::session::DEFAULT_MAX_REPLY_TOKENS;

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    /// Token budget for each conversation transcript.
    pub max_context_tokens: usize,
    /// Completion cap for each reply.
    pub max_reply_tokens: u32,
    pub language: Language,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai_api_key = var("OPENAI_API_KEY")
            .or_else(|| var("OPEN_API_KEY"))
            .ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;

        Ok(Self {
            openai_api_key,
            openai_base_url: var("OPENAI_BASE_URL").unwrap_or_else(|| OPENAI_API_BASE.to_string()),
            model: var("PARLEY_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_context_tokens: parse_or(
                "PARLEY_MAX_CONTEXT_TOKENS",
                var("PARLEY_MAX_CONTEXT_TOKENS"),
                DEFAULT_MAX_TOKENS,
            )?,
            max_reply_tokens: parse_or(
                "PARLEY_MAX_REPLY_TOKENS",
                var("PARLEY_MAX_REPLY_TOKENS"),
                DEFAULT_MAX_REPLY_TOKENS,
            )?,
            language: var("PARLEY_LANGUAGE")
                .map(Language::from)
                .unwrap_or_default(),
        })
    }

    /// Settings for conversation contexts built from this configuration.
    pub fn context_settings(&self) -> ContextSettings {
        ContextSettings {
            model: self.model.clone(),
            max_tokens: self.max_context_tokens,
            language: self.language.clone(),
        }
    }

    /// An OpenAI client pointed at the configured endpoint.
    pub fn openai_client(&self) -> OpenAIClient {
        OpenAIClient::new(self.openai_api_key.clone()).with_base_url(self.openai_base_url.clone())
    }
}

fn parse_or<T: FromStr>(
    var: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.openai_api_key, "sk-test");
        assert_eq!(config.openai_base_url, OPENAI_API_BASE);
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.max_context_tokens, 4096);
        assert_eq!(config.max_reply_tokens, 1500);
        assert_eq!(config.language, Language::english());
    }

    #[test]
    fn test_missing_api_key() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OPENAI_API_KEY")));
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[("OPENAI_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }

    #[test]
    fn test_legacy_key_name() {
        let config = Config::from_lookup(lookup(&[("OPEN_API_KEY", "sk-legacy")])).unwrap();
        assert_eq!(config.openai_api_key, "sk-legacy");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://localhost:11434/v1"),
            ("PARLEY_MODEL", "gpt-4o-mini"),
            ("PARLEY_MAX_CONTEXT_TOKENS", "8192"),
            ("PARLEY_MAX_REPLY_TOKENS", " 256 "),
            ("PARLEY_LANGUAGE", "es_MX"),
        ]))
        .unwrap();

        assert_eq!(config.max_context_tokens, 8192);
        assert_eq!(config.max_reply_tokens, 256);

        let settings = config.context_settings();
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.max_tokens, 8192);
        assert_eq!(settings.language.tag(), "es-mx");

        assert_eq!(config.openai_client().base_url(), "http://localhost:11434/v1");
    }

    #[test]
    fn test_invalid_number() {
        let err = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PARLEY_MAX_CONTEXT_TOKENS", "lots"),
        ]))
        .unwrap_err();

        match err {
            ConfigError::Invalid { var, value } => {
                assert_eq!(var, "PARLEY_MAX_CONTEXT_TOKENS");
                assert_eq!(value, "lots");
            }
            other => panic!("Expected invalid value error, got {:?}", other),
        }
    }
}
