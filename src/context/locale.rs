// ABOUTME: Language preference for a conversation and its canned strings.
// ABOUTME: Looks up localized "welcome"/"help" text, falling back to English.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A normalized locale tag such as `en`, `es-mx` or `pt-br`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Language(String);

impl Language {
    /// Parse a locale tag. Underscores are accepted as separators and case
    /// is ignored; an empty tag means English.
    pub fn new(tag: &str) -> Self {
        let tag = tag.trim().replace('_', "-").to_ascii_lowercase();
        if tag.is_empty() {
            Self::english()
        } else {
            Self(tag)
        }
    }

    pub fn english() -> Self {
        Self("en".to_string())
    }

    /// The full normalized tag.
    pub fn tag(&self) -> &str {
        &self.0
    }

    /// The primary language subtag (`es` for `es-mx`).
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// Look up a canned string for this language.
    ///
    /// Languages without a translation get the English text. Unknown keys
    /// return `None`.
    pub fn localize(&self, key: &str) -> Option<&'static str> {
        let key = CannedMessage::from_key(key)?;
        Some(key.text(self.primary()))
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Language {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for Language {
    fn from(tag: String) -> Self {
        Self::new(&tag)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CannedMessage {
    Welcome,
    Help,
}

impl CannedMessage {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "welcome" => Some(Self::Welcome),
            "help" => Some(Self::Help),
            _ => None,
        }
    }

    fn text(self, primary: &str) -> &'static str {
        match (self, primary) {
            (Self::Welcome, "es") => "¡Bienvenido! ¿En qué puedo ayudarte hoy?",
            (Self::Welcome, "fr") => "Bienvenue ! Comment puis-je vous aider aujourd'hui ?",
            (Self::Welcome, "de") => "Willkommen! Wie kann ich Ihnen heute helfen?",
            (Self::Welcome, "pt") => "Bem-vindo! Como posso ajudar você hoje?",
            (Self::Welcome, _) => "Welcome! How can I assist you today?",
            (Self::Help, "es") => "Estoy aquí para ayudarte. ¿Qué necesitas?",
            (Self::Help, "fr") => "Je suis là pour vous aider. De quoi avez-vous besoin ?",
            (Self::Help, "de") => "Ich bin hier, um zu helfen. Was brauchen Sie?",
            (Self::Help, "pt") => "Estou aqui para ajudar. Do que você precisa?",
            (Self::Help, _) => "I'm here to help. What do you need?",
        }
    }
}
