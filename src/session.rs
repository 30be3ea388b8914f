// ABOUTME: ChatSession - runs conversation turns against a chat-completion client.
// ABOUTME: Appends user input, sends the trimmed transcript, and records the reply.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::Config;
use crate::context::ConversationContext;
use crate::error::{LlmError, ParleyError};
use crate::llm::{LlmClient, Request, Role};

/// Default completion cap for a single reply.
pub const DEFAULT_MAX_REPLY_TOKENS: u32 = 1500;

/// One dialogue bound to a chat-completion client.
///
/// Clones share the client, the context and the turn lock.
#[derive(Clone)]
pub struct ChatSession {
    client: Arc<dyn LlmClient>,
    context: Arc<ConversationContext>,
    turn: Arc<Mutex<()>>,
    max_reply_tokens: u32,
    temperature: Option<f64>,
}

impl ChatSession {
    pub fn new(client: Arc<dyn LlmClient>, context: Arc<ConversationContext>) -> Self {
        Self {
            client,
            context,
            turn: Arc::new(Mutex::new(())),
            max_reply_tokens: DEFAULT_MAX_REPLY_TOKENS,
            temperature: None,
        }
    }

    /// Build a session talking to the configured OpenAI endpoint.
    pub fn from_config(config: &Config) -> Self {
        info!(
            model = %config.model,
            max_context_tokens = config.max_context_tokens,
            language = %config.language,
            "creating chat session"
        );
        let context = Arc::new(ConversationContext::from_settings(&config.context_settings()));
        Self::new(Arc::new(config.openai_client()), context)
            .with_max_reply_tokens(config.max_reply_tokens)
    }

    /// Build a session from the process environment.
    pub fn from_env() -> Result<Self, ParleyError> {
        Ok(Self::from_config(&Config::from_env()?))
    }

    /// Build a session from configuration read through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ParleyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self::from_config(&Config::from_lookup(lookup)?))
    }

    /// Cap the length of each reply.
    pub fn with_max_reply_tokens(mut self, max_reply_tokens: u32) -> Self {
        self.max_reply_tokens = max_reply_tokens;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Run one turn: record the user input, ask for a reply, record the reply.
    ///
    /// Turns on this session (and its clones) run one at a time, so each
    /// reply lands right after its question. Sessions built separately over
    /// the same context do not share that ordering; their turns may interleave.
    ///
    /// If the provider call fails the user message stays in the transcript.
    pub async fn process(&self, user_input: &str) -> Result<String, LlmError> {
        let _turn = self.turn.lock().await;

        self.context.add_message(Role::User, user_input);

        let mut request = Request::new(self.context.model())
            .messages(self.context.messages())
            .max_tokens(self.max_reply_tokens);
        if let Some(temperature) = self.temperature {
            request = request.temperature(temperature);
        }

        let response = match self.client.create_message(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "chat completion failed");
                return Err(e);
            }
        };

        self.context.add_message(Role::Assistant, response.content.clone());

        info!(
            model = %response.model,
            total_tokens = self.context.calculate_total_tokens(),
            messages = self.context.message_count(),
            "conversation turn complete"
        );
        Ok(response.content)
    }

    /// Discard the conversation history.
    pub fn reset(&self) {
        self.context.reset();
    }

    /// Estimated tokens in the current transcript.
    pub fn total_tokens(&self) -> usize {
        self.context.calculate_total_tokens()
    }

    /// Localized greeting for the session's language.
    pub fn welcome(&self) -> &'static str {
        self.context.localized_message("welcome").unwrap_or_default()
    }

    /// Localized help text for the session's language.
    pub fn help(&self) -> &'static str {
        self.context.localized_message("help").unwrap_or_default()
    }

    pub fn context(&self) -> &Arc<ConversationContext> {
        &self.context
    }
}
