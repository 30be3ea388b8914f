// ABOUTME: ConversationContext - a lock-guarded rolling transcript that keeps
// ABOUTME: a dialogue inside a token budget while pinning the system message.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use super::estimator::{HeuristicEstimator, TokenEstimator};
use super::locale::Language;
use crate::llm::{Message, Role};

/// The instruction every conversation starts from.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant. Maintain context of our ongoing conversation.";

/// Default token budget for a transcript.
pub const DEFAULT_MAX_TOKENS: usize = 4096;

/// Default chat-completion model.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Settings used to build new conversation contexts.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextSettings {
    pub model: String,
    pub max_tokens: usize,
    pub language: Language,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            language: Language::english(),
        }
    }
}

/// Mutable state, protected by a single lock.
struct ContextState {
    messages: Vec<Message>,
    language: Language,
}

/// The transcript of one dialogue.
///
/// `messages[0]` is always the seeding system message. Every append is
/// followed by a trim inside the same write lock, so readers never see an
/// untrimmed or half-trimmed transcript.
///
/// Share it between handlers with `Arc<ConversationContext>`; every method
/// takes `&self`.
pub struct ConversationContext {
    state: RwLock<ContextState>,
    max_tokens: usize,
    model: String,
    estimator: Arc<dyn TokenEstimator>,
}

fn seed() -> Vec<Message> {
    vec![Message::system(SYSTEM_PROMPT)]
}

impl ConversationContext {
    /// Create a context for the given model with the default budget.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(ContextState {
                messages: seed(),
                language: Language::english(),
            }),
            max_tokens: DEFAULT_MAX_TOKENS,
            model: model.into(),
            estimator: Arc::new(HeuristicEstimator),
        }
    }

    /// Create a context from shared settings.
    pub fn from_settings(settings: &ContextSettings) -> Self {
        Self::new(settings.model.clone())
            .with_max_tokens(settings.max_tokens)
            .with_language(settings.language.clone())
    }

    /// Set the token budget.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the initial language preference.
    pub fn with_language(mut self, language: impl Into<Language>) -> Self {
        self.state.get_mut().language = language.into();
        self
    }

    /// Replace the token estimator used for trimming and reporting.
    pub fn with_estimator(mut self, estimator: Arc<dyn TokenEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    /// Append a message, then trim the transcript to the budget.
    pub fn add_message(&self, role: impl Into<Role>, content: impl Into<String>) {
        let mut state = self.state.write();
        state.messages.push(Message::new(role, content));
        self.trim_locked(&mut state.messages);
    }

    /// Trim the transcript to the budget.
    pub fn trim(&self) {
        let mut state = self.state.write();
        self.trim_locked(&mut state.messages);
    }

    /// Caller must hold the write lock.
    ///
    /// Keeps the system message, then walks back from the newest message and
    /// stops the first time the kept transcript is checked. That check either
    /// passes, or fails because the newest message alone overshoots; older
    /// history is never pulled back in after an overshoot. Either way the
    /// result is the system message followed by the newest message.
    fn trim_locked(&self, messages: &mut Vec<Message>) {
        if messages.is_empty() {
            return;
        }
        let before = self.estimator.estimate(messages);
        if before <= self.max_tokens {
            return;
        }

        let mut older = std::mem::take(messages);
        let system = older.remove(0);
        let mut trimmed = vec![system];
        if let Some(newest) = older.pop() {
            trimmed.push(newest);
        }

        let after = self.estimator.estimate(&trimmed);
        debug!(
            before,
            after,
            dropped = older.len(),
            max_tokens = self.max_tokens,
            over_budget = after > self.max_tokens,
            "trimmed conversation context"
        );
        *messages = trimmed;
    }

    /// Estimated tokens in the current transcript.
    pub fn calculate_total_tokens(&self) -> usize {
        let state = self.state.read();
        if state.messages.is_empty() {
            return 0;
        }
        self.estimator.estimate(&state.messages)
    }

    /// Estimate tokens for an arbitrary message list with this context's estimator.
    pub fn estimate_tokens(&self, messages: &[Message]) -> usize {
        self.estimator.estimate(messages)
    }

    /// Discard all history, leaving only the system message.
    pub fn reset(&self) {
        let mut state = self.state.write();
        let discarded = state.messages.len().saturating_sub(1);
        state.messages = seed();
        info!(discarded, "conversation context reset");
    }

    pub fn set_language_preference(&self, language: impl Into<Language>) {
        self.state.write().language = language.into();
    }

    pub fn language_preference(&self) -> Language {
        self.state.read().language.clone()
    }

    /// Canned text ("welcome", "help") in the preferred language.
    pub fn localized_message(&self, key: &str) -> Option<&'static str> {
        self.state.read().language.localize(key)
    }

    /// Snapshot of the transcript, oldest first.
    pub fn messages(&self) -> Vec<Message> {
        self.state.read().messages.clone()
    }

    pub fn message_count(&self) -> usize {
        self.state.read().messages.len()
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

impl fmt::Debug for ConversationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("ConversationContext")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("language", &state.language)
            .field("messages", &state.messages.len())
            .finish()
    }
}

/// Estimated tokens for a context that may not exist; absent means zero.
pub fn total_tokens(context: Option<&ConversationContext>) -> usize {
    context.map_or(0, ConversationContext::calculate_total_tokens)
}
