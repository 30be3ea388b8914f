// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use parley::prelude::*;` to get started quickly.

pub use crate::config::Config;
pub use crate::context::{
    ContextSettings, ConversationContext, HeuristicEstimator, Language, SYSTEM_PROMPT,
    SessionStore, TokenEstimator,
};
pub use crate::error::{ConfigError, LlmError, ParleyError};
pub use crate::llm::{LlmClient, Message, OpenAIClient, Request, Response, Role, StopReason, Usage};
pub use crate::session::ChatSession;
