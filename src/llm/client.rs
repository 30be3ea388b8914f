// ABOUTME: Defines the LlmClient trait - the abstraction layer that lets
// ABOUTME: a conversation talk to any chat-completion provider.

use async_trait::async_trait;

use super::{Request, Response};
use crate::error::LlmError;

/// Trait for chat-completion client implementations.
///
/// Given the full message list of a request, an implementation returns a
/// single reply.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Create a completion (non-streaming).
    async fn create_message(&self, req: &Request) -> Result<Response, LlmError>;
}
