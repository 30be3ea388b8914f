// ABOUTME: Token estimation for conversation transcripts.
// ABOUTME: A heuristic estimator plus the trait for plugging in a real tokenizer.

use crate::llm::{Message, Role};

/// Approximate bytes per token for estimation.
pub const APPROX_BYTES_PER_TOKEN: usize = 4;

/// Estimates how many tokens a transcript occupies.
///
/// Trimming only calls [`TokenEstimator::estimate`], on the full transcript
/// and on the system-plus-newest candidate, so an implementation backed by a
/// real tokenizer can replace the heuristic. Trimming never pulls older
/// history back in, which only honors the budget when estimates grow (or stay
/// equal) as messages are added and as content grows.
pub trait TokenEstimator: Send + Sync {
    /// Estimate tokens for a single message.
    fn estimate_message(&self, message: &Message) -> usize;

    /// Estimate tokens for a whole transcript.
    fn estimate(&self, messages: &[Message]) -> usize {
        messages.iter().map(|m| self.estimate_message(m)).sum()
    }
}

/// Character-count heuristic: roughly four bytes per token, plus a fixed
/// surcharge per role.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEstimator;

impl HeuristicEstimator {
    /// Extra tokens charged for a message's role.
    pub fn role_surcharge(role: &Role) -> usize {
        match role {
            Role::System => 10,
            Role::User | Role::Assistant => 5,
            Role::Other(_) => 0,
        }
    }
}

impl TokenEstimator for HeuristicEstimator {
    fn estimate_message(&self, message: &Message) -> usize {
        message.content.len() / APPROX_BYTES_PER_TOKEN + Self::role_surcharge(&message.role)
    }
}
