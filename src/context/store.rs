// ABOUTME: SessionStore - maps session identifiers to shared conversation contexts.
// ABOUTME: Lets concurrent handlers find the transcript for the session they serve.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::conversation::{ContextSettings, ConversationContext, total_tokens};

/// A thread-safe map from session id to conversation context.
///
/// Cloning the store is cheap and shares the underlying map.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Arc<ConversationContext>>>>,
    settings: Arc<ContextSettings>,
}

impl SessionStore {
    /// Create an empty store whose contexts use the given settings.
    pub fn new(settings: ContextSettings) -> Self {
        Self {
            sessions: Arc::default(),
            settings: Arc::new(settings),
        }
    }

    /// Settings applied to every context this store creates.
    pub fn settings(&self) -> &ContextSettings {
        &self.settings
    }

    /// Start a new session under a fresh random id.
    pub fn create(&self) -> (String, Arc<ConversationContext>) {
        let id = Uuid::new_v4().to_string();
        let context = self.get_or_create(&id);
        (id, context)
    }

    /// Get the context for a session, creating it on first use.
    pub fn get_or_create(&self, id: &str) -> Arc<ConversationContext> {
        if let Some(context) = self.get(id) {
            return context;
        }
        let mut sessions = self.sessions.write();
        sessions
            .entry(id.to_string())
            .or_insert_with(|| {
                debug!(session = id, "created conversation context");
                Arc::new(ConversationContext::from_settings(&self.settings))
            })
            .clone()
    }

    /// Get the context for a session, if it exists.
    pub fn get(&self, id: &str) -> Option<Arc<ConversationContext>> {
        self.sessions.read().get(id).cloned()
    }

    /// Drop a session. Returns whether it existed.
    pub fn remove(&self, id: &str) -> bool {
        self.sessions.write().remove(id).is_some()
    }

    /// List session ids, sorted alphabetically.
    pub fn list(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.sessions.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn count(&self) -> usize {
        self.sessions.read().len()
    }

    /// Estimated tokens for a session; zero if the session does not exist.
    pub fn total_tokens(&self, id: &str) -> usize {
        total_tokens(self.get(id).as_deref())
    }
}
