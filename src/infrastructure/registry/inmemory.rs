//! In-memory session registry.
//!
//! Implements the domain's [`SessionRegistry`] trait with a mutex-guarded
//! `HashMap`. Each operation acquires the lock exactly once, so
//! check-and-insert is atomic and no two operations on the same key can
//! interleave partially. State is initialized empty at startup and has no
//! persistence across restarts.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectedUser, SessionRegistry};

/// Mutex-guarded map of connection id to connected-user record.
#[derive(Default)]
pub struct InMemorySessionRegistry {
    sessions: Mutex<HashMap<String, ConnectedUser>>,
}

impl InMemorySessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn add(&self, user: ConnectedUser) -> bool {
        if user.connection_id.is_empty() || user.display_name.is_empty() {
            tracing::warn!("Refusing to register user with empty display name or connection id");
            return false;
        }

        let mut sessions = self.sessions.lock().await;
        match sessions.entry(user.connection_id.clone()) {
            Entry::Occupied(_) => {
                tracing::warn!("Connection '{}' is already registered", user.connection_id);
                false
            }
            Entry::Vacant(entry) => {
                tracing::info!(
                    "User registered: {} (connection: {})",
                    user.display_name,
                    user.connection_id
                );
                entry.insert(user);
                true
            }
        }
    }

    async fn remove(&self, connection_id: &str) -> Option<ConnectedUser> {
        let mut sessions = self.sessions.lock().await;
        let removed = sessions.remove(connection_id);
        if let Some(user) = &removed {
            tracing::info!(
                "User removed: {} (connection: {})",
                user.display_name,
                connection_id
            );
        }
        removed
    }

    async fn get(&self, connection_id: &str) -> Option<ConnectedUser> {
        let sessions = self.sessions.lock().await;
        sessions.get(connection_id).cloned()
    }

    async fn count(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }

    async fn all(&self) -> Vec<ConnectedUser> {
        let sessions = self.sessions.lock().await;
        sessions.values().cloned().collect()
    }

    async fn clear(&self) {
        let mut sessions = self.sessions.lock().await;
        let count = sessions.len();
        sessions.clear();
        tracing::info!("Cleared {} users from the registry", count);
    }
}
