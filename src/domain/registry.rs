//! Session registry trait definition.
//!
//! The domain layer defines the interface it needs; the concrete
//! implementation is provided by the infrastructure layer (dependency
//! inversion). The registry is the only persistently shared mutable state in
//! the core, so every operation must be atomic with respect to its key.

use async_trait::async_trait;

use super::user::ConnectedUser;

/// Authoritative mapping from connection id to connected-user record.
///
/// Implementations must guarantee:
/// - `add` is an atomic check-and-insert (no lost updates between two
///   concurrent adds for the same id)
/// - no entry ever exists with an empty `connection_id`
/// - no duplicate `connection_id` values
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Insert the user if its connection id is absent.
    ///
    /// Returns `false` without mutating the registry when the id is already
    /// present or when `display_name`/`connection_id` is empty.
    async fn add(&self, user: ConnectedUser) -> bool;

    /// Atomically remove and return the user for this connection id.
    async fn remove(&self, connection_id: &str) -> Option<ConnectedUser>;

    /// Look up the user for this connection id.
    async fn get(&self, connection_id: &str) -> Option<ConnectedUser>;

    /// Current number of connected users.
    async fn count(&self) -> usize;

    /// Snapshot of all connected users, in no particular order.
    async fn all(&self) -> Vec<ConnectedUser>;

    /// Remove every user. Used for tests and resets.
    async fn clear(&self);
}
