//! Chat coordinator: per-envelope dispatch, validation and broadcast
//! triggering.
//!
//! The coordinator holds no cross-call state of its own — all persistent
//! state lives in the injected [`SessionRegistry`] — so concurrent
//! invocations for different connections proceed independently. Validation
//! failures never raise to the transport: the envelope is dropped, a warning
//! is logged, and no broadcast happens.

use std::sync::Arc;

use crate::common::time::Clock;
use crate::domain::{
    Broadcaster, ConnectedUser, CountNotification, Envelope, EnvelopeKind, MessageBody,
    OutboundFrame, RawEnvelope, SenderName, SessionRegistry, Timestamp, Topic,
};

/// Business logic invoked once per inbound envelope or disconnect signal.
pub struct ChatCoordinator {
    registry: Arc<dyn SessionRegistry>,
    broadcaster: Arc<dyn Broadcaster>,
    clock: Arc<dyn Clock>,
}

impl ChatCoordinator {
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        broadcaster: Arc<dyn Broadcaster>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            broadcaster,
            clock,
        }
    }

    /// Dispatch one inbound envelope by its declared kind.
    ///
    /// Returns the envelope that was broadcast, or `None` when the envelope
    /// was dropped (validation failure or unroutable kind).
    pub async fn handle_inbound(
        &self,
        connection_id: &str,
        raw: RawEnvelope,
    ) -> Option<Envelope> {
        match raw.kind {
            EnvelopeKind::Chat => self.handle_chat(connection_id, raw).await,
            EnvelopeKind::Join => self.handle_join(connection_id, raw).await,
            EnvelopeKind::Typing => self.handle_typing(raw).await,
            // Leave is derived from the disconnect signal, System is
            // server-originated; neither is accepted from a client.
            EnvelopeKind::Leave | EnvelopeKind::System => {
                tracing::warn!(
                    "Dropping unroutable {:?} envelope from connection '{}'",
                    raw.kind,
                    connection_id
                );
                None
            }
        }
    }

    /// Validate, trim and broadcast a chat message.
    async fn handle_chat(&self, connection_id: &str, raw: RawEnvelope) -> Option<Envelope> {
        let body = match MessageBody::new(raw.content.as_deref().unwrap_or_default()) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(
                    "Dropping chat envelope from connection '{}' (sender: {:?}): {}",
                    connection_id,
                    raw.sender,
                    e
                );
                return None;
            }
        };

        let envelope = Envelope::chat(body, raw.sender, self.now());
        tracing::info!(
            "Chat message from {:?}: {}",
            envelope.sender,
            envelope.content.as_deref().unwrap_or_default()
        );

        self.broadcast_public(envelope.clone()).await;
        Some(envelope)
    }

    /// Register the user and announce the join, then push a count update.
    async fn handle_join(&self, connection_id: &str, raw: RawEnvelope) -> Option<Envelope> {
        let sender = match SenderName::new(raw.sender.as_deref().unwrap_or_default()) {
            Ok(sender) => sender,
            Err(e) => {
                tracing::warn!(
                    "Dropping join envelope from connection '{}': {}",
                    connection_id,
                    e
                );
                return None;
            }
        };

        let timestamp = self.now();
        let user = ConnectedUser::new(sender.as_str(), connection_id, timestamp);
        if !self.registry.add(user).await {
            // Duplicate connection id: the join is idempotent, announce anyway.
            tracing::warn!(
                "Connection '{}' already registered, treating join as idempotent",
                connection_id
            );
        }

        tracing::info!(
            "User '{}' joined (connection: {}, total users: {})",
            sender.as_str(),
            connection_id,
            self.registry.count().await
        );

        let envelope = Envelope::join(&sender, timestamp);
        self.broadcast_public(envelope.clone()).await;
        self.broadcast_user_count().await;
        Some(envelope)
    }

    /// Stamp and forward a typing indicator. No registry mutation.
    async fn handle_typing(&self, raw: RawEnvelope) -> Option<Envelope> {
        let envelope = Envelope::typing(raw.content, raw.sender, self.now());
        self.broadcast_public(envelope.clone()).await;
        Some(envelope)
    }

    /// Transport-level disconnect signal for a connection.
    ///
    /// Removes the session (if one was registered), announces the leave and
    /// pushes a count update. Disconnect of a connection that never joined
    /// is a silent no-op.
    pub async fn handle_disconnect(&self, connection_id: &str) -> Option<Envelope> {
        let Some(user) = self.registry.remove(connection_id).await else {
            tracing::debug!(
                "Disconnect for unregistered connection '{}', nothing to announce",
                connection_id
            );
            return None;
        };

        tracing::info!(
            "User '{}' disconnected (connection: {}, total users: {})",
            user.display_name,
            connection_id,
            self.registry.count().await
        );

        let envelope = Envelope::leave(&user.display_name, self.now());
        self.broadcast_public(envelope.clone()).await;
        self.broadcast_user_count().await;
        Some(envelope)
    }

    async fn broadcast_public(&self, envelope: Envelope) {
        if let Err(e) = self
            .broadcaster
            .publish(Topic::Public, OutboundFrame::Envelope(envelope))
            .await
        {
            tracing::warn!("Failed to publish to public topic: {}", e);
        }
    }

    async fn broadcast_user_count(&self) {
        let notification =
            CountNotification::user_list_update(self.registry.count().await, self.now());
        if let Err(e) = self
            .broadcaster
            .publish(Topic::UserCount, OutboundFrame::Count(notification))
            .await
        {
            tracing::warn!("Failed to publish user count update: {}", e);
        }
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_utc_millis())
    }
}
