//! Broadcast fan-out trait definition.

use async_trait::async_trait;
use thiserror::Error;

use super::envelope::Envelope;
use super::notification::CountNotification;

/// A named broadcast channel. Every connection subscribed to a topic
/// receives every frame published to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Chat and presence envelopes.
    Public,
    /// Connected-user count notifications.
    UserCount,
}

/// An outbound frame the coordinator hands to the fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    Envelope(Envelope),
    Count(CountNotification),
}

/// Fan-out delivery failures.
///
/// Per-subscriber failures are isolated inside the implementation (logged,
/// delivery to the remaining subscribers continues); only failures that
/// affect the whole publish surface here.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to serialize outbound frame: {0}")]
    Serialize(String),
}

/// Delivery of one frame to every connection currently subscribed to a
/// topic. Best-effort, fire-and-forget: a connection that disappears between
/// membership read and delivery simply misses that frame.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    async fn publish(&self, topic: Topic, frame: OutboundFrame) -> Result<(), DeliveryError>;
}
