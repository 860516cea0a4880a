//! Domain model for the chat relay core.
//!
//! Pure data shapes and the trait seams the use case layer depends on.
//! Concrete implementations live in the infrastructure layer (dependency
//! inversion).

mod broadcast;
mod envelope;
mod notification;
mod registry;
mod user;

pub use broadcast::{Broadcaster, DeliveryError, OutboundFrame, Topic};
pub use envelope::{
    Envelope, EnvelopeKind, MessageBody, RawEnvelope, SenderName, Timestamp, ValidationError,
    MAX_CONTENT_CHARS, SENDER_MAX_CHARS, SENDER_MIN_CHARS,
};
pub use notification::{CountNotification, NotificationKind};
pub use registry::SessionRegistry;
pub use user::ConnectedUser;
