//! Envelope model: the message/event unit exchanged between a connection and
//! the core, plus the validated value objects a raw envelope passes through
//! before broadcast.

use chrono::{TimeZone, Utc};
use thiserror::Error;

/// Maximum message content length in characters, after trimming.
pub const MAX_CONTENT_CHARS: usize = 500;

/// Minimum sender name length in characters, after trimming.
pub const SENDER_MIN_CHARS: usize = 2;

/// Maximum sender name length in characters, after trimming.
pub const SENDER_MAX_CHARS: usize = 50;

/// Envelope field validation failures.
///
/// These are recovered locally by the coordinator (log + drop); they never
/// propagate to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("message content is empty after trimming")]
    EmptyContent,
    #[error("message content exceeds {MAX_CONTENT_CHARS} characters (got {0})")]
    ContentTooLong(usize),
    #[error("sender name is empty after trimming")]
    EmptySender,
    #[error(
        "sender name must be {SENDER_MIN_CHARS}-{SENDER_MAX_CHARS} characters after trimming (got {0})"
    )]
    SenderLength(usize),
}

/// Unix timestamp in UTC milliseconds, stamped by the coordinator at
/// processing time. Client-supplied timestamps are never trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Render as the wire format `yyyy-MM-dd HH:mm:ss` (UTC).
    pub fn format_wire(&self) -> String {
        let seconds = self.0.div_euclid(1000);
        let nanos = (self.0.rem_euclid(1000) * 1_000_000) as u32;
        match Utc.timestamp_opt(seconds, nanos) {
            chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            // out-of-range timestamps can only come from a broken clock
            _ => String::from("1970-01-01 00:00:00"),
        }
    }
}

/// Validated chat message content: trimmed, non-empty, at most
/// [`MAX_CONTENT_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        let chars = trimmed.chars().count();
        if chars > MAX_CONTENT_CHARS {
            return Err(ValidationError::ContentTooLong(chars));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Validated display name: trimmed, [`SENDER_MIN_CHARS`]-[`SENDER_MAX_CHARS`]
/// characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderName(String);

impl SenderName {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySender);
        }
        let chars = trimmed.chars().count();
        if !(SENDER_MIN_CHARS..=SENDER_MAX_CHARS).contains(&chars) {
            return Err(ValidationError::SenderLength(chars));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Classification of an envelope on the `public` topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvelopeKind {
    Chat,
    Join,
    Leave,
    Typing,
    System,
}

/// An inbound envelope as handed over by the transport: declared kind plus
/// untrusted, unvalidated fields. Any client-supplied timestamp has already
/// been discarded at the DTO boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEnvelope {
    pub kind: EnvelopeKind,
    pub content: Option<String>,
    pub sender: Option<String>,
}

/// An outbound envelope, fully derived by the coordinator: classified,
/// validated and stamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub kind: EnvelopeKind,
    pub content: Option<String>,
    pub sender: Option<String>,
    pub timestamp: Timestamp,
}

impl Envelope {
    /// A chat envelope with validated content.
    pub fn chat(body: MessageBody, sender: Option<String>, timestamp: Timestamp) -> Self {
        Self {
            kind: EnvelopeKind::Chat,
            content: Some(body.into_string()),
            sender,
            timestamp,
        }
    }

    /// A join announcement for a validated sender.
    pub fn join(sender: &SenderName, timestamp: Timestamp) -> Self {
        Self {
            kind: EnvelopeKind::Join,
            content: Some(format!("{} joined the chat", sender.as_str())),
            sender: Some(sender.as_str().to_string()),
            timestamp,
        }
    }

    /// A leave announcement for a previously registered user.
    pub fn leave(display_name: &str, timestamp: Timestamp) -> Self {
        Self {
            kind: EnvelopeKind::Leave,
            content: Some(format!("{display_name} left the chat")),
            sender: Some(display_name.to_string()),
            timestamp,
        }
    }

    /// A typing indicator, forwarded as-is apart from the stamp.
    pub fn typing(content: Option<String>, sender: Option<String>, timestamp: Timestamp) -> Self {
        Self {
            kind: EnvelopeKind::Typing,
            content,
            sender,
            timestamp,
        }
    }
}
