//! Conversion logic between DTOs and domain types.

use crate::domain::{
    ConnectedUser, CountNotification, Envelope, EnvelopeKind, NotificationKind, OutboundFrame,
    RawEnvelope,
};

use super::http::UserInfo;
use super::websocket::{CountFrame, EnvelopeFrame, FrameType, NotificationType};

// ========================================
// DTO → Domain
// ========================================

impl From<FrameType> for EnvelopeKind {
    fn from(frame_type: FrameType) -> Self {
        match frame_type {
            FrameType::Chat => EnvelopeKind::Chat,
            FrameType::Join => EnvelopeKind::Join,
            FrameType::Leave => EnvelopeKind::Leave,
            FrameType::Typing => EnvelopeKind::Typing,
            FrameType::System => EnvelopeKind::System,
        }
    }
}

impl From<EnvelopeFrame> for RawEnvelope {
    /// The client-supplied timestamp is dropped here; the coordinator stamps
    /// its own at processing time.
    fn from(frame: EnvelopeFrame) -> Self {
        Self {
            kind: frame.r#type.into(),
            content: frame.content,
            sender: frame.sender,
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<EnvelopeKind> for FrameType {
    fn from(kind: EnvelopeKind) -> Self {
        match kind {
            EnvelopeKind::Chat => FrameType::Chat,
            EnvelopeKind::Join => FrameType::Join,
            EnvelopeKind::Leave => FrameType::Leave,
            EnvelopeKind::Typing => FrameType::Typing,
            EnvelopeKind::System => FrameType::System,
        }
    }
}

impl From<&Envelope> for EnvelopeFrame {
    fn from(envelope: &Envelope) -> Self {
        Self {
            r#type: envelope.kind.into(),
            content: envelope.content.clone(),
            sender: envelope.sender.clone(),
            timestamp: Some(envelope.timestamp.format_wire()),
        }
    }
}

impl From<NotificationKind> for NotificationType {
    fn from(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::UserJoined => NotificationType::UserJoined,
            NotificationKind::UserLeft => NotificationType::UserLeft,
            NotificationKind::UserListUpdate => NotificationType::UserListUpdate,
        }
    }
}

impl From<&CountNotification> for CountFrame {
    fn from(notification: &CountNotification) -> Self {
        Self {
            r#type: notification.kind().into(),
            username: notification.username().map(str::to_string),
            total_users: notification.total_users(),
            timestamp: notification.timestamp().format_wire(),
            message: notification.message().to_string(),
        }
    }
}

impl From<&ConnectedUser> for UserInfo {
    fn from(user: &ConnectedUser) -> Self {
        Self {
            display_name: user.display_name.clone(),
            connection_id: user.connection_id.clone(),
            connected_at: user.connected_at.format_wire(),
            online: user.online,
        }
    }
}

/// Serialize an outbound frame to its wire JSON.
pub fn frame_to_json(frame: &OutboundFrame) -> serde_json::Result<String> {
    match frame {
        OutboundFrame::Envelope(envelope) => serde_json::to_string(&EnvelopeFrame::from(envelope)),
        OutboundFrame::Count(notification) => {
            serde_json::to_string(&CountFrame::from(notification))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageBody, Timestamp};

    #[test]
    fn test_inbound_frame_to_raw_envelope_drops_client_timestamp() {
        // given: a frame carrying a client-chosen timestamp
        let frame = EnvelopeFrame {
            r#type: FrameType::Chat,
            content: Some("hello".to_string()),
            sender: Some("alice".to_string()),
            timestamp: Some("1999-12-31 23:59:59".to_string()),
        };

        // when:
        let raw: RawEnvelope = frame.into();

        // then: kind and fields carried over, timestamp gone
        assert_eq!(raw.kind, EnvelopeKind::Chat);
        assert_eq!(raw.content.as_deref(), Some("hello"));
        assert_eq!(raw.sender.as_deref(), Some("alice"));
    }

    #[test]
    fn test_envelope_to_wire_json() {
        // given: 2023-01-01 00:00:00 UTC
        let envelope = Envelope::chat(
            MessageBody::new("hello").unwrap(),
            Some("alice".to_string()),
            Timestamp::new(1672531200000),
        );

        // when:
        let json = frame_to_json(&OutboundFrame::Envelope(envelope)).unwrap();

        // then:
        assert_eq!(
            json,
            r#"{"type":"CHAT","content":"hello","sender":"alice","timestamp":"2023-01-01 00:00:00"}"#
        );
    }

    #[test]
    fn test_count_notification_to_wire_json() {
        // given:
        let notification = CountNotification::user_list_update(1, Timestamp::new(1672531200000));

        // when:
        let json = frame_to_json(&OutboundFrame::Count(notification)).unwrap();

        // then:
        assert_eq!(
            json,
            r#"{"type":"USER_LIST_UPDATE","username":null,"totalUsers":1,"timestamp":"2023-01-01 00:00:00","message":"Connected users: 1"}"#
        );
    }

    #[test]
    fn test_connected_user_to_user_info() {
        // given:
        let user = ConnectedUser::new("alice", "conn-1", Timestamp::new(1672531200000));

        // when:
        let info = UserInfo::from(&user);

        // then:
        assert_eq!(info.display_name, "alice");
        assert_eq!(info.connection_id, "conn-1");
        assert_eq!(info.connected_at, "2023-01-01 00:00:00");
        assert!(info.online);
    }
}
