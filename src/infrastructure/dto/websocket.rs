//! WebSocket frame DTOs.
//!
//! Field names follow the wire contract: camelCase keys, upper-snake frame
//! type tags, timestamps rendered as `yyyy-MM-dd HH:mm:ss`.

use serde::{Deserialize, Serialize};

/// Frame type tag for envelopes on the `public` topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FrameType {
    Chat,
    Join,
    Leave,
    Typing,
    System,
}

/// A chat/presence envelope as carried on the wire, in both directions.
///
/// On the inbound path `timestamp` is accepted but discarded: the
/// coordinator stamps its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeFrame {
    pub r#type: FrameType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Frame type tag for notifications on the `user-count` topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    UserJoined,
    UserLeft,
    UserListUpdate,
}

/// A connected-user count notification as carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountFrame {
    pub r#type: NotificationType,
    pub username: Option<String>,
    pub total_users: usize,
    pub timestamp: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_frame_wire_shape() {
        // given:
        let frame = EnvelopeFrame {
            r#type: FrameType::Chat,
            content: Some("hello".to_string()),
            sender: Some("alice".to_string()),
            timestamp: Some("2023-01-01 00:00:00".to_string()),
        };

        // when:
        let json = serde_json::to_string(&frame).unwrap();

        // then:
        assert_eq!(
            json,
            r#"{"type":"CHAT","content":"hello","sender":"alice","timestamp":"2023-01-01 00:00:00"}"#
        );
    }

    #[test]
    fn test_envelope_frame_parses_with_missing_optional_fields() {
        // given: a join frame without content or timestamp
        let json = r#"{"type":"JOIN","sender":"alice"}"#;

        // when:
        let frame: EnvelopeFrame = serde_json::from_str(json).unwrap();

        // then:
        assert_eq!(frame.r#type, FrameType::Join);
        assert_eq!(frame.sender.as_deref(), Some("alice"));
        assert_eq!(frame.content, None);
        assert_eq!(frame.timestamp, None);
    }

    #[test]
    fn test_count_frame_wire_shape() {
        // given:
        let frame = CountFrame {
            r#type: NotificationType::UserListUpdate,
            username: None,
            total_users: 2,
            timestamp: "2023-01-01 00:00:00".to_string(),
            message: "Connected users: 2".to_string(),
        };

        // when:
        let json = serde_json::to_string(&frame).unwrap();

        // then: camelCase keys, upper-snake tag
        assert_eq!(
            json,
            r#"{"type":"USER_LIST_UPDATE","username":null,"totalUsers":2,"timestamp":"2023-01-01 00:00:00","message":"Connected users: 2"}"#
        );
    }

    #[test]
    fn test_unknown_frame_type_is_rejected() {
        // given:
        let json = r#"{"type":"SHOUT","sender":"alice"}"#;

        // when:
        let result = serde_json::from_str::<EnvelopeFrame>(json);

        // then:
        assert!(result.is_err());
    }
}
