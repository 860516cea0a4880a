//! Connection count notifications for the secondary broadcast topic.

use super::envelope::Timestamp;

/// Kind of a [`CountNotification`].
///
/// Only `UserListUpdate` is produced on the broadcast path today; the
/// per-user variants are reserved for dedicated join/leave notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    UserJoined,
    UserLeft,
    UserListUpdate,
}

/// A notification about the connected-user population.
///
/// Immutable after construction: the human-readable `message` is computed
/// exactly once from the other fields, so it can never diverge from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountNotification {
    kind: NotificationKind,
    username: Option<String>,
    total_users: usize,
    timestamp: Timestamp,
    message: String,
}

impl CountNotification {
    pub fn new(
        kind: NotificationKind,
        username: Option<String>,
        total_users: usize,
        timestamp: Timestamp,
    ) -> Self {
        let message = Self::build_message(kind, username.as_deref(), total_users);
        Self {
            kind,
            username,
            total_users,
            timestamp,
            message,
        }
    }

    /// The notification broadcast after every registry mutation.
    pub fn user_list_update(total_users: usize, timestamp: Timestamp) -> Self {
        Self::new(NotificationKind::UserListUpdate, None, total_users, timestamp)
    }

    /// Deterministic rendering of `(kind, username, total_users)`.
    fn build_message(kind: NotificationKind, username: Option<&str>, total_users: usize) -> String {
        match kind {
            NotificationKind::UserJoined => {
                format!("{} joined the chat", username.unwrap_or_default())
            }
            NotificationKind::UserLeft => {
                format!("{} left the chat", username.unwrap_or_default())
            }
            NotificationKind::UserListUpdate => format!("Connected users: {total_users}"),
        }
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn total_users(&self) -> usize {
        self.total_users
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_list_update_message() {
        // when:
        let notification = CountNotification::user_list_update(3, Timestamp::new(1000));

        // then:
        assert_eq!(notification.kind(), NotificationKind::UserListUpdate);
        assert_eq!(notification.total_users(), 3);
        assert_eq!(notification.username(), None);
        assert_eq!(notification.message(), "Connected users: 3");
    }

    #[test]
    fn test_message_matches_fields_for_every_kind() {
        // given: the same fields passed through each constructor path
        let cases = [
            (
                NotificationKind::UserJoined,
                Some("alice".to_string()),
                "alice joined the chat",
            ),
            (
                NotificationKind::UserLeft,
                Some("bob".to_string()),
                "bob left the chat",
            ),
            (NotificationKind::UserListUpdate, None, "Connected users: 7"),
        ];

        for (kind, username, expected) in cases {
            // when:
            let notification = CountNotification::new(kind, username, 7, Timestamp::new(1000));

            // then: message is the deterministic rendering of the other fields
            assert_eq!(notification.message(), expected);
        }
    }

    #[test]
    fn test_message_is_stable_across_equal_constructions() {
        // given: two notifications built from identical fields
        let a = CountNotification::user_list_update(0, Timestamp::new(42));
        let b = CountNotification::user_list_update(0, Timestamp::new(42));

        // then:
        assert_eq!(a, b);
        assert_eq!(a.message(), "Connected users: 0");
    }
}
