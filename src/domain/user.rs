//! Connected user record.

use std::hash::{Hash, Hasher};

use super::envelope::Timestamp;

/// A user currently connected to the relay.
///
/// Identity is defined solely by `connection_id`; display names are not
/// unique. A record lives exactly as long as it is present in the session
/// registry — absence from the registry means offline.
#[derive(Debug, Clone)]
pub struct ConnectedUser {
    pub display_name: String,
    pub connection_id: String,
    pub connected_at: Timestamp,
    pub online: bool,
}

impl ConnectedUser {
    pub fn new(
        display_name: impl Into<String>,
        connection_id: impl Into<String>,
        connected_at: Timestamp,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            connection_id: connection_id.into(),
            connected_at,
            online: true,
        }
    }
}

impl PartialEq for ConnectedUser {
    fn eq(&self, other: &Self) -> bool {
        self.connection_id == other.connection_id
    }
}

impl Eq for ConnectedUser {}

impl Hash for ConnectedUser {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.connection_id.hash(state);
    }
}
