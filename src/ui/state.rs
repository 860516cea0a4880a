//! Shared application state for the transport layer.

use std::sync::Arc;

use crate::domain::SessionRegistry;
use crate::infrastructure::broadcaster::WebSocketBroadcaster;
use crate::usecase::ChatCoordinator;

/// State handed to every handler. Constructed once at process start; the
/// registry is injected rather than held as a hidden static singleton.
pub struct AppState {
    pub coordinator: ChatCoordinator,
    pub registry: Arc<dyn SessionRegistry>,
    pub broadcaster: Arc<WebSocketBroadcaster>,
}
