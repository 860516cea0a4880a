//! HTTP and WebSocket request handlers.

mod http;
mod websocket;

pub use http::{health_check, list_users};
pub use websocket::websocket_handler;
