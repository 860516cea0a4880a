mod websocket;

pub use websocket::{SubscriberChannel, WebSocketBroadcaster};
