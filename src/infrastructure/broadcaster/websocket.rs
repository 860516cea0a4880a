//! WebSocket-backed broadcast fan-out.
//!
//! The WebSocket itself is created in the UI layer; this implementation
//! manages each connection's outbound `UnboundedSender` together with the
//! topics it is subscribed to, and serializes domain frames to wire JSON at
//! publish time.
//!
//! Fan-out runs synchronously against the subscriber set held at publish
//! time. A failed delivery to one subscriber (a connection that has just
//! closed) is logged and does not prevent delivery to the rest.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use crate::domain::{Broadcaster, DeliveryError, OutboundFrame, Topic};
use crate::infrastructure::dto::conversion::frame_to_json;

/// Per-connection outbound message channel.
pub type SubscriberChannel = mpsc::UnboundedSender<String>;

struct Subscriber {
    sender: SubscriberChannel,
    topics: HashSet<Topic>,
}

/// Fan-out over the outbound channels of all connected WebSocket clients.
#[derive(Default)]
pub struct WebSocketBroadcaster {
    subscribers: Mutex<HashMap<String, Subscriber>>,
}

impl WebSocketBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection's outbound channel for the given topics.
    ///
    /// A second subscribe for the same connection id replaces the previous
    /// channel.
    pub async fn subscribe(
        &self,
        connection_id: impl Into<String>,
        topics: impl IntoIterator<Item = Topic>,
        sender: SubscriberChannel,
    ) {
        let connection_id = connection_id.into();
        let mut subscribers = self.subscribers.lock().await;
        subscribers.insert(
            connection_id.clone(),
            Subscriber {
                sender,
                topics: topics.into_iter().collect(),
            },
        );
        tracing::debug!("Connection '{}' subscribed to broadcast", connection_id);
    }

    /// Drop a connection's subscription. Idempotent.
    pub async fn unsubscribe(&self, connection_id: &str) {
        let mut subscribers = self.subscribers.lock().await;
        if subscribers.remove(connection_id).is_some() {
            tracing::debug!("Connection '{}' unsubscribed from broadcast", connection_id);
        }
    }

    /// Number of currently subscribed connections.
    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.lock().await.len()
    }
}

#[async_trait]
impl Broadcaster for WebSocketBroadcaster {
    async fn publish(&self, topic: Topic, frame: OutboundFrame) -> Result<(), DeliveryError> {
        let json = frame_to_json(&frame).map_err(|e| DeliveryError::Serialize(e.to_string()))?;

        let subscribers = self.subscribers.lock().await;
        for (connection_id, subscriber) in subscribers.iter() {
            if !subscriber.topics.contains(&topic) {
                continue;
            }
            // Delivery failures are isolated per subscriber.
            if let Err(e) = subscriber.sender.send(json.clone()) {
                tracing::warn!(
                    "Failed to deliver {:?} frame to connection '{}': {}",
                    topic,
                    connection_id,
                    e
                );
            } else {
                tracing::debug!("Delivered {:?} frame to connection '{}'", topic, connection_id);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CountNotification, Envelope, MessageBody, Timestamp};

    fn chat_frame(content: &str) -> OutboundFrame {
        OutboundFrame::Envelope(Envelope::chat(
            MessageBody::new(content).unwrap(),
            Some("alice".to_string()),
            Timestamp::new(1672531200000),
        ))
    }

    #[tokio::test]
    async fn test_publish_reaches_every_subscriber_of_the_topic() {
        // given: two subscribers of the public topic
        let broadcaster = WebSocketBroadcaster::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        broadcaster.subscribe("conn-1", [Topic::Public], tx1).await;
        broadcaster.subscribe("conn-2", [Topic::Public], tx2).await;

        // when:
        broadcaster
            .publish(Topic::Public, chat_frame("hello"))
            .await
            .unwrap();

        // then: both receive the serialized frame
        let json1 = rx1.recv().await.unwrap();
        let json2 = rx2.recv().await.unwrap();
        assert_eq!(json1, json2);
        assert!(json1.contains(r#""type":"CHAT""#));
        assert!(json1.contains(r#""content":"hello""#));
    }

    #[tokio::test]
    async fn test_publish_filters_by_topic() {
        // given: one subscriber per topic
        let broadcaster = WebSocketBroadcaster::new();
        let (tx_public, mut rx_public) = mpsc::unbounded_channel();
        let (tx_count, mut rx_count) = mpsc::unbounded_channel();
        broadcaster
            .subscribe("conn-1", [Topic::Public], tx_public)
            .await;
        broadcaster
            .subscribe("conn-2", [Topic::UserCount], tx_count)
            .await;

        // when: a count notification goes out
        broadcaster
            .publish(
                Topic::UserCount,
                OutboundFrame::Count(CountNotification::user_list_update(
                    1,
                    Timestamp::new(1672531200000),
                )),
            )
            .await
            .unwrap();

        // then: only the user-count subscriber receives it
        let json = rx_count.recv().await.unwrap();
        assert!(json.contains(r#""type":"USER_LIST_UPDATE""#));
        assert!(rx_public.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_dead_subscriber_does_not_block_the_rest() {
        // given: conn-1's receiver is already gone
        let broadcaster = WebSocketBroadcaster::new();
        let (tx1, rx1) = mpsc::unbounded_channel();
        drop(rx1);
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        broadcaster.subscribe("conn-1", [Topic::Public], tx1).await;
        broadcaster.subscribe("conn-2", [Topic::Public], tx2).await;

        // when:
        let result = broadcaster.publish(Topic::Public, chat_frame("hello")).await;

        // then: publish succeeds and conn-2 still receives the frame
        assert!(result.is_ok());
        assert!(rx2.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_publish_with_no_subscribers_is_a_no_op() {
        // given:
        let broadcaster = WebSocketBroadcaster::new();

        // when:
        let result = broadcaster.publish(Topic::Public, chat_frame("hello")).await;

        // then:
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_delivery() {
        // given:
        let broadcaster = WebSocketBroadcaster::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        broadcaster
            .subscribe("conn-1", [Topic::Public, Topic::UserCount], tx)
            .await;
        assert_eq!(broadcaster.subscriber_count().await, 1);

        // when:
        broadcaster.unsubscribe("conn-1").await;
        broadcaster
            .publish(Topic::Public, chat_frame("hello"))
            .await
            .unwrap();

        // then:
        assert_eq!(broadcaster.subscriber_count().await, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unsubscribe_is_idempotent() {
        // given:
        let broadcaster = WebSocketBroadcaster::new();

        // when: unsubscribing a connection that never subscribed
        broadcaster.unsubscribe("ghost").await;

        // then: nothing to assert beyond not panicking
        assert_eq!(broadcaster.subscriber_count().await, 0);
    }
}
