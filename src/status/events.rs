//! Change notifications.
//!
//! Every mutation of the status manager publishes one [`ProbeEvent`]
//! immediately. [`EventBus`] fans events out over a broadcast channel.

use serde_json::{json, Value};
use tokio::sync::broadcast;

use crate::status::state::Status;

pub const TOPIC_STATUS: &str = "probe:status:update";
pub const TOPIC_IPV4_SUPPORTED: &str = "probe:isIPv4Supported:update";
pub const TOPIC_IPV6_SUPPORTED: &str = "probe:isIPv6Supported:update";

/// A state change published by the status manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeEvent {
    Status(Status),
    Ipv4Supported(bool),
    Ipv6Supported(bool),
}

impl ProbeEvent {
    pub fn topic(&self) -> &'static str {
        match self {
            ProbeEvent::Status(_) => TOPIC_STATUS,
            ProbeEvent::Ipv4Supported(_) => TOPIC_IPV4_SUPPORTED,
            ProbeEvent::Ipv6Supported(_) => TOPIC_IPV6_SUPPORTED,
        }
    }

    pub fn payload(&self) -> Value {
        match self {
            ProbeEvent::Status(status) => json!(status.as_str()),
            ProbeEvent::Ipv4Supported(v) | ProbeEvent::Ipv6Supported(v) => json!(v),
        }
    }
}

/// Destination for change notifications.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: ProbeEvent);
}

/// Broadcast-backed event sink.
///
/// Publishing never blocks; events are dropped when nobody subscribes and
/// slow subscribers observe `Lagged`.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ProbeEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProbeEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

impl EventSink for EventBus {
    fn publish(&self, event: ProbeEvent) {
        tracing::debug!(topic = event.topic(), payload = %event.payload(), "Publishing event");
        let _ = self.tx.send(event);
    }
}

/// Forward events from a bus to the log until the bus closes.
pub async fn log_events(mut rx: broadcast::Receiver<ProbeEvent>) {
    loop {
        match rx.recv().await {
            Ok(event) => {
                tracing::info!(topic = event.topic(), payload = %event.payload(), "Probe event");
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Event logger lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topics_and_payloads() {
        let e = ProbeEvent::Status(Status::PingTestFailed);
        assert_eq!(e.topic(), "probe:status:update");
        assert_eq!(e.payload(), json!("ping-test-failed"));

        let e = ProbeEvent::Ipv6Supported(true);
        assert_eq!(e.topic(), "probe:isIPv6Supported:update");
        assert_eq!(e.payload(), json!(true));
    }

    #[tokio::test]
    async fn test_bus_delivers_in_order() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        bus.publish(ProbeEvent::Status(Status::Ready));
        bus.publish(ProbeEvent::Ipv4Supported(true));

        assert_eq!(rx.recv().await.unwrap(), ProbeEvent::Status(Status::Ready));
        assert_eq!(rx.recv().await.unwrap(), ProbeEvent::Ipv4Supported(true));
    }
}
