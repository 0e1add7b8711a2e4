use crate::metric::TopicSet;
use crate::reading::{parse_payload, LatestReading};
use crate::status::ConnectionStatus;
use crate::transport::{TransportClient, TransportListener};

/// Owns one transport connection, the latest readings and the connection
/// status for the lifetime of a dashboard session.
pub struct ConnectionManager<C> {
    client: C,
    topics: TopicSet,
    latest: LatestReading,
    status: ConnectionStatus,
    closed: bool,
}

impl<C: TransportClient> ConnectionManager<C> {
    /// Takes over a client whose connection attempt is already under way.
    pub fn new(client: C, topics: TopicSet) -> Self {
        Self {
            client,
            topics,
            latest: LatestReading::new(),
            status: ConnectionStatus::Disconnected,
            closed: false,
        }
    }

    pub fn latest(&self) -> &LatestReading {
        &self.latest
    }

    pub fn status(&self) -> &ConnectionStatus {
        &self.status
    }

    pub fn topics(&self) -> &TopicSet {
        &self.topics
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The broker refused one of the requested subscriptions.
    pub fn on_subscription_rejected(&mut self, reason: &str) {
        if self.closed {
            return;
        }

        tracing::error!("Subscription rejected: {}", reason);
        self.status = ConnectionStatus::SubscriptionFailed;
    }

    /// Closes the connection. Later calls and later transport callbacks are
    /// ignored.
    pub fn teardown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Err(e) = self.client.close() {
            tracing::warn!("Error closing connection: {}", e);
        }
    }
}

impl<C: TransportClient> TransportListener for ConnectionManager<C> {
    fn on_connected(&mut self) {
        if self.closed {
            return;
        }

        tracing::info!("Connected to MQTT broker");
        self.status = ConnectionStatus::Connected;

        let topics = self.topics.topics();
        match self.client.subscribe(&topics) {
            Ok(()) => tracing::debug!("Subscribe requested for {:?}", topics),
            Err(e) => {
                tracing::error!("Subscription error: {}", e);
                self.status = ConnectionStatus::SubscriptionFailed;
            }
        }
    }

    fn on_message(&mut self, topic: &str, payload: &[u8]) {
        if self.closed {
            return;
        }

        let Some(metric) = self.topics.resolve(topic) else {
            tracing::debug!("Ignoring message on {}", topic);
            return;
        };

        let value = parse_payload(payload);
        if value.is_nan() {
            tracing::warn!(
                "Non-numeric payload on {}: {:?}",
                topic,
                String::from_utf8_lossy(payload)
            );
        } else {
            tracing::debug!("Receive: {} = {}", topic, value);
        }

        self.latest.record(metric, value);
    }

    fn on_error(&mut self, message: &str) {
        if self.closed {
            return;
        }

        tracing::error!("MQTT error: {}", message);
        self.status = ConnectionStatus::Error(message.to_string());
    }

    fn on_reconnect(&mut self) {
        if self.closed {
            return;
        }

        tracing::info!("Reconnecting...");
        self.status = ConnectionStatus::Reconnecting;
    }

    fn on_closed(&mut self) {
        if self.closed {
            return;
        }

        tracing::info!("Disconnected");
        self.status = ConnectionStatus::Disconnected;
    }
}
