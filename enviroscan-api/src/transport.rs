/// A request the transport client refused to queue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Subscribe request failed: {0}")]
    Subscribe(String),

    #[error("Close request failed: {0}")]
    Close(String),
}

/// Outbound commands issued to the MQTT client.
pub trait TransportClient {
    fn subscribe(&mut self, topics: &[&str]) -> Result<(), TransportError>;

    fn close(&mut self) -> Result<(), TransportError>;
}

/// Lifecycle and message callbacks emitted by the MQTT client. Each call runs
/// to completion before the next one is delivered.
pub trait TransportListener {
    fn on_connected(&mut self);

    fn on_message(&mut self, topic: &str, payload: &[u8]);

    fn on_error(&mut self, message: &str);

    fn on_reconnect(&mut self);

    fn on_closed(&mut self);
}
