use std::time::Duration;

use enviroscan_api::{Dashboard, TransportClient, TransportError, TransportListener};
use rumqttc::{
    AsyncClient, ConnectReturnCode, ConnectionError, Event, EventLoop, MqttOptions, Outgoing,
    Packet, QoS, SubscribeFilter, SubscribeReasonCode, Transport,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use uuid::Uuid;

use crate::configs::settings::Broker;

const REQUEST_CAPACITY: usize = 10;
const EVENT_CAPACITY: usize = 100;

/// Lifecycle and message events forwarded from the MQTT event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    Connected,
    SubscriptionRejected(String),
    Message { topic: String, payload: Vec<u8> },
    Error(String),
    Reconnecting,
    Closed,
}

impl TransportEvent {
    /// Maps an MQTT notification to a dashboard event, if it is one.
    pub fn from_notification(event: &Event) -> Option<Self> {
        match event {
            Event::Incoming(Packet::ConnAck(ack)) => match &ack.code {
                ConnectReturnCode::Success => Some(TransportEvent::Connected),
                code => Some(TransportEvent::Error(format!("Connection refused: {code:?}"))),
            },
            Event::Incoming(Packet::SubAck(ack)) => {
                let rejected = ack
                    .return_codes
                    .iter()
                    .filter(|code| matches!(code, SubscribeReasonCode::Failure))
                    .count();

                (rejected > 0).then(|| {
                    TransportEvent::SubscriptionRejected(format!(
                        "{rejected} of {} topics rejected by broker",
                        ack.return_codes.len()
                    ))
                })
            }
            Event::Incoming(Packet::Publish(publish)) => Some(TransportEvent::Message {
                topic: publish.topic.clone(),
                payload: publish.payload.to_vec(),
            }),
            Event::Incoming(Packet::Disconnect) => Some(TransportEvent::Closed),
            _ => None,
        }
    }

    pub fn deliver<C: TransportClient>(self, dashboard: &mut Dashboard<C>) {
        match self {
            TransportEvent::Connected => dashboard.on_connected(),
            TransportEvent::SubscriptionRejected(reason) => {
                dashboard.on_subscription_rejected(&reason)
            }
            TransportEvent::Message { topic, payload } => dashboard.on_message(&topic, &payload),
            TransportEvent::Error(message) => dashboard.on_error(&message),
            TransportEvent::Reconnecting => dashboard.on_reconnect(),
            TransportEvent::Closed => dashboard.on_closed(),
        }
    }
}

/// [`TransportClient`] backed by a rumqttc client handle.
pub struct MqttTransport {
    client: AsyncClient,
}

impl TransportClient for MqttTransport {
    fn subscribe(&mut self, topics: &[&str]) -> Result<(), TransportError> {
        let filters = topics
            .iter()
            .map(|topic| SubscribeFilter::new(topic.to_string(), QoS::AtMostOnce));

        self.client
            .try_subscribe_many(filters)
            .map_err(|e| TransportError::Subscribe(e.to_string()))
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.client
            .try_disconnect()
            .map_err(|e| TransportError::Close(e.to_string()))
    }
}

pub fn connect_url(broker: &Broker) -> String {
    match (broker.websocket, broker.secure) {
        (true, true) => format!("wss://{}:{}{}", broker.host, broker.port, broker.path),
        (true, false) => format!("ws://{}:{}{}", broker.host, broker.port, broker.path),
        (false, true) => format!("mqtts://{}:{}", broker.host, broker.port),
        (false, false) => format!("mqtt://{}:{}", broker.host, broker.port),
    }
}

/// A fresh client identifier, unique per session.
pub fn generate_client_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();

    format!("{prefix}{}", &suffix[..12])
}

pub fn mqtt_options(broker: &Broker, client_id: &str) -> MqttOptions {
    // Websocket transports take the full URL in place of the host.
    let address = if broker.websocket {
        connect_url(broker)
    } else {
        broker.host.clone()
    };

    let mut options = MqttOptions::new(client_id, address, broker.port);
    options.set_keep_alive(Duration::from_secs(broker.keep_alive_secs.max(1)));

    if !broker.username.is_empty() {
        options.set_credentials(&broker.username, &broker.password);
    }

    options.set_transport(match (broker.websocket, broker.secure) {
        (true, true) => Transport::wss_with_default_config(),
        (true, false) => Transport::Ws,
        (false, true) => Transport::tls_with_default_config(),
        (false, false) => Transport::Tcp,
    });

    options
}

/// Applies the configured connect timeout to the event loop. rumqttc bounds
/// each connection attempt itself, in whole seconds.
pub fn apply_connect_timeout(event_loop: &mut EventLoop, broker: &Broker) {
    let mut network = event_loop.network_options();
    network.set_connection_timeout(broker.connect_timeout_ms.div_ceil(1000).max(1));

    event_loop.set_network_options(network);
}

/// Opens the broker connection and starts forwarding its events.
///
/// The returned receiver yields every [`TransportEvent`] in arrival order; the
/// task ends once the client disconnects or the receiver is dropped.
pub fn establish(broker: &Broker) -> (MqttTransport, mpsc::Receiver<TransportEvent>, JoinHandle<()>) {
    let client_id = generate_client_id(&broker.client_id_prefix);
    tracing::info!("Connecting to: {} as {}", connect_url(broker), client_id);

    let (client, mut event_loop) = AsyncClient::new(mqtt_options(broker, &client_id), REQUEST_CAPACITY);
    apply_connect_timeout(&mut event_loop, broker);

    let (sender, receiver) = mpsc::channel(EVENT_CAPACITY);

    let pump = tokio::spawn(pump_events(
        event_loop,
        sender,
        Duration::from_millis(broker.reconnect_period_ms),
        broker.connect_timeout_ms,
    ));

    (MqttTransport { client }, receiver, pump)
}

fn describe_failure(error: &ConnectionError, connect_timeout_ms: u64) -> String {
    match error {
        ConnectionError::NetworkTimeout => {
            format!("Connection timed out after {connect_timeout_ms} ms")
        }
        e => e.to_string(),
    }
}

async fn pump_events(
    mut event_loop: EventLoop,
    sender: mpsc::Sender<TransportEvent>,
    reconnect_period: Duration,
    connect_timeout_ms: u64,
) {
    let mut connected = false;

    loop {
        let forwarded = match event_loop.poll().await {
            Ok(Event::Outgoing(Outgoing::Disconnect)) => {
                let _ = sender.send(TransportEvent::Closed).await;
                break;
            }
            Ok(event) => match TransportEvent::from_notification(&event) {
                Some(event) => {
                    match event {
                        TransportEvent::Connected => connected = true,
                        TransportEvent::Closed => connected = false,
                        _ => {}
                    }
                    sender.send(event).await
                }
                None => Ok(()),
            },
            Err(e) => {
                // A dropped session reads as a close, failures to connect as errors.
                let failure = if connected {
                    tracing::warn!("Connection lost: {}", e);
                    TransportEvent::Closed
                } else {
                    TransportEvent::Error(describe_failure(&e, connect_timeout_ms))
                };
                connected = false;

                if sender.send(failure).await.is_err() {
                    break;
                }

                time::sleep(reconnect_period).await;
                sender.send(TransportEvent::Reconnecting).await
            }
        };

        if forwarded.is_err() {
            tracing::debug!("Event receiver dropped, stopping MQTT event loop");
            break;
        }
    }
}
