use std::sync::Arc;
use std::time::Duration;

use enviroscan_api::{Metric, SensorValues, TopicSet};
use rumqttc::{AsyncClient, ClientError, EventLoop, MqttOptions, QoS, Transport};
use time::OffsetDateTime;
use tokio::time::{interval, sleep};

use crate::settings::{Broker, Settings};
use crate::simulate::Simulator;

pub mod settings;
pub mod simulate;

const RETRY_DELAY: Duration = Duration::from_secs(1);

pub async fn run(settings: &Arc<Settings>) -> Result<(), ClientError> {
    tracing::info!("Publishing to: {} as {}", settings.broker.url(), settings.broker.client_id);

    let (client, event_loop) = AsyncClient::new(mqtt_options(&settings.broker), 10);
    tokio::spawn(drive(event_loop));

    let topics = TopicSet::new(settings.mock.fan);
    let mut simulator = Simulator::default();
    let mut ticker = interval(Duration::from_millis(settings.mock.interval_ms.max(1)));

    loop {
        ticker.tick().await;

        let values = simulator.step(day_fraction(OffsetDateTime::now_utc()), &mut rand::rng());
        publish_readings(&client, &topics, &values).await?;
    }
}

fn mqtt_options(broker: &Broker) -> MqttOptions {
    let mut options = MqttOptions::new(&broker.client_id, broker.url(), broker.port);
    options.set_keep_alive(Duration::from_secs(30));

    if !broker.username.is_empty() {
        options.set_credentials(&broker.username, &broker.password);
    }

    options.set_transport(if broker.secure {
        Transport::wss_with_default_config()
    } else {
        Transport::Ws
    });

    options
}

async fn drive(mut event_loop: EventLoop) {
    loop {
        if let Err(e) = event_loop.poll().await {
            tracing::error!("MQTT error: {}", e);
            sleep(RETRY_DELAY).await;
        }
    }
}

async fn publish_readings(
    client: &AsyncClient,
    topics: &TopicSet,
    values: &SensorValues,
) -> Result<(), ClientError> {
    for (topic, payload) in readings(topics, values) {
        tracing::debug!("Send: {} = {}", topic, payload);

        client.publish(topic, QoS::AtMostOnce, false, payload).await?;
    }

    Ok(())
}

/// One `(topic, payload)` pair per published metric.
pub fn readings(topics: &TopicSet, values: &SensorValues) -> Vec<(&'static str, String)> {
    topics
        .metrics()
        .iter()
        .map(|metric| (metric.topic(), format_payload(*metric, values.get(*metric))))
        .collect()
}

/// Plain decimal text, the fan as `0`/`1`.
pub fn format_payload(metric: Metric, value: f64) -> String {
    match metric {
        Metric::Fan => format!("{value:.0}"),
        _ => format!("{value:.1}"),
    }
}

/// Position within the UTC day, `0.0` at midnight.
pub fn day_fraction(at: OffsetDateTime) -> f64 {
    let seconds = at.hour() as u32 * 3600 + at.minute() as u32 * 60 + at.second() as u32;

    seconds as f64 / 86_400.0
}
