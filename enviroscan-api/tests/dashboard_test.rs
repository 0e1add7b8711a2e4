use enviroscan_api::{
    ConnectionStatus, Dashboard, ManualTimeProvider, Metric, TimeProvider, TopicSet,
    TransportListener, REFRESH_INTERVAL_MS,
};

use crate::common::stub_client::StubClient;

mod common;

fn mount(clock: &ManualTimeProvider) -> (Dashboard<StubClient>, StubClient) {
    let client = StubClient::new();
    let dashboard = Dashboard::mount(client.clone(), TopicSet::with_fan(), REFRESH_INTERVAL_MS, clock);

    (dashboard, client)
}

fn tick(dashboard: &mut Dashboard<StubClient>, clock: &ManualTimeProvider) {
    clock.advance(REFRESH_INTERVAL_MS);
    assert!(dashboard.poll_timer(clock));
}

#[test]
fn test_only_last_value_between_ticks_is_displayed() {
    let clock = ManualTimeProvider::new(0);
    let (mut dashboard, _) = mount(&clock);
    dashboard.on_connected();

    for payload in ["400", "420", "415.7"] {
        dashboard.on_message("enviroscan/co2", payload.as_bytes());
    }
    dashboard.on_message("enviroscan/pm25", b"3");
    dashboard.on_message("enviroscan/pm25", b"5");

    tick(&mut dashboard, &clock);

    let displayed = dashboard.displayed();
    assert_eq!(displayed.values.co2, 415.7);
    assert_eq!(displayed.values.pm25, 5.0);
    assert_eq!(displayed.trend.to_vec(), vec![5.0]);
}

#[test]
fn test_display_waits_for_tick() {
    let clock = ManualTimeProvider::new(0);
    let (mut dashboard, _) = mount(&clock);

    dashboard.on_message("enviroscan/temp", b"26.1");
    clock.advance(REFRESH_INTERVAL_MS - 1);

    assert!(!dashboard.poll_timer(&clock));
    assert_eq!(dashboard.displayed().values.temp, 0.0);
    assert_eq!(dashboard.latest().get(Metric::Temp), 26.1);

    clock.advance(1);
    assert!(dashboard.poll_timer(&clock));
    assert_eq!(dashboard.displayed().values.temp, 26.1);
}

#[test]
fn test_trend_keeps_last_ten_samples() {
    let clock = ManualTimeProvider::new(0);
    let (mut dashboard, _) = mount(&clock);

    for sample in 1..=15 {
        dashboard.on_message("enviroscan/pm25", sample.to_string().as_bytes());
        tick(&mut dashboard, &clock);
        assert!(dashboard.displayed().trend.len() <= 10);
    }

    let expected: Vec<f64> = (6..=15).map(f64::from).collect();
    assert_eq!(dashboard.displayed().trend.to_vec(), expected);
}

#[test]
fn test_status_follows_transport_events() {
    let clock = ManualTimeProvider::new(0);
    let (mut dashboard, client) = mount(&clock);
    assert_eq!(dashboard.status(), &ConnectionStatus::Disconnected);

    dashboard.on_connected();
    assert_eq!(dashboard.status(), &ConnectionStatus::Connected);
    assert_eq!(client.log.borrow().subscriptions.len(), 1);

    tick(&mut dashboard, &clock);
    assert_eq!(dashboard.status(), &ConnectionStatus::Connected);

    dashboard.on_error("connection reset by peer");
    assert_eq!(
        dashboard.status(),
        &ConnectionStatus::Error("connection reset by peer".into())
    );

    dashboard.on_reconnect();
    assert_eq!(dashboard.status(), &ConnectionStatus::Reconnecting);

    dashboard.on_connected();
    assert_eq!(client.log.borrow().subscriptions.len(), 2);

    dashboard.on_closed();
    assert_eq!(dashboard.status(), &ConnectionStatus::Disconnected);
}

#[test]
fn test_failing_subscribe_yields_subscription_failed() {
    let clock = ManualTimeProvider::new(0);
    let mut dashboard = Dashboard::mount(
        StubClient::failing_subscribe(),
        TopicSet::standard(),
        REFRESH_INTERVAL_MS,
        &clock,
    );

    dashboard.on_connected();

    assert_eq!(dashboard.status(), &ConnectionStatus::SubscriptionFailed);
    assert_eq!(dashboard.view().status_label, "Subscription failed");
}

#[test]
fn test_co2_payload_is_parsed_as_number() {
    let clock = ManualTimeProvider::new(0);
    let (mut dashboard, _) = mount(&clock);

    dashboard.on_message("enviroscan/co2", b"415.7");
    tick(&mut dashboard, &clock);

    assert_eq!(dashboard.displayed().values.co2, 415.7);
}

// Non-numeric payloads are displayed as NaN rather than rejected.
#[test]
fn test_non_numeric_payload_displays_nan() {
    let clock = ManualTimeProvider::new(0);
    let (mut dashboard, _) = mount(&clock);

    for metric in [Metric::Co2, Metric::Pm25, Metric::Temp, Metric::Humidity] {
        dashboard.on_message(metric.topic(), b"abc");
    }
    tick(&mut dashboard, &clock);

    let values = dashboard.displayed().values;
    assert!(values.co2.is_nan());
    assert!(values.pm25.is_nan());
    assert!(values.temp.is_nan());
    assert!(values.humidity.is_nan());
    assert!(dashboard.displayed().trend.latest().unwrap().is_nan());
}

#[test]
fn test_teardown_freezes_observable_state() {
    let clock = ManualTimeProvider::new(0);
    let (mut dashboard, client) = mount(&clock);
    dashboard.on_connected();
    dashboard.on_message("enviroscan/humidity", b"45");
    tick(&mut dashboard, &clock);

    let before = dashboard.view();
    let revision = dashboard.revision();

    dashboard.teardown();
    dashboard.teardown();
    assert_eq!(client.log.borrow().close_calls, 1);
    assert_eq!(dashboard.next_tick_ms(), None);

    dashboard.on_message("enviroscan/humidity", b"90");
    dashboard.on_error("late");
    dashboard.on_reconnect();
    dashboard.on_closed();
    dashboard.on_connected();
    dashboard.on_subscription_rejected("late");
    clock.advance(REFRESH_INTERVAL_MS * 5);
    assert!(!dashboard.poll_timer(&clock));

    assert_eq!(dashboard.view(), before);
    assert_eq!(dashboard.revision(), revision);
    assert_eq!(client.log.borrow().subscriptions.len(), 1);
}

#[test]
fn test_idle_tick_repeats_previous_pm25() {
    let clock = ManualTimeProvider::new(0);
    let (mut dashboard, _) = mount(&clock);

    dashboard.on_message("enviroscan/pm25", b"9.5");
    dashboard.on_message("enviroscan/co2", b"700");
    tick(&mut dashboard, &clock);
    let values = dashboard.displayed().values;

    tick(&mut dashboard, &clock);

    assert_eq!(dashboard.displayed().values, values);
    assert_eq!(dashboard.displayed().trend.to_vec(), vec![9.5, 9.5]);
}

#[test]
fn test_fan_topic_writes_fan_field() {
    let clock = ManualTimeProvider::new(0);
    let (mut dashboard, _) = mount(&clock);

    dashboard.on_message("enviroscan/humidity", b"52");
    dashboard.on_message("enviroscan/fan", b"1");
    tick(&mut dashboard, &clock);

    assert_eq!(dashboard.displayed().values.fan, 1.0);
    assert_eq!(dashboard.displayed().values.humidity, 52.0);
}

#[test]
fn test_revision_tracks_observable_changes() {
    let clock = ManualTimeProvider::new(0);
    let (mut dashboard, _) = mount(&clock);
    assert_eq!(dashboard.revision(), 0);

    dashboard.on_message("enviroscan/co2", b"500");
    assert_eq!(dashboard.revision(), 0);

    dashboard.on_connected();
    assert_eq!(dashboard.revision(), 1);
    dashboard.on_connected();
    assert_eq!(dashboard.revision(), 1);

    tick(&mut dashboard, &clock);
    assert_eq!(dashboard.revision(), 2);
    assert_eq!(dashboard.view().ticks, 1);
    assert_eq!(clock.uptime_ms(), REFRESH_INTERVAL_MS);
}
