use std::future;
use std::time::Duration;

use enviroscan_api::{Dashboard, DashboardView, TopicSet, TransportClient};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::configs::settings::Settings;
use crate::services::clock::TokioTimeProvider;
use crate::services::connection_service::{establish, MqttTransport, TransportEvent};

const PUMP_DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

enum Step {
    Shutdown,
    Tick,
    Transport(TransportEvent),
    TransportFinished,
}

/// Single owner of the dashboard state. Transport events and refresh
/// deadlines are handled one at a time on this task; renderers only see the
/// snapshots published on the watch channel.
pub struct Session<C> {
    dashboard: Dashboard<C>,
    events: mpsc::Receiver<TransportEvent>,
    clock: TokioTimeProvider,
    views: watch::Sender<DashboardView>,
}

impl<C: TransportClient + Send + 'static> Session<C> {
    pub fn new(
        client: C,
        topics: TopicSet,
        refresh_interval_ms: u64,
        events: mpsc::Receiver<TransportEvent>,
    ) -> (Self, watch::Receiver<DashboardView>) {
        let clock = TokioTimeProvider::new();
        let dashboard = Dashboard::mount(client, topics, refresh_interval_ms, &clock);
        let (views, receiver) = watch::channel(dashboard.view());

        let session = Self {
            dashboard,
            events,
            clock,
            views,
        };

        (session, receiver)
    }

    pub fn spawn(self, pump: Option<JoinHandle<()>>) -> SessionHandle {
        let (shutdown, shutdown_receiver) = oneshot::channel();
        let task = tokio::spawn(self.run(shutdown_receiver));

        SessionHandle {
            shutdown: Some(shutdown),
            task,
            pump,
        }
    }

    async fn run(mut self, mut shutdown: oneshot::Receiver<()>) {
        let mut transport_open = true;

        loop {
            let revision = self.dashboard.revision();
            let tick_at = self
                .dashboard
                .next_tick_ms()
                .map(|uptime_ms| self.clock.instant_at(uptime_ms));

            let step = tokio::select! {
                _ = &mut shutdown => Step::Shutdown,
                _ = sleep_until(tick_at) => Step::Tick,
                event = self.events.recv(), if transport_open => match event {
                    Some(event) => Step::Transport(event),
                    None => Step::TransportFinished,
                },
            };

            match step {
                Step::Shutdown => break,
                Step::Tick => {
                    self.dashboard.poll_timer(&self.clock);
                }
                Step::Transport(event) => event.deliver(&mut self.dashboard),
                Step::TransportFinished => {
                    tracing::warn!("MQTT event loop stopped");
                    transport_open = false;
                }
            }

            if self.dashboard.revision() != revision {
                self.views.send_replace(self.dashboard.view());
            }
        }

        self.dashboard.teardown();
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => future::pending().await,
    }
}

/// Running session. Dropping the handle stops the session without waiting
/// for the connection to close.
pub struct SessionHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
    pump: Option<JoinHandle<()>>,
}

impl SessionHandle {
    /// Connects to the configured broker and starts the session.
    pub fn start(settings: &Settings) -> (Self, watch::Receiver<DashboardView>) {
        let (client, events, pump) = establish(&settings.broker);
        let (session, views) = Session::<MqttTransport>::new(
            client,
            TopicSet::new(settings.dashboard.fan),
            settings.dashboard.refresh_interval_ms,
            events,
        );

        (session.spawn(Some(pump)), views)
    }

    /// Cancels the refresh timer, closes the connection and waits for the
    /// session to stop.
    pub async fn teardown(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }

        if let Err(e) = (&mut self.task).await {
            tracing::error!("Dashboard session failed: {}", e);
        }

        if let Some(mut pump) = self.pump.take() {
            if time::timeout(PUMP_DRAIN_TIMEOUT, &mut pump).await.is_err() {
                pump.abort();
            }
        }
    }
}
