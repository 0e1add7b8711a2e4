use crate::connection::ConnectionManager;
use crate::metric::TopicSet;
use crate::reading::LatestReading;
use crate::reconciler::ViewStateReconciler;
use crate::state::{DashboardView, DisplayedState};
use crate::status::ConnectionStatus;
use crate::time::{TickSchedule, TimeProvider};
use crate::transport::{TransportClient, TransportListener};
use crate::trend::TREND_CAPACITY;

pub const REFRESH_INTERVAL_MS: u64 = 10_000;

/// A mounted dashboard: one connection, one reconciler, one refresh timer.
///
/// Transport callbacks only touch the latest readings and the status. The
/// displayed values change exclusively through [`Dashboard::poll_timer`].
pub struct Dashboard<C> {
    connection: ConnectionManager<C>,
    reconciler: ViewStateReconciler,
    schedule: TickSchedule,
    revision: u64,
}

impl<C: TransportClient> Dashboard<C> {
    pub fn mount<T: TimeProvider>(
        client: C,
        topics: TopicSet,
        refresh_interval_ms: u64,
        clock: &T,
    ) -> Self {
        Self::with_trend_capacity(client, topics, refresh_interval_ms, TREND_CAPACITY, clock)
    }

    pub fn with_trend_capacity<T: TimeProvider>(
        client: C,
        topics: TopicSet,
        refresh_interval_ms: u64,
        trend_capacity: usize,
        clock: &T,
    ) -> Self {
        Self {
            connection: ConnectionManager::new(client, topics),
            reconciler: ViewStateReconciler::new(trend_capacity),
            schedule: TickSchedule::new(refresh_interval_ms, clock.uptime_ms()),
            revision: 0,
        }
    }

    /// Reconciles the view if the refresh deadline has passed.
    pub fn poll_timer<T: TimeProvider>(&mut self, clock: &T) -> bool {
        if !self.schedule.poll(clock.uptime_ms()) {
            return false;
        }

        self.reconciler.tick(self.connection.latest());
        self.revision += 1;
        true
    }

    /// Uptime at which the next refresh is due, `None` after teardown.
    pub fn next_tick_ms(&self) -> Option<u64> {
        self.schedule.next_due_ms()
    }

    pub fn on_subscription_rejected(&mut self, reason: &str) {
        self.track_status(|connection| connection.on_subscription_rejected(reason));
    }

    pub fn teardown(&mut self) {
        if self.is_torn_down() {
            return;
        }

        tracing::info!("Tearing down dashboard session");
        self.schedule.cancel();
        self.connection.teardown();
    }

    pub fn is_torn_down(&self) -> bool {
        self.connection.is_closed()
    }

    pub fn status(&self) -> &ConnectionStatus {
        self.connection.status()
    }

    pub fn latest(&self) -> &LatestReading {
        self.connection.latest()
    }

    pub fn displayed(&self) -> &DisplayedState {
        self.reconciler.displayed()
    }

    pub fn connection(&self) -> &ConnectionManager<C> {
        &self.connection
    }

    /// Bumped on every observable change: a status transition or a refresh.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn view(&self) -> DashboardView {
        DashboardView::new(
            self.connection.status(),
            self.connection.topics().metrics(),
            self.reconciler.displayed(),
            self.reconciler.ticks(),
        )
    }

    fn track_status(&mut self, event: impl FnOnce(&mut ConnectionManager<C>)) {
        let before = self.connection.status().clone();
        event(&mut self.connection);
        if *self.connection.status() != before {
            self.revision += 1;
        }
    }
}

impl<C: TransportClient> TransportListener for Dashboard<C> {
    fn on_connected(&mut self) {
        self.track_status(|connection| connection.on_connected());
    }

    fn on_message(&mut self, topic: &str, payload: &[u8]) {
        self.connection.on_message(topic, payload);
    }

    fn on_error(&mut self, message: &str) {
        self.track_status(|connection| connection.on_error(message));
    }

    fn on_reconnect(&mut self) {
        self.track_status(|connection| connection.on_reconnect());
    }

    fn on_closed(&mut self) {
        self.track_status(|connection| connection.on_closed());
    }
}
