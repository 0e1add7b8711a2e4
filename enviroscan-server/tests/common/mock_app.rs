use std::sync::{Arc, Mutex};

use axum::Router;
use enviroscan_api::{
    Dashboard, DashboardView, ManualTimeProvider, TopicSet, TransportClient, TransportError,
    REFRESH_INTERVAL_MS,
};
use enviroscan_server::app::create_app;
use tokio::sync::watch;

#[derive(Debug, Default)]
pub struct ClientLog {
    pub subscriptions: Vec<Vec<String>>,
    pub close_calls: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MockClient {
    pub log: Arc<Mutex<ClientLog>>,
}

impl TransportClient for MockClient {
    fn subscribe(&mut self, topics: &[&str]) -> Result<(), TransportError> {
        self.log
            .lock()
            .unwrap()
            .subscriptions
            .push(topics.iter().map(|topic| topic.to_string()).collect());
        Ok(())
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.log.lock().unwrap().close_calls += 1;
        Ok(())
    }
}

pub struct MockApp {
    pub router: Router,
    pub dashboard: Dashboard<MockClient>,
    pub clock: ManualTimeProvider,
    pub views: watch::Sender<DashboardView>,
}

impl MockApp {
    pub fn new() -> Self {
        Self::with_topics(TopicSet::with_fan())
    }

    pub fn with_topics(topics: TopicSet) -> Self {
        let clock = ManualTimeProvider::new(0);
        let dashboard = Dashboard::mount(MockClient::default(), topics, REFRESH_INTERVAL_MS, &clock);
        let (views, receiver) = watch::channel(dashboard.view());

        Self {
            router: create_app(receiver),
            dashboard,
            clock,
            views,
        }
    }

    /// Advances to the next refresh and publishes the resulting view.
    pub fn tick(&mut self) {
        self.clock.advance(REFRESH_INTERVAL_MS);
        self.dashboard.poll_timer(&self.clock);
        self.publish();
    }

    pub fn publish(&self) {
        self.views.send_replace(self.dashboard.view());
    }
}
