pub mod connection;
pub mod dashboard;
pub mod metric;
pub mod reading;
pub mod reconciler;
pub mod state;
pub mod status;
pub mod time;
pub mod transport;
pub mod trend;

pub use connection::ConnectionManager;
pub use dashboard::{Dashboard, REFRESH_INTERVAL_MS};
pub use metric::{Metric, TopicSet, TOPIC_PREFIX};
pub use reading::{parse_payload, LatestReading, SensorValues};
pub use reconciler::ViewStateReconciler;
pub use state::{DashboardView, DisplayedState};
pub use status::ConnectionStatus;
pub use time::{ManualTimeProvider, TickSchedule, TimeProvider};
pub use transport::{TransportClient, TransportError, TransportListener};
pub use trend::{TrendBuffer, TREND_CAPACITY};
