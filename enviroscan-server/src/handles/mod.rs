mod dashboard_handle;
mod sse_handle;
mod state_handle;

pub use dashboard_handle::*;
pub use sse_handle::*;
pub use state_handle::*;

use enviroscan_api::DashboardView;
use tokio::sync::watch;

#[derive(Clone)]
pub struct DashboardState {
    pub views: watch::Receiver<DashboardView>,
}

impl DashboardState {
    pub fn current(&self) -> DashboardView {
        self.views.borrow().clone()
    }
}
