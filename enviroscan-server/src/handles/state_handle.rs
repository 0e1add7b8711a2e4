use axum::extract::State;
use axum::Json;
use enviroscan_api::DashboardView;

use crate::handles::DashboardState;

pub async fn get_state(State(state): State<DashboardState>) -> Json<DashboardView> {
    Json(state.current())
}
