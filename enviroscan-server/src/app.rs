use axum::routing::get;
use axum::Router;
use enviroscan_api::DashboardView;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handles::*;

pub fn create_app(views: watch::Receiver<DashboardView>) -> Router {
    let api = Router::new()
        .route("/state", get(get_state))
        .route("/events", get(sse_handler));

    Router::new()
        .route("/", get(get_dashboard))
        .nest("/api", api)
        .with_state(DashboardState { views })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
