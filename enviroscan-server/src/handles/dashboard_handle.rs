use axum::extract::State;
use axum::response::Html;
use time::OffsetDateTime;

use crate::handles::DashboardState;
use crate::views::render_page;

pub async fn get_dashboard(State(state): State<DashboardState>) -> Html<String> {
    Html(render_page(&state.current(), OffsetDateTime::now_utc()))
}
