use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive};
use axum::response::Sse;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};

use crate::handles::DashboardState;

/// Streams every newly published view as a JSON event.
pub async fn sse_handler(
    State(state): State<DashboardState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = WatchStream::from_changes(state.views.clone())
        .filter_map(|view| match Event::default().json_data(&view) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::error!("Error encoding view: {}", e);
                None
            }
        })
        .map(Ok::<_, Infallible>);

    Sse::new(stream).keep_alive(KeepAlive::default())
}
