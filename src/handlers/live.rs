//! Server-sent snapshot streams. A subscriber receives the current snapshot
//! on connect and a fresh full result set after every write; dropping the
//! connection drops the subscription (acquire-on-enter, release-on-exit).

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use serde::Serialize;
use tokio_stream::{wrappers::WatchStream, Stream, StreamExt};

use crate::{config::AppState, live::Snapshot};

fn snapshot_event<T: Serialize>(snapshot: Snapshot<T>) -> Event {
    match snapshot {
        // Outage is its own event type; clients must not mistake it for an
        // empty collection.
        Snapshot::Unavailable => Event::default().event("unavailable").data("{}"),
        Snapshot::Ready(data) => Event::default()
            .event("snapshot")
            .json_data(data.as_ref())
            .unwrap_or_else(|e| {
                tracing::error!("snapshot serialization failed: {}", e);
                Event::default().event("unavailable").data("{}")
            }),
    }
}

#[utoipa::path(
    get,
    path = "/api/live/sales",
    tag = "Live",
    responses((status = 200, description = "SSE stream of full sales snapshots")),
    security(("api_jwt" = []))
)]
pub async fn sales_stream(
    State(app_state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = WatchStream::new(app_state.hub.subscribe_sales())
        .map(|snapshot| Ok(snapshot_event(snapshot)));
    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[utoipa::path(
    get,
    path = "/api/live/stock",
    tag = "Live",
    responses((status = 200, description = "SSE stream of full stock snapshots")),
    security(("api_jwt" = []))
)]
pub async fn stock_stream(
    State(app_state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = WatchStream::new(app_state.hub.subscribe_stock())
        .map(|snapshot| Ok(snapshot_event(snapshot)));
    Sse::new(stream).keep_alive(KeepAlive::default())
}
