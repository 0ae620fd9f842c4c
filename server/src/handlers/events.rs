use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::{Event, NewEvent};
use crate::state::AppState;
use crate::utils::error::Result;
use crate::utils::response::{created, success};

const DEFAULT_PAGE_SIZE: usize = 20;
const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize)]
struct BookingCount {
    count: u64,
}

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Response> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let events = state.db.fetch_events(limit).await?;
    Ok(success(events, "Events retrieved successfully"))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<NewEvent>, JsonRejection>,
) -> Result<Response> {
    let Json(data) = payload?;
    let event = Event::create(&state.db, data).await?;
    Ok(created(event, "Event created successfully"))
}

/// GET /api/events/:slug
pub async fn get_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response> {
    let event = state.db.fetch_event_by_slug(&slug).await?;
    Ok(success(event, "Event retrieved successfully"))
}

/// GET /api/events/:slug/bookings/count
pub async fn count_event_bookings(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response> {
    let event = state.db.fetch_event_by_slug(&slug).await?;
    let count = state.db.count_bookings_by_event(&event.id).await?;
    Ok(success(BookingCount { count }, "Booking count retrieved successfully"))
}
