use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;

use crate::models::{Booking, Event, NewBooking};
use crate::state::AppState;
use crate::utils::error::{AppError, Result};
use crate::views::{self, Notice};

/// Number of cards on the home page
pub const FEATURED_EVENTS: usize = 6;

#[derive(Debug, Default, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub email: String,
}

/// GET /
pub async fn home(State(state): State<AppState>) -> Result<Html<String>> {
    let events = state.db.fetch_events(FEATURED_EVENTS).await?;
    Ok(Html(views::home_page(&events, &state.analytics)))
}

/// GET /events/:slug
pub async fn event_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response> {
    match find_event(&state, &slug).await? {
        Some(event) => render_event(&state, &event, None, StatusCode::OK).await,
        None => Ok(not_found_response(&state)),
    }
}

/// POST /events/:slug/book
pub async fn book_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    form: Result<Form<BookingForm>, FormRejection>,
) -> Result<Response> {
    let Some(event) = find_event(&state, &slug).await? else {
        return Ok(not_found_response(&state));
    };

    // An unreadable form books nobody and is rejected as a bad email
    let email = form.map(|Form(form)| form.email).unwrap_or_default();
    let data = NewBooking {
        event_id: event.id.clone(),
        email,
    };

    match Booking::create(&state.db, data).await {
        Ok(_) => render_event(&state, &event, Some(Notice::Booked), StatusCode::CREATED).await,
        Err(AppError::ValidationError(reason)) => {
            render_event(
                &state,
                &event,
                Some(Notice::Rejected(reason)),
                StatusCode::BAD_REQUEST,
            )
            .await
        }
        Err(err) => Err(err),
    }
}

/// Fallback for unknown paths
pub async fn not_found(State(state): State<AppState>) -> Response {
    not_found_response(&state)
}

async fn find_event(state: &AppState, slug: &str) -> Result<Option<Event>> {
    match state.db.fetch_event_by_slug(slug).await {
        Ok(event) => Ok(Some(event)),
        Err(AppError::NotFound(_)) => Ok(None),
        Err(err) => Err(err),
    }
}

async fn render_event(
    state: &AppState,
    event: &Event,
    notice: Option<Notice>,
    status: StatusCode,
) -> Result<Response> {
    let bookings = state.db.count_bookings_by_event(&event.id).await?;
    let page = views::event_page(event, bookings, notice.as_ref(), &state.analytics);
    Ok((status, Html(page)).into_response())
}

fn not_found_response(state: &AppState) -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(views::not_found_page(&state.analytics)),
    )
        .into_response()
}
