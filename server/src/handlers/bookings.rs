use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;

use crate::models::{Booking, NewBooking};
use crate::state::AppState;
use crate::utils::error::Result;
use crate::utils::response::created;

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<NewBooking>, JsonRejection>,
) -> Result<Response> {
    let Json(data) = payload?;
    let booking = Booking::create(&state.db, data).await?;
    Ok(created(booking, "Booking created successfully"))
}
