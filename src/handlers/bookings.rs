use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::models::{Booking, BookingDraft};
use crate::services::{booking, notify};
use crate::state::AppState;

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<BookingDraft>,
) -> Result<Json<Booking>, AppError> {
    let booking = booking::submit(state.store.as_ref(), &draft).await?;

    notify::dispatch(
        Arc::clone(&state.notifier),
        notify::Event::Confirmed,
        booking.clone(),
    );

    Ok(Json(booking))
}
