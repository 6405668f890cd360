use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::errors::AppError;
use crate::services::availability::{self, OpenSlot};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
}

// GET /api/availability?date=YYYY-MM-DD
pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    let date = query
        .date
        .ok_or_else(|| AppError::BadRequest("date query parameter required".to_string()))?;
    if NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
        return Err(AppError::BadRequest("ISO date (YYYY-MM-DD) required".to_string()));
    }

    let occupied = availability::occupied_slots(state.store.as_ref(), &date).await?;
    Ok(Json(occupied.into_iter().collect()))
}

#[derive(Deserialize)]
pub struct NextSlotQuery {
    pub window: Option<u32>,
}

// GET /api/next-slot
pub async fn get_next_slot(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NextSlotQuery>,
) -> Result<Json<OpenSlot>, AppError> {
    let window = query.window.unwrap_or(state.config.next_slot_window_days);
    let today = Utc::now().date_naive();

    let found = availability::find_next_open_slot(
        state.store.as_ref(),
        &state.config.slot_table,
        today,
        window,
    )
    .await?;

    // A fully booked window is a user-facing condition, not a fault.
    found.map(Json).ok_or_else(|| {
        AppError::NotFound("no open slots within the booking window".to_string())
    })
}
