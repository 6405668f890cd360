use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::Booking;
use crate::services::{booking, notify};
use crate::state::AppState;

// Placeholder auth: a shared passcode presented as a bearer token. Real
// session handling is out of scope for this service.
fn check_auth(headers: &HeaderMap, passcode: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token != passcode {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

// GET /api/admin/bookings
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Booking>>, AppError> {
    check_auth(&headers, &state.config.admin_passcode)?;

    let bookings = state.store.list_all().await?;
    Ok(Json(bookings))
}

#[derive(Deserialize)]
pub struct RescheduleRequest {
    pub date: String,
    pub time: String,
}

// POST /api/admin/bookings/:id/reschedule
pub async fn reschedule_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<RescheduleRequest>,
) -> Result<Json<Booking>, AppError> {
    check_auth(&headers, &state.config.admin_passcode)?;

    let updated = booking::reschedule(state.store.as_ref(), id, &body.date, &body.time).await?;

    notify::dispatch(
        Arc::clone(&state.notifier),
        notify::Event::Rescheduled,
        updated.clone(),
    );

    Ok(Json(updated))
}

// POST /api/admin/bookings/:id/cancel
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<Booking>, AppError> {
    check_auth(&headers, &state.config.admin_passcode)?;

    let (cancelled, changed) = booking::cancel(state.store.as_ref(), id).await?;

    // No email for an idempotent re-cancel.
    if changed {
        notify::dispatch(
            Arc::clone(&state.notifier),
            notify::Event::Cancelled,
            cancelled.clone(),
        );
    }

    Ok(Json(cancelled))
}
