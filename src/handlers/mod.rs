pub mod admin;
pub mod availability;
pub mod bookings;
pub mod health;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/availability", get(availability::get_availability))
        .route("/api/next-slot", get(availability::get_next_slot))
        .route("/api/bookings", post(bookings::create_booking))
        .route("/api/admin/bookings", get(admin::list_bookings))
        .route(
            "/api/admin/bookings/:id/reschedule",
            post(admin::reschedule_booking),
        )
        .route("/api/admin/bookings/:id/cancel", post(admin::cancel_booking))
        .with_state(state)
}
