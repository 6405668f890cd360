use chrono::NaiveDate;

use crate::errors::{AppError, FieldError};
use crate::models::{Booking, BookingChanges, BookingDraft, BookingStatus};
use crate::services::availability;
use crate::store::BookingStore;

/// Required-field and shape checks, applied before anything touches the
/// store. Accumulates every failure so the wizard can highlight all bad
/// fields at once.
pub fn validate_draft(draft: &BookingDraft) -> Result<(), Vec<FieldError>> {
    let mut errors = vec![];

    if draft.name.trim().is_empty() {
        errors.push(FieldError::new("name", "required"));
    }
    if !draft.email.contains('@') {
        errors.push(FieldError::new("email", "valid email required"));
    }
    if draft.phone.trim().is_empty() {
        errors.push(FieldError::new("phone", "required"));
    }
    if draft.street_address.trim().is_empty() {
        errors.push(FieldError::new("street_address", "required"));
    }
    if draft.city.trim().is_empty() {
        errors.push(FieldError::new("city", "required"));
    }
    if draft.state.trim().is_empty() {
        errors.push(FieldError::new("state", "required"));
    }
    if draft.zip_code.trim().is_empty() {
        errors.push(FieldError::new("zip_code", "required"));
    }
    if parse_date(&draft.preferred_date).is_none() {
        errors.push(FieldError::new("preferred_date", "ISO date (YYYY-MM-DD) required"));
    }
    if draft.appointment_time.trim().is_empty() {
        errors.push(FieldError::new("appointment_time", "required"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Admission control: validate, re-check occupancy, insert. The occupancy
/// check is a fast path for a friendly 409; the store's uniqueness
/// constraint is what actually decides a concurrent race, and its
/// SlotTaken surfaces as the same Conflict.
pub async fn submit(store: &dyn BookingStore, draft: &BookingDraft) -> Result<Booking, AppError> {
    validate_draft(draft).map_err(AppError::Validation)?;

    let occupied = availability::occupied_slots(store, &draft.preferred_date).await?;
    if occupied.contains(&draft.appointment_time) {
        return Err(AppError::Conflict);
    }

    Ok(store.create(draft).await?)
}

/// Soft-cancels a booking. Returns the record and whether a transition
/// actually happened; cancelling an already-cancelled booking is an
/// idempotent success and should not re-notify anyone.
pub async fn cancel(store: &dyn BookingStore, id: i64) -> Result<(Booking, bool), AppError> {
    let booking = store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("booking {id}")))?;

    if booking.status == BookingStatus::Cancelled {
        return Ok((booking, false));
    }

    let changes = BookingChanges {
        status: Some(BookingStatus::Cancelled),
        ..Default::default()
    };
    let updated = store.update(id, &changes).await?;
    Ok((updated, true))
}

/// Moves an active booking to a new (date, time), re-running the conflict
/// check with the booking's own id excluded so a no-op move to the current
/// slot always succeeds.
pub async fn reschedule(
    store: &dyn BookingStore,
    id: i64,
    new_date: &str,
    new_time: &str,
) -> Result<Booking, AppError> {
    let booking = store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("booking {id}")))?;

    if booking.status != BookingStatus::Active {
        return Err(AppError::BadRequest(
            "only active bookings can be rescheduled".to_string(),
        ));
    }
    if parse_date(new_date).is_none() {
        return Err(AppError::BadRequest("ISO date (YYYY-MM-DD) required".to_string()));
    }
    if new_time.trim().is_empty() {
        return Err(AppError::BadRequest("appointment time required".to_string()));
    }

    let taken = store.list_for_date(new_date).await?.iter().any(|b| {
        b.id != id && b.status.occupies_slot() && b.appointment_time == new_time
    });
    if taken {
        return Err(AppError::Conflict);
    }

    let changes = BookingChanges {
        preferred_date: Some(new_date.to_string()),
        appointment_time: Some(new_time.to_string()),
        ..Default::default()
    };
    Ok(store.update(id, &changes).await?)
}
