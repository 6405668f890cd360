pub mod sqlite;

pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::models::{Booking, BookingChanges, BookingDraft};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("time slot already booked")]
    SlotTaken,

    #[error("booking not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Persistence seam for bookings. Injected so tests can run against an
/// in-memory database, and so the conflict invariant lives behind the
/// store's own uniqueness constraint rather than in application code.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Assigns id and created_at, persists with the draft's fields.
    /// Returns `SlotTaken` when the slot-uniqueness constraint rejects
    /// the insert.
    async fn create(&self, draft: &BookingDraft) -> Result<Booking, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<Booking>, StoreError>;

    /// Every booking, cancelled included, newest first. Admin/audit view.
    async fn list_all(&self) -> Result<Vec<Booking>, StoreError>;

    /// All bookings for one service day, regardless of status. Callers
    /// filter occupancy themselves.
    async fn list_for_date(&self, date: &str) -> Result<Vec<Booking>, StoreError>;

    /// Merges the provided fields into an existing row. `SlotTaken` when
    /// a date/time change lands on an occupied slot.
    async fn update(&self, id: i64, changes: &BookingChanges) -> Result<Booking, StoreError>;
}
