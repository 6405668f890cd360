use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::SlotTable;
use crate::store::{BookingStore, StoreError};

/// Slot labels on `date` claimed by a non-cancelled booking. Always
/// re-derived from the store; caching here would trade staleness for
/// double-bookings. Duplicate labels collapse into the set even though
/// the admission gate should never let them exist.
pub async fn occupied_slots(
    store: &dyn BookingStore,
    date: &str,
) -> Result<BTreeSet<String>, StoreError> {
    let bookings = store.list_for_date(date).await?;
    Ok(bookings
        .into_iter()
        .filter(|b| b.status.occupies_slot())
        .map(|b| b.appointment_time)
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenSlot {
    pub date: String,
    pub time: String,
}

/// Scans forward from tomorrow for the earliest free (date, slot) pair.
/// Today is excluded on purpose: same-day bookings would race against
/// imminent slots and leave no lead time. Returns None when every slot in
/// the window is taken, which the caller surfaces as "fully booked", not
/// as an error.
pub async fn find_next_open_slot(
    store: &dyn BookingStore,
    table: &SlotTable,
    today: NaiveDate,
    window_days: u32,
) -> Result<Option<OpenSlot>, StoreError> {
    for d in 1..=i64::from(window_days) {
        let date = today + Duration::days(d);
        let date_str = date.format("%Y-%m-%d").to_string();
        let occupied = occupied_slots(store, &date_str).await?;

        // Policy order decides priority: earliest slot of the day wins.
        if let Some(slot) = table
            .slots_for_date(date)
            .iter()
            .find(|s| !occupied.contains(*s))
        {
            return Ok(Some(OpenSlot {
                date: date_str,
                time: slot.clone(),
            }));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::{BookingChanges, BookingDraft, BookingStatus};
    use crate::store::SqliteStore;

    fn test_store() -> SqliteStore {
        SqliteStore::new(db::init_db(":memory:").unwrap())
    }

    fn draft(date: &str, time: &str) -> BookingDraft {
        BookingDraft {
            name: "Bob Example".to_string(),
            email: "bob@example.com".to_string(),
            phone: "555-0101".to_string(),
            street_address: "48 Marietta St".to_string(),
            address_line2: None,
            city: "Atlanta".to_string(),
            state: "GA".to_string(),
            zip_code: "30303".to_string(),
            preferred_date: date.to_string(),
            appointment_time: time.to_string(),
            notes: None,
            pricing_total: None,
            pricing_breakdown: None,
            consent_to_contact: false,
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_empty_store_has_no_occupancy() {
        let store = test_store();
        assert!(occupied_slots(&store, "2030-06-15").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_bookings_do_not_occupy() {
        let store = test_store();
        let kept = store.create(&draft("2030-06-15", "2:00 PM")).await.unwrap();
        let dropped = store.create(&draft("2030-06-15", "4:00 PM")).await.unwrap();
        store
            .update(
                dropped.id,
                &BookingChanges {
                    status: Some(BookingStatus::Cancelled),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let occupied = occupied_slots(&store, "2030-06-15").await.unwrap();
        assert!(occupied.contains(&kept.appointment_time));
        assert!(!occupied.contains("4:00 PM"));
        // the cancelled row is still visible to the audit listing
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_next_slot_starts_tomorrow_with_first_weekend_slot() {
        let store = test_store();
        let table = SlotTable::default();
        // 2025-06-13 is a Friday, so tomorrow is a Saturday
        let found = find_next_open_slot(&store, &table, date("2025-06-13"), 14)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.date, "2025-06-14");
        assert_eq!(found.time, "10:00 AM");
    }

    #[tokio::test]
    async fn test_next_slot_picks_earliest_free_slot_in_day() {
        let store = test_store();
        let table = SlotTable::default();
        store.create(&draft("2025-06-14", "10:00 AM")).await.unwrap();
        store.create(&draft("2025-06-14", "12:00 PM")).await.unwrap();

        let found = find_next_open_slot(&store, &table, date("2025-06-13"), 14)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.date, "2025-06-14");
        assert_eq!(found.time, "2:00 PM");
    }

    #[tokio::test]
    async fn test_next_slot_skips_fully_booked_day() {
        let store = test_store();
        let table = SlotTable::default();
        for time in ["10:00 AM", "12:00 PM", "2:00 PM", "4:00 PM", "6:00 PM", "8:00 PM"] {
            store.create(&draft("2025-06-14", time)).await.unwrap();
        }

        let found = find_next_open_slot(&store, &table, date("2025-06-13"), 14)
            .await
            .unwrap()
            .unwrap();
        // Saturday is full; Sunday's first slot wins
        assert_eq!(found.date, "2025-06-15");
        assert_eq!(found.time, "10:00 AM");
    }

    #[tokio::test]
    async fn test_next_slot_none_when_window_exhausted() {
        let store = test_store();
        let table = SlotTable::default();
        for time in ["10:00 AM", "12:00 PM", "2:00 PM", "4:00 PM", "6:00 PM", "8:00 PM"] {
            store.create(&draft("2025-06-14", time)).await.unwrap();
        }

        let found = find_next_open_slot(&store, &table, date("2025-06-13"), 1)
            .await
            .unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn test_next_slot_uses_weekday_list_on_weekdays() {
        let store = test_store();
        let table = SlotTable::default();
        // 2025-06-15 is a Sunday, so tomorrow is a Monday
        let found = find_next_open_slot(&store, &table, date("2025-06-15"), 14)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.date, "2025-06-16");
        assert_eq!(found.time, "5:30 PM");
    }
}
