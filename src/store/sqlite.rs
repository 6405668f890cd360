use std::sync::{Arc, Mutex};

use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use super::{BookingStore, StoreError};
use crate::models::{Booking, BookingChanges, BookingDraft, BookingStatus};

const BOOKING_COLUMNS: &str = "id, name, email, phone, street_address, address_line2, city, state, \
     zip_code, preferred_date, appointment_time, status, notes, pricing_total, pricing_breakdown, \
     consent_to_contact, created_at";

/// SQLite-backed store. The partial unique index on
/// (preferred_date, appointment_time) over non-cancelled rows is the
/// authoritative double-booking guard; this type only translates its
/// violations into `StoreError::SlotTaken`.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }
}

#[async_trait::async_trait]
impl BookingStore for SqliteStore {
    async fn create(&self, draft: &BookingDraft) -> Result<Booking, StoreError> {
        let conn = self.conn.lock().unwrap();
        let created_at = Utc::now().naive_utc().format("%Y-%m-%d %H:%M:%S").to_string();

        conn.execute(
            "INSERT INTO bookings (name, email, phone, street_address, address_line2, city, state, \
             zip_code, preferred_date, appointment_time, status, notes, pricing_total, \
             pricing_breakdown, consent_to_contact, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                draft.name,
                draft.email,
                draft.phone,
                draft.street_address,
                draft.address_line2,
                draft.city,
                draft.state,
                draft.zip_code,
                draft.preferred_date,
                draft.appointment_time,
                BookingStatus::Active.as_str(),
                draft.notes,
                draft.pricing_total,
                draft.pricing_breakdown,
                draft.consent_to_contact as i32,
                created_at,
            ],
        )
        .map_err(map_slot_constraint)?;

        let id = conn.last_insert_rowid();
        fetch_booking(&conn, id)?.ok_or(StoreError::NotFound)
    }

    async fn get(&self, id: i64) -> Result<Option<Booking>, StoreError> {
        let conn = self.conn.lock().unwrap();
        fetch_booking(&conn, id)
    }

    async fn list_all(&self) -> Result<Vec<Booking>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map([], parse_booking_row)?;

        let mut bookings = vec![];
        for row in rows {
            bookings.push(row?);
        }
        Ok(bookings)
    }

    async fn list_for_date(&self, date: &str) -> Result<Vec<Booking>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE preferred_date = ?1 ORDER BY id ASC"
        ))?;
        let rows = stmt.query_map(params![date], parse_booking_row)?;

        let mut bookings = vec![];
        for row in rows {
            bookings.push(row?);
        }
        Ok(bookings)
    }

    async fn update(&self, id: i64, changes: &BookingChanges) -> Result<Booking, StoreError> {
        let conn = self.conn.lock().unwrap();

        let mut sets: Vec<String> = vec![];
        let mut values: Vec<Box<dyn rusqlite::types::ToSql>> = vec![];
        if let Some(date) = &changes.preferred_date {
            sets.push(format!("preferred_date = ?{}", values.len() + 1));
            values.push(Box::new(date.clone()));
        }
        if let Some(time) = &changes.appointment_time {
            sets.push(format!("appointment_time = ?{}", values.len() + 1));
            values.push(Box::new(time.clone()));
        }
        if let Some(status) = &changes.status {
            sets.push(format!("status = ?{}", values.len() + 1));
            values.push(Box::new(status.as_str().to_string()));
        }
        if let Some(notes) = &changes.notes {
            sets.push(format!("notes = ?{}", values.len() + 1));
            values.push(Box::new(notes.clone()));
        }

        if sets.is_empty() {
            return fetch_booking(&conn, id)?.ok_or(StoreError::NotFound);
        }

        let sql = format!(
            "UPDATE bookings SET {} WHERE id = ?{}",
            sets.join(", "),
            values.len() + 1
        );
        values.push(Box::new(id));

        let value_refs: Vec<&dyn rusqlite::types::ToSql> =
            values.iter().map(|v| v.as_ref()).collect();
        let count = conn
            .execute(&sql, value_refs.as_slice())
            .map_err(map_slot_constraint)?;

        if count == 0 {
            return Err(StoreError::NotFound);
        }
        fetch_booking(&conn, id)?.ok_or(StoreError::NotFound)
    }
}

fn map_slot_constraint(e: rusqlite::Error) -> StoreError {
    if let rusqlite::Error::SqliteFailure(err, _) = &e {
        if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
            return StoreError::SlotTaken;
        }
    }
    StoreError::Database(e)
}

fn fetch_booking(conn: &Connection, id: i64) -> Result<Option<Booking>, StoreError> {
    let result = conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
        params![id],
        parse_booking_row,
    );

    match result {
        Ok(booking) => Ok(Some(booking)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_booking_row(row: &rusqlite::Row) -> rusqlite::Result<Booking> {
    let status_str: String = row.get(11)?;
    let created_at_str: String = row.get(16)?;
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| Utc::now().naive_utc());

    Ok(Booking {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        street_address: row.get(4)?,
        address_line2: row.get(5)?,
        city: row.get(6)?,
        state: row.get(7)?,
        zip_code: row.get(8)?,
        preferred_date: row.get(9)?,
        appointment_time: row.get(10)?,
        status: BookingStatus::parse(&status_str),
        notes: row.get(12)?,
        pricing_total: row.get(13)?,
        pricing_breakdown: row.get(14)?,
        consent_to_contact: row.get::<_, i32>(15)? != 0,
        created_at,
    })
}
