use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A persisted appointment. Cancellation is a soft state change so the
/// admin view keeps full history; rows are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub street_address: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub preferred_date: String,
    pub appointment_time: String,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub pricing_total: Option<String>,
    pub pricing_breakdown: Option<String>,
    pub consent_to_contact: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Active,
    Cancelled,
    Completed,
    Scheduled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Active => "active",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
            BookingStatus::Scheduled => "scheduled",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "cancelled" => BookingStatus::Cancelled,
            "completed" => BookingStatus::Completed,
            "scheduled" => BookingStatus::Scheduled,
            _ => BookingStatus::Active,
        }
    }

    /// Only cancellation frees a slot; every other status occupies it.
    pub fn occupies_slot(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

/// Customer-submitted payload for a new booking. Pricing fields are opaque
/// display-layer values, stored and forwarded without interpretation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub street_address: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub preferred_date: String,
    pub appointment_time: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub pricing_total: Option<String>,
    #[serde(default)]
    pub pricing_breakdown: Option<String>,
    #[serde(default)]
    pub consent_to_contact: bool,
}

/// Partial update applied by the lifecycle mutators. Absent fields are
/// left untouched.
#[derive(Debug, Clone, Default)]
pub struct BookingChanges {
    pub preferred_date: Option<String>,
    pub appointment_time: Option<String>,
    pub status: Option<BookingStatus>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in ["active", "cancelled", "completed", "scheduled"] {
            assert_eq!(BookingStatus::parse(s).as_str(), s);
        }
    }

    #[test]
    fn test_unknown_status_defaults_to_active() {
        assert_eq!(BookingStatus::parse("confirmed"), BookingStatus::Active);
        assert_eq!(BookingStatus::parse(""), BookingStatus::Active);
    }

    #[test]
    fn test_only_cancelled_frees_slot() {
        assert!(BookingStatus::Active.occupies_slot());
        assert!(BookingStatus::Completed.occupies_slot());
        assert!(BookingStatus::Scheduled.occupies_slot());
        assert!(!BookingStatus::Cancelled.occupies_slot());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&BookingStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }
}
