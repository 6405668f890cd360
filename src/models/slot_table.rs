use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayClass {
    Weekday,
    Weekend,
}

impl DayClass {
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => DayClass::Weekend,
            _ => DayClass::Weekday,
        }
    }
}

/// Offerable start times per day-class. Order is significant: it is the
/// priority order the next-slot scan walks, earliest in the day first.
/// Operators can override the defaults with a SLOT_TABLE JSON env var
/// instead of editing code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotTable {
    pub weekday: Vec<String>,
    pub weekend: Vec<String>,
}

impl Default for SlotTable {
    fn default() -> Self {
        Self {
            // Weekdays are evening-only; weekends run 10am-10pm on
            // two-hour starts.
            weekday: ["5:30 PM", "6:30 PM", "7:30 PM", "8:30 PM"]
                .map(String::from)
                .to_vec(),
            weekend: ["10:00 AM", "12:00 PM", "2:00 PM", "4:00 PM", "6:00 PM", "8:00 PM"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl SlotTable {
    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        let table: SlotTable = serde_json::from_str(s)?;
        anyhow::ensure!(!table.weekday.is_empty(), "weekday slot list is empty");
        anyhow::ensure!(!table.weekend.is_empty(), "weekend slot list is empty");
        Ok(table)
    }

    /// Pure and deterministic. Does not reason about time zones or slots
    /// already past on the current day; the next-slot scan sidesteps that
    /// by starting from tomorrow.
    pub fn slots_for_date(&self, date: NaiveDate) -> &[String] {
        match DayClass::of(date) {
            DayClass::Weekend => &self.weekend,
            DayClass::Weekday => &self.weekday,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_weekend_slots_for_saturday_and_sunday() {
        let table = SlotTable::default();
        // 2025-06-14 is a Saturday, 2025-06-15 a Sunday
        for d in ["2025-06-14", "2025-06-15"] {
            assert_eq!(
                table.slots_for_date(date(d)),
                ["10:00 AM", "12:00 PM", "2:00 PM", "4:00 PM", "6:00 PM", "8:00 PM"]
            );
        }
    }

    #[test]
    fn test_weekday_slots_monday_through_friday() {
        let table = SlotTable::default();
        // 2025-06-16 (Mon) through 2025-06-20 (Fri)
        for d in ["2025-06-16", "2025-06-17", "2025-06-18", "2025-06-19", "2025-06-20"] {
            assert_eq!(
                table.slots_for_date(date(d)),
                ["5:30 PM", "6:30 PM", "7:30 PM", "8:30 PM"]
            );
        }
    }

    #[test]
    fn test_leap_day_is_classified_by_weekday() {
        let table = SlotTable::default();
        // 2024-02-29 fell on a Thursday
        assert_eq!(DayClass::of(date("2024-02-29")), DayClass::Weekday);
        assert_eq!(table.slots_for_date(date("2024-02-29")).len(), 4);
    }

    #[test]
    fn test_month_boundary() {
        // 2025-08-31 is a Sunday, 2025-09-01 a Monday
        assert_eq!(DayClass::of(date("2025-08-31")), DayClass::Weekend);
        assert_eq!(DayClass::of(date("2025-09-01")), DayClass::Weekday);
    }

    #[test]
    fn test_multi_year_consistency() {
        let table = SlotTable::default();
        let mut d = date("2024-01-01");
        let end = date("2027-01-01");
        while d < end {
            let expected = match d.weekday() {
                Weekday::Sat | Weekday::Sun => 6,
                _ => 4,
            };
            assert_eq!(table.slots_for_date(d).len(), expected, "wrong class for {d}");
            d = d.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_from_json_override() {
        let table =
            SlotTable::from_json(r#"{"weekday":["6:00 PM"],"weekend":["9:00 AM","1:00 PM"]}"#)
                .unwrap();
        assert_eq!(table.slots_for_date(date("2025-06-16")), ["6:00 PM"]);
        assert_eq!(table.slots_for_date(date("2025-06-14")), ["9:00 AM", "1:00 PM"]);
    }

    #[test]
    fn test_from_json_rejects_empty_list() {
        assert!(SlotTable::from_json(r#"{"weekday":[],"weekend":["9:00 AM"]}"#).is_err());
        assert!(SlotTable::from_json("not json").is_err());
    }
}
