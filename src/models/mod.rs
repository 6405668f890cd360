pub mod booking;
pub mod slot_table;

pub use booking::{Booking, BookingChanges, BookingDraft, BookingStatus};
pub use slot_table::{DayClass, SlotTable};
