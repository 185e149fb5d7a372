pub mod codec;
pub mod sheet;
pub mod slot;

pub use codec::{Availability, DecodeReport, decode, decode_with_report, encode};
pub use sheet::AvailabilitySheet;
pub use slot::{Slot, TimeSlots, week_slots};
