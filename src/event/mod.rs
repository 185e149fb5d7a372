pub mod draft;
pub mod meeting;

pub use draft::{EventDraft, EventError, is_in_past, month_cells};
pub use meeting::{Event, User, week_start, weeks_spanned};
