pub mod page;
pub mod selection;

pub use page::{GridPage, GridPosition, DEFAULT_DAYS_PER_PAGE};
pub use selection::{CommitSummary, DragMode, DragState, SelectionEngine, SelectionRect, Tool};
