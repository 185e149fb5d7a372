pub mod app;
pub mod availability;
pub mod event;
pub mod grid;
pub mod input;
pub mod storage;
pub mod ui;

pub use app::{AppState, Mode, SaveStatus};
pub use availability::{Availability, AvailabilitySheet, Slot, decode, encode};
pub use grid::{GridPage, GridPosition, SelectionEngine, Tool};

pub use input::{command_mode, mouse, normal_mode, visual_mode};
