mod dialogs;
mod grid;
mod presentation;
mod session;
mod sidebar;

pub use session::run_tui;
