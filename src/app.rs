use chrono::{NaiveDate, Weekday};

use crate::availability::{Availability, AvailabilitySheet, Slot};
use crate::event::{Event, User};
use crate::grid::{CommitSummary, GridPage, GridPosition, SelectionEngine, Tool};
use crate::storage::config::GridConfig;
use crate::storage::store::{AvailabilityStore, StoreError};
use crate::ui::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Visual,
    Command,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveStatus {
    Saved,
    Unsaved,
    Error(String),
}

pub struct AppState {
    pub mode: Mode,
    pub event: Event,
    pub user: User,
    pub participants: Vec<User>,
    pub page: GridPage,
    pub sheet: AvailabilitySheet,
    pub engine: SelectionEngine,
    pub cursor: GridPosition,
    pub grid_scroll: usize,
    pub first_day: Weekday,
    pub save_status: SaveStatus,
    pub command_buffer: String,
    pub message: Option<String>,
    pub show_help: bool,
    pub help_scroll: usize,
    pub theme: Theme,
}

impl AppState {
    pub fn new(event: Event, user: User, grid: &GridConfig) -> Self {
        let page = GridPage::new(event.dates.clone(), grid.time_slots(), grid.days_per_page);
        Self {
            mode: Mode::Normal,
            event,
            user,
            participants: Vec::new(),
            page,
            sheet: AvailabilitySheet::new(),
            engine: SelectionEngine::new(),
            cursor: GridPosition::new(0, 0),
            grid_scroll: 0,
            first_day: grid.first_weekday(),
            save_status: SaveStatus::Saved,
            command_buffer: String::new(),
            message: None,
            show_help: false,
            help_scroll: 0,
            theme: Theme::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn weeks(&self) -> Vec<NaiveDate> {
        self.event.weeks(self.first_day)
    }

    pub fn cursor_slot(&self) -> Option<Slot> {
        self.page.contains(self.cursor).then(|| self.page.slot_at(self.cursor))
    }

    /// Level to draw at a position, including any drag in progress.
    pub fn display_level(&self, position: GridPosition) -> Availability {
        let committed = self.sheet.get(&self.page.slot_at(position));
        self.engine.preview_level(position, committed)
    }

    /// Slots at `level` on the event's own dates.
    pub fn event_count(&self, level: Availability) -> usize {
        let slots = match level {
            Availability::Available => self.sheet.available(),
            Availability::IfNeeded => self.sheet.if_needed(),
            Availability::Unavailable => return 0,
        };
        slots
            .iter()
            .filter(|slot| self.event.dates.binary_search(&slot.date).is_ok())
            .count()
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.engine.set_tool(tool);
    }

    pub fn toggle_tool(&mut self) {
        self.engine.set_tool(self.engine.tool().toggled());
    }

    pub fn press_at(&mut self, position: GridPosition) {
        if !self.page.contains(position) {
            return;
        }
        // a press can only arrive mid-drag if the release was lost
        self.release();
        self.cursor = position;
        self.engine.pointer_down(position, &self.page, &self.sheet);
    }

    pub fn drag_to(&mut self, position: GridPosition) {
        if self.engine.is_dragging() && self.page.contains(position) {
            self.cursor = position;
            self.engine.pointer_enter(position, &self.page);
        }
    }

    pub fn release(&mut self) -> Option<CommitSummary> {
        let summary = self.engine.pointer_up(&self.page, &mut self.sheet)?;
        if summary.changed > 0 {
            self.save_status = SaveStatus::Unsaved;
        }
        if self.mode == Mode::Visual {
            self.mode = Mode::Normal;
        }
        Some(summary)
    }

    pub fn toggle_at_cursor(&mut self) {
        self.press_at(self.cursor);
        self.release();
    }

    pub fn begin_visual(&mut self) {
        if self.page.contains(self.cursor) {
            self.press_at(self.cursor);
            self.mode = Mode::Visual;
        }
    }

    pub fn move_cursor(&mut self, date_delta: isize, time_delta: isize) {
        if self.page.width() == 0 || self.page.height() == 0 {
            return;
        }
        let date_index = self
            .cursor
            .date_index
            .saturating_add_signed(date_delta)
            .min(self.page.width() - 1);
        let time_index = self
            .cursor
            .time_index
            .saturating_add_signed(time_delta)
            .min(self.page.height() - 1);

        self.cursor = GridPosition::new(date_index, time_index);
        if self.engine.is_dragging() {
            self.engine.pointer_enter(self.cursor, &self.page);
        }
    }

    pub fn next_page(&mut self) {
        self.release();
        self.page.next_page();
        self.clamp_cursor();
    }

    pub fn previous_page(&mut self) {
        self.release();
        self.page.previous_page();
        self.clamp_cursor();
    }

    pub fn set_page(&mut self, page: usize) {
        self.release();
        self.page.set_page(page);
        self.clamp_cursor();
    }

    pub fn clear_all(&mut self) {
        self.release();
        self.sheet.clear_dates(&self.event.dates);
        self.save_status = SaveStatus::Unsaved;
    }

    /// Seeds the sheet with every stored week the event touches.
    pub fn load_from_store<S: AvailabilityStore + ?Sized>(&mut self, store: &S) -> Result<usize, StoreError> {
        let mut loaded = 0;
        for week in self.weeks() {
            if let Some(values) = store.get_weekly_availability(self.user.id, week)? {
                self.sheet.seed_week(week, self.page.times(), &values);
                loaded += 1;
            }
        }
        self.save_status = SaveStatus::Saved;
        self.focus_first_marked();
        tracing::info!("Loaded {} stored weeks for {}", loaded, self.user.name);
        Ok(loaded)
    }

    /// Puts the cursor on the earliest marked slot of the current page.
    pub fn focus_first_marked(&mut self) {
        let mut marked = self.sheet.available();
        marked.extend(self.sheet.if_needed());
        marked.sort();
        if let Some(position) = marked.iter().find_map(|slot| self.page.position_of(slot)) {
            self.cursor = position;
        }
    }

    /// Writes every week the event touches. Failures are kept in
    /// `save_status` as well as returned.
    pub fn submit<S: AvailabilityStore + ?Sized>(&mut self, store: &S) -> Result<usize, StoreError> {
        self.release();

        let weeks = self.weeks();
        for week in &weeks {
            let sequence = self.sheet.week_sequence(*week, self.page.times());
            if let Err(e) = store.update_weekly_availability(self.user.id, *week, &sequence) {
                tracing::error!("Saving week {} for {} failed: {}", week, self.user.name, e);
                self.save_status = SaveStatus::Error(format!("Save failed: {}", e));
                return Err(e);
            }
        }

        tracing::info!("Saved {} weeks for {}", weeks.len(), self.user.name);
        self.save_status = SaveStatus::Saved;
        Ok(weeks.len())
    }

    fn clamp_cursor(&mut self) {
        self.cursor = GridPosition::new(
            self.cursor.date_index.min(self.page.width().saturating_sub(1)),
            self.cursor.time_index.min(self.page.height().saturating_sub(1)),
        );
    }
}
