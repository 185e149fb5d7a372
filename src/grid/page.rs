use chrono::NaiveDate;

use crate::availability::{Slot, TimeSlots};

pub const DEFAULT_DAYS_PER_PAGE: usize = 7;

/// Column (date) and row (time) of a cell on the displayed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub date_index: usize,
    pub time_index: usize,
}

impl GridPosition {
    pub fn new(date_index: usize, time_index: usize) -> Self {
        Self {
            date_index,
            time_index,
        }
    }
}

/// The event's dates split into pages, plus the time rows shown for each.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPage {
    dates: Vec<NaiveDate>,
    times: TimeSlots,
    days_per_page: usize,
    current: usize,
}

impl GridPage {
    pub fn new(dates: Vec<NaiveDate>, times: TimeSlots, days_per_page: usize) -> Self {
        Self {
            dates,
            times,
            days_per_page: days_per_page.max(1),
            current: 0,
        }
    }

    pub fn times(&self) -> &TimeSlots {
        &self.times
    }

    pub fn page_count(&self) -> usize {
        self.dates.len().div_ceil(self.days_per_page).max(1)
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn set_page(&mut self, page: usize) {
        self.current = page.min(self.page_count() - 1);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.current + 1);
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.current.saturating_sub(1));
    }

    /// Dates of the current page, in display order.
    pub fn dates(&self) -> &[NaiveDate] {
        let start = (self.current * self.days_per_page).min(self.dates.len());
        let end = (start + self.days_per_page).min(self.dates.len());
        &self.dates[start..end]
    }

    pub fn width(&self) -> usize {
        self.dates().len()
    }

    pub fn height(&self) -> usize {
        self.times.len()
    }

    pub fn contains(&self, position: GridPosition) -> bool {
        position.date_index < self.width() && position.time_index < self.height()
    }

    /// Slot under a position of the current page.
    ///
    /// # Panics
    ///
    /// Panics when the position lies outside the current page. Positions come
    /// from the grid itself, so this is a caller bug.
    pub fn slot_at(&self, position: GridPosition) -> Slot {
        assert!(
            self.contains(position),
            "grid position {:?} outside page of {}x{}",
            position,
            self.width(),
            self.height()
        );
        let date = self.dates()[position.date_index];
        let time = self.times.times()[position.time_index];
        Slot::new(date, time)
    }

    pub fn position_of(&self, slot: &Slot) -> Option<GridPosition> {
        let date_index = self.dates().iter().position(|d| *d == slot.date)?;
        let time_index = self.times.index_of(slot.time)?;
        Some(GridPosition::new(date_index, time_index))
    }

    pub fn week_label(&self) -> String {
        match self.current {
            0 => "Current Week".to_string(),
            1 => "Next Week".to_string(),
            n => format!("Week {}", n + 1),
        }
    }
}
