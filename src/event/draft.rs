use chrono::{Datelike, Months, NaiveDate};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::event::meeting::Event;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("Please enter an event name")]
    EmptyName,
    #[error("Please select at least one date")]
    NoDates,
}

/// An event being put together: a name and a set of picked dates, plus the
/// month currently shown in the picker.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub name: String,
    dates: BTreeSet<NaiveDate>,
    month: NaiveDate,
}

impl EventDraft {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            dates: BTreeSet::new(),
            month: first_of_month(today),
        }
    }

    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn next_month(&mut self) {
        if let Some(month) = self.month.checked_add_months(Months::new(1)) {
            self.month = month;
        }
    }

    /// Adds or removes a date. Past dates cannot be picked; returns whether
    /// the toggle took effect.
    pub fn toggle_date(&mut self, date: NaiveDate, today: NaiveDate) -> bool {
        if is_in_past(date, today) {
            return false;
        }
        if !self.dates.remove(&date) {
            self.dates.insert(date);
        }
        true
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }

    pub fn selected_dates_text(&self) -> String {
        if self.dates.is_empty() {
            return "No dates selected".to_string();
        }
        self.dates
            .iter()
            .map(|d| d.format("%a, %b %-d").to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn build(&self) -> Result<Event, EventError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EventError::EmptyName);
        }
        if self.dates.is_empty() {
            return Err(EventError::NoDates);
        }
        Ok(Event::new(name, self.dates.iter().copied().collect()))
    }
}

pub fn is_in_past(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

/// Day numbers of a month laid out Sunday-first, with `None` for the blank
/// cells before the 1st.
pub fn month_cells(year: i32, month: u32) -> Vec<Option<u32>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let leading = first.weekday().num_days_from_sunday() as usize;
    let days = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28);

    std::iter::repeat_n(None, leading)
        .chain((1..=days).map(Some))
        .collect()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
