use chrono::{Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SLOT_MINUTES: u32 = 30;
pub const DAYS_PER_WEEK: usize = 7;

/// One cell of the availability grid: a calendar day and a time of day.
///
/// Ordering is by date, then time, which is the order slots are encoded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl Slot {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }

    pub fn key(&self) -> String {
        format!("{}-{}", self.date.format("%Y-%m-%d"), time_label(self.time))
    }
}

/// 12-hour label without a space, e.g. `9:30AM`.
pub fn time_label(time: NaiveTime) -> String {
    time.format("%-I:%M%p").to_string()
}

/// The ordered times of day that make up one column of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlots {
    slot_minutes: u32,
    times: Vec<NaiveTime>,
}

impl TimeSlots {
    pub fn new(slot_minutes: u32, day_start_hour: u32, day_end_hour: u32) -> Self {
        let step = slot_minutes.max(1);
        let start = day_start_hour.min(24) * 60;
        let end = day_end_hour.min(24) * 60;

        let times = (start..end)
            .step_by(step as usize)
            .filter_map(|minute| NaiveTime::from_hms_opt(minute / 60, minute % 60, 0))
            .collect();

        Self {
            slot_minutes: step,
            times,
        }
    }

    pub fn slot_minutes(&self) -> u32 {
        self.slot_minutes
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[NaiveTime] {
        &self.times
    }

    pub fn get(&self, index: usize) -> Option<NaiveTime> {
        self.times.get(index).copied()
    }

    pub fn index_of(&self, time: NaiveTime) -> Option<usize> {
        self.times.iter().position(|t| *t == time)
    }

    pub fn labels(&self) -> Vec<String> {
        self.times.iter().map(|t| time_label(*t)).collect()
    }

    /// Number of characters in one encoded week.
    pub fn week_len(&self) -> usize {
        DAYS_PER_WEEK * self.len()
    }
}

impl Default for TimeSlots {
    fn default() -> Self {
        Self::new(DEFAULT_SLOT_MINUTES, 0, 24)
    }
}

/// All slots of the week beginning at `week_start`, date-major.
pub fn week_slots(week_start: NaiveDate, times: &TimeSlots) -> Vec<Slot> {
    (0..DAYS_PER_WEEK as u64)
        .filter_map(|offset| week_start.checked_add_days(Days::new(offset)))
        .flat_map(|date| times.times().iter().map(move |time| Slot::new(date, *time)))
        .collect()
}
