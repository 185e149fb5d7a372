use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An event participants mark their availability for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub dates: Vec<NaiveDate>,
}

impl Event {
    pub fn new(name: impl Into<String>, mut dates: Vec<NaiveDate>) -> Self {
        dates.sort();
        dates.dedup();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            dates,
        }
    }

    /// Start days of every week that contains one of the event's dates.
    pub fn weeks(&self, first_day: Weekday) -> Vec<NaiveDate> {
        weeks_spanned(&self.dates, first_day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

/// First day of the week containing `date`.
pub fn week_start(date: NaiveDate, first_day: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_sunday() - first_day.num_days_from_sunday()) % 7;
    date.checked_sub_days(Days::new(offset as u64))
        .unwrap_or(date)
}

pub fn weeks_spanned(dates: &[NaiveDate], first_day: Weekday) -> Vec<NaiveDate> {
    let mut weeks: Vec<NaiveDate> = dates.iter().map(|d| week_start(*d, first_day)).collect();
    weeks.sort();
    weeks.dedup();
    weeks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_event_sorts_and_dedups_dates() {
        let event = Event::new("Standup", vec![date(2025, 1, 15), date(2025, 1, 13), date(2025, 1, 15)]);

        assert_eq!(event.dates, vec![date(2025, 1, 13), date(2025, 1, 15)]);
    }

    #[test]
    fn new_events_get_distinct_ids() {
        let a = Event::new("A", vec![]);
        let b = Event::new("B", vec![]);

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn week_start_for_wednesday_is_previous_sunday() {
        assert_eq!(week_start(date(2025, 1, 15), Weekday::Sun), date(2025, 1, 12));
    }

    #[test]
    fn week_start_for_sunday_is_same_day() {
        assert_eq!(week_start(date(2025, 1, 12), Weekday::Sun), date(2025, 1, 12));
    }

    #[test]
    fn week_start_with_monday_first() {
        assert_eq!(week_start(date(2025, 1, 12), Weekday::Mon), date(2025, 1, 6));
        assert_eq!(week_start(date(2025, 1, 13), Weekday::Mon), date(2025, 1, 13));
    }

    #[test]
    fn weeks_spanned_collects_unique_week_starts() {
        let event = Event::new(
            "Offsite",
            vec![date(2025, 1, 13), date(2025, 1, 14), date(2025, 1, 21), date(2025, 2, 3)],
        );

        assert_eq!(
            event.weeks(Weekday::Sun),
            vec![date(2025, 1, 12), date(2025, 1, 19), date(2025, 2, 2)]
        );
    }
}
