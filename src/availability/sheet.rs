use chrono::NaiveDate;
use std::collections::HashMap;

use crate::availability::codec::Availability;
use crate::availability::slot::{Slot, TimeSlots, week_slots};

/// One participant's availability, one value per slot.
///
/// Slots that are not stored read as `Unavailable`, so a slot can never be
/// both available and if-needed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailabilitySheet {
    slots: HashMap<Slot, Availability>,
}

impl AvailabilitySheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: &Slot) -> Availability {
        self.slots.get(slot).copied().unwrap_or_default()
    }

    /// Sets the level of a slot and returns whether it changed.
    pub fn set(&mut self, slot: Slot, level: Availability) -> bool {
        let previous = match level {
            Availability::Unavailable => self.slots.remove(&slot),
            _ => self.slots.insert(slot, level),
        };
        previous.unwrap_or_default() != level
    }

    pub fn available(&self) -> Vec<Slot> {
        self.slots_at(Availability::Available)
    }

    pub fn if_needed(&self) -> Vec<Slot> {
        self.slots_at(Availability::IfNeeded)
    }

    pub fn count(&self, level: Availability) -> usize {
        self.slots.values().filter(|l| **l == level).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear_all(&mut self) {
        self.slots.clear();
    }

    /// Resets every slot on the given dates to `Unavailable`.
    pub fn clear_dates(&mut self, dates: &[NaiveDate]) {
        self.slots.retain(|slot, _| !dates.contains(&slot.date));
    }

    pub fn week_sequence(&self, week_start: NaiveDate, times: &TimeSlots) -> Vec<Availability> {
        week_slots(week_start, times)
            .iter()
            .map(|slot| self.get(slot))
            .collect()
    }

    pub fn seed_week(&mut self, week_start: NaiveDate, times: &TimeSlots, values: &[Availability]) {
        let slots = week_slots(week_start, times);

        if values.len() != slots.len() {
            tracing::warn!(
                "Week of {} has {} stored slots, grid expects {}",
                week_start,
                values.len(),
                slots.len()
            );
        }

        for (index, slot) in slots.into_iter().enumerate() {
            let level = values.get(index).copied().unwrap_or_default();
            self.set(slot, level);
        }
    }

    fn slots_at(&self, level: Availability) -> Vec<Slot> {
        let mut slots: Vec<Slot> = self
            .slots
            .iter()
            .filter(|(_, l)| **l == level)
            .map(|(slot, _)| *slot)
            .collect();
        slots.sort();
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn slot(d: u32, h: u32) -> Slot {
        Slot::new(date(2025, 1, d), NaiveTime::from_hms_opt(h, 0, 0).unwrap())
    }

    #[test]
    fn unknown_slot_is_unavailable() {
        let sheet = AvailabilitySheet::new();

        assert_eq!(sheet.get(&slot(12, 9)), Availability::Unavailable);
    }

    #[test]
    fn setting_a_level_replaces_the_other() {
        let mut sheet = AvailabilitySheet::new();
        sheet.set(slot(12, 9), Availability::Available);
        sheet.set(slot(12, 9), Availability::IfNeeded);

        assert!(sheet.available().is_empty());
        assert_eq!(sheet.if_needed(), vec![slot(12, 9)]);
    }

    #[test]
    fn set_reports_whether_anything_changed() {
        let mut sheet = AvailabilitySheet::new();

        assert!(sheet.set(slot(12, 9), Availability::Available));
        assert!(!sheet.set(slot(12, 9), Availability::Available));
        assert!(sheet.set(slot(12, 9), Availability::Unavailable));
        assert!(!sheet.set(slot(12, 9), Availability::Unavailable));
        assert!(sheet.is_empty());
    }

    #[test]
    fn counts_each_level() {
        let mut sheet = AvailabilitySheet::new();
        sheet.set(slot(12, 9), Availability::Available);
        sheet.set(slot(12, 10), Availability::Available);
        sheet.set(slot(13, 9), Availability::IfNeeded);

        assert_eq!(sheet.count(Availability::Available), 2);
        assert_eq!(sheet.count(Availability::IfNeeded), 1);
    }

    #[test]
    fn week_sequence_covers_whole_week_in_canonical_order() {
        let times = TimeSlots::new(60, 9, 11);
        let mut sheet = AvailabilitySheet::new();
        sheet.set(slot(12, 10), Availability::Available);
        sheet.set(slot(18, 9), Availability::IfNeeded);

        let sequence = sheet.week_sequence(date(2025, 1, 12), &times);

        assert_eq!(sequence.len(), 14);
        assert_eq!(sequence[1], Availability::Available);
        assert_eq!(sequence[12], Availability::IfNeeded);
        assert_eq!(sequence.iter().filter(|a| **a == Availability::Unavailable).count(), 12);
    }

    #[test]
    fn seeding_restores_a_written_week() {
        let times = TimeSlots::new(60, 9, 11);
        let mut original = AvailabilitySheet::new();
        original.set(slot(14, 9), Availability::Available);
        original.set(slot(15, 10), Availability::IfNeeded);
        let sequence = original.week_sequence(date(2025, 1, 12), &times);

        let mut restored = AvailabilitySheet::new();
        restored.seed_week(date(2025, 1, 12), &times, &sequence);

        assert_eq!(restored, original);
    }

    #[test]
    fn seeding_overwrites_previous_values_in_that_week_only() {
        let times = TimeSlots::new(60, 9, 10);
        let mut sheet = AvailabilitySheet::new();
        sheet.set(slot(12, 9), Availability::Available);
        sheet.set(slot(19, 9), Availability::Available);

        sheet.seed_week(date(2025, 1, 12), &times, &[Availability::Unavailable; 7]);

        assert_eq!(sheet.available(), vec![slot(19, 9)]);
    }

    #[test]
    fn seeding_a_short_record_leaves_the_rest_unavailable() {
        let times = TimeSlots::new(60, 9, 10);
        let mut sheet = AvailabilitySheet::new();
        sheet.set(slot(18, 9), Availability::Available);

        sheet.seed_week(date(2025, 1, 12), &times, &[Availability::IfNeeded, Availability::Available]);

        assert_eq!(sheet.if_needed(), vec![slot(12, 9)]);
        assert_eq!(sheet.available(), vec![slot(13, 9)]);
    }

    #[test]
    fn clear_dates_keeps_other_days() {
        let mut sheet = AvailabilitySheet::new();
        sheet.set(slot(12, 9), Availability::Available);
        sheet.set(slot(13, 10), Availability::IfNeeded);
        sheet.set(slot(14, 9), Availability::Available);

        sheet.clear_dates(&[date(2025, 1, 12), date(2025, 1, 13)]);

        assert_eq!(sheet.available(), vec![slot(14, 9)]);
        assert!(sheet.if_needed().is_empty());
    }

    #[test]
    fn clear_all_empties_both_levels() {
        let mut sheet = AvailabilitySheet::new();
        sheet.set(slot(12, 9), Availability::Available);
        sheet.set(slot(12, 10), Availability::IfNeeded);

        sheet.clear_all();

        assert!(sheet.is_empty());
    }
}
