//! Calendar-slot mapping and month-name translation.
//!
//! The raster chart's date axis is implicit: the mapping from slot index to
//! calendar date is a fact about the chart, not derivable from geometry.
//! `CalendarSpec` keeps that fact injectable (start date plus the index of
//! the one rendered-but-nonexistent day) instead of baking it into the
//! algorithm.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Slot-to-date calibration for one chart.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct CalendarSpec {
    /// Date of slot 0.
    pub start: NaiveDate,
    /// Index of a slot the source rendered for a day that does not exist
    /// (e.g. an "April 31"). That slot gets no date; later slots shift back
    /// by one day so the emitted sequence stays gap-free.
    pub skip_slot: Option<usize>,
}

impl Default for CalendarSpec {
    fn default() -> Self {
        // The monkeypox onset chart this tool was calibrated against:
        // slot 0 is 2022-04-26, slot 5 is the phantom "April 31".
        Self {
            start: NaiveDate::from_ymd_opt(2022, 4, 26).unwrap_or_default(),
            skip_slot: Some(5),
        }
    }
}

impl CalendarSpec {
    /// Date for a slot index, `None` for the skipped phantom slot.
    pub fn date_for_slot(&self, slot: usize) -> Option<NaiveDate> {
        let offset = match self.skip_slot {
            Some(skip) if slot == skip => return None,
            Some(skip) if slot > skip => slot - 1,
            _ => slot,
        };
        self.start.checked_add_days(Days::new(offset as u64))
    }
}

/// Spanish month names, January first.
const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Translate a Spanish month name to its 1-based number.
pub fn month_number_es(name: &str) -> Option<u32> {
    let lower = name.trim().to_lowercase();
    MONTHS_ES
        .iter()
        .position(|m| *m == lower)
        .map(|i| i as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn slots_before_skip_increment_from_start() {
        let spec = CalendarSpec::default();
        assert_eq!(spec.date_for_slot(0), Some(date(2022, 4, 26)));
        assert_eq!(spec.date_for_slot(4), Some(date(2022, 4, 30)));
    }

    #[test]
    fn skip_slot_has_no_date() {
        let spec = CalendarSpec::default();
        assert_eq!(spec.date_for_slot(5), None);
    }

    #[test]
    fn slots_after_skip_continue_without_gap() {
        let spec = CalendarSpec::default();
        assert_eq!(spec.date_for_slot(6), Some(date(2022, 5, 1)));
        assert_eq!(spec.date_for_slot(7), Some(date(2022, 5, 2)));
    }

    #[test]
    fn thirty_seven_slots_cover_april_into_may_gap_free() {
        let spec = CalendarSpec::default();
        let dates: Vec<NaiveDate> = (0..37).filter_map(|i| spec.date_for_slot(i)).collect();
        assert_eq!(dates.len(), 36);
        assert_eq!(dates[0], date(2022, 4, 26));
        assert_eq!(dates[4], date(2022, 4, 30));
        assert_eq!(dates[5], date(2022, 5, 1));
        // No repeats, no gaps: every step is exactly one day.
        for pair in dates.windows(2) {
            assert_eq!(pair[1] - pair[0], chrono::Duration::days(1));
        }
    }

    #[test]
    fn spec_without_skip_is_plain_increment() {
        let spec = CalendarSpec {
            start: date(2023, 1, 30),
            skip_slot: None,
        };
        assert_eq!(spec.date_for_slot(2), Some(date(2023, 2, 1)));
    }

    #[test]
    fn spec_deserializes_from_json() {
        let spec: CalendarSpec =
            serde_json::from_str(r#"{"start":"2022-04-26","skip_slot":5}"#).unwrap();
        assert_eq!(spec.date_for_slot(0), Some(date(2022, 4, 26)));
        assert_eq!(spec.date_for_slot(5), None);
    }

    #[test]
    fn month_table_translates_case_insensitively() {
        assert_eq!(month_number_es("Abril"), Some(4));
        assert_eq!(month_number_es("abril"), Some(4));
        assert_eq!(month_number_es("DICIEMBRE"), Some(12));
    }

    #[test]
    fn unknown_month_is_none() {
        assert_eq!(month_number_es("April"), None);
        assert_eq!(month_number_es(""), None);
    }
}
