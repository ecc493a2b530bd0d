//! Calendar view model: a month grid marking days with note activity.
//!
//! Read-only consumer of the note map; a day counts as active when any note
//! was created or modified on it.

use chrono::{Datelike, Local, NaiveDate};

use crate::models::Note;

pub const DAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarDay {
    pub day: u32,
    pub is_today: bool,
    pub has_activity: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct CalendarMonth {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
}

impl CalendarMonth {
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn label(&self) -> String {
        let date = NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or_else(|| Local::now().date_naive());
        date.format("%B %Y").to_string()
    }

    pub fn prev(&mut self) {
        if self.month == 1 {
            self.month = 12;
            self.year -= 1;
        } else {
            self.month -= 1;
        }
    }

    pub fn next(&mut self) {
        if self.month == 12 {
            self.month = 1;
            self.year += 1;
        } else {
            self.month += 1;
        }
    }

    /// Number of leading blank cells before day 1, with a Sunday-first week.
    pub fn leading_blanks(&self) -> usize {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.weekday().num_days_from_sunday() as usize)
            .unwrap_or(0)
    }

    pub fn days_in_month(&self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1);
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1);
        match (first, first_of_next) {
            (Some(a), Some(b)) => b.signed_duration_since(a).num_days() as u32,
            _ => 30,
        }
    }

    /// Builds the day cells for this month against the full note map.
    pub fn day_grid<'a>(&self, notes: impl Iterator<Item = &'a Note>) -> Vec<CalendarDay> {
        let mut active = vec![false; self.days_in_month() as usize + 1];
        for note in notes {
            for stamp in [note.created_at, note.modified_at] {
                let local = stamp.with_timezone(&Local).date_naive();
                if local.year() == self.year && local.month() == self.month {
                    active[local.day() as usize] = true;
                }
            }
        }

        let today = Local::now().date_naive();
        (1..=self.days_in_month())
            .map(|day| CalendarDay {
                day,
                is_today: today.year() == self.year
                    && today.month() == self.month
                    && today.day() == day,
                has_activity: active[day as usize],
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn note_on(date: DateTime<Utc>) -> Note {
        let mut note = Note::new("default");
        note.created_at = date;
        note.modified_at = date;
        note
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        let feb_leap = CalendarMonth {
            year: 2024,
            month: 2,
        };
        let feb_common = CalendarMonth {
            year: 2025,
            month: 2,
        };
        assert_eq!(feb_leap.days_in_month(), 29);
        assert_eq!(feb_common.days_in_month(), 28);
    }

    #[test]
    fn navigation_wraps_across_year_boundaries() {
        let mut month = CalendarMonth {
            year: 2026,
            month: 1,
        };
        month.prev();
        assert_eq!((month.year, month.month), (2025, 12));
        month.next();
        assert_eq!((month.year, month.month), (2026, 1));
    }

    #[test]
    fn grid_marks_days_with_note_activity() {
        let month = CalendarMonth {
            year: 2026,
            month: 8,
        };
        // Midday UTC keeps the local date on the same day in every offset
        // the test may run under, short of extreme zones.
        let stamp = Utc.with_ymd_and_hms(2026, 8, 15, 12, 0, 0).unwrap();
        let notes = vec![note_on(stamp)];

        let grid = month.day_grid(notes.iter());
        assert_eq!(grid.len(), 31);
        let marked: Vec<u32> = grid.iter().filter(|d| d.has_activity).map(|d| d.day).collect();
        assert!(marked == vec![14] || marked == vec![15] || marked == vec![16]);
    }

    #[test]
    fn other_months_show_no_activity() {
        let month = CalendarMonth {
            year: 2026,
            month: 7,
        };
        let stamp = Utc.with_ymd_and_hms(2026, 8, 15, 12, 0, 0).unwrap();
        let notes = vec![note_on(stamp)];
        assert!(month.day_grid(notes.iter()).iter().all(|d| !d.has_activity));
    }
}
