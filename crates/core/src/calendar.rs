use chrono::{Datelike, Duration, NaiveDate};

use crate::errors::{TimetableError, TimetableResult};

/// Semester boundaries and the odd/even week rotation derived from them.
///
/// Weeks are Monday-aligned: the week holding `start` has index 0 and is an
/// even week, so `week_parity_of` returns `false` for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemesterCalendar {
    start: NaiveDate,
    end: NaiveDate,
}

impl SemesterCalendar {
    pub fn new(start: NaiveDate, end: NaiveDate) -> TimetableResult<Self> {
        if end < start {
            return Err(TimetableError::Validation(format!(
                "Semester end {} is before semester start {}",
                end, start
            )));
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Index of the week holding `date`, counted from the semester's first week.
    pub fn week_index_of(&self, date: NaiveDate) -> i64 {
        let days = (week_monday(date) - week_monday(self.start)).num_days();
        days.div_euclid(7)
    }

    /// `true` on odd weeks of the two-week rotation.
    pub fn week_parity_of(&self, date: NaiveDate) -> bool {
        self.week_index_of(date).rem_euclid(2) == 1
    }

    /// Number of (possibly partial) weeks the semester spans.
    pub fn weeks(&self) -> i64 {
        self.week_index_of(self.end) + 1
    }
}

pub(crate) fn week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Every date in `[from, to]`, in order. Empty when `from > to`.
pub fn dates_between(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    from.iter_days().take_while(move |date| *date <= to)
}
