use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use timetable_core::models::Period;

/// Auditoriums, courses, groups, professors, students and options
pub mod reference;
/// Selected professor or student
pub mod me;
/// Concrete schedules and their rescheduling
pub mod schedule;
/// Recurring templates
pub mod template;

/// `?from=YYYY-MM-DD&to=YYYY-MM-DD`
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct RangeQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// `?date=YYYY-MM-DD&period=FIRST`
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct SlotQuery {
    pub date: NaiveDate,
    pub period: Period,
}
