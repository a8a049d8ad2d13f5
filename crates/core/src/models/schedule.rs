use std::cmp::Ordering;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::{Auditorium, Course, Group, Period, Professor};

/// One concrete class occurrence.
///
/// `template_id` points at the recurring template the schedule was generated
/// from; ad hoc schedules have none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i64,
    pub template_id: Option<i64>,
    pub date: NaiveDate,
    pub day: Weekday,
    pub period: Period,
    pub auditorium: Auditorium,
    pub course: Course,
    pub group: Group,
    pub professor: Professor,
}

impl Ord for Schedule {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then(self.period.cmp(&other.period))
            .then_with(|| self.auditorium.cmp(&other.auditorium))
            .then_with(|| self.group.cmp(&other.group))
            .then_with(|| self.course.cmp(&other.course))
            .then_with(|| self.professor.cmp(&other.professor))
            .then(self.id.cmp(&other.id))
            .then(self.template_id.cmp(&other.template_id))
            .then(
                self.day
                    .num_days_from_monday()
                    .cmp(&other.day.num_days_from_monday()),
            )
    }
}

impl PartialOrd for Schedule {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Recurring weekly class slot; `week_parity` selects odd (`true`) or even weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTemplate {
    pub id: i64,
    pub week_parity: bool,
    pub day: Weekday,
    pub period: Period,
    pub auditorium: Auditorium,
    pub course: Course,
    pub group: Group,
    pub professor: Professor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReschedulingOption {
    pub id: i64,
    pub day: Weekday,
    pub period: Period,
    pub auditorium: Auditorium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewScheduleTemplate {
    pub week_parity: bool,
    pub day: Weekday,
    pub period: Period,
    pub auditorium_id: i64,
    pub course_id: i64,
    pub group_id: i64,
    pub professor_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSchedule {
    pub template_id: Option<i64>,
    pub date: NaiveDate,
    pub day: Weekday,
    pub period: Period,
    pub auditorium_id: i64,
    pub course_id: i64,
    pub group_id: i64,
    pub professor_id: i64,
}

impl NewSchedule {
    pub fn from_template(template: &ScheduleTemplate, date: NaiveDate) -> Self {
        Self {
            template_id: Some(template.id),
            date,
            day: template.day,
            period: template.period,
            auditorium_id: template.auditorium.id,
            course_id: template.course.id,
            group_id: template.group.id,
            professor_id: template.professor.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReschedulingOption {
    pub day: Weekday,
    pub period: Period,
    pub auditorium_id: i64,
}

/// Selects the schedules shown to one professor or one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ScheduleFilter {
    Professor(i64),
    Group(i64),
}

impl ScheduleFilter {
    pub fn matches(&self, schedule: &Schedule) -> bool {
        match self {
            ScheduleFilter::Professor(id) => schedule.professor.id == *id,
            ScheduleFilter::Group(id) => schedule.group.id == *id,
        }
    }
}
