//! Pure rescheduling rules.
//!
//! Every mutation takes the old value and a change descriptor and returns
//! the new value; persistence is left to [`crate::services::Timetable`].

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::{
    calendar::{SemesterCalendar, dates_between, week_monday},
    errors::{TimetableError, TimetableResult},
    models::{
        Auditorium, NewSchedule, Period, Professor, ReschedulingOption, Schedule,
        ScheduleTemplate,
    },
};

/// Target slot of a reschedule: a calendar date plus the option's day, period
/// and auditorium.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotChange {
    pub date: NaiveDate,
    pub day: Weekday,
    pub period: Period,
    pub auditorium: Auditorium,
}

impl SlotChange {
    /// Fails when the option is offered on another weekday than `date`.
    pub fn new(date: NaiveDate, option: &ReschedulingOption) -> TimetableResult<Self> {
        if option.day != date.weekday() {
            return Err(TimetableError::Validation(format!(
                "Option with ID({}) is offered on {} but {} is a {}",
                option.id,
                option.day,
                date,
                date.weekday()
            )));
        }

        Ok(Self {
            date,
            day: option.day,
            period: option.period,
            auditorium: option.auditorium.clone(),
        })
    }
}

/// Moves a single occurrence. Template, course, group and professor are kept,
/// so the occurrence now diverges from its template.
pub fn reschedule_once(schedule: Schedule, change: &SlotChange) -> Schedule {
    Schedule {
        date: change.date,
        day: change.day,
        period: change.period,
        auditorium: change.auditorium.clone(),
        ..schedule
    }
}

pub fn substitute_professor(schedule: Schedule, professor: Professor) -> Schedule {
    Schedule {
        professor,
        ..schedule
    }
}

/// Points a template at the new slot, with the parity of the week the change lands in.
pub fn retarget_template(
    template: ScheduleTemplate,
    week_parity: bool,
    change: &SlotChange,
) -> ScheduleTemplate {
    ScheduleTemplate {
        week_parity,
        day: change.day,
        period: change.period,
        auditorium: change.auditorium.clone(),
        ..template
    }
}

/// Date an occurrence of a retargeted template moves to.
///
/// The occurrence keeps its week and lands on the template's weekday, one
/// week later when that week has the other parity. A landing before `from`
/// is pushed a full rotation forward. `update_schedules_from_template` in
/// `timetable-db` applies the same rule in SQL.
pub fn relocated_date(
    occurrence: NaiveDate,
    from: NaiveDate,
    template: &ScheduleTemplate,
    calendar: &SemesterCalendar,
) -> NaiveDate {
    let offset = i64::from(template.day.num_days_from_monday());
    let mut target = week_monday(occurrence) + Duration::days(offset);

    if calendar.week_parity_of(target) != template.week_parity {
        target += Duration::days(7);
    }
    if target < from {
        target += Duration::days(14);
    }
    target
}

/// Occupancy of one period by an auditorium, a professor and a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Booking {
    pub period: Period,
    pub auditorium_id: i64,
    pub professor_id: i64,
    pub group_id: i64,
}

impl From<&Schedule> for Booking {
    fn from(schedule: &Schedule) -> Self {
        Self {
            period: schedule.period,
            auditorium_id: schedule.auditorium.id,
            professor_id: schedule.professor.id,
            group_id: schedule.group.id,
        }
    }
}

impl From<&ScheduleTemplate> for Booking {
    fn from(template: &ScheduleTemplate) -> Self {
        Self {
            period: template.period,
            auditorium_id: template.auditorium.id,
            professor_id: template.professor.id,
            group_id: template.group.id,
        }
    }
}

/// An option collides with a booking in the same period that holds its
/// auditorium, the moving class's professor or the moving class's group.
pub fn collides(option: &ReschedulingOption, booking: &Booking, moving: &Schedule) -> bool {
    option.period == booking.period
        && (option.auditorium.id == booking.auditorium_id
            || moving.professor.id == booking.professor_id
            || moving.group.id == booking.group_id)
}

/// Keeps the options, in their original order, that collide with no booking.
pub fn free_options(
    options: Vec<ReschedulingOption>,
    bookings: &[Booking],
    moving: &Schedule,
) -> Vec<ReschedulingOption> {
    options
        .into_iter()
        .filter(|option| !bookings.iter().any(|booking| collides(option, booking, moving)))
        .collect()
}

/// Expands templates into concrete schedules for every semester date in `[from, to]`.
pub fn expand_templates(
    templates: &[ScheduleTemplate],
    calendar: &SemesterCalendar,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<NewSchedule> {
    dates_between(from, to)
        .filter(|date| calendar.contains(*date))
        .flat_map(|date| {
            let parity = calendar.week_parity_of(date);
            templates
                .iter()
                .filter(move |template| {
                    template.day == date.weekday() && template.week_parity == parity
                })
                .map(move |template| NewSchedule::from_template(template, date))
        })
        .collect()
}
