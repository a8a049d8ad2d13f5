//! Persistence seams of the timetable.
//!
//! The PostgreSQL implementations live in `timetable-db`; the `mock` feature
//! exposes mockall doubles for tests in other crates.

use async_trait::async_trait;
use chrono::{NaiveDate, Weekday};

use crate::{
    errors::TimetableResult,
    models::{
        Auditorium, Course, Group, NewAuditorium, NewCourse, NewGroup, NewProfessor,
        NewReschedulingOption, NewSchedule, NewScheduleTemplate, NewStudent, Period, Professor,
        ReschedulingOption, Schedule, ScheduleTemplate, Student,
    },
};

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait AuditoriumRepository: Send + Sync {
    async fn count(&self) -> TimetableResult<i64>;
    async fn create(&self, auditorium: NewAuditorium) -> TimetableResult<Auditorium>;
    async fn find_all(&self) -> TimetableResult<Vec<Auditorium>>;
    async fn find_by_id(&self, id: i64) -> TimetableResult<Option<Auditorium>>;
    /// Auditoriums with no schedule at `(date, period)`.
    async fn find_all_available(
        &self,
        date: NaiveDate,
        period: Period,
    ) -> TimetableResult<Vec<Auditorium>>;
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn count(&self) -> TimetableResult<i64>;
    async fn create(&self, course: NewCourse) -> TimetableResult<Course>;
    async fn find_all(&self) -> TimetableResult<Vec<Course>>;
    async fn find_by_id(&self, id: i64) -> TimetableResult<Option<Course>>;
    async fn find_all_by_professor(&self, professor_id: i64) -> TimetableResult<Vec<Course>>;
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn count(&self) -> TimetableResult<i64>;
    async fn create(&self, group: NewGroup) -> TimetableResult<Group>;
    async fn find_all(&self) -> TimetableResult<Vec<Group>>;
    async fn find_by_id(&self, id: i64) -> TimetableResult<Option<Group>>;
    /// Groups a professor teaches the course to, according to the templates.
    async fn find_all_by_professor_and_course(
        &self,
        professor_id: i64,
        course_id: i64,
    ) -> TimetableResult<Vec<Group>>;
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ProfessorRepository: Send + Sync {
    async fn count(&self) -> TimetableResult<i64>;
    async fn create(&self, professor: NewProfessor) -> TimetableResult<Professor>;
    async fn find_all(&self) -> TimetableResult<Vec<Professor>>;
    async fn find_by_id(&self, id: i64) -> TimetableResult<Option<Professor>>;
    /// Professors with no schedule at `(date, period)`.
    async fn find_all_available(
        &self,
        date: NaiveDate,
        period: Period,
    ) -> TimetableResult<Vec<Professor>>;
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn count(&self) -> TimetableResult<i64>;
    async fn create(&self, student: NewStudent) -> TimetableResult<Student>;
    async fn update_group(&self, student_id: i64, group_id: i64) -> TimetableResult<Student>;
    async fn find_all(&self) -> TimetableResult<Vec<Student>>;
    async fn find_by_id(&self, id: i64) -> TimetableResult<Option<Student>>;
    async fn find_all_in_groups(&self, group_ids: Vec<i64>) -> TimetableResult<Vec<Student>>;
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ScheduleTemplateRepository: Send + Sync {
    async fn count(&self) -> TimetableResult<i64>;
    async fn create(&self, template: NewScheduleTemplate) -> TimetableResult<ScheduleTemplate>;
    async fn find_all(&self) -> TimetableResult<Vec<ScheduleTemplate>>;
    async fn find_by_id(&self, id: i64) -> TimetableResult<Option<ScheduleTemplate>>;
    async fn find_all_by_day(
        &self,
        week_parity: bool,
        day: Weekday,
    ) -> TimetableResult<Vec<ScheduleTemplate>>;
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn create_all(&self, schedules: Vec<NewSchedule>) -> TimetableResult<Vec<Schedule>>;
    async fn update(&self, schedule: Schedule) -> TimetableResult<Schedule>;
    async fn find_all(&self) -> TimetableResult<Vec<Schedule>>;
    async fn find_by_id(&self, id: i64) -> TimetableResult<Option<Schedule>>;
    async fn find_all_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> TimetableResult<Vec<Schedule>>;
    async fn find_all_by_template_id(&self, template_id: i64) -> TimetableResult<Vec<Schedule>>;
    /// Stores the retargeted `template` and the `moved` schedule, then moves
    /// every other occurrence of the template dated on or after `from` onto
    /// the template's slot (see [`crate::rescheduling::relocated_date`]).
    ///
    /// All writes share one transaction. Returns the number of other
    /// occurrences moved.
    async fn reschedule_permanently(
        &self,
        template: ScheduleTemplate,
        moved: Schedule,
        from: NaiveDate,
        semester_start: NaiveDate,
    ) -> TimetableResult<u64>;
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ReschedulingOptionRepository: Send + Sync {
    async fn count(&self) -> TimetableResult<i64>;
    async fn create_all(
        &self,
        options: Vec<NewReschedulingOption>,
    ) -> TimetableResult<Vec<ReschedulingOption>>;
    async fn find_all(&self) -> TimetableResult<Vec<ReschedulingOption>>;
    async fn find_by_id(&self, id: i64) -> TimetableResult<Option<ReschedulingOption>>;
    async fn find_all_by_day(&self, day: Weekday) -> TimetableResult<Vec<ReschedulingOption>>;
}
