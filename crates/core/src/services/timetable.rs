use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::{
    calendar::SemesterCalendar,
    errors::{TimetableError, TimetableResult},
    models::{
        Auditorium, Course, Group, NewAuditorium, NewCourse, NewGroup, NewProfessor,
        NewReschedulingOption, NewScheduleTemplate, NewStudent, Professor, ReschedulingOption,
        Schedule, ScheduleFilter, ScheduleTemplate, Student,
    },
    repositories::{
        AuditoriumRepository, CourseRepository, GroupRepository, ProfessorRepository,
        ReschedulingOptionRepository, ScheduleRepository, ScheduleTemplateRepository,
        StudentRepository,
    },
};

/// The repository set a [`Timetable`] works against.
#[derive(Clone)]
pub struct Repositories {
    pub auditoriums: Arc<dyn AuditoriumRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub professors: Arc<dyn ProfessorRepository>,
    pub students: Arc<dyn StudentRepository>,
    pub templates: Arc<dyn ScheduleTemplateRepository>,
    pub schedules: Arc<dyn ScheduleRepository>,
    pub options: Arc<dyn ReschedulingOptionRepository>,
}

/// Facade over the repositories and the rescheduling rules.
///
/// Lookups by id fail with [`TimetableError::NotFound`] rather than
/// returning `None`; list queries return entities in display order.
#[derive(Clone)]
pub struct Timetable {
    pub(super) repos: Repositories,
    pub(super) calendar: SemesterCalendar,
}

impl Timetable {
    pub fn new(repos: Repositories, calendar: SemesterCalendar) -> Self {
        Self { repos, calendar }
    }

    pub fn calendar(&self) -> &SemesterCalendar {
        &self.calendar
    }

    // Auditoriums

    pub async fn count_auditoriums(&self) -> TimetableResult<i64> {
        self.repos.auditoriums.count().await
    }

    pub async fn add_auditorium(&self, auditorium: NewAuditorium) -> TimetableResult<Auditorium> {
        validate_name("Auditorium", &auditorium.name)?;
        self.repos.auditoriums.create(auditorium).await
    }

    pub async fn auditoriums(&self) -> TimetableResult<Vec<Auditorium>> {
        sorted(self.repos.auditoriums.find_all().await?)
    }

    pub async fn auditorium(&self, id: i64) -> TimetableResult<Auditorium> {
        self.repos
            .auditoriums
            .find_by_id(id)
            .await?
            .ok_or_else(|| TimetableError::not_found("Auditorium", id))
    }

    // Courses

    pub async fn count_courses(&self) -> TimetableResult<i64> {
        self.repos.courses.count().await
    }

    pub async fn add_course(&self, course: NewCourse) -> TimetableResult<Course> {
        validate_name("Course", &course.name)?;
        self.repos.courses.create(course).await
    }

    pub async fn courses(&self) -> TimetableResult<Vec<Course>> {
        sorted(self.repos.courses.find_all().await?)
    }

    pub async fn course(&self, id: i64) -> TimetableResult<Course> {
        self.repos
            .courses
            .find_by_id(id)
            .await?
            .ok_or_else(|| TimetableError::not_found("Course", id))
    }

    // Groups

    pub async fn count_groups(&self) -> TimetableResult<i64> {
        self.repos.groups.count().await
    }

    pub async fn add_group(&self, group: NewGroup) -> TimetableResult<Group> {
        validate_name("Group", &group.name)?;
        self.repos.groups.create(group).await
    }

    pub async fn groups(&self) -> TimetableResult<Vec<Group>> {
        sorted(self.repos.groups.find_all().await?)
    }

    pub async fn group(&self, id: i64) -> TimetableResult<Group> {
        self.repos
            .groups
            .find_by_id(id)
            .await?
            .ok_or_else(|| TimetableError::not_found("Group", id))
    }

    // Professors

    pub async fn count_professors(&self) -> TimetableResult<i64> {
        self.repos.professors.count().await
    }

    pub async fn add_professor(&self, professor: NewProfessor) -> TimetableResult<Professor> {
        validate_name("Professor", &professor.first_name)?;
        validate_name("Professor", &professor.last_name)?;
        self.repos.professors.create(professor).await
    }

    pub async fn professors(&self) -> TimetableResult<Vec<Professor>> {
        sorted(self.repos.professors.find_all().await?)
    }

    pub async fn professor(&self, id: i64) -> TimetableResult<Professor> {
        self.repos
            .professors
            .find_by_id(id)
            .await?
            .ok_or_else(|| TimetableError::not_found("Professor", id))
    }

    pub async fn professor_courses(&self, professor_id: i64) -> TimetableResult<Vec<Course>> {
        let professor = self.professor(professor_id).await?;
        sorted(self.repos.courses.find_all_by_professor(professor.id).await?)
    }

    // Students

    pub async fn count_students(&self) -> TimetableResult<i64> {
        self.repos.students.count().await
    }

    /// Enrolls a student; a student always joins with a group.
    pub async fn add_student(&self, student: NewStudent) -> TimetableResult<Student> {
        validate_name("Student", &student.first_name)?;
        validate_name("Student", &student.last_name)?;
        let group_id = student.group_id.ok_or_else(|| {
            TimetableError::Validation("Student must be assigned to a group".to_string())
        })?;
        self.group(group_id).await?;

        self.repos.students.create(student).await
    }

    pub async fn transfer_student(&self, student_id: i64, group_id: i64) -> TimetableResult<Student> {
        self.student(student_id).await?;
        self.group(group_id).await?;

        info!(student_id, group_id, "Transferring student");
        self.repos.students.update_group(student_id, group_id).await
    }

    pub async fn students(&self) -> TimetableResult<Vec<Student>> {
        sorted(self.repos.students.find_all().await?)
    }

    pub async fn student(&self, id: i64) -> TimetableResult<Student> {
        self.repos
            .students
            .find_by_id(id)
            .await?
            .ok_or_else(|| TimetableError::not_found("Student", id))
    }

    /// Students of every group the professor teaches the course to.
    pub async fn course_attendees(
        &self,
        course_id: i64,
        professor_id: i64,
    ) -> TimetableResult<Vec<Student>> {
        let groups = self
            .repos
            .groups
            .find_all_by_professor_and_course(professor_id, course_id)
            .await?;
        if groups.is_empty() {
            return Ok(Vec::new());
        }

        let group_ids = groups.into_iter().map(|group| group.id).collect();
        sorted(self.repos.students.find_all_in_groups(group_ids).await?)
    }

    // Templates

    pub async fn count_templates(&self) -> TimetableResult<i64> {
        self.repos.templates.count().await
    }

    pub async fn add_template(
        &self,
        template: NewScheduleTemplate,
    ) -> TimetableResult<ScheduleTemplate> {
        self.repos.templates.create(template).await
    }

    /// The full two-week rotation.
    pub async fn templates(&self) -> TimetableResult<Vec<ScheduleTemplate>> {
        let mut templates = self.repos.templates.find_all().await?;
        templates.sort_by(|a, b| {
            a.week_parity
                .cmp(&b.week_parity)
                .then(a.day.num_days_from_monday().cmp(&b.day.num_days_from_monday()))
                .then(a.period.cmp(&b.period))
                .then_with(|| a.auditorium.cmp(&b.auditorium))
        });
        Ok(templates)
    }

    pub async fn template(&self, id: i64) -> TimetableResult<ScheduleTemplate> {
        self.repos
            .templates
            .find_by_id(id)
            .await?
            .ok_or_else(|| TimetableError::not_found("Template", id))
    }

    // Options

    pub async fn count_options(&self) -> TimetableResult<i64> {
        self.repos.options.count().await
    }

    pub async fn add_options(
        &self,
        options: Vec<NewReschedulingOption>,
    ) -> TimetableResult<Vec<ReschedulingOption>> {
        if options.is_empty() {
            return Ok(Vec::new());
        }
        self.repos.options.create_all(options).await
    }

    pub async fn options(&self) -> TimetableResult<Vec<ReschedulingOption>> {
        self.repos.options.find_all().await
    }

    pub async fn option(&self, id: i64) -> TimetableResult<ReschedulingOption> {
        self.repos
            .options
            .find_by_id(id)
            .await?
            .ok_or_else(|| TimetableError::not_found("Option", id))
    }

    // Schedules

    pub async fn schedule(&self, id: i64) -> TimetableResult<Schedule> {
        self.repos
            .schedules
            .find_by_id(id)
            .await?
            .ok_or_else(|| TimetableError::not_found("Schedule", id))
    }

    pub async fn schedules(&self) -> TimetableResult<Vec<Schedule>> {
        sorted(self.repos.schedules.find_all().await?)
    }

    pub async fn schedules_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> TimetableResult<Vec<Schedule>> {
        validate_range(from, to)?;
        sorted(self.repos.schedules.find_all_in_range(from, to).await?)
    }

    /// Schedules in range seen by one professor or one group.
    pub async fn schedules_for(
        &self,
        filter: ScheduleFilter,
        from: NaiveDate,
        to: NaiveDate,
    ) -> TimetableResult<Vec<Schedule>> {
        let schedules = self.schedules_in_range(from, to).await?;
        Ok(schedules
            .into_iter()
            .filter(|schedule| filter.matches(schedule))
            .collect())
    }

    /// Filter matching the schedules of the student's group.
    pub async fn student_filter(&self, student_id: i64) -> TimetableResult<ScheduleFilter> {
        let student = self.student(student_id).await?;
        student
            .group
            .map(|group| ScheduleFilter::Group(group.id))
            .ok_or_else(|| {
                TimetableError::Validation(format!(
                    "Student with ID({}) is not assigned to a group",
                    student_id
                ))
            })
    }
}

pub(super) fn validate_range(from: NaiveDate, to: NaiveDate) -> TimetableResult<()> {
    if from > to {
        return Err(TimetableError::Validation(format!(
            "Range start {} is after range end {}",
            from, to
        )));
    }
    Ok(())
}

fn validate_name(entity: &str, name: &str) -> TimetableResult<()> {
    if name.trim().is_empty() {
        return Err(TimetableError::Validation(format!(
            "{} name must not be empty",
            entity
        )));
    }
    Ok(())
}

fn sorted<T: Ord>(mut items: Vec<T>) -> TimetableResult<Vec<T>> {
    items.sort();
    Ok(items)
}
