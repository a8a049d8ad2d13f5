#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use chrono::{NaiveDate, Weekday};
use timetable_api::{ApiState, app};
use timetable_core::{
    SemesterCalendar, Timetable,
    models::{
        Auditorium, Course, Group, Period, Professor, ReschedulingOption, Schedule,
        ScheduleTemplate, Student,
    },
    repositories::{
        MockAuditoriumRepository, MockCourseRepository, MockGroupRepository,
        MockProfessorRepository, MockReschedulingOptionRepository, MockScheduleRepository,
        MockScheduleTemplateRepository, MockStudentRepository,
    },
    services::Repositories,
};

/// One mock per repository; set expectations, then start a server.
#[derive(Default)]
pub struct TestContext {
    pub auditoriums: MockAuditoriumRepository,
    pub courses: MockCourseRepository,
    pub groups: MockGroupRepository,
    pub professors: MockProfessorRepository,
    pub students: MockStudentRepository,
    pub templates: MockScheduleTemplateRepository,
    pub schedules: MockScheduleRepository,
    pub options: MockReschedulingOptionRepository,
}

impl TestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build_state(self) -> Arc<ApiState> {
        let repos = Repositories {
            auditoriums: Arc::new(self.auditoriums),
            courses: Arc::new(self.courses),
            groups: Arc::new(self.groups),
            professors: Arc::new(self.professors),
            students: Arc::new(self.students),
            templates: Arc::new(self.templates),
            schedules: Arc::new(self.schedules),
            options: Arc::new(self.options),
        };

        Arc::new(ApiState {
            timetable: Timetable::new(repos, calendar()),
        })
    }

    pub fn server(self) -> TestServer {
        TestServer::new(app(self.build_state())).unwrap()
    }
}

pub fn calendar() -> SemesterCalendar {
    SemesterCalendar::new(date(2020, 9, 1), date(2020, 12, 31)).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn auditorium(id: i64) -> Auditorium {
    Auditorium {
        id,
        name: format!("A-{:02}", id),
    }
}

pub fn professor(id: i64) -> Professor {
    Professor {
        id,
        first_name: "Grace".to_string(),
        last_name: format!("Hopper{}", id),
    }
}

pub fn group(id: i64) -> Group {
    Group {
        id,
        name: format!("G-{}", id),
    }
}

pub fn course(id: i64) -> Course {
    Course {
        id,
        name: format!("course{}", id),
        description: None,
    }
}

pub fn student(id: i64, group_id: Option<i64>) -> Student {
    Student {
        id,
        first_name: "Alan".to_string(),
        last_name: format!("Turing{}", id),
        group: group_id.map(group),
    }
}

/// Monday 2020-09-07, second period, generated from template 10.
pub fn schedule(id: i64) -> Schedule {
    Schedule {
        id,
        template_id: Some(10),
        date: date(2020, 9, 7),
        day: Weekday::Mon,
        period: Period::Second,
        auditorium: auditorium(1),
        course: course(1),
        group: group(1),
        professor: professor(1),
    }
}

pub fn template(id: i64) -> ScheduleTemplate {
    ScheduleTemplate {
        id,
        week_parity: true,
        day: Weekday::Mon,
        period: Period::Second,
        auditorium: auditorium(1),
        course: course(1),
        group: group(1),
        professor: professor(1),
    }
}

pub fn option(id: i64, day: Weekday, period: Period, auditorium_id: i64) -> ReschedulingOption {
    ReschedulingOption {
        id,
        day,
        period,
        auditorium: auditorium(auditorium_id),
    }
}
