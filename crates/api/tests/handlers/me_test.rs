use axum::http::{HeaderName, HeaderValue, StatusCode};
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use timetable_core::models::{Course, Schedule};

use crate::test_utils::{TestContext, course, group, professor, schedule, student};

fn professor_header() -> HeaderName {
    HeaderName::from_static("x-professor-id")
}

fn student_header() -> HeaderName {
    HeaderName::from_static("x-student-id")
}

fn week() -> Vec<Schedule> {
    vec![
        schedule(1),
        Schedule {
            group: group(2),
            professor: professor(2),
            ..schedule(2)
        },
    ]
}

#[tokio::test]
async fn schedule_without_selection_asks_for_one() {
    let server = TestContext::new().server();

    let response = server
        .get("/api/me/schedule?from=2020-09-07&to=2020-09-13")
        .await;

    assert_eq!(response.status_code(), StatusCode::PRECONDITION_REQUIRED);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "error": "No professor or student selected",
            "_links": {
                "professors": { "href": "/api/professors" },
                "students": { "href": "/api/students" }
            }
        })
    );
}

#[tokio::test]
async fn professor_sees_own_schedules() {
    let mut ctx = TestContext::new();
    ctx.professors
        .expect_find_by_id()
        .with(eq(2))
        .returning(|id| Ok(Some(professor(id))));
    ctx.schedules
        .expect_find_all_in_range()
        .returning(|_, _| Ok(week()));
    let server = ctx.server();

    let response = server
        .get("/api/me/schedule?from=2020-09-07&to=2020-09-13")
        .add_header(professor_header(), HeaderValue::from_static("2"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let ids: Vec<i64> = response
        .json::<Vec<Schedule>>()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![2]);
}

#[tokio::test]
async fn student_sees_group_schedules() {
    let mut ctx = TestContext::new();
    ctx.students
        .expect_find_by_id()
        .with(eq(7))
        .returning(|id| Ok(Some(student(id, Some(1)))));
    ctx.schedules
        .expect_find_all_in_range()
        .returning(|_, _| Ok(week()));
    let server = ctx.server();

    let response = server
        .get("/api/me/schedule?from=2020-09-07&to=2020-09-13")
        .add_header(student_header(), HeaderValue::from_static("7"))
        .await;

    let ids: Vec<i64> = response
        .json::<Vec<Schedule>>()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![1]);
}

#[tokio::test]
async fn malformed_selection_header_is_rejected() {
    let server = TestContext::new().server();

    let response = server
        .get("/api/me/courses")
        .add_header(professor_header(), HeaderValue::from_static("abc"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn courses_need_a_professor() {
    let server = TestContext::new().server();

    let response = server
        .get("/api/me/courses")
        .add_header(student_header(), HeaderValue::from_static("7"))
        .await;

    assert_eq!(response.status_code(), StatusCode::PRECONDITION_REQUIRED);
    assert_eq!(
        response.json::<Value>()["_links"],
        json!({ "professors": { "href": "/api/professors" } })
    );
}

#[tokio::test]
async fn professor_courses_are_listed() {
    let mut ctx = TestContext::new();
    ctx.professors
        .expect_find_by_id()
        .with(eq(1))
        .returning(|id| Ok(Some(professor(id))));
    ctx.courses
        .expect_find_all_by_professor()
        .with(eq(1))
        .returning(|_| Ok(vec![course(2), course(1)]));
    let server = ctx.server();

    let response = server
        .get("/api/me/courses")
        .add_header(professor_header(), HeaderValue::from_static("1"))
        .await;

    let names: Vec<String> = response
        .json::<Vec<Course>>()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["course1", "course2"]);
}

#[tokio::test]
async fn course_students_come_from_taught_groups() {
    let mut ctx = TestContext::new();
    ctx.groups
        .expect_find_all_by_professor_and_course()
        .with(eq(1), eq(4))
        .returning(|_, _| Ok(vec![group(1), group(3)]));
    ctx.students
        .expect_find_all_in_groups()
        .with(eq(vec![1, 3]))
        .returning(|_| Ok(vec![student(5, Some(3)), student(4, Some(1))]));
    let server = ctx.server();

    let response = server
        .get("/api/me/courses/4/students")
        .add_header(professor_header(), HeaderValue::from_static("1"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body.as_array().unwrap().len(), 2);
}
