use axum::http::StatusCode;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use timetable_core::models::{Auditorium, Period};

use crate::test_utils::{TestContext, auditorium, date, group, professor, student};

#[tokio::test]
async fn health_reports_the_semester() {
    let server = TestContext::new().server();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "status": "ok",
            "semester": { "start": "2020-09-01", "end": "2020-12-31", "weeks": 18 }
        })
    );
}

#[tokio::test]
async fn unknown_auditorium_is_not_found() {
    let mut ctx = TestContext::new();
    ctx.auditoriums
        .expect_find_by_id()
        .with(eq(9))
        .returning(|_| Ok(None));
    let server = ctx.server();

    let response = server.get("/api/auditoriums/9").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Auditorium with ID(9) could not be found" })
    );
}

#[tokio::test]
async fn professor_carries_links() {
    let mut ctx = TestContext::new();
    ctx.professors
        .expect_find_by_id()
        .with(eq(3))
        .returning(|id| Ok(Some(professor(id))));
    let server = ctx.server();

    let response = server.get("/api/professors/3").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["last_name"], "Hopper3");
    assert_eq!(body["_links"]["self"]["href"], "/api/professors/3");
    assert_eq!(body["_links"]["courses"]["href"], "/api/professors/3/courses");
}

#[tokio::test]
async fn auditoriums_are_listed_by_name() {
    let mut ctx = TestContext::new();
    ctx.auditoriums
        .expect_find_all()
        .returning(|| Ok(vec![auditorium(2), auditorium(1)]));
    let server = ctx.server();

    let response = server.get("/api/auditoriums").await;

    let names: Vec<String> = response
        .json::<Vec<Auditorium>>()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["A-01", "A-02"]);
}

#[tokio::test]
async fn available_auditoriums_use_date_and_period() {
    let mut ctx = TestContext::new();
    ctx.auditoriums
        .expect_find_all_available()
        .with(eq(date(2020, 9, 7)), eq(Period::Second))
        .times(1)
        .returning(|_, _| Ok(vec![auditorium(4)]));
    let server = ctx.server();

    let response = server
        .get("/api/auditoriums/available?date=2020-09-07&period=SECOND")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Vec<Auditorium>>(), vec![auditorium(4)]);
}

#[tokio::test]
async fn unknown_period_is_rejected() {
    let server = TestContext::new().server();

    let response = server
        .get("/api/professors/available?date=2020-09-07&period=SEVENTH")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn student_without_group_is_rejected() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/students")
        .json(&json!({ "first_name": "Alan", "last_name": "Turing", "group_id": null }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn student_transfer_returns_the_new_group() {
    let mut ctx = TestContext::new();
    ctx.students
        .expect_find_by_id()
        .with(eq(7))
        .returning(|id| Ok(Some(student(id, Some(1)))));
    ctx.groups
        .expect_find_by_id()
        .with(eq(2))
        .returning(|id| Ok(Some(group(id))));
    ctx.students
        .expect_update_group()
        .with(eq(7), eq(2))
        .times(1)
        .returning(|id, group_id| Ok(student(id, Some(group_id))));
    let server = ctx.server();

    let response = server
        .put("/api/students/7/group")
        .json(&json!({ "group_id": 2 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["group"]["id"], 2);
    assert_eq!(body["_links"]["transfer"]["href"], "/api/students/7/group");
}

#[tokio::test]
async fn stats_count_every_collection() {
    let mut ctx = TestContext::new();
    ctx.auditoriums.expect_count().returning(|| Ok(3));
    ctx.courses.expect_count().returning(|| Ok(4));
    ctx.groups.expect_count().returning(|| Ok(2));
    ctx.professors.expect_count().returning(|| Ok(5));
    ctx.students.expect_count().returning(|| Ok(40));
    ctx.templates.expect_count().returning(|| Ok(12));
    ctx.options.expect_count().returning(|| Ok(30));
    let server = ctx.server();

    let response = server.get("/api/stats").await;

    assert_eq!(
        response.json::<Value>(),
        json!({
            "auditoriums": 3,
            "courses": 4,
            "groups": 2,
            "professors": 5,
            "students": 40,
            "templates": 12,
            "options": 30
        })
    );
}
