use axum::http::StatusCode;
use chrono::Weekday;
use mockall::predicate::{always, eq};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use timetable_core::models::{Period, Schedule};

use crate::test_utils::{
    TestContext, auditorium, date, group, option, professor, schedule, template,
};

#[tokio::test]
async fn schedule_carries_rescheduling_links() {
    let mut ctx = TestContext::new();
    ctx.schedules
        .expect_find_by_id()
        .with(eq(5))
        .returning(|id| Ok(Some(schedule(id))));
    let server = ctx.server();

    let response = server.get("/api/schedules/5").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["date"], "2020-09-07");
    assert_eq!(body["period"], "SECOND");
    assert_eq!(body["_links"]["options"]["href"], "/api/schedules/5/options");
    assert_eq!(
        body["_links"]["reschedule"]["href"],
        "/api/schedules/5/reschedule"
    );
}

#[tokio::test]
async fn inverted_range_is_rejected() {
    let server = TestContext::new().server();

    let response = server
        .get("/api/schedules?from=2020-09-10&to=2020-09-01")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn options_skip_booked_slots() {
    let mut ctx = TestContext::new();
    ctx.schedules
        .expect_find_by_id()
        .with(eq(5))
        .returning(|id| Ok(Some(schedule(id))));
    ctx.options
        .expect_find_all_by_day()
        .with(eq(Weekday::Tue))
        .returning(|_| {
            Ok(vec![
                option(1, Weekday::Tue, Period::First, 1),
                option(2, Weekday::Tue, Period::First, 2),
            ])
        });
    ctx.schedules
        .expect_find_all_in_range()
        .with(eq(date(2020, 9, 8)), eq(date(2020, 9, 8)))
        .returning(|_, _| {
            Ok(vec![Schedule {
                date: date(2020, 9, 8),
                day: Weekday::Tue,
                period: Period::First,
                auditorium: auditorium(1),
                group: group(2),
                professor: professor(2),
                template_id: None,
                ..schedule(99)
            }])
        });
    ctx.templates
        .expect_find_all_by_day()
        .with(always(), eq(Weekday::Tue))
        .returning(|_, _| Ok(vec![]));
    let server = ctx.server();

    let response = server
        .get("/api/schedules/5/options?from=2020-09-08&to=2020-09-08")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    let free = body["2020-09-08"].as_array().unwrap();
    assert_eq!(free.len(), 1);
    assert_eq!(free[0]["id"], 2);
}

#[tokio::test]
async fn reschedule_once_moves_one_occurrence() {
    let mut ctx = TestContext::new();
    ctx.schedules
        .expect_find_by_id()
        .with(eq(5))
        .returning(|id| Ok(Some(schedule(id))));
    ctx.options
        .expect_find_by_id()
        .with(eq(3))
        .returning(|id| Ok(Some(option(id, Weekday::Tue, Period::Third, 2))));
    ctx.schedules
        .expect_update()
        .withf(|s| s.id == 5 && s.date == date(2020, 9, 15) && s.period == Period::Third)
        .times(1)
        .returning(Ok);
    let server = ctx.server();

    let response = server
        .put("/api/schedules/5/reschedule")
        .json(&json!({ "date": "2020-09-15", "option_id": 3 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["date"], "2020-09-15");
    assert_eq!(body["day"], "Tue");
    assert_eq!(body["auditorium"]["id"], 2);
    assert_eq!(body["template_id"], 10);
    assert_eq!(body["_links"]["self"]["href"], "/api/schedules/5");
}

#[test_log::test(tokio::test)]
async fn reschedule_permanently_returns_the_template_occurrences() {
    let mut ctx = TestContext::new();
    ctx.schedules
        .expect_find_by_id()
        .with(eq(5))
        .returning(|id| Ok(Some(schedule(id))));
    ctx.options
        .expect_find_by_id()
        .with(eq(3))
        .returning(|id| Ok(Some(option(id, Weekday::Tue, Period::Third, 2))));
    ctx.templates
        .expect_find_by_id()
        .with(eq(10))
        .returning(|id| Ok(Some(template(id))));
    ctx.schedules
        .expect_reschedule_permanently()
        .withf(|t, s, from, start| {
            t.day == Weekday::Tue
                && t.period == Period::Third
                && s.id == 5
                && s.date == date(2020, 9, 15)
                && *from == date(2020, 9, 15)
                && *start == date(2020, 9, 1)
        })
        .times(1)
        .returning(|_, _, _, _| Ok(2));
    ctx.schedules
        .expect_find_all_by_template_id()
        .with(eq(10))
        .returning(|_| Ok(vec![schedule(7), schedule(5), schedule(6)]));
    let server = ctx.server();

    let response = server
        .put("/api/schedules/5/reschedule")
        .json(&json!({ "date": "2020-09-15", "option_id": 3, "permanently": true }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let ids: Vec<i64> = response
        .json::<Vec<Schedule>>()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![5, 6, 7]);
}

#[tokio::test]
async fn ad_hoc_schedule_cannot_move_permanently() {
    let mut ctx = TestContext::new();
    ctx.schedules.expect_find_by_id().returning(|id| {
        Ok(Some(Schedule {
            template_id: None,
            ..schedule(id)
        }))
    });
    ctx.options
        .expect_find_by_id()
        .returning(|id| Ok(Some(option(id, Weekday::Tue, Period::Third, 2))));
    ctx.schedules.expect_update().never();
    let server = ctx.server();

    let response = server
        .put("/api/schedules/5/reschedule")
        .json(&json!({ "date": "2020-09-15", "option_id": 3, "permanently": true }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[case::once(false)]
#[case::permanently(true)]
#[tokio::test]
async fn option_on_another_weekday_is_rejected(#[case] permanently: bool) {
    let mut ctx = TestContext::new();
    ctx.schedules
        .expect_find_by_id()
        .returning(|id| Ok(Some(schedule(id))));
    ctx.options
        .expect_find_by_id()
        .returning(|id| Ok(Some(option(id, Weekday::Tue, Period::Third, 2))));
    ctx.templates
        .expect_find_by_id()
        .returning(|id| Ok(Some(template(id))));
    ctx.schedules.expect_update().never();
    ctx.schedules.expect_reschedule_permanently().never();
    let server = ctx.server();

    // 2020-09-16 is a Wednesday
    let response = server
        .put("/api/schedules/5/reschedule")
        .json(&json!({ "date": "2020-09-16", "option_id": 3, "permanently": permanently }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Validation error: Option with ID(3) is offered on Tue but 2020-09-16 is a Wed"
    );
}

#[tokio::test]
async fn unknown_option_is_not_found() {
    let mut ctx = TestContext::new();
    ctx.schedules
        .expect_find_by_id()
        .returning(|id| Ok(Some(schedule(id))));
    ctx.options.expect_find_by_id().returning(|_| Ok(None));
    let server = ctx.server();

    let response = server
        .put("/api/schedules/5/reschedule")
        .json(&json!({ "date": "2020-09-15", "option_id": 42 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["error"],
        "Option with ID(42) could not be found"
    );
}

#[tokio::test]
async fn professor_is_substituted() {
    let mut ctx = TestContext::new();
    ctx.schedules
        .expect_find_by_id()
        .returning(|id| Ok(Some(schedule(id))));
    ctx.professors
        .expect_find_by_id()
        .with(eq(8))
        .returning(|id| Ok(Some(professor(id))));
    ctx.schedules
        .expect_update()
        .withf(|s| s.professor.id == 8 && s.date == date(2020, 9, 7))
        .times(1)
        .returning(Ok);
    let server = ctx.server();

    let response = server
        .put("/api/schedules/5/professor")
        .json(&json!({ "professor_id": 8 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["professor"]["id"], 8);
}
