use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use timetable_api::middleware::{
    context::RequestContext,
    error_handling::{AppError, map_error},
};
use timetable_core::errors::TimetableError;

#[rstest]
#[case(TimetableError::not_found("Schedule", 1), StatusCode::NOT_FOUND)]
#[case(
    TimetableError::SelectionRequired("professor".to_string()),
    StatusCode::PRECONDITION_REQUIRED
)]
#[case(TimetableError::Validation("bad".to_string()), StatusCode::BAD_REQUEST)]
#[case(
    TimetableError::Database(eyre::eyre!("connection reset")),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn errors_map_to_status(#[case] error: TimetableError, #[case] expected: StatusCode) {
    assert_eq!(map_error(error).status(), expected);
}

#[test]
fn eyre_reports_become_server_errors() {
    let error = AppError::from(eyre::eyre!("pool timed out"));

    assert!(matches!(error.0, TimetableError::Database(_)));
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn context_requires_a_selected_professor() {
    let context = RequestContext::default();
    let error = context.require_professor().unwrap_err();
    assert_eq!(error.to_string(), "No professor selected");

    let context = RequestContext {
        professor_id: Some(4),
        student_id: None,
    };
    assert_eq!(context.require_professor().unwrap(), 4);
}
