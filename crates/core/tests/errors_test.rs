use std::error::Error;
use timetable_core::errors::{TimetableError, TimetableResult};

#[test]
fn test_timetable_error_display() {
    let not_found = TimetableError::not_found("Template", 1);
    let selection = TimetableError::SelectionRequired("professor".to_string());
    let validation = TimetableError::Validation("Invalid input".to_string());
    let database = TimetableError::Database(eyre::eyre!("Database connection failed"));
    let internal = TimetableError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    assert_eq!(not_found.to_string(), "Template with ID(1) could not be found");
    assert_eq!(selection.to_string(), "No professor selected");
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert!(database.to_string().contains("Database error:"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_not_found_carries_id() {
    match TimetableError::not_found("Professor", 42) {
        TimetableError::NotFound { entity, id } => {
            assert_eq!(entity, "Professor");
            assert_eq!(id, 42);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let timetable_error = TimetableError::Internal(Box::new(io_error));

    assert!(timetable_error.source().is_some());
}

#[test]
fn test_from_eyre_report() {
    let result: TimetableResult<i32> = Err(eyre::eyre!("connection reset").into());

    match result {
        Err(TimetableError::Database(report)) => {
            assert!(report.to_string().contains("connection reset"))
        }
        other => panic!("unexpected result: {:?}", other),
    }
}
