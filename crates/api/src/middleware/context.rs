//! Per-request identity.
//!
//! Callers select who they are by sending `X-Professor-Id` or
//! `X-Student-Id`. Nothing is kept between requests.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use timetable_core::{TimetableError, TimetableResult};

use super::error_handling::AppError;

pub const PROFESSOR_HEADER: &str = "x-professor-id";
pub const STUDENT_HEADER: &str = "x-student-id";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub professor_id: Option<i64>,
    pub student_id: Option<i64>,
}

impl RequestContext {
    pub fn require_professor(&self) -> TimetableResult<i64> {
        self.professor_id
            .ok_or_else(|| TimetableError::SelectionRequired("professor".to_string()))
    }
}

fn header_id(parts: &Parts, name: &'static str) -> Result<Option<i64>, AppError> {
    let Some(value) = parts.headers.get(name) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .map(Some)
        .ok_or_else(|| {
            AppError(TimetableError::Validation(format!(
                "Header {} must be a numeric id",
                name
            )))
        })
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestContext {
            professor_id: header_id(parts, PROFESSOR_HEADER)?,
            student_id: header_id(parts, STUDENT_HEADER)?,
        })
    }
}
