//! # Error Handling Middleware
//!
//! Maps [`TimetableError`] onto HTTP status codes and a JSON body of the
//! form `{"error": message}`. A missing professor or student selection
//! answers `428 Precondition Required` and links to the list the caller
//! should pick from.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use timetable_core::errors::TimetableError;
use tracing::error;

use crate::links;

/// Application error wrapper that provides HTTP status code mapping
///
/// Handlers return `Result<_, AppError>` and use `?` on anything that yields
/// a [`TimetableError`] or an [`eyre::Report`].
#[derive(Debug)]
pub struct AppError(pub TimetableError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TimetableError::NotFound { .. } => StatusCode::NOT_FOUND,
            TimetableError::SelectionRequired(_) => StatusCode::PRECONDITION_REQUIRED,
            TimetableError::Validation(_) => StatusCode::BAD_REQUEST,
            TimetableError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TimetableError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();

        if status.is_server_error() {
            error!(error = ?self.0, "Request failed");
        }

        let body = match &self.0 {
            TimetableError::SelectionRequired(subject) => json!({
                "error": message,
                "_links": links::selection_links(subject),
            }),
            _ => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<TimetableError> for AppError {
    fn from(err: TimetableError) -> Self {
        AppError(err)
    }
}

/// Wraps the report in [`TimetableError::Database`].
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(TimetableError::Database(err))
    }
}

pub fn map_error(err: TimetableError) -> Response {
    AppError(err).into_response()
}
