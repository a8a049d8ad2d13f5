use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use chrono::NaiveDate;
use serde::Serialize;

use crate::ApiState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    semester: SemesterResponse,
}

#[derive(Serialize)]
struct SemesterResponse {
    start: NaiveDate,
    end: NaiveDate,
    weeks: i64,
}

#[derive(Serialize)]
struct VersionResponse {
    name: &'static str,
    version: &'static str,
}

/// Liveness plus the semester the server was started with.
async fn health_check(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    let calendar = state.timetable.calendar();

    Json(HealthResponse {
        status: "ok",
        semester: SemesterResponse {
            start: calendar.start(),
            end: calendar.end(),
            weeks: calendar.weeks(),
        },
    })
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
}
