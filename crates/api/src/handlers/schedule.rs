use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use timetable_core::{models::Schedule, services::DayOptions};

use super::RangeQuery;
use crate::{
    ApiState,
    links::{Linked, ResourceKind},
    middleware::error_handling::AppError,
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RescheduleRequest {
    pub date: NaiveDate,
    pub option_id: i64,
    #[serde(default)]
    pub permanently: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubstituteRequest {
    pub professor_id: i64,
}

pub async fn list_schedules(
    State(state): State<Arc<ApiState>>,
    Query(range): Query<RangeQuery>,
) -> Result<Json<Vec<Schedule>>, AppError> {
    Ok(Json(
        state
            .timetable
            .schedules_in_range(range.from, range.to)
            .await?,
    ))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<Linked<Schedule>>, AppError> {
    let schedule = state.timetable.schedule(id).await?;
    Ok(Json(Linked::new(ResourceKind::Schedule, id, schedule)))
}

/// Free options per date for moving the schedule.
pub async fn schedule_options(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Query(range): Query<RangeQuery>,
) -> Result<Json<DayOptions>, AppError> {
    let schedule = state.timetable.schedule(id).await?;
    let options = state
        .timetable
        .find_all_options_for(&schedule, range.from, range.to)
        .await?;
    Ok(Json(options))
}

/// Applies an option once, or to the template and its future occurrences.
///
/// A one-off move answers with the schedule; a permanent one with every
/// schedule of the template.
#[axum::debug_handler]
pub async fn reschedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<RescheduleRequest>,
) -> Result<Response, AppError> {
    let schedule = state.timetable.schedule(id).await?;
    let option = state.timetable.option(payload.option_id).await?;

    if payload.permanently {
        let schedules = state
            .timetable
            .reschedule_permanently(schedule, payload.date, &option)
            .await?;
        return Ok(Json(schedules).into_response());
    }

    let moved = state
        .timetable
        .reschedule_once(schedule, payload.date, &option)
        .await?;
    Ok(Json(Linked::new(ResourceKind::Schedule, moved.id, moved)).into_response())
}

#[axum::debug_handler]
pub async fn substitute_professor(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<SubstituteRequest>,
) -> Result<Json<Linked<Schedule>>, AppError> {
    let schedule = state.timetable.schedule(id).await?;
    let professor = state.timetable.professor(payload.professor_id).await?;

    let substituted = state
        .timetable
        .substitute_professor(schedule, professor)
        .await?;
    Ok(Json(Linked::new(
        ResourceKind::Schedule,
        substituted.id,
        substituted,
    )))
}
