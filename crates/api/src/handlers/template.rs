use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use timetable_core::models::{NewScheduleTemplate, Schedule, ScheduleTemplate};

use super::RangeQuery;
use crate::{
    ApiState,
    links::{Linked, ResourceKind},
    middleware::error_handling::AppError,
};

pub async fn list_templates(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ScheduleTemplate>>, AppError> {
    Ok(Json(state.timetable.templates().await?))
}

pub async fn create_template(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<NewScheduleTemplate>,
) -> Result<(StatusCode, Json<Linked<ScheduleTemplate>>), AppError> {
    let template = state.timetable.add_template(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(Linked::new(ResourceKind::Template, template.id, template)),
    ))
}

pub async fn get_template(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<Linked<ScheduleTemplate>>, AppError> {
    let template = state.timetable.template(id).await?;
    Ok(Json(Linked::new(ResourceKind::Template, id, template)))
}

/// Body is a range: `{"from": "...", "to": "..."}`.
pub async fn generate_schedules(
    State(state): State<Arc<ApiState>>,
    Json(range): Json<RangeQuery>,
) -> Result<(StatusCode, Json<Vec<Schedule>>), AppError> {
    let schedules = state
        .timetable
        .generate_schedules(range.from, range.to)
        .await?;
    Ok((StatusCode::CREATED, Json(schedules)))
}
