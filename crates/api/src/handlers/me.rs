//! Views scoped to the professor or student named in the request headers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use timetable_core::{
    TimetableError,
    models::{Course, Schedule, ScheduleFilter, Student},
};

use super::RangeQuery;
use crate::{ApiState, middleware::context::RequestContext, middleware::error_handling::AppError};

/// A selected professor takes precedence over a selected student.
pub async fn my_schedule(
    State(state): State<Arc<ApiState>>,
    context: RequestContext,
    Query(range): Query<RangeQuery>,
) -> Result<Json<Vec<Schedule>>, AppError> {
    let filter = match (context.professor_id, context.student_id) {
        (Some(professor_id), _) => {
            state.timetable.professor(professor_id).await?;
            ScheduleFilter::Professor(professor_id)
        }
        (None, Some(student_id)) => state.timetable.student_filter(student_id).await?,
        (None, None) => {
            return Err(TimetableError::SelectionRequired("professor or student".to_string()).into());
        }
    };

    Ok(Json(
        state
            .timetable
            .schedules_for(filter, range.from, range.to)
            .await?,
    ))
}

pub async fn my_courses(
    State(state): State<Arc<ApiState>>,
    context: RequestContext,
) -> Result<Json<Vec<Course>>, AppError> {
    let professor_id = context.require_professor()?;
    Ok(Json(state.timetable.professor_courses(professor_id).await?))
}

/// Students attending one of the selected professor's courses.
pub async fn my_course_students(
    State(state): State<Arc<ApiState>>,
    context: RequestContext,
    Path(course_id): Path<i64>,
) -> Result<Json<Vec<Student>>, AppError> {
    let professor_id = context.require_professor()?;
    Ok(Json(
        state
            .timetable
            .course_attendees(course_id, professor_id)
            .await?,
    ))
}
