use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use timetable_core::models::{
    Auditorium, Course, Group, NewAuditorium, NewCourse, NewGroup, NewProfessor,
    NewReschedulingOption, NewStudent, Professor, ReschedulingOption, Student,
};

use super::SlotQuery;
use crate::{
    ApiState,
    links::{Linked, ResourceKind},
    middleware::error_handling::AppError,
};

type Created<T> = (StatusCode, Json<Linked<T>>);

fn created<T>(kind: ResourceKind, id: i64, data: T) -> Created<T> {
    (StatusCode::CREATED, Json(Linked::new(kind, id, data)))
}

// Auditoriums

pub async fn list_auditoriums(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Auditorium>>, AppError> {
    Ok(Json(state.timetable.auditoriums().await?))
}

pub async fn create_auditorium(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<NewAuditorium>,
) -> Result<Created<Auditorium>, AppError> {
    let auditorium = state.timetable.add_auditorium(payload).await?;
    Ok(created(ResourceKind::Auditorium, auditorium.id, auditorium))
}

pub async fn get_auditorium(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<Linked<Auditorium>>, AppError> {
    let auditorium = state.timetable.auditorium(id).await?;
    Ok(Json(Linked::new(ResourceKind::Auditorium, id, auditorium)))
}

pub async fn available_auditoriums(
    State(state): State<Arc<ApiState>>,
    Query(slot): Query<SlotQuery>,
) -> Result<Json<Vec<Auditorium>>, AppError> {
    Ok(Json(
        state
            .timetable
            .available_auditoriums(slot.date, slot.period)
            .await?,
    ))
}

// Courses

pub async fn list_courses(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Course>>, AppError> {
    Ok(Json(state.timetable.courses().await?))
}

pub async fn create_course(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<NewCourse>,
) -> Result<Created<Course>, AppError> {
    let course = state.timetable.add_course(payload).await?;
    Ok(created(ResourceKind::Course, course.id, course))
}

pub async fn get_course(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<Linked<Course>>, AppError> {
    let course = state.timetable.course(id).await?;
    Ok(Json(Linked::new(ResourceKind::Course, id, course)))
}

// Groups

pub async fn list_groups(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<Group>>, AppError> {
    Ok(Json(state.timetable.groups().await?))
}

pub async fn create_group(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<NewGroup>,
) -> Result<Created<Group>, AppError> {
    let group = state.timetable.add_group(payload).await?;
    Ok(created(ResourceKind::Group, group.id, group))
}

pub async fn get_group(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<Linked<Group>>, AppError> {
    let group = state.timetable.group(id).await?;
    Ok(Json(Linked::new(ResourceKind::Group, id, group)))
}

// Professors

pub async fn list_professors(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Professor>>, AppError> {
    Ok(Json(state.timetable.professors().await?))
}

pub async fn create_professor(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<NewProfessor>,
) -> Result<Created<Professor>, AppError> {
    let professor = state.timetable.add_professor(payload).await?;
    Ok(created(ResourceKind::Professor, professor.id, professor))
}

pub async fn get_professor(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<Linked<Professor>>, AppError> {
    let professor = state.timetable.professor(id).await?;
    Ok(Json(Linked::new(ResourceKind::Professor, id, professor)))
}

pub async fn professor_courses(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Course>>, AppError> {
    Ok(Json(state.timetable.professor_courses(id).await?))
}

pub async fn available_professors(
    State(state): State<Arc<ApiState>>,
    Query(slot): Query<SlotQuery>,
) -> Result<Json<Vec<Professor>>, AppError> {
    Ok(Json(
        state
            .timetable
            .available_professors(slot.date, slot.period)
            .await?,
    ))
}

// Students

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransferRequest {
    pub group_id: i64,
}

pub async fn list_students(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Student>>, AppError> {
    Ok(Json(state.timetable.students().await?))
}

pub async fn create_student(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<NewStudent>,
) -> Result<Created<Student>, AppError> {
    let student = state.timetable.add_student(payload).await?;
    Ok(created(ResourceKind::Student, student.id, student))
}

pub async fn get_student(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<Linked<Student>>, AppError> {
    let student = state.timetable.student(id).await?;
    Ok(Json(Linked::new(ResourceKind::Student, id, student)))
}

pub async fn transfer_student(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<TransferRequest>,
) -> Result<Json<Linked<Student>>, AppError> {
    let student = state.timetable.transfer_student(id, payload.group_id).await?;
    Ok(Json(Linked::new(ResourceKind::Student, id, student)))
}

// Rescheduling options

pub async fn list_options(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ReschedulingOption>>, AppError> {
    Ok(Json(state.timetable.options().await?))
}

pub async fn create_options(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<Vec<NewReschedulingOption>>,
) -> Result<(StatusCode, Json<Vec<ReschedulingOption>>), AppError> {
    let options = state.timetable.add_options(payload).await?;
    Ok((StatusCode::CREATED, Json(options)))
}

pub async fn get_option(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<Linked<ReschedulingOption>>, AppError> {
    let option = state.timetable.option(id).await?;
    Ok(Json(Linked::new(ResourceKind::Option, id, option)))
}

// Totals

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StatsResponse {
    pub auditoriums: i64,
    pub courses: i64,
    pub groups: i64,
    pub professors: i64,
    pub students: i64,
    pub templates: i64,
    pub options: i64,
}

pub async fn stats(State(state): State<Arc<ApiState>>) -> Result<Json<StatsResponse>, AppError> {
    let timetable = &state.timetable;

    Ok(Json(StatsResponse {
        auditoriums: timetable.count_auditoriums().await?,
        courses: timetable.count_courses().await?,
        groups: timetable.count_groups().await?,
        professors: timetable.count_professors().await?,
        students: timetable.count_students().await?,
        templates: timetable.count_templates().await?,
        options: timetable.count_options().await?,
    }))
}
