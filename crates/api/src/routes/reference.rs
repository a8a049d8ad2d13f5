use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers::reference};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/auditoriums",
            get(reference::list_auditoriums).post(reference::create_auditorium),
        )
        .route(
            "/api/auditoriums/available",
            get(reference::available_auditoriums),
        )
        .route("/api/auditoriums/:id", get(reference::get_auditorium))
        .route(
            "/api/courses",
            get(reference::list_courses).post(reference::create_course),
        )
        .route("/api/courses/:id", get(reference::get_course))
        .route(
            "/api/groups",
            get(reference::list_groups).post(reference::create_group),
        )
        .route("/api/groups/:id", get(reference::get_group))
        .route(
            "/api/professors",
            get(reference::list_professors).post(reference::create_professor),
        )
        .route(
            "/api/professors/available",
            get(reference::available_professors),
        )
        .route("/api/professors/:id", get(reference::get_professor))
        .route(
            "/api/professors/:id/courses",
            get(reference::professor_courses),
        )
        .route(
            "/api/students",
            get(reference::list_students).post(reference::create_student),
        )
        .route("/api/students/:id", get(reference::get_student))
        .route("/api/students/:id/group", put(reference::transfer_student))
        .route(
            "/api/options",
            get(reference::list_options).post(reference::create_options),
        )
        .route("/api/options/:id", get(reference::get_option))
        .route("/api/stats", get(reference::stats))
}
