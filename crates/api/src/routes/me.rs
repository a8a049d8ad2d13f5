use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers::me};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/me/schedule", get(me::my_schedule))
        .route("/api/me/courses", get(me::my_courses))
        .route("/api/me/courses/:id/students", get(me::my_course_students))
}
