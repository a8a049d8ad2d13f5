use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers::schedule};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/schedules", get(schedule::list_schedules))
        .route("/api/schedules/:id", get(schedule::get_schedule))
        .route("/api/schedules/:id/options", get(schedule::schedule_options))
        .route("/api/schedules/:id/reschedule", put(schedule::reschedule))
        .route(
            "/api/schedules/:id/professor",
            put(schedule::substitute_professor),
        )
}
