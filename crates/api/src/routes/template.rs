use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers::template};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/templates",
            get(template::list_templates).post(template::create_template),
        )
        .route("/api/templates/generate", post(template::generate_schedules))
        .route("/api/templates/:id", get(template::get_template))
}
