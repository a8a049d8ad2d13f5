//! # Timetable API
//!
//! HTTP surface of the timetable service: reference data, the two-week
//! template rotation, concrete schedules and their rescheduling.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into [`Timetable`] calls
//! - **Middleware**: Request context extraction and error mapping
//! - **Links**: Static hypermedia links for single-resource responses
//! - **Config**: Environment configuration

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Hypermedia links
pub mod links;
/// Request context and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
};
use eyre::Result;
use sqlx::PgPool;
use timetable_core::Timetable;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    LatencyUnit,
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::middleware::context::{PROFESSOR_HEADER, STUDENT_HEADER};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub timetable: Timetable,
}

/// Builds the router with every route and the request tracing layer.
pub fn app(state: Arc<ApiState>) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    Router::new()
        .merge(routes::health::routes())
        .merge(routes::reference::routes())
        .merge(routes::template::routes())
        .merge(routes::schedule::routes())
        .merge(routes::me::routes())
        .with_state(state)
        .layer(trace_layer)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(PROFESSOR_HEADER),
            HeaderName::from_static(STUDENT_HEADER),
        ])
        .allow_origin(origins)
        .allow_credentials(true)
}

/// Installs the global `fmt` subscriber; call once, before anything logs.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Starts the API server with the provided configuration and database connection
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    let calendar = config.semester_calendar()?;
    info!(
        start = %calendar.start(),
        end = %calendar.end(),
        "Loaded semester calendar"
    );

    let timetable = Timetable::new(timetable_db::repositories(db_pool), calendar);
    let state = Arc::new(ApiState { timetable });

    let app = app(state);

    let app = if let Some(origins) = &config.cors_origins {
        app.layer(cors_layer(origins))
    } else {
        app
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)))
            .into_inner(),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
