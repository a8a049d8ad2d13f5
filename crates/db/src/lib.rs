pub mod models;
pub mod repositories;
pub mod schema;

use std::sync::Arc;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use timetable_core::services::Repositories;

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// PostgreSQL-backed implementation of every repository trait.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Wires one shared [`PgStore`] into every repository slot.
pub fn repositories(pool: DbPool) -> Repositories {
    let store = Arc::new(PgStore::new(pool));

    Repositories {
        auditoriums: store.clone(),
        courses: store.clone(),
        groups: store.clone(),
        professors: store.clone(),
        students: store.clone(),
        templates: store.clone(),
        schedules: store.clone(),
        options: store,
    }
}
