use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use timetable_api::config::ApiConfig;
use timetable_db::{create_pool, schema::initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    dotenv().ok();

    let config = ApiConfig::from_env().wrap_err("Failed to load configuration")?;

    // Installed before schema setup, which logs
    timetable_api::init_tracing(config.log_level)?;

    // Bad semester dates fail before any connection is opened
    config.semester_calendar()?;

    let db_pool = create_pool(&config.database_url)
        .await
        .wrap_err("Failed to connect to the database")?;

    initialize_database(&db_pool)
        .await
        .wrap_err("Failed to initialize the database schema")?;

    timetable_api::start_server(config, db_pool).await
}
