use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Reference data
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS auditoriums (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL UNIQUE
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS courses (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL UNIQUE,
            description TEXT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS groups (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL UNIQUE
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS professors (
            id BIGSERIAL PRIMARY KEY,
            first_name VARCHAR(255) NOT NULL,
            last_name VARCHAR(255) NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS professor_courses (
            professor_id BIGINT NOT NULL REFERENCES professors(id) ON DELETE CASCADE,
            course_id BIGINT NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
            PRIMARY KEY (professor_id, course_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id BIGSERIAL PRIMARY KEY,
            first_name VARCHAR(255) NOT NULL,
            last_name VARCHAR(255) NOT NULL,
            group_id BIGINT NULL REFERENCES groups(id) ON DELETE SET NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Timetable
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedule_templates (
            id BIGSERIAL PRIMARY KEY,
            week_parity BOOLEAN NOT NULL,
            day_of_week SMALLINT NOT NULL,
            period VARCHAR(16) NOT NULL,
            auditorium_id BIGINT NOT NULL REFERENCES auditoriums(id),
            course_id BIGINT NOT NULL REFERENCES courses(id),
            group_id BIGINT NOT NULL REFERENCES groups(id),
            professor_id BIGINT NOT NULL REFERENCES professors(id),
            CONSTRAINT valid_template_day CHECK (day_of_week BETWEEN 1 AND 7)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedules (
            id BIGSERIAL PRIMARY KEY,
            template_id BIGINT NULL REFERENCES schedule_templates(id) ON DELETE CASCADE,
            on_date DATE NOT NULL,
            day_of_week SMALLINT NOT NULL,
            period VARCHAR(16) NOT NULL,
            auditorium_id BIGINT NOT NULL REFERENCES auditoriums(id),
            course_id BIGINT NOT NULL REFERENCES courses(id),
            group_id BIGINT NOT NULL REFERENCES groups(id),
            professor_id BIGINT NOT NULL REFERENCES professors(id),
            CONSTRAINT valid_schedule_day CHECK (day_of_week BETWEEN 1 AND 7)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rescheduling_options (
            id BIGSERIAL PRIMARY KEY,
            day_of_week SMALLINT NOT NULL,
            period VARCHAR(16) NOT NULL,
            auditorium_id BIGINT NOT NULL REFERENCES auditoriums(id),
            CONSTRAINT valid_option_day CHECK (day_of_week BETWEEN 1 AND 7),
            CONSTRAINT unique_option UNIQUE (day_of_week, period, auditorium_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Several statements at once need the simple query protocol
    pool.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_schedules_on_date_period ON schedules(on_date, period);
        CREATE INDEX IF NOT EXISTS idx_schedules_template_id ON schedules(template_id);
        CREATE INDEX IF NOT EXISTS idx_schedule_templates_day ON schedule_templates(week_parity, day_of_week);
        CREATE INDEX IF NOT EXISTS idx_rescheduling_options_day ON rescheduling_options(day_of_week);
        CREATE INDEX IF NOT EXISTS idx_students_group_id ON students(group_id);
        "#,
    )
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
