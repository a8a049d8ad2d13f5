use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};
use timetable_core::{
    errors::TimetableResult,
    models::{Auditorium, NewAuditorium, Period},
    repositories::AuditoriumRepository,
};

use crate::{PgStore, models::DbAuditorium};

pub async fn count_auditoriums(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM auditoriums")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

pub async fn create_auditorium(pool: &Pool<Postgres>, name: &str) -> Result<DbAuditorium> {
    let auditorium = sqlx::query_as::<_, DbAuditorium>(
        r#"
        INSERT INTO auditoriums (name)
        VALUES ($1)
        RETURNING id, name
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Auditorium created: id={}", auditorium.id);
    Ok(auditorium)
}

pub async fn get_auditoriums(pool: &Pool<Postgres>) -> Result<Vec<DbAuditorium>> {
    let auditoriums = sqlx::query_as::<_, DbAuditorium>(
        r#"
        SELECT id, name
        FROM auditoriums
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(auditoriums)
}

pub async fn get_auditorium_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbAuditorium>> {
    let auditorium = sqlx::query_as::<_, DbAuditorium>(
        r#"
        SELECT id, name
        FROM auditoriums
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(auditorium)
}

/// Every auditorium minus the ones a schedule holds at `(date, period)`.
pub async fn get_available_auditoriums(
    pool: &Pool<Postgres>,
    date: NaiveDate,
    period: Period,
) -> Result<Vec<DbAuditorium>> {
    let auditoriums = sqlx::query_as::<_, DbAuditorium>(
        r#"
        SELECT a.id, a.name
        FROM auditoriums a
        EXCEPT
        SELECT a.id, a.name
        FROM auditoriums a
        JOIN schedules s ON s.auditorium_id = a.id
        WHERE s.on_date = $1 AND s.period = $2
        ORDER BY name ASC
        "#,
    )
    .bind(date)
    .bind(period.as_str())
    .fetch_all(pool)
    .await?;

    Ok(auditoriums)
}

#[async_trait]
impl AuditoriumRepository for PgStore {
    async fn count(&self) -> TimetableResult<i64> {
        Ok(count_auditoriums(self.pool()).await?)
    }

    async fn create(&self, auditorium: NewAuditorium) -> TimetableResult<Auditorium> {
        Ok(create_auditorium(self.pool(), &auditorium.name).await?.into())
    }

    async fn find_all(&self) -> TimetableResult<Vec<Auditorium>> {
        let rows = get_auditoriums(self.pool()).await?;
        Ok(rows.into_iter().map(Auditorium::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> TimetableResult<Option<Auditorium>> {
        Ok(get_auditorium_by_id(self.pool(), id).await?.map(Auditorium::from))
    }

    async fn find_all_available(
        &self,
        date: NaiveDate,
        period: Period,
    ) -> TimetableResult<Vec<Auditorium>> {
        let rows = get_available_auditoriums(self.pool(), date, period).await?;
        Ok(rows.into_iter().map(Auditorium::from).collect())
    }
}
