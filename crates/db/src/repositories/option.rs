use async_trait::async_trait;
use chrono::Weekday;
use eyre::Result;
use sqlx::{Pool, Postgres};
use timetable_core::{
    errors::TimetableResult,
    models::{NewReschedulingOption, ReschedulingOption},
    repositories::ReschedulingOptionRepository,
};

use crate::{
    PgStore,
    models::{DbReschedulingOption, convert_all, day_to_db},
};

const OPTION_SELECT: &str = r#"
    SELECT o.id, o.day_of_week, o.period, a.id AS auditorium_id, a.name AS auditorium_name
    FROM rescheduling_options o
    JOIN auditoriums a ON a.id = o.auditorium_id
"#;

pub async fn count_options(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rescheduling_options")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

pub async fn create_options(
    pool: &Pool<Postgres>,
    options: &[NewReschedulingOption],
) -> Result<Vec<DbReschedulingOption>> {
    let days: Vec<i16> = options.iter().map(|o| day_to_db(o.day)).collect();
    let periods: Vec<&str> = options.iter().map(|o| o.period.as_str()).collect();
    let auditorium_ids: Vec<i64> = options.iter().map(|o| o.auditorium_id).collect();

    let ids = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO rescheduling_options (day_of_week, period, auditorium_id)
        SELECT * FROM UNNEST($1::SMALLINT[], $2::VARCHAR[], $3::BIGINT[])
        RETURNING id
        "#,
    )
    .bind(&days)
    .bind(&periods)
    .bind(&auditorium_ids)
    .fetch_all(pool)
    .await?;

    let sql = format!("{} WHERE o.id = ANY($1) ORDER BY o.id", OPTION_SELECT);
    let created = sqlx::query_as::<_, DbReschedulingOption>(&sql)
        .bind(&ids)
        .fetch_all(pool)
        .await?;

    Ok(created)
}

pub async fn get_options(pool: &Pool<Postgres>) -> Result<Vec<DbReschedulingOption>> {
    let sql = format!("{} ORDER BY o.id", OPTION_SELECT);
    let options = sqlx::query_as::<_, DbReschedulingOption>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(options)
}

pub async fn get_option_by_id(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<DbReschedulingOption>> {
    let sql = format!("{} WHERE o.id = $1", OPTION_SELECT);
    let option = sqlx::query_as::<_, DbReschedulingOption>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(option)
}

/// Options on the weekday, in persistence order.
pub async fn get_options_by_day(
    pool: &Pool<Postgres>,
    day: Weekday,
) -> Result<Vec<DbReschedulingOption>> {
    let sql = format!("{} WHERE o.day_of_week = $1 ORDER BY o.id", OPTION_SELECT);
    let options = sqlx::query_as::<_, DbReschedulingOption>(&sql)
        .bind(day_to_db(day))
        .fetch_all(pool)
        .await?;

    Ok(options)
}

#[async_trait]
impl ReschedulingOptionRepository for PgStore {
    async fn count(&self) -> TimetableResult<i64> {
        Ok(count_options(self.pool()).await?)
    }

    async fn create_all(
        &self,
        options: Vec<NewReschedulingOption>,
    ) -> TimetableResult<Vec<ReschedulingOption>> {
        Ok(convert_all(create_options(self.pool(), &options).await?)?)
    }

    async fn find_all(&self) -> TimetableResult<Vec<ReschedulingOption>> {
        Ok(convert_all(get_options(self.pool()).await?)?)
    }

    async fn find_by_id(&self, id: i64) -> TimetableResult<Option<ReschedulingOption>> {
        let row = get_option_by_id(self.pool(), id).await?;
        Ok(row.map(ReschedulingOption::try_from).transpose()?)
    }

    async fn find_all_by_day(&self, day: Weekday) -> TimetableResult<Vec<ReschedulingOption>> {
        Ok(convert_all(get_options_by_day(self.pool(), day).await?)?)
    }
}
