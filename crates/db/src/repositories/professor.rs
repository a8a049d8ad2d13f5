use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};
use timetable_core::{
    errors::TimetableResult,
    models::{NewProfessor, Period, Professor},
    repositories::ProfessorRepository,
};

use crate::{PgStore, models::DbProfessor};

pub async fn count_professors(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM professors")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Inserts the professor and links the given courses in one transaction.
pub async fn create_professor(
    pool: &Pool<Postgres>,
    first_name: &str,
    last_name: &str,
    course_ids: &[i64],
) -> Result<DbProfessor> {
    let mut tx = pool.begin().await?;

    let professor = sqlx::query_as::<_, DbProfessor>(
        r#"
        INSERT INTO professors (first_name, last_name)
        VALUES ($1, $2)
        RETURNING id, first_name, last_name
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .fetch_one(&mut *tx)
    .await?;

    if !course_ids.is_empty() {
        sqlx::query(
            r#"
            INSERT INTO professor_courses (professor_id, course_id)
            SELECT $1, course_id FROM UNNEST($2::BIGINT[]) AS course_id
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(professor.id)
        .bind(course_ids)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::debug!(
        "Professor created: id={}, courses={}",
        professor.id,
        course_ids.len()
    );
    Ok(professor)
}

pub async fn get_professors(pool: &Pool<Postgres>) -> Result<Vec<DbProfessor>> {
    let professors = sqlx::query_as::<_, DbProfessor>(
        r#"
        SELECT id, first_name, last_name
        FROM professors
        ORDER BY last_name ASC, first_name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(professors)
}

pub async fn get_professor_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbProfessor>> {
    let professor = sqlx::query_as::<_, DbProfessor>(
        r#"
        SELECT id, first_name, last_name
        FROM professors
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(professor)
}

/// Every professor minus the ones teaching at `(date, period)`.
pub async fn get_available_professors(
    pool: &Pool<Postgres>,
    date: NaiveDate,
    period: Period,
) -> Result<Vec<DbProfessor>> {
    let professors = sqlx::query_as::<_, DbProfessor>(
        r#"
        SELECT p.id, p.first_name, p.last_name
        FROM professors p
        EXCEPT
        SELECT p.id, p.first_name, p.last_name
        FROM professors p
        JOIN schedules s ON s.professor_id = p.id
        WHERE s.on_date = $1 AND s.period = $2
        ORDER BY last_name ASC, first_name ASC
        "#,
    )
    .bind(date)
    .bind(period.as_str())
    .fetch_all(pool)
    .await?;

    Ok(professors)
}

#[async_trait]
impl ProfessorRepository for PgStore {
    async fn count(&self) -> TimetableResult<i64> {
        Ok(count_professors(self.pool()).await?)
    }

    async fn create(&self, professor: NewProfessor) -> TimetableResult<Professor> {
        let row = create_professor(
            self.pool(),
            &professor.first_name,
            &professor.last_name,
            &professor.course_ids,
        )
        .await?;
        Ok(row.into())
    }

    async fn find_all(&self) -> TimetableResult<Vec<Professor>> {
        let rows = get_professors(self.pool()).await?;
        Ok(rows.into_iter().map(Professor::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> TimetableResult<Option<Professor>> {
        Ok(get_professor_by_id(self.pool(), id).await?.map(Professor::from))
    }

    async fn find_all_available(
        &self,
        date: NaiveDate,
        period: Period,
    ) -> TimetableResult<Vec<Professor>> {
        let rows = get_available_professors(self.pool(), date, period).await?;
        Ok(rows.into_iter().map(Professor::from).collect())
    }
}
