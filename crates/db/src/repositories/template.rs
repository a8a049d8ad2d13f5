use async_trait::async_trait;
use chrono::Weekday;
use eyre::{Result, eyre};
use sqlx::{PgExecutor, Pool, Postgres};
use timetable_core::{
    errors::TimetableResult,
    models::{NewScheduleTemplate, ScheduleTemplate},
    repositories::ScheduleTemplateRepository,
};

use crate::{
    PgStore,
    models::{DbScheduleTemplate, convert_all, day_to_db},
};

const TEMPLATE_SELECT: &str = r#"
    SELECT t.id, t.week_parity, t.day_of_week, t.period,
           a.id AS auditorium_id, a.name AS auditorium_name,
           c.id AS course_id, c.name AS course_name, c.description AS course_description,
           g.id AS group_id, g.name AS group_name,
           p.id AS professor_id, p.first_name AS professor_first_name,
           p.last_name AS professor_last_name
    FROM schedule_templates t
    JOIN auditoriums a ON a.id = t.auditorium_id
    JOIN courses c ON c.id = t.course_id
    JOIN groups g ON g.id = t.group_id
    JOIN professors p ON p.id = t.professor_id
"#;

const TEMPLATE_ORDER: &str = r#"
    ORDER BY t.week_parity, t.day_of_week,
             array_position(ARRAY['FIRST','SECOND','THIRD','FOURTH','FIFTH','SIXTH']::VARCHAR[], t.period),
             a.name, t.id
"#;

pub async fn count_templates(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM schedule_templates")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

pub async fn create_template(
    pool: &Pool<Postgres>,
    template: &NewScheduleTemplate,
) -> Result<DbScheduleTemplate> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO schedule_templates
            (week_parity, day_of_week, period, auditorium_id, course_id, group_id, professor_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(template.week_parity)
    .bind(day_to_db(template.day))
    .bind(template.period.as_str())
    .bind(template.auditorium_id)
    .bind(template.course_id)
    .bind(template.group_id)
    .bind(template.professor_id)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Template created: id={}", id);
    get_template_by_id(pool, id)
        .await?
        .ok_or_else(|| eyre!("Template {} vanished after insert", id))
}

/// Writes the template's slot and participants; returns `false` when no row matched.
pub async fn update_template<'e>(
    executor: impl PgExecutor<'e>,
    template: &ScheduleTemplate,
) -> Result<bool> {
    let updated = sqlx::query(
        r#"
        UPDATE schedule_templates
        SET week_parity = $2, day_of_week = $3, period = $4,
            auditorium_id = $5, course_id = $6, group_id = $7, professor_id = $8
        WHERE id = $1
        "#,
    )
    .bind(template.id)
    .bind(template.week_parity)
    .bind(day_to_db(template.day))
    .bind(template.period.as_str())
    .bind(template.auditorium.id)
    .bind(template.course.id)
    .bind(template.group.id)
    .bind(template.professor.id)
    .execute(executor)
    .await?;

    Ok(updated.rows_affected() > 0)
}

pub async fn get_templates(pool: &Pool<Postgres>) -> Result<Vec<DbScheduleTemplate>> {
    let sql = format!("{} {}", TEMPLATE_SELECT, TEMPLATE_ORDER);
    let templates = sqlx::query_as::<_, DbScheduleTemplate>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(templates)
}

pub async fn get_template_by_id(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<DbScheduleTemplate>> {
    let sql = format!("{} WHERE t.id = $1", TEMPLATE_SELECT);
    let template = sqlx::query_as::<_, DbScheduleTemplate>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(template)
}

pub async fn get_templates_by_day(
    pool: &Pool<Postgres>,
    week_parity: bool,
    day: Weekday,
) -> Result<Vec<DbScheduleTemplate>> {
    let sql = format!(
        "{} WHERE t.week_parity = $1 AND t.day_of_week = $2 {}",
        TEMPLATE_SELECT, TEMPLATE_ORDER
    );
    let templates = sqlx::query_as::<_, DbScheduleTemplate>(&sql)
        .bind(week_parity)
        .bind(day_to_db(day))
        .fetch_all(pool)
        .await?;

    Ok(templates)
}

#[async_trait]
impl ScheduleTemplateRepository for PgStore {
    async fn count(&self) -> TimetableResult<i64> {
        Ok(count_templates(self.pool()).await?)
    }

    async fn create(&self, template: NewScheduleTemplate) -> TimetableResult<ScheduleTemplate> {
        let row = create_template(self.pool(), &template).await?;
        Ok(ScheduleTemplate::try_from(row)?)
    }

    async fn find_all(&self) -> TimetableResult<Vec<ScheduleTemplate>> {
        Ok(convert_all(get_templates(self.pool()).await?)?)
    }

    async fn find_by_id(&self, id: i64) -> TimetableResult<Option<ScheduleTemplate>> {
        let row = get_template_by_id(self.pool(), id).await?;
        Ok(row.map(ScheduleTemplate::try_from).transpose()?)
    }

    async fn find_all_by_day(
        &self,
        week_parity: bool,
        day: Weekday,
    ) -> TimetableResult<Vec<ScheduleTemplate>> {
        Ok(convert_all(get_templates_by_day(self.pool(), week_parity, day).await?)?)
    }
}
