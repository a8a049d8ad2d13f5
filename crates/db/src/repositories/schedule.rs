use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::{Report, Result};
use sqlx::{PgExecutor, Pool, Postgres};
use timetable_core::{
    TimetableError,
    errors::TimetableResult,
    models::{NewSchedule, Schedule, ScheduleTemplate},
    repositories::ScheduleRepository,
};

use crate::{
    PgStore,
    models::{DbSchedule, convert_all, day_to_db},
    repositories::template::update_template,
};

const SCHEDULE_SELECT: &str = r#"
    SELECT s.id, s.template_id, s.on_date, s.day_of_week, s.period,
           a.id AS auditorium_id, a.name AS auditorium_name,
           c.id AS course_id, c.name AS course_name, c.description AS course_description,
           g.id AS group_id, g.name AS group_name,
           p.id AS professor_id, p.first_name AS professor_first_name,
           p.last_name AS professor_last_name
    FROM schedules s
    JOIN auditoriums a ON a.id = s.auditorium_id
    JOIN courses c ON c.id = s.course_id
    JOIN groups g ON g.id = s.group_id
    JOIN professors p ON p.id = s.professor_id
"#;

const SCHEDULE_ORDER: &str = r#"
    ORDER BY s.on_date,
             array_position(ARRAY['FIRST','SECOND','THIRD','FOURTH','FIFTH','SIXTH']::VARCHAR[], s.period),
             a.name, g.name, c.name, p.last_name, s.id
"#;

/// Inserts all schedules with a single statement and returns them in display order.
pub async fn create_schedules(
    pool: &Pool<Postgres>,
    schedules: &[NewSchedule],
) -> Result<Vec<DbSchedule>> {
    let template_ids: Vec<Option<i64>> = schedules.iter().map(|s| s.template_id).collect();
    let dates: Vec<NaiveDate> = schedules.iter().map(|s| s.date).collect();
    let days: Vec<i16> = schedules.iter().map(|s| day_to_db(s.day)).collect();
    let periods: Vec<&str> = schedules.iter().map(|s| s.period.as_str()).collect();
    let auditorium_ids: Vec<i64> = schedules.iter().map(|s| s.auditorium_id).collect();
    let course_ids: Vec<i64> = schedules.iter().map(|s| s.course_id).collect();
    let group_ids: Vec<i64> = schedules.iter().map(|s| s.group_id).collect();
    let professor_ids: Vec<i64> = schedules.iter().map(|s| s.professor_id).collect();

    let ids = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO schedules
            (template_id, on_date, day_of_week, period,
             auditorium_id, course_id, group_id, professor_id)
        SELECT * FROM UNNEST(
            $1::BIGINT[], $2::DATE[], $3::SMALLINT[], $4::VARCHAR[],
            $5::BIGINT[], $6::BIGINT[], $7::BIGINT[], $8::BIGINT[]
        )
        RETURNING id
        "#,
    )
    .bind(&template_ids)
    .bind(&dates)
    .bind(&days)
    .bind(&periods)
    .bind(&auditorium_ids)
    .bind(&course_ids)
    .bind(&group_ids)
    .bind(&professor_ids)
    .fetch_all(pool)
    .await?;

    tracing::debug!("Created {} schedules", ids.len());

    let sql = format!("{} WHERE s.id = ANY($1) {}", SCHEDULE_SELECT, SCHEDULE_ORDER);
    let created = sqlx::query_as::<_, DbSchedule>(&sql)
        .bind(&ids)
        .fetch_all(pool)
        .await?;

    Ok(created)
}

/// Writes every mutable column of the schedule; returns `false` when no row matched.
pub async fn update_schedule<'e>(
    executor: impl PgExecutor<'e>,
    schedule: &Schedule,
) -> Result<bool> {
    let updated = sqlx::query(
        r#"
        UPDATE schedules
        SET template_id = $2, on_date = $3, day_of_week = $4, period = $5,
            auditorium_id = $6, course_id = $7, group_id = $8, professor_id = $9
        WHERE id = $1
        "#,
    )
    .bind(schedule.id)
    .bind(schedule.template_id)
    .bind(schedule.date)
    .bind(day_to_db(schedule.day))
    .bind(schedule.period.as_str())
    .bind(schedule.auditorium.id)
    .bind(schedule.course.id)
    .bind(schedule.group.id)
    .bind(schedule.professor.id)
    .execute(executor)
    .await?;

    Ok(updated.rows_affected() > 0)
}

/// Moves the template's occurrences dated on or after `from` (except
/// `except_id`) onto the template's weekday, period and auditorium.
///
/// The new date is `timetable_core::rescheduling::relocated_date` in SQL:
/// the template's weekday in the row's own week, one week later on the wrong
/// parity, two more when that still precedes `from`. Parity is counted in
/// Monday-aligned weeks from `semester_start`.
pub async fn update_schedules_from_template<'e>(
    executor: impl PgExecutor<'e>,
    template: &ScheduleTemplate,
    from: NaiveDate,
    except_id: i64,
    semester_start: NaiveDate,
) -> Result<u64> {
    let day_offset = i32::from(day_to_db(template.day)) - 1;
    let parity = i32::from(template.week_parity);

    let updated = sqlx::query(
        r#"
        WITH moved AS (
            SELECT id, date_trunc('week', on_date)::date + $7::INT AS target
            FROM schedules
            WHERE template_id = $1 AND on_date >= $2 AND id <> $3
        ),
        aligned AS (
            SELECT id,
                   CASE
                       WHEN MOD(MOD((date_trunc('week', target)::date
                                     - date_trunc('week', $8::date)::date) / 7, 2) + 2, 2) = $9::INT
                       THEN target
                       ELSE target + 7
                   END AS target
            FROM moved
        )
        UPDATE schedules s
        SET day_of_week = $4,
            period = $5,
            auditorium_id = $6,
            on_date = CASE WHEN m.target < $2 THEN m.target + 14 ELSE m.target END
        FROM aligned m
        WHERE s.id = m.id
        "#,
    )
    .bind(template.id)
    .bind(from)
    .bind(except_id)
    .bind(day_to_db(template.day))
    .bind(template.period.as_str())
    .bind(template.auditorium.id)
    .bind(day_offset)
    .bind(semester_start)
    .bind(parity)
    .execute(executor)
    .await?;

    Ok(updated.rows_affected())
}

pub async fn get_schedules(pool: &Pool<Postgres>) -> Result<Vec<DbSchedule>> {
    let sql = format!("{} {}", SCHEDULE_SELECT, SCHEDULE_ORDER);
    let schedules = sqlx::query_as::<_, DbSchedule>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(schedules)
}

pub async fn get_schedule_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbSchedule>> {
    tracing::debug!("Getting schedule by id: {}", id);

    let sql = format!("{} WHERE s.id = $1", SCHEDULE_SELECT);
    let schedule = sqlx::query_as::<_, DbSchedule>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(schedule)
}

pub async fn get_schedules_in_range(
    pool: &Pool<Postgres>,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DbSchedule>> {
    let sql = format!(
        "{} WHERE s.on_date BETWEEN $1 AND $2 {}",
        SCHEDULE_SELECT, SCHEDULE_ORDER
    );
    let schedules = sqlx::query_as::<_, DbSchedule>(&sql)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await?;

    Ok(schedules)
}

pub async fn get_schedules_by_template_id(
    pool: &Pool<Postgres>,
    template_id: i64,
) -> Result<Vec<DbSchedule>> {
    let sql = format!("{} WHERE s.template_id = $1 {}", SCHEDULE_SELECT, SCHEDULE_ORDER);
    let schedules = sqlx::query_as::<_, DbSchedule>(&sql)
        .bind(template_id)
        .fetch_all(pool)
        .await?;

    Ok(schedules)
}

#[async_trait]
impl ScheduleRepository for PgStore {
    async fn create_all(&self, schedules: Vec<NewSchedule>) -> TimetableResult<Vec<Schedule>> {
        Ok(convert_all(create_schedules(self.pool(), &schedules).await?)?)
    }

    async fn update(&self, schedule: Schedule) -> TimetableResult<Schedule> {
        if !update_schedule(self.pool(), &schedule).await? {
            return Err(TimetableError::not_found("Schedule", schedule.id));
        }

        let row = get_schedule_by_id(self.pool(), schedule.id)
            .await?
            .ok_or_else(|| TimetableError::not_found("Schedule", schedule.id))?;
        Ok(Schedule::try_from(row)?)
    }

    async fn find_all(&self) -> TimetableResult<Vec<Schedule>> {
        Ok(convert_all(get_schedules(self.pool()).await?)?)
    }

    async fn find_by_id(&self, id: i64) -> TimetableResult<Option<Schedule>> {
        let row = get_schedule_by_id(self.pool(), id).await?;
        Ok(row.map(Schedule::try_from).transpose()?)
    }

    async fn find_all_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> TimetableResult<Vec<Schedule>> {
        Ok(convert_all(get_schedules_in_range(self.pool(), from, to).await?)?)
    }

    async fn find_all_by_template_id(&self, template_id: i64) -> TimetableResult<Vec<Schedule>> {
        Ok(convert_all(get_schedules_by_template_id(self.pool(), template_id).await?)?)
    }

    async fn reschedule_permanently(
        &self,
        template: ScheduleTemplate,
        moved: Schedule,
        from: NaiveDate,
        semester_start: NaiveDate,
    ) -> TimetableResult<u64> {
        let mut tx = self.pool().begin().await.map_err(Report::from)?;

        // Returning early drops `tx`, which rolls back what was written so far
        if !update_template(&mut *tx, &template).await? {
            return Err(TimetableError::not_found("Template", template.id));
        }
        if !update_schedule(&mut *tx, &moved).await? {
            return Err(TimetableError::not_found("Schedule", moved.id));
        }
        let updated =
            update_schedules_from_template(&mut *tx, &template, from, moved.id, semester_start)
                .await?;

        tx.commit().await.map_err(Report::from)?;

        tracing::debug!(
            "Moved {} schedules of template {} from {}",
            updated,
            template.id,
            from
        );
        Ok(updated)
    }
}
