use async_trait::async_trait;
use eyre::{Result, eyre};
use sqlx::{Pool, Postgres};
use timetable_core::{
    errors::TimetableResult,
    models::{NewStudent, Student},
    repositories::StudentRepository,
};

use crate::{PgStore, models::DbStudent};

const STUDENT_SELECT: &str = r#"
    SELECT s.id, s.first_name, s.last_name, g.id AS group_id, g.name AS group_name
    FROM students s
    LEFT JOIN groups g ON g.id = s.group_id
"#;

pub async fn count_students(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

pub async fn create_student(
    pool: &Pool<Postgres>,
    first_name: &str,
    last_name: &str,
    group_id: Option<i64>,
) -> Result<DbStudent> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO students (first_name, last_name, group_id)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(group_id)
    .fetch_one(pool)
    .await?;

    get_student_by_id(pool, id)
        .await?
        .ok_or_else(|| eyre!("Student {} vanished after insert", id))
}

pub async fn update_student_group(
    pool: &Pool<Postgres>,
    student_id: i64,
    group_id: i64,
) -> Result<Option<DbStudent>> {
    let updated = sqlx::query(
        r#"
        UPDATE students
        SET group_id = $2
        WHERE id = $1
        "#,
    )
    .bind(student_id)
    .bind(group_id)
    .execute(pool)
    .await?;

    if updated.rows_affected() == 0 {
        return Ok(None);
    }
    get_student_by_id(pool, student_id).await
}

pub async fn get_students(pool: &Pool<Postgres>) -> Result<Vec<DbStudent>> {
    let sql = format!("{} ORDER BY s.last_name ASC, s.first_name ASC", STUDENT_SELECT);
    let students = sqlx::query_as::<_, DbStudent>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(students)
}

pub async fn get_student_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbStudent>> {
    let sql = format!("{} WHERE s.id = $1", STUDENT_SELECT);
    let student = sqlx::query_as::<_, DbStudent>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(student)
}

pub async fn get_students_in_groups(
    pool: &Pool<Postgres>,
    group_ids: &[i64],
) -> Result<Vec<DbStudent>> {
    let sql = format!(
        "{} WHERE s.group_id = ANY($1) ORDER BY s.last_name ASC, s.first_name ASC",
        STUDENT_SELECT
    );
    let students = sqlx::query_as::<_, DbStudent>(&sql)
        .bind(group_ids)
        .fetch_all(pool)
        .await?;

    Ok(students)
}

#[async_trait]
impl StudentRepository for PgStore {
    async fn count(&self) -> TimetableResult<i64> {
        Ok(count_students(self.pool()).await?)
    }

    async fn create(&self, student: NewStudent) -> TimetableResult<Student> {
        let row = create_student(
            self.pool(),
            &student.first_name,
            &student.last_name,
            student.group_id,
        )
        .await?;
        Ok(row.into())
    }

    async fn update_group(&self, student_id: i64, group_id: i64) -> TimetableResult<Student> {
        update_student_group(self.pool(), student_id, group_id)
            .await?
            .map(Student::from)
            .ok_or_else(|| timetable_core::TimetableError::not_found("Student", student_id))
    }

    async fn find_all(&self) -> TimetableResult<Vec<Student>> {
        let rows = get_students(self.pool()).await?;
        Ok(rows.into_iter().map(Student::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> TimetableResult<Option<Student>> {
        Ok(get_student_by_id(self.pool(), id).await?.map(Student::from))
    }

    async fn find_all_in_groups(&self, group_ids: Vec<i64>) -> TimetableResult<Vec<Student>> {
        let rows = get_students_in_groups(self.pool(), &group_ids).await?;
        Ok(rows.into_iter().map(Student::from).collect())
    }
}
