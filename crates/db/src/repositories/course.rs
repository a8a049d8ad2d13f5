use async_trait::async_trait;
use eyre::Result;
use sqlx::{Pool, Postgres};
use timetable_core::{
    errors::TimetableResult,
    models::{Course, NewCourse},
    repositories::CourseRepository,
};

use crate::{PgStore, models::DbCourse};

pub async fn count_courses(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

pub async fn create_course(
    pool: &Pool<Postgres>,
    name: &str,
    description: Option<&str>,
) -> Result<DbCourse> {
    let course = sqlx::query_as::<_, DbCourse>(
        r#"
        INSERT INTO courses (name, description)
        VALUES ($1, $2)
        RETURNING id, name, description
        "#,
    )
    .bind(name)
    .bind(description)
    .fetch_one(pool)
    .await?;

    Ok(course)
}

pub async fn get_courses(pool: &Pool<Postgres>) -> Result<Vec<DbCourse>> {
    let courses = sqlx::query_as::<_, DbCourse>(
        r#"
        SELECT id, name, description
        FROM courses
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(courses)
}

pub async fn get_course_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbCourse>> {
    let course = sqlx::query_as::<_, DbCourse>(
        r#"
        SELECT id, name, description
        FROM courses
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(course)
}

pub async fn get_courses_by_professor_id(
    pool: &Pool<Postgres>,
    professor_id: i64,
) -> Result<Vec<DbCourse>> {
    let courses = sqlx::query_as::<_, DbCourse>(
        r#"
        SELECT c.id, c.name, c.description
        FROM courses c
        JOIN professor_courses pc ON pc.course_id = c.id
        WHERE pc.professor_id = $1
        ORDER BY c.name ASC
        "#,
    )
    .bind(professor_id)
    .fetch_all(pool)
    .await?;

    Ok(courses)
}

#[async_trait]
impl CourseRepository for PgStore {
    async fn count(&self) -> TimetableResult<i64> {
        Ok(count_courses(self.pool()).await?)
    }

    async fn create(&self, course: NewCourse) -> TimetableResult<Course> {
        let row = create_course(self.pool(), &course.name, course.description.as_deref()).await?;
        Ok(row.into())
    }

    async fn find_all(&self) -> TimetableResult<Vec<Course>> {
        let rows = get_courses(self.pool()).await?;
        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> TimetableResult<Option<Course>> {
        Ok(get_course_by_id(self.pool(), id).await?.map(Course::from))
    }

    async fn find_all_by_professor(&self, professor_id: i64) -> TimetableResult<Vec<Course>> {
        let rows = get_courses_by_professor_id(self.pool(), professor_id).await?;
        Ok(rows.into_iter().map(Course::from).collect())
    }
}
