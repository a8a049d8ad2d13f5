use async_trait::async_trait;
use eyre::Result;
use sqlx::{Pool, Postgres};
use timetable_core::{
    errors::TimetableResult,
    models::{Group, NewGroup},
    repositories::GroupRepository,
};

use crate::{PgStore, models::DbGroup};

pub async fn count_groups(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM groups")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

pub async fn create_group(pool: &Pool<Postgres>, name: &str) -> Result<DbGroup> {
    let group = sqlx::query_as::<_, DbGroup>(
        r#"
        INSERT INTO groups (name)
        VALUES ($1)
        RETURNING id, name
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(group)
}

pub async fn get_groups(pool: &Pool<Postgres>) -> Result<Vec<DbGroup>> {
    let groups = sqlx::query_as::<_, DbGroup>(
        r#"
        SELECT id, name
        FROM groups
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(groups)
}

pub async fn get_group_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbGroup>> {
    let group = sqlx::query_as::<_, DbGroup>(
        r#"
        SELECT id, name
        FROM groups
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(group)
}

/// Groups that attend the course with this professor, per the templates.
pub async fn get_groups_by_professor_and_course(
    pool: &Pool<Postgres>,
    professor_id: i64,
    course_id: i64,
) -> Result<Vec<DbGroup>> {
    let groups = sqlx::query_as::<_, DbGroup>(
        r#"
        SELECT DISTINCT g.id, g.name
        FROM schedule_templates t
        JOIN groups g ON g.id = t.group_id
        WHERE t.professor_id = $1 AND t.course_id = $2
        ORDER BY g.name ASC
        "#,
    )
    .bind(professor_id)
    .bind(course_id)
    .fetch_all(pool)
    .await?;

    Ok(groups)
}

#[async_trait]
impl GroupRepository for PgStore {
    async fn count(&self) -> TimetableResult<i64> {
        Ok(count_groups(self.pool()).await?)
    }

    async fn create(&self, group: NewGroup) -> TimetableResult<Group> {
        Ok(create_group(self.pool(), &group.name).await?.into())
    }

    async fn find_all(&self) -> TimetableResult<Vec<Group>> {
        let rows = get_groups(self.pool()).await?;
        Ok(rows.into_iter().map(Group::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> TimetableResult<Option<Group>> {
        Ok(get_group_by_id(self.pool(), id).await?.map(Group::from))
    }

    async fn find_all_by_professor_and_course(
        &self,
        professor_id: i64,
        course_id: i64,
    ) -> TimetableResult<Vec<Group>> {
        let rows = get_groups_by_professor_and_course(self.pool(), professor_id, course_id).await?;
        Ok(rows.into_iter().map(Group::from).collect())
    }
}
