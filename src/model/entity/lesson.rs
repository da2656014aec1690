use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use sqlx::prelude::Row;

use crate::model::query::LessonQuery;
use crate::model::repo::{QueryableRepository, ResourceTyped, WriteResult};
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Lesson {
    id: i32,
    title: String,
    introduction: Option<String>,
    course_id: i32,
    date_created: DateTime<Utc>,
}

impl ResourceTyped for Lesson {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Lesson
    }
}

impl Lesson {
    pub fn new(
        id: i32,
        title: String,
        introduction: Option<String>,
        course_id: i32,
        date_created: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            introduction,
            course_id,
            date_created,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn introduction(&self) -> Option<&str> {
        self.introduction.as_deref()
    }

    pub fn course_id(&self) -> i32 {
        self.course_id
    }

    pub fn date_created(&self) -> DateTime<Utc> {
        self.date_created
    }

    pub fn apply(&mut self, changes: LessonChanges) {
        self.title = changes.title;
        self.introduction = changes.introduction;
        self.course_id = changes.course_id;
    }
}

/// A lesson that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLesson {
    pub title: String,
    pub introduction: Option<String>,
    pub course_id: i32,
    pub date_created: DateTime<Utc>,
}

impl NewLesson {
    pub fn into_lesson(self, id: i32) -> Lesson {
        Lesson::new(
            id,
            self.title,
            self.introduction,
            self.course_id,
            self.date_created,
        )
    }
}

/// Mutable fields of a stored lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonChanges {
    pub title: String,
    pub introduction: Option<String>,
    pub course_id: i32,
}

#[async_trait]
impl CrudRepository<Lesson, NewLesson, LessonChanges, i32> for ModelManager {
    async fn insert(&self, data: NewLesson) -> DatabaseResult<WriteResult> {
        let result = sqlx::query("INSERT INTO lessons (title, introduction, course_id, date_created) VALUES ($1,$2,$3,$4) RETURNING id")
            .bind(&data.title)
            .bind(&data.introduction)
            .bind(data.course_id)
            .bind(data.date_created)
            .fetch_one(self.executor())
            .await?;

        let id = result.try_get("id")?;
        Ok(WriteResult::new(1, id))
    }

    async fn update(&self, id: i32, data: LessonChanges) -> DatabaseResult<u64> {
        let result = sqlx::query(
            "UPDATE lessons SET title = $1, introduction = $2, course_id = $3 WHERE id = $4",
        )
        .bind(&data.title)
        .bind(&data.introduction)
        .bind(data.course_id)
        .bind(id)
        .execute(self.executor())
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> DatabaseResult<u64> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(id)
            .execute(self.executor())
            .await?;
        Ok(result.rows_affected())
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Lesson>> {
        let result = sqlx::query_as("SELECT * FROM lessons WHERE id = $1")
            .bind(id)
            .fetch_one(self.executor())
            .await;
        if let Err(sqlx::Error::RowNotFound) = result {
            return Ok(None);
        }

        Ok(Some(result?))
    }

    async fn exists(&self, id: i32) -> DatabaseResult<bool> {
        let result: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM lessons WHERE id = $1)")
            .bind(id)
            .fetch_one(self.executor())
            .await?;

        Ok(result)
    }
}

#[async_trait]
impl QueryableRepository<Lesson, LessonQuery> for ModelManager {
    async fn fetch_all(&self, query: &LessonQuery) -> DatabaseResult<Vec<Lesson>> {
        let mut qb = query.to_sql();
        let result = qb
            .build_query_as::<Lesson>()
            .fetch_all(self.executor())
            .await?;
        Ok(result)
    }
}
