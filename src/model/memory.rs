//! In-process lesson store. Backs the test server and development runs
//! without a database.
//!

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::entity::{Lesson, LessonChanges, NewLesson};
use crate::model::error::DatabaseResult;
use crate::model::query::LessonQuery;
use crate::model::repo::{CrudRepository, QueryableRepository, WriteResult};

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryTable>,
}

#[derive(Debug, Default)]
struct MemoryTable {
    rows: BTreeMap<i32, Lesson>,
    last_id: i32,
    writes: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of write statements that touched at least one row.
    pub async fn writes(&self) -> u64 {
        self.inner.read().await.writes
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.rows.is_empty()
    }
}

#[async_trait]
impl CrudRepository<Lesson, NewLesson, LessonChanges, i32> for MemoryStore {
    async fn insert(&self, data: NewLesson) -> DatabaseResult<WriteResult> {
        let mut table = self.inner.write().await;
        // ids are never handed out twice, even after deletes
        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(id, data.into_lesson(id));
        table.writes += 1;
        Ok(WriteResult::new(1, id))
    }

    async fn update(&self, id: i32, data: LessonChanges) -> DatabaseResult<u64> {
        let mut table = self.inner.write().await;
        let Some(lesson) = table.rows.get_mut(&id) else {
            return Ok(0);
        };
        lesson.apply(data);
        table.writes += 1;
        Ok(1)
    }

    async fn delete(&self, id: i32) -> DatabaseResult<u64> {
        let mut table = self.inner.write().await;
        if table.rows.remove(&id).is_none() {
            return Ok(0);
        }
        table.writes += 1;
        Ok(1)
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Lesson>> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn exists(&self, id: i32) -> DatabaseResult<bool> {
        Ok(self.inner.read().await.rows.contains_key(&id))
    }
}

#[async_trait]
impl QueryableRepository<Lesson, LessonQuery> for MemoryStore {
    async fn fetch_all(&self, query: &LessonQuery) -> DatabaseResult<Vec<Lesson>> {
        let table = self.inner.read().await;
        let mut lessons: Vec<Lesson> = table
            .rows
            .values()
            .filter(|lesson| query.matches(lesson))
            .cloned()
            .collect();
        let sort = query.sort();
        lessons.sort_by(|a, b| sort.compare(a, b));
        Ok(lessons)
    }
}
