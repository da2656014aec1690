mod database;
pub use database::DbConnection;

pub mod entity;

mod error;
pub use error::{DatabaseError, DatabaseResult};

mod memory;
pub use memory::MemoryStore;

pub mod query;
pub use query::{LessonQuery, ListingParams, ResolvedListing, SortOrder};

mod repo;
pub use repo::{
    CrudRepository, Page, QueryableRepository, ResourceType, ResourceTyped, WriteResult,
};

use sqlx::PgPool;

use entity::{Lesson, LessonChanges, NewLesson};

/// Everything the lessons service needs from a persistence backend.
pub trait LessonStore:
    CrudRepository<Lesson, NewLesson, LessonChanges, i32>
    + QueryableRepository<Lesson, LessonQuery>
    + std::fmt::Debug
{
}

impl<S> LessonStore for S where
    S: CrudRepository<Lesson, NewLesson, LessonChanges, i32>
        + QueryableRepository<Lesson, LessonQuery>
        + std::fmt::Debug
{
}

#[derive(Debug, Clone)]
pub struct ModelManager {
    database: DbConnection,
}

impl ModelManager {
    pub fn new(conn: DbConnection) -> Self {
        Self { database: conn }
    }

    pub fn executor(&self) -> &PgPool {
        self.database.pool()
    }
}
