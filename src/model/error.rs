use thiserror::Error;

use crate::model::ResourceType;

pub type DatabaseResult<T> = std::result::Result<T, DatabaseError>;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("sqlx migrate error: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),
    #[error("sqlx error: {0}")]
    SqlxError(#[from] sqlx::Error),
    #[error("{resource_type:?} with id {id} does not exist")]
    NotFound { resource_type: ResourceType, id: i32 },
}

impl DatabaseError {
    pub fn not_found(resource_type: ResourceType, id: i32) -> Self {
        Self::NotFound { resource_type, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
