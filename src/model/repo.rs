use serde::{Deserialize, Serialize};

use crate::model::error::DatabaseResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Lesson,
}

/// One page of an ordered sequence together with the navigation state needed
/// to request its neighbours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based, always within `[1, max(total_pages, 1)]`
    pub page_index: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub page_size: i64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Page<T> {
    /// Slices a fully materialized sequence. Out of range page numbers are
    /// clamped, never rejected.
    pub fn create(source: Vec<T>, page_number: i64, page_size: i64) -> Self {
        let page_size = page_size.max(1);
        let total_items = source.len() as i64;
        let total_pages = (total_items as u64).div_ceil(page_size as u64) as i64;
        let page_index = page_number.clamp(1, total_pages.max(1));
        let offset = ((page_index - 1) * page_size) as usize;

        let items = source
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .collect();

        Self {
            items,
            page_index,
            total_pages,
            total_items,
            page_size,
            has_previous: page_index > 1,
            has_next: page_index < total_pages,
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_index: self.page_index,
            total_pages: self.total_pages,
            total_items: self.total_items,
            page_size: self.page_size,
            has_previous: self.has_previous,
            has_next: self.has_next,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Outcome of a single-statement write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct WriteResult {
    pub rows_affected: u64,
    pub id: i32,
}

impl WriteResult {
    pub fn new(rows_affected: u64, id: i32) -> Self {
        Self { rows_affected, id }
    }

    pub fn written(&self) -> bool {
        self.rows_affected > 0
    }
}

pub trait ResourceTyped {
    fn get_resource_type() -> ResourceType;
}

#[async_trait::async_trait]
pub trait CrudRepository<T, Create, Changes, V>: Send + Sync
where
    T: ResourceTyped,
    V: Clone + Copy,
{
    async fn insert(&self, data: Create) -> DatabaseResult<WriteResult>;

    /// Overwrites the mutable fields of `id`. Returns affected rows.
    async fn update(&self, id: V, data: Changes) -> DatabaseResult<u64>;

    /// Returns affected rows, `0` when nothing matched.
    async fn delete(&self, id: V) -> DatabaseResult<u64>;

    async fn find_by_id(&self, id: V) -> DatabaseResult<Option<T>>;

    async fn exists(&self, id: V) -> DatabaseResult<bool>;
}

#[async_trait::async_trait]
pub trait QueryableRepository<T, Q>: Send + Sync
where
    T: ResourceTyped,
{
    /// Materializes every record matching `query`, in the query's order.
    async fn fetch_all(&self, query: &Q) -> DatabaseResult<Vec<T>>;
}
