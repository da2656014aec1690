use std::sync::Arc;

use crate::model::{
    CrudRepository, DatabaseError, DatabaseResult, LessonStore, ListingParams, Page,
    QueryableRepository, ResourceTyped, WriteResult, entity::Lesson,
};
use crate::web::dto::lessons::{LessonListing, LessonRequest, LessonViewModel};

pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Listing and lifecycle operations for lessons on top of any [`LessonStore`].
#[derive(Debug, Clone)]
pub struct LessonsService {
    store: Arc<dyn LessonStore>,
    page_size: i64,
}

impl LessonsService {
    pub fn new(store: Arc<dyn LessonStore>, page_size: i64) -> Self {
        Self {
            store,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all_filter(&self, params: ListingParams) -> DatabaseResult<LessonListing> {
        let course_id = params.course_id;
        let resolved = params.resolve();

        let lessons = self.store.fetch_all(&resolved.query).await?;
        tracing::debug!(
            matched = lessons.len(),
            page = resolved.page_number,
            sort = resolved.query.sort().as_param(),
            "lessons fetched"
        );

        let page = Page::create(lessons, resolved.page_number, self.page_size)
            .map(LessonViewModel::from);

        Ok(LessonListing {
            page,
            current_filter: resolved.current_filter,
            current_sort: resolved.query.sort(),
            course_id,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> DatabaseResult<Option<LessonViewModel>> {
        let lesson = self.store.find_by_id(id).await?;
        Ok(lesson.map(LessonViewModel::from))
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, request: LessonRequest) -> DatabaseResult<WriteResult> {
        let result = self.store.insert(request.into_new_lesson()).await?;
        tracing::debug!(id = result.id, "lesson created");
        Ok(result)
    }

    /// Fails with [`DatabaseError::NotFound`] when `id` is unknown; nothing is
    /// written in that case.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: i32, request: LessonRequest) -> DatabaseResult<u64> {
        if !self.store.exists(id).await? {
            return Err(DatabaseError::not_found(Lesson::get_resource_type(), id));
        }

        self.store.update(id, request.into()).await
    }

    /// Deleting an unknown id is not an error, it just affects no rows.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> DatabaseResult<u64> {
        let rows = self.store.delete(id).await?;
        if rows == 0 {
            tracing::debug!(id, "nothing to delete");
        }
        Ok(rows)
    }
}
