use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::entity::{Lesson, LessonChanges, NewLesson};
use crate::model::{Page, SortOrder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LessonViewModel {
    pub id: i32,
    pub title: String,
    pub introduction: Option<String>,
    pub course_id: i32,
    pub date_created: DateTime<Utc>,
}

impl From<Lesson> for LessonViewModel {
    fn from(lesson: Lesson) -> Self {
        Self {
            id: lesson.id(),
            title: lesson.title().to_owned(),
            introduction: lesson.introduction().map(str::to_owned),
            course_id: lesson.course_id(),
            date_created: lesson.date_created(),
        }
    }
}

/// Body of create and update requests.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LessonRequest {
    pub title: String,
    pub introduction: Option<String>,
    pub course_id: i32,
}

impl LessonRequest {
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Stamps the creation time.
    pub fn into_new_lesson(self) -> NewLesson {
        NewLesson {
            title: self.title,
            introduction: self.introduction,
            course_id: self.course_id,
            date_created: Utc::now(),
        }
    }
}

impl From<LessonRequest> for LessonChanges {
    fn from(request: LessonRequest) -> Self {
        Self {
            title: request.title,
            introduction: request.introduction,
            course_id: request.course_id,
        }
    }
}

/// A listing page plus the state a client sends back to fetch the next one.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LessonListing {
    pub page: Page<LessonViewModel>,
    pub current_filter: Option<String>,
    pub current_sort: SortOrder,
    pub course_id: Option<i32>,
}
