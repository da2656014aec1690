use crate::service::LessonsService;

#[derive(Debug, Clone)]
pub struct AppState {
    lessons: LessonsService,
}

impl AppState {
    pub fn new(lessons: LessonsService) -> Self {
        Self { lessons }
    }

    pub fn lessons(&self) -> &LessonsService {
        &self.lessons
    }
}
