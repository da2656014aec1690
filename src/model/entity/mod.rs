mod lesson;
pub use lesson::{Lesson, LessonChanges, NewLesson};
