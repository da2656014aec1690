mod lessons;
pub use lessons::{DEFAULT_PAGE_SIZE, LessonsService};
