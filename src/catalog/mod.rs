pub mod loader;
pub mod schema;

pub use loader::CatalogError;
pub use schema::{Catalog, Chapter, Course, LearningPath, QuizQuestion, Topic};
