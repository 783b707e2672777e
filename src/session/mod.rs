pub mod auth;
pub mod course_select;
pub mod cursor;
pub mod dashboard;
pub mod lesson;
pub mod quiz;
pub mod timer;

use crate::session::quiz::QuizOutcome;

/// Notification a view-controller hands back to the navigator when its work
/// is done. Controllers never reach into each other's state.
#[derive(Clone, Debug, PartialEq)]
pub enum Completion {
    AuthSucceeded,
    ExploreCourses,
    PathPicked { course_key: String, level: String },
    QuizComplete(QuizOutcome),
    OpenAssessment { course_key: Option<String> },
}
