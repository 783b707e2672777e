use std::sync::Arc;

use crate::catalog::{Catalog, Course, LearningPath};
use crate::session::Completion;
use crate::session::cursor::ListCursor;

/// Two-level picker: course grid, then the learning paths of that course.
pub struct CourseSelector {
    catalog: Arc<Catalog>,
    selected_course: Option<usize>,
    pub cursor: ListCursor,
}

impl CourseSelector {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            selected_course: None,
            cursor: ListCursor::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selected_course(&self) -> Option<&Course> {
        self.selected_course.map(|i| &self.catalog.courses[i])
    }

    pub fn is_choosing_path(&self) -> bool {
        self.selected_course.is_some()
    }

    /// Number of rows in the currently visible list.
    pub fn visible_len(&self) -> usize {
        if self.is_choosing_path() {
            self.catalog.paths.len()
        } else {
            self.catalog.courses.len()
        }
    }

    /// Reveal the paths for `key`. Unknown keys are ignored.
    pub fn pick_course(&mut self, key: &str) {
        if let Some(idx) = self.catalog.courses.iter().position(|c| c.key == key) {
            self.selected_course = Some(idx);
            self.cursor.reset();
        }
    }

    /// Terminal step: reports the chosen course and level. Holds no path state.
    pub fn pick_path(&mut self, level: &str) -> Option<Completion> {
        let course = self.selected_course()?;
        let path: &LearningPath = self.catalog.path(level)?;
        tracing::info!(course = %course.key, level = %path.level, "learning path picked");
        Some(Completion::PathPicked {
            course_key: course.key.clone(),
            level: path.level.clone(),
        })
    }

    pub fn change_course(&mut self) {
        self.selected_course = None;
        self.cursor.reset();
    }

    pub fn cursor_down(&mut self) {
        let len = self.visible_len();
        self.cursor.next(len);
    }

    pub fn cursor_up(&mut self) {
        let len = self.visible_len();
        self.cursor.prev(len);
    }

    /// Act on the highlighted row of whichever list is showing.
    pub fn activate(&mut self) -> Option<Completion> {
        if self.is_choosing_path() {
            let level = self.catalog.paths.get(self.cursor.index)?.level.clone();
            self.pick_path(&level)
        } else {
            let key = self.catalog.courses.get(self.cursor.index)?.key.clone();
            self.pick_course(&key);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::loader;

    fn selector() -> CourseSelector {
        CourseSelector::new(Arc::new(loader::load_embedded().unwrap()))
    }

    #[test]
    fn test_pick_course_reveals_paths() {
        let mut s = selector();
        assert!(!s.is_choosing_path());
        s.pick_course("web");
        assert_eq!(s.selected_course().unwrap().key, "web");
        assert_eq!(s.visible_len(), 3);
    }

    #[test]
    fn test_unknown_course_ignored() {
        let mut s = selector();
        s.pick_course("cooking");
        assert!(s.selected_course().is_none());
    }

    #[test]
    fn test_pick_path_reports_course_and_level() {
        let mut s = selector();
        s.pick_course("web");
        assert_eq!(
            s.pick_path("Intermediate"),
            Some(Completion::PathPicked {
                course_key: "web".into(),
                level: "Intermediate".into()
            })
        );
    }

    #[test]
    fn test_pick_path_requires_course_and_known_level() {
        let mut s = selector();
        assert!(s.pick_path("Beginner").is_none());
        s.pick_course("ai");
        assert!(s.pick_path("Expert").is_none());
    }

    #[test]
    fn test_change_course_returns_to_grid() {
        let mut s = selector();
        s.pick_course("ux");
        s.cursor_down();
        s.change_course();
        assert!(s.selected_course().is_none());
        assert_eq!(s.cursor.index, 0);
        assert_eq!(s.visible_len(), 4);
    }

    #[test]
    fn test_activate_walks_both_levels() {
        let mut s = selector();
        s.cursor_down();
        assert!(s.activate().is_none());
        assert_eq!(s.selected_course().unwrap().key, "data");
        s.cursor_up();
        assert_eq!(s.cursor.index, 2);
        assert_eq!(
            s.activate(),
            Some(Completion::PathPicked {
                course_key: "data".into(),
                level: "Advanced".into()
            })
        );
    }
}
