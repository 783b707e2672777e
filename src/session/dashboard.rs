use std::sync::Arc;

use crate::catalog::{Catalog, Chapter, Course, Topic};
use crate::session::Completion;
use crate::session::cursor::ListCursor;
use crate::session::lesson::LessonPlan;
use crate::session::quiz::QuizOutcome;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashboardView {
    Home,
    Chapters,
    Topics,
    Lesson,
}

/// Selection path of the drill-down. Each level carries its parents, so a
/// deeper selection cannot exist without the shallower ones, and popping a
/// level drops everything below it.
enum Level {
    Home,
    Chapters {
        course: usize,
    },
    Topics {
        course: usize,
        chapter: usize,
    },
    Lesson {
        course: usize,
        chapter: usize,
        topic: usize,
        plan: Box<LessonPlan>,
    },
}

/// Course -> chapter -> topic -> lesson browser with a one-level back stack.
pub struct DashboardBrowser {
    catalog: Arc<Catalog>,
    level: Level,
    pub cursor: ListCursor,
    last_outcome: Option<QuizOutcome>,
}

impl DashboardBrowser {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            level: Level::Home,
            cursor: ListCursor::default(),
            last_outcome: None,
        }
    }

    /// Dashboard entered after an assessment; the result is shown as a banner.
    pub fn with_outcome(catalog: Arc<Catalog>, outcome: Option<QuizOutcome>) -> Self {
        Self {
            last_outcome: outcome,
            ..Self::new(catalog)
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn last_outcome(&self) -> Option<&QuizOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn view(&self) -> DashboardView {
        match self.level {
            Level::Home => DashboardView::Home,
            Level::Chapters { .. } => DashboardView::Chapters,
            Level::Topics { .. } => DashboardView::Topics,
            Level::Lesson { .. } => DashboardView::Lesson,
        }
    }

    fn course_idx(&self) -> Option<usize> {
        match self.level {
            Level::Home => None,
            Level::Chapters { course }
            | Level::Topics { course, .. }
            | Level::Lesson { course, .. } => Some(course),
        }
    }

    fn chapter_idx(&self) -> Option<usize> {
        match self.level {
            Level::Topics { chapter, .. } | Level::Lesson { chapter, .. } => Some(chapter),
            _ => None,
        }
    }

    pub fn selected_course(&self) -> Option<&Course> {
        self.course_idx().map(|i| &self.catalog.courses[i])
    }

    pub fn selected_chapter(&self) -> Option<&Chapter> {
        let course = self.selected_course()?;
        self.chapter_idx().map(|i| &course.chapters[i])
    }

    pub fn selected_topic(&self) -> Option<&Topic> {
        match self.level {
            Level::Lesson { topic, .. } => self.selected_chapter().map(|ch| &ch.topics[topic]),
            _ => None,
        }
    }

    pub fn lesson(&self) -> Option<&LessonPlan> {
        match &self.level {
            Level::Lesson { plan, .. } => Some(&**plan),
            _ => None,
        }
    }

    pub fn lesson_mut(&mut self) -> Option<&mut LessonPlan> {
        match &mut self.level {
            Level::Lesson { plan, .. } => Some(&mut **plan),
            _ => None,
        }
    }

    /// Top bar title and subtitle for the current level.
    pub fn heading(&self) -> (String, String) {
        match self.level {
            Level::Home => (
                "Choose your path".to_string(),
                "Pick a domain and dive in.".to_string(),
            ),
            Level::Chapters { .. } => {
                let course = self.selected_course();
                (
                    course.map(|c| c.title.clone()).unwrap_or_default(),
                    course
                        .map(|c| c.blurb_or_description().to_string())
                        .unwrap_or_default(),
                )
            }
            Level::Topics { .. } => {
                let course = self.selected_course().map(|c| c.title.as_str()).unwrap_or("");
                let chapter = self.selected_chapter();
                (
                    format!(
                        "{course} \u{2022} {}",
                        chapter.map(|c| c.title.as_str()).unwrap_or("")
                    ),
                    chapter.map(|c| c.description.clone()).unwrap_or_default(),
                )
            }
            Level::Lesson { .. } => (
                "Lesson Plan".to_string(),
                self.selected_topic()
                    .map(|t| t.summary.clone())
                    .unwrap_or_default(),
            ),
        }
    }

    /// Rows of the list shown at the current level (empty in the lesson).
    pub fn visible_len(&self) -> usize {
        match self.level {
            Level::Home => self.catalog.courses.len(),
            Level::Chapters { .. } => self.selected_course().map_or(0, |c| c.chapters.len()),
            Level::Topics { .. } => self.selected_chapter().map_or(0, |c| c.topics.len()),
            Level::Lesson { .. } => 0,
        }
    }

    pub fn select_course(&mut self, key: &str) -> bool {
        if !matches!(self.level, Level::Home) {
            return false;
        }
        let Some(course) = self.catalog.courses.iter().position(|c| c.key == key) else {
            return false;
        };
        self.level = Level::Chapters { course };
        self.cursor.reset();
        true
    }

    pub fn select_chapter(&mut self, key: &str) -> bool {
        let Level::Chapters { course } = self.level else {
            return false;
        };
        let Some(chapter) = self.catalog.courses[course]
            .chapters
            .iter()
            .position(|ch| ch.key == key)
        else {
            return false;
        };
        self.level = Level::Topics { course, chapter };
        self.cursor.reset();
        true
    }

    pub fn select_topic(&mut self, id: &str) -> bool {
        let Level::Topics { course, chapter } = self.level else {
            return false;
        };
        let topics = &self.catalog.courses[course].chapters[chapter].topics;
        let Some(topic) = topics.iter().position(|t| t.id == id) else {
            return false;
        };
        let plan = LessonPlan::new(&topics[topic], self.catalog.mini_quiz.clone());
        tracing::info!(topic = %topics[topic].id, "lesson opened");
        self.level = Level::Lesson {
            course,
            chapter,
            topic,
            plan: Box::new(plan),
        };
        self.cursor.reset();
        true
    }

    /// Pop exactly one level, clearing the selection being left. Returns
    /// `false` at the top.
    pub fn back(&mut self) -> bool {
        let level = std::mem::replace(&mut self.level, Level::Home);
        let (level, cursor) = match level {
            Level::Home => return false,
            Level::Chapters { course } => (Level::Home, course),
            Level::Topics { course, chapter } => (Level::Chapters { course }, chapter),
            Level::Lesson {
                course,
                chapter,
                topic,
                ..
            } => (Level::Topics { course, chapter }, topic),
        };
        self.level = level;
        // Land on the row that was just left.
        self.cursor.index = cursor;
        true
    }

    /// Back to the course grid from any depth.
    pub fn change_course(&mut self) {
        self.level = Level::Home;
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

    /// Descend into the highlighted row.
    pub fn activate(&mut self) -> bool {
        let idx = self.cursor.index;
        let key = match self.level {
            Level::Home => self.catalog.courses.get(idx).map(|c| c.key.clone()),
            Level::Chapters { .. } => self
                .selected_course()
                .and_then(|c| c.chapters.get(idx))
                .map(|ch| ch.key.clone()),
            Level::Topics { .. } => self
                .selected_chapter()
                .and_then(|ch| ch.topics.get(idx))
                .map(|t| t.id.clone()),
            Level::Lesson { .. } => None,
        };
        let Some(key) = key else {
            return false;
        };
        match self.level {
            Level::Home => self.select_course(&key),
            Level::Chapters { .. } => self.select_chapter(&key),
            Level::Topics { .. } => self.select_topic(&key),
            Level::Lesson { .. } => false,
        }
    }

    /// "Quick quiz": hands the browsed course (if any) to the assessment.
    pub fn open_assessment(&self) -> Option<Completion> {
        Some(Completion::OpenAssessment {
            course_key: self.selected_course().map(|c| c.key.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::loader;

    fn browser() -> DashboardBrowser {
        DashboardBrowser::new(Arc::new(loader::load_embedded().unwrap()))
    }

    #[test]
    fn test_starts_home_with_nothing_selected() {
        let b = browser();
        assert_eq!(b.view(), DashboardView::Home);
        assert!(b.selected_course().is_none());
        assert!(b.lesson().is_none());
    }

    #[test]
    fn test_forward_drill_down() {
        let mut b = browser();
        assert!(b.select_course("web"));
        assert_eq!(b.view(), DashboardView::Chapters);
        assert!(b.select_chapter("css-essentials"));
        assert_eq!(b.view(), DashboardView::Topics);
        assert!(b.select_topic("layout-modern"));
        assert_eq!(b.view(), DashboardView::Lesson);
        assert_eq!(b.selected_topic().unwrap().title, "Flexbox & Grid");
        assert_eq!(b.lesson().unwrap().title, "Flexbox & Grid");
    }

    #[test]
    fn test_levels_require_parent() {
        let mut b = browser();
        assert!(!b.select_chapter("html-basics"));
        assert!(!b.select_topic("html-text"));
        b.select_course("web");
        assert!(!b.select_topic("html-text"));
        assert!(!b.select_course("data"));
        assert_eq!(b.selected_course().unwrap().key, "web");
    }

    #[test]
    fn test_back_from_topics_clears_chapter_only() {
        let mut b = browser();
        b.select_course("web");
        b.select_chapter("js-core");
        assert!(b.back());
        assert_eq!(b.view(), DashboardView::Chapters);
        assert!(b.selected_chapter().is_none());
        assert_eq!(b.selected_course().unwrap().key, "web");
    }

    #[test]
    fn test_back_from_lesson_clears_topic_and_plan() {
        let mut b = browser();
        b.select_course("web");
        b.select_chapter("html-basics");
        b.select_topic("html-media");
        b.lesson_mut().unwrap().drag_to(100.0);
        assert!(b.back());
        assert_eq!(b.view(), DashboardView::Topics);
        assert!(b.selected_topic().is_none());
        assert!(b.lesson().is_none());
        assert_eq!(b.cursor.index, 2);
        // Re-entering starts a fresh lesson.
        b.select_topic("html-media");
        assert_eq!(b.lesson().unwrap().current_step(), 0);
    }

    #[test]
    fn test_back_at_home_is_noop() {
        let mut b = browser();
        assert!(!b.back());
        assert_eq!(b.view(), DashboardView::Home);
    }

    #[test]
    fn test_change_course_clears_everything() {
        let mut b = browser();
        b.select_course("web");
        b.select_chapter("html-basics");
        b.change_course();
        assert_eq!(b.view(), DashboardView::Home);
        assert!(b.selected_course().is_none());
        assert!(b.selected_chapter().is_none());
    }

    #[test]
    fn test_activate_uses_cursor() {
        let mut b = browser();
        b.cursor_down();
        assert!(b.activate());
        assert_eq!(b.selected_course().unwrap().key, "data");
        b.cursor_up();
        assert!(b.activate());
        assert_eq!(b.selected_chapter().unwrap().key, "ml-intro");
    }

    #[test]
    fn test_headings_follow_level() {
        let mut b = browser();
        assert_eq!(b.heading().0, "Choose your path");
        b.select_course("web");
        assert_eq!(b.heading().0, "Web Development");
        b.select_chapter("html-basics");
        assert_eq!(b.heading().0, "Web Development \u{2022} HTML Basics");
        assert_eq!(b.heading().1, "Structure the web with semantic building blocks.");
        b.select_topic("html-text");
        assert_eq!(b.heading().0, "Lesson Plan");
    }

    #[test]
    fn test_open_assessment_carries_course() {
        let mut b = browser();
        assert_eq!(
            b.open_assessment(),
            Some(Completion::OpenAssessment { course_key: None })
        );
        b.select_course("data");
        assert_eq!(
            b.open_assessment(),
            Some(Completion::OpenAssessment {
                course_key: Some("data".into())
            })
        );
    }
}
