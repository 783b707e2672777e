use std::sync::Arc;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::catalog::Catalog;
use crate::session::Completion;
use crate::session::auth::AuthForm;
use crate::session::course_select::CourseSelector;
use crate::session::dashboard::DashboardBrowser;
use crate::session::quiz::{QuizOutcome, QuizSession, Scoring};
use crate::session::timer::DEFAULT_QUESTION_SECS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Auth,
    CourseSelect,
    Assessment,
    Dashboard,
}

impl Screen {
    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Auth => "auth",
            Screen::CourseSelect => "courses",
            Screen::Assessment => "assessment",
            Screen::Dashboard => "dashboard",
        }
    }
}

/// How assessments are built when the navigator enters `Screen::Assessment`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssessmentSettings {
    pub question_seconds: u32,
    pub scoring: Scoring,
    pub shuffle: bool,
}

impl Default for AssessmentSettings {
    fn default() -> Self {
        Self {
            question_seconds: DEFAULT_QUESTION_SECS,
            scoring: Scoring::Unscored,
            shuffle: false,
        }
    }
}

/// The one live view-controller. Replacing it discards the previous one's
/// state, including any running question timer.
pub enum ActiveView {
    Auth(AuthForm),
    CourseSelect(CourseSelector),
    Assessment(QuizSession),
    Dashboard(DashboardBrowser),
}

impl ActiveView {
    pub fn screen(&self) -> Screen {
        match self {
            ActiveView::Auth(_) => Screen::Auth,
            ActiveView::CourseSelect(_) => Screen::CourseSelect,
            ActiveView::Assessment(_) => Screen::Assessment,
            ActiveView::Dashboard(_) => Screen::Dashboard,
        }
    }
}

/// Root screen selector. Owns the active view and turns completions into
/// transitions.
pub struct Navigator {
    catalog: Arc<Catalog>,
    settings: AssessmentSettings,
    view: ActiveView,
    assessment_course: Option<String>,
    last_outcome: Option<QuizOutcome>,
    rng: SmallRng,
}

impl Navigator {
    pub fn new(catalog: Arc<Catalog>, settings: AssessmentSettings) -> Self {
        Self {
            catalog,
            settings,
            view: ActiveView::Auth(AuthForm::new()),
            assessment_course: None,
            last_outcome: None,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.view.screen()
    }

    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> AssessmentSettings {
        self.settings
    }

    /// Course whose questions the current (or next) assessment uses.
    pub fn assessment_course(&self) -> Option<&str> {
        self.assessment_course.as_deref()
    }

    pub fn last_outcome(&self) -> Option<&QuizOutcome> {
        self.last_outcome.as_ref()
    }

    /// Replace the active view with a freshly initialized one for `next`.
    pub fn transition_to(&mut self, next: Screen) {
        let from = self.screen();
        self.view = match next {
            Screen::Auth => ActiveView::Auth(AuthForm::new()),
            Screen::CourseSelect => ActiveView::CourseSelect(CourseSelector::new(self.catalog.clone())),
            Screen::Assessment => ActiveView::Assessment(self.new_assessment()),
            Screen::Dashboard => ActiveView::Dashboard(DashboardBrowser::with_outcome(
                self.catalog.clone(),
                self.last_outcome.clone(),
            )),
        };
        tracing::info!(from = from.as_str(), to = next.as_str(), "screen transition");
    }

    fn new_assessment(&mut self) -> QuizSession {
        let mut questions = self
            .catalog
            .assessment_for(self.assessment_course.as_deref())
            .to_vec();
        if self.settings.shuffle {
            questions.shuffle(&mut self.rng);
        }
        QuizSession::new(
            questions,
            self.settings.scoring,
            Some(self.settings.question_seconds),
        )
    }

    /// Apply a completion reported by the active view.
    pub fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::AuthSucceeded => self.transition_to(Screen::Dashboard),
            Completion::ExploreCourses => self.transition_to(Screen::CourseSelect),
            Completion::PathPicked { course_key, level } => {
                tracing::info!(course = %course_key, %level, "starting assessment for path");
                self.assessment_course = Some(course_key);
                self.transition_to(Screen::Assessment);
            }
            Completion::QuizComplete(outcome) => {
                tracing::info!(
                    total = outcome.total,
                    answered = outcome.answered,
                    score = ?outcome.score,
                    timed_out = outcome.timed_out,
                    "assessment complete"
                );
                self.last_outcome = Some(outcome);
                self.transition_to(Screen::Dashboard);
            }
            Completion::OpenAssessment { course_key } => {
                self.assessment_course = course_key;
                self.transition_to(Screen::Assessment);
            }
        }
    }

    /// Run an input handler against the active view and apply whatever
    /// completion it reports.
    pub fn update<F>(&mut self, handler: F)
    where
        F: FnOnce(&mut ActiveView) -> Option<Completion>,
    {
        if let Some(completion) = handler(&mut self.view) {
            self.complete(completion);
        }
    }

    /// Periodic wall-clock tick. Only a running assessment reacts.
    pub fn tick(&mut self, now: Instant) {
        self.update(|view| match view {
            ActiveView::Assessment(quiz) => quiz.on_tick(now).map(Completion::QuizComplete),
            _ => None,
        });
    }
}
