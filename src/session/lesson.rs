use crate::catalog::{QuizQuestion, Topic};
use crate::session::quiz::{QuizOutcome, QuizSession, Scoring};

pub const STEPS: [&str; 4] = ["Intro", "Concepts", "Hands-on", "Review"];

pub const STEP_DETAILS: [&str; 4] = [
    "Get a quick overview and context.",
    "Learn core ideas with small demos.",
    "Build a mini project to apply the concept.",
    "Summarize, quiz yourself, and set next actions.",
];

pub const OBJECTIVES: [&str; 3] = [
    "Understand the problem domain and vocabulary",
    "Apply concepts with guided exercises",
    "Evaluate solutions and reflect on improvements",
];

pub const RESOURCES: [&str; 4] = [
    "MDN Guide",
    "WebAIM Checklist",
    "Awesome Repo",
    "Practice Challenges",
];

pub const OVERVIEW: &str = "This lesson introduces key ideas with a short video, concise notes, \
and practice tasks. Use the progress timeline to jump between stages.";

/// Map a drag position in `[0, 100]` to the nearest step index.
///
/// Positions outside the range (and NaN) are clamped first. Halfway positions
/// round away from zero, so 50 over four steps lands on index 2.
pub fn step_for_position(position: f64, step_count: usize) -> usize {
    if step_count == 0 {
        return 0;
    }
    let x = clamp_position(position);
    let last = step_count - 1;
    let idx = (x / 100.0 * last as f64).round() as usize;
    idx.min(last)
}

/// Drag position that puts the handle on `step`.
pub fn position_for_step(step: usize, step_count: usize) -> f64 {
    if step_count <= 1 {
        return 0.0;
    }
    let last = step_count - 1;
    step.min(last) as f64 / last as f64 * 100.0
}

fn clamp_position(position: f64) -> f64 {
    if position.is_nan() {
        0.0
    } else {
        position.clamp(0.0, 100.0)
    }
}

const SECTION_COUNT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Overview,
    Objectives,
    Steps,
    Resources,
    Quiz,
}

impl Section {
    pub const ALL: [Section; SECTION_COUNT] = [
        Section::Overview,
        Section::Objectives,
        Section::Steps,
        Section::Resources,
        Section::Quiz,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Overview => "Overview",
            Section::Objectives => "Learning Objectives",
            Section::Steps => "Lesson Steps",
            Section::Resources => "Resources",
            Section::Quiz => "Quick Knowledge Check",
        }
    }

    fn index(self) -> usize {
        Section::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }
}

/// Terminal view of the dashboard drill-down: step tracker, collapsible
/// sections and an untimed, scored mini-quiz.
pub struct LessonPlan {
    pub title: String,
    pub summary: String,
    current_step: usize,
    drag_position: f64,
    open: [bool; SECTION_COUNT],
    pub focus: Section,
    mini_quiz: QuizSession,
    mini_outcome: Option<QuizOutcome>,
}

impl LessonPlan {
    pub fn new(topic: &Topic, mini_quiz: Vec<QuizQuestion>) -> Self {
        Self {
            title: topic.title.clone(),
            summary: topic.summary.clone(),
            current_step: 0,
            drag_position: 0.0,
            open: [true; SECTION_COUNT],
            focus: Section::Steps,
            mini_quiz: QuizSession::new(mini_quiz, Scoring::Scored, None),
            mini_outcome: None,
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn current_step_name(&self) -> &'static str {
        STEPS[self.current_step]
    }

    pub fn drag_position(&self) -> f64 {
        self.drag_position
    }

    pub fn select_step(&mut self, step: usize) {
        self.current_step = step.min(STEPS.len() - 1);
        self.drag_position = position_for_step(self.current_step, STEPS.len());
    }

    pub fn next_step(&mut self) {
        self.select_step(self.current_step + 1);
    }

    pub fn prev_step(&mut self) {
        self.select_step(self.current_step.saturating_sub(1));
    }

    /// Continuous pointer input. The handle follows the pointer; the step
    /// snaps to the nearest index.
    pub fn drag_to(&mut self, position: f64) {
        self.drag_position = clamp_position(position);
        self.current_step = step_for_position(self.drag_position, STEPS.len());
    }

    pub fn is_open(&self, section: Section) -> bool {
        self.open[section.index()]
    }

    pub fn toggle_section(&mut self, section: Section) {
        let idx = section.index();
        self.open[idx] = !self.open[idx];
    }

    pub fn toggle_focused(&mut self) {
        self.toggle_section(self.focus);
    }

    pub fn focus_next(&mut self) {
        let idx = (self.focus.index() + 1) % Section::ALL.len();
        self.focus = Section::ALL[idx];
    }

    pub fn focus_prev(&mut self) {
        let idx = (self.focus.index() + Section::ALL.len() - 1) % Section::ALL.len();
        self.focus = Section::ALL[idx];
    }

    pub fn mini_quiz(&self) -> &QuizSession {
        &self.mini_quiz
    }

    pub fn mini_quiz_mut(&mut self) -> &mut QuizSession {
        &mut self.mini_quiz
    }

    /// Result of the mini-quiz once its last question is answered.
    pub fn mini_outcome(&self) -> Option<&QuizOutcome> {
        self.mini_outcome.as_ref()
    }

    /// "Next"/"Finish" on the mini-quiz. Input after the finish is ignored.
    pub fn advance_mini_quiz(&mut self) {
        if let Some(outcome) = self.mini_quiz.advance() {
            tracing::info!(lesson = %self.title, score = ?outcome.score, total = outcome.total, "mini-quiz finished");
            self.mini_outcome = Some(outcome);
        }
    }
}
