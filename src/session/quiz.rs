use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::catalog::QuizQuestion;
use crate::session::timer::QuestionTimer;

/// Whether a session compares selections against the correct option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scoring {
    Scored,
    Unscored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    AwaitingAnswer(usize),
    Finished,
}

/// What caused the session to move on from a question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceCause {
    Manual,
    TimerExpired,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuizOutcome {
    pub total: usize,
    /// Questions where some option was selected before moving on.
    pub answered: usize,
    /// `None` for unscored sessions.
    pub score: Option<usize>,
    pub timed_out: usize,
    pub finished_at: DateTime<Utc>,
}

/// Multiple-choice question runner. A timed session owns its question timer;
/// the timer lives and dies with the session.
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    phase: QuizPhase,
    selected: Option<usize>,
    answers: Vec<Option<usize>>,
    scoring: Scoring,
    score: usize,
    timed_out: usize,
    timer: Option<QuestionTimer>,
}

impl QuizSession {
    /// `time_limit` in seconds per question; `None` for an untimed session.
    pub fn new(questions: Vec<QuizQuestion>, scoring: Scoring, time_limit: Option<u32>) -> Self {
        let phase = if questions.is_empty() {
            QuizPhase::Finished
        } else {
            QuizPhase::AwaitingAnswer(0)
        };
        Self {
            answers: Vec::with_capacity(questions.len()),
            questions,
            phase,
            selected: None,
            scoring,
            score: 0,
            timed_out: 0,
            timer: time_limit.map(QuestionTimer::new),
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == QuizPhase::Finished
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            QuizPhase::AwaitingAnswer(i) => Some(i),
            QuizPhase::Finished => None,
        }
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.current_index().and_then(|i| self.questions.get(i))
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index() == Some(self.questions.len().saturating_sub(1))
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Selections recorded for questions already moved past, in order.
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn scoring(&self) -> Scoring {
        self.scoring
    }

    pub fn score(&self) -> Option<usize> {
        match self.scoring {
            Scoring::Scored => Some(self.score),
            Scoring::Unscored => None,
        }
    }

    pub fn seconds_remaining(&self) -> Option<u32> {
        self.timer.as_ref().map(QuestionTimer::remaining)
    }

    pub fn timer(&self) -> Option<&QuestionTimer> {
        self.timer.as_ref()
    }

    /// Share of questions already passed, as shown by the progress bar.
    pub fn progress(&self) -> f64 {
        match self.phase {
            _ if self.questions.is_empty() => 1.0,
            QuizPhase::AwaitingAnswer(i) => i as f64 / self.questions.len() as f64,
            QuizPhase::Finished => 1.0,
        }
    }

    /// Record a selection for the current question. Last call wins.
    pub fn select_option(&mut self, option: usize) {
        if let QuizPhase::AwaitingAnswer(_) = self.phase {
            self.selected = Some(option);
        }
    }

    /// Move the selection one option down (or onto the first option).
    pub fn select_next(&mut self) {
        let Some(len) = self.current_question().map(|q| q.options.len()) else {
            return;
        };
        if len == 0 {
            return;
        }
        let next = match self.selected {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.select_option(next);
    }

    pub fn select_prev(&mut self) {
        let Some(len) = self.current_question().map(|q| q.options.len()) else {
            return;
        };
        if len == 0 {
            return;
        }
        let prev = match self.selected {
            Some(i) if i > 0 && i < len => i - 1,
            _ => len - 1,
        };
        self.select_option(prev);
    }

    /// Move to the next question, or finish after the last one. Returns the
    /// outcome exactly once, on the call that finishes the session.
    pub fn advance(&mut self) -> Option<QuizOutcome> {
        self.advance_with(AdvanceCause::Manual)
    }

    fn advance_with(&mut self, cause: AdvanceCause) -> Option<QuizOutcome> {
        let QuizPhase::AwaitingAnswer(index) = self.phase else {
            return None;
        };

        let options = self.questions[index].options.len();
        let choice = self.selected.take().filter(|&i| i < options);
        if self.scoring == Scoring::Scored && self.questions[index].is_correct(choice) {
            self.score += 1;
        }
        if cause == AdvanceCause::TimerExpired {
            self.timed_out += 1;
        }
        self.answers.push(choice);

        if index + 1 < self.questions.len() {
            self.phase = QuizPhase::AwaitingAnswer(index + 1);
            if let Some(timer) = self.timer.as_mut() {
                timer.reset();
            }
            tracing::debug!(question = index + 1, ?cause, "quiz advanced");
            None
        } else {
            self.phase = QuizPhase::Finished;
            Some(self.outcome())
        }
    }

    /// Count down one second. When the countdown reaches zero the session
    /// advances exactly as if "Next" had been pressed.
    pub fn tick_second(&mut self) -> Option<QuizOutcome> {
        if self.is_finished() {
            return None;
        }
        let expired = self.timer.as_mut().is_some_and(QuestionTimer::tick);
        if expired {
            tracing::debug!(question = ?self.current_index(), "question timer expired");
            return self.advance_with(AdvanceCause::TimerExpired);
        }
        None
    }

    /// Feed wall-clock time to the question timer. No-op for untimed sessions.
    /// At most one question expires per sample; seconds left over after an
    /// expiry are dropped and the next question's clock starts on the next call.
    pub fn on_tick(&mut self, now: Instant) -> Option<QuizOutcome> {
        let finished = self.is_finished();
        let elapsed = match self.timer.as_mut() {
            Some(timer) if !finished => timer.sample(now),
            _ => return None,
        };
        let question = self.current_index();
        for _ in 0..elapsed {
            if let Some(outcome) = self.tick_second() {
                return Some(outcome);
            }
            if self.current_index() != question {
                break;
            }
        }
        None
    }

    fn outcome(&self) -> QuizOutcome {
        QuizOutcome {
            total: self.questions.len(),
            answered: self.answers.iter().filter(|a| a.is_some()).count(),
            score: self.score(),
            timed_out: self.timed_out,
            finished_at: Utc::now(),
        }
    }
}
