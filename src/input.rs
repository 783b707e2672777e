use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::App;
use crate::navigator::ActiveView;
use crate::session::Completion;
use crate::session::auth::AuthForm;
use crate::session::course_select::CourseSelector;
use crate::session::dashboard::{DashboardBrowser, DashboardView};
use crate::session::lesson::{LessonPlan, STEPS, Section};
use crate::session::quiz::QuizSession;
use crate::ui::layout::{AppLayout, LessonLayout, slider_position};
use crate::ui::render::dashboard_body;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    // Letters go into the auth fields while one is focused.
    let typing = matches!(app.navigator.view(), ActiveView::Auth(form) if form.is_editing());
    if !typing {
        match key.code {
            KeyCode::Char('q') => {
                app.quit();
                return;
            }
            KeyCode::Char('t') => {
                app.toggle_theme();
                return;
            }
            _ => {}
        }
    }

    app.navigator.update(|view| match view {
        ActiveView::Auth(form) => handle_auth_key(form, key),
        ActiveView::CourseSelect(selector) => handle_course_select_key(selector, key),
        ActiveView::Assessment(quiz) => handle_assessment_key(quiz, key),
        ActiveView::Dashboard(browser) => handle_dashboard_key(browser, key),
    });
}

fn digit(key: KeyEvent) -> Option<usize> {
    match key.code {
        KeyCode::Char(ch) => ch.to_digit(10).filter(|d| *d > 0).map(|d| d as usize - 1),
        _ => None,
    }
}

fn handle_auth_key(form: &mut AuthForm, key: KeyEvent) -> Option<Completion> {
    match key.code {
        KeyCode::Tab => form.focus_next(),
        KeyCode::BackTab => form.focus_prev(),
        KeyCode::Enter => return form.submit(),
        KeyCode::Esc => form.blur(),
        KeyCode::Backspace if form.is_editing() => form.backspace(),
        KeyCode::Char(ch) if form.is_editing() => form.insert_char(ch),
        KeyCode::Char('g') => return form.continue_with_google(),
        KeyCode::Char('e') => return form.explore_courses(),
        KeyCode::Char('m') => form.toggle_mode(),
        _ => {}
    }
    None
}

fn handle_course_select_key(selector: &mut CourseSelector, key: KeyEvent) -> Option<Completion> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => selector.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => selector.cursor_down(),
        KeyCode::Enter => return selector.activate(),
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('c') => selector.change_course(),
        _ => {
            if let Some(idx) = digit(key) {
                if idx < selector.visible_len() {
                    selector.cursor.index = idx;
                    return selector.activate();
                }
            }
        }
    }
    None
}

fn handle_assessment_key(quiz: &mut QuizSession, key: KeyEvent) -> Option<Completion> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => quiz.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => quiz.select_next(),
        KeyCode::Enter => return quiz.advance().map(Completion::QuizComplete),
        _ => {
            let options = quiz.current_question().map_or(0, |q| q.options.len());
            if let Some(idx) = digit(key).filter(|i| *i < options) {
                quiz.select_option(idx);
            }
        }
    }
    None
}

fn handle_dashboard_key(browser: &mut DashboardBrowser, key: KeyEvent) -> Option<Completion> {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace => {
            browser.back();
            return None;
        }
        KeyCode::Char('c') => {
            browser.change_course();
            return None;
        }
        KeyCode::Char('a') | KeyCode::Char('o') => return browser.open_assessment(),
        _ => {}
    }

    if browser.view() == DashboardView::Lesson {
        if let Some(plan) = browser.lesson_mut() {
            handle_lesson_key(plan, key);
        }
        return None;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => browser.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => browser.cursor_down(),
        KeyCode::Enter => {
            browser.activate();
        }
        _ => {
            if let Some(idx) = digit(key) {
                if idx < browser.visible_len() {
                    browser.cursor.index = idx;
                    browser.activate();
                }
            }
        }
    }
    None
}

fn handle_lesson_key(plan: &mut LessonPlan, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => plan.prev_step(),
        KeyCode::Right | KeyCode::Char('l') => plan.next_step(),
        KeyCode::Tab => plan.focus_next(),
        KeyCode::BackTab => plan.focus_prev(),
        KeyCode::Char(' ') => plan.toggle_focused(),
        _ if plan.focus == Section::Quiz && plan.is_open(Section::Quiz) => {
            handle_mini_quiz_key(plan, key)
        }
        KeyCode::Enter => plan.toggle_focused(),
        _ if plan.focus == Section::Steps => {
            if let Some(step) = digit(key).filter(|s| *s < STEPS.len()) {
                plan.select_step(step);
            }
        }
        _ => {}
    }
}

fn handle_mini_quiz_key(plan: &mut LessonPlan, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => plan.mini_quiz_mut().select_prev(),
        KeyCode::Down | KeyCode::Char('j') => plan.mini_quiz_mut().select_next(),
        KeyCode::Enter => plan.advance_mini_quiz(),
        _ => {
            let options = plan
                .mini_quiz()
                .current_question()
                .map_or(0, |q| q.options.len());
            if let Some(idx) = digit(key).filter(|i| *i < options) {
                plan.mini_quiz_mut().select_option(idx);
            }
        }
    }
}

/// Pointer input. Only the lesson slider reacts: press on the track to jump,
/// drag to scrub, release to stop. `area` is the full terminal area.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent, area: Rect) {
    let main = AppLayout::new(area).main;
    let slider_drag = app.slider_drag;
    let mut dragging = slider_drag;

    app.navigator.update(|view| {
        let ActiveView::Dashboard(browser) = view else {
            dragging = false;
            return None;
        };
        let layout = LessonLayout::new(dashboard_body(main, browser));
        let Some(plan) = browser.lesson_mut() else {
            dragging = false;
            return None;
        };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                dragging = layout.hits_slider(mouse.column, mouse.row);
                if dragging {
                    plan.drag_to(slider_position(layout.slider, mouse.column));
                }
            }
            MouseEventKind::Drag(MouseButton::Left) if slider_drag => {
                plan.drag_to(slider_position(layout.slider, mouse.column));
            }
            MouseEventKind::Up(MouseButton::Left) => dragging = false,
            _ => {}
        }
        None
    });

    app.slider_drag = dragging;
}
