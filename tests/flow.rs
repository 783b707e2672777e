use std::fs;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use eduplanner::app::App;
use eduplanner::catalog::loader;
use eduplanner::config::Config;
use eduplanner::input::handle_key;
use eduplanner::navigator::{ActiveView, Screen};
use eduplanner::session::dashboard::DashboardView;
use eduplanner::session::lesson::Section;

fn app() -> App {
    App::new(Arc::new(loader::load_embedded().unwrap()), Config::default(), None)
}

fn press(app: &mut App, code: KeyCode) {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_str(app: &mut App, s: &str) {
    for ch in s.chars() {
        press(app, KeyCode::Char(ch));
    }
}

fn dashboard_view(app: &App) -> DashboardView {
    match app.navigator.view() {
        ActiveView::Dashboard(browser) => browser.view(),
        _ => panic!("expected dashboard, got {:?}", app.screen()),
    }
}

#[test]
fn explore_pick_path_answer_all_and_land_on_dashboard() {
    let mut app = app();

    // Auth -> explore courses
    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('e'));
    assert_eq!(app.screen(), Screen::CourseSelect);

    // web -> Beginner
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen(), Screen::Assessment);
    assert_eq!(app.navigator.assessment_course(), Some("web"));

    for choice in ['2', '1', '3'] {
        press(&mut app, KeyCode::Char(choice));
        press(&mut app, KeyCode::Enter);
    }

    assert_eq!(app.screen(), Screen::Dashboard);
    assert_eq!(dashboard_view(&app), DashboardView::Home);
    let outcome = app.navigator.last_outcome().unwrap();
    assert_eq!(outcome.total, 3);
    assert_eq!(outcome.answered, 3);
    assert_eq!(outcome.score, None);
    assert_eq!(outcome.timed_out, 0);
}

#[test]
fn scored_assessment_counts_correct_answers() {
    let config = Config {
        score_assessment: true,
        ..Config::default()
    };
    let mut app = App::new(Arc::new(loader::load_embedded().unwrap()), config, None);
    app.navigator.transition_to(Screen::Assessment);

    let answers: Vec<usize> = match app.navigator.view() {
        ActiveView::Assessment(quiz) => {
            assert_eq!(quiz.total(), 3);
            app.navigator
                .catalog()
                .default_assessment
                .iter()
                .map(|q| q.answer)
                .collect()
        }
        _ => panic!("expected assessment"),
    };
    for answer in answers {
        let key = char::from_digit(answer as u32 + 1, 10).unwrap();
        press(&mut app, KeyCode::Char(key));
        press(&mut app, KeyCode::Enter);
    }
    assert_eq!(app.navigator.last_outcome().unwrap().score, Some(3));
}

#[test]
fn timer_expiry_advances_and_finishes() {
    let config = Config {
        question_seconds: 5,
        ..Config::default()
    };
    let mut app = App::new(Arc::new(loader::load_embedded().unwrap()), config, None);
    app.navigator.transition_to(Screen::Assessment);

    let start = Instant::now();
    app.tick(start);
    app.tick(start + Duration::from_millis(4_900));
    match app.navigator.view() {
        ActiveView::Assessment(quiz) => {
            assert_eq!(quiz.current_index(), Some(0));
            assert_eq!(quiz.seconds_remaining(), Some(1));
        }
        _ => panic!("expected assessment"),
    }

    app.tick(start + Duration::from_secs(5));
    match app.navigator.view() {
        ActiveView::Assessment(quiz) => {
            assert_eq!(quiz.current_index(), Some(1));
            assert_eq!(quiz.seconds_remaining(), Some(5));
        }
        _ => panic!("expected assessment"),
    }

    // Each remaining question gets its own full allowance, counted from the
    // first tick it sees.
    let mut now = start + Duration::from_secs(5);
    for _ in 1..3 {
        now += Duration::from_millis(100);
        app.tick(now);
        now += Duration::from_secs(5);
        app.tick(now);
    }
    assert_eq!(app.screen(), Screen::Dashboard);
    let outcome = app.navigator.last_outcome().unwrap();
    assert_eq!(outcome.timed_out, 3);
    assert_eq!(outcome.answered, 0);

    // The old timer went away with the session.
    app.tick(now + Duration::from_secs(120));
    assert_eq!(app.screen(), Screen::Dashboard);
}

#[test]
fn leaving_assessment_cancels_timer() {
    let mut app = app();
    app.navigator.transition_to(Screen::Assessment);
    let start = Instant::now();
    app.tick(start);
    app.navigator.transition_to(Screen::Dashboard);
    app.tick(start + Duration::from_secs(600));
    assert_eq!(app.screen(), Screen::Dashboard);
    assert!(app.navigator.last_outcome().is_none());
}

#[test]
fn dashboard_back_cascades_one_level_at_a_time() {
    let mut app = app();
    type_str(&mut app, "ada@example.com");
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "pw");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen(), Screen::Dashboard);

    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    assert_eq!(dashboard_view(&app), DashboardView::Lesson);

    for expected in [DashboardView::Topics, DashboardView::Chapters, DashboardView::Home] {
        press(&mut app, KeyCode::Esc);
        assert_eq!(dashboard_view(&app), expected);
    }
    press(&mut app, KeyCode::Esc);
    assert_eq!(dashboard_view(&app), DashboardView::Home);

    // Re-entering a chapter shows no stale lesson.
    press(&mut app, KeyCode::Enter);
    match app.navigator.view() {
        ActiveView::Dashboard(browser) => {
            assert_eq!(browser.view(), DashboardView::Chapters);
            assert!(browser.selected_chapter().is_none());
            assert!(browser.lesson().is_none());
        }
        _ => panic!("expected dashboard"),
    }
}

#[test]
fn change_course_from_lesson_resets_everything() {
    let mut app = app();
    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('g'));
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('c'));
    match app.navigator.view() {
        ActiveView::Dashboard(browser) => {
            assert_eq!(browser.view(), DashboardView::Home);
            assert!(browser.selected_course().is_none());
        }
        _ => panic!("expected dashboard"),
    }
}

#[test]
fn lesson_quiz_then_open_assessment() {
    let mut app = app();
    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('g'));
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);

    press(&mut app, KeyCode::BackTab);
    press(&mut app, KeyCode::BackTab);
    press(&mut app, KeyCode::BackTab);
    match app.navigator.view() {
        ActiveView::Dashboard(browser) => {
            assert_eq!(browser.lesson().unwrap().focus, Section::Quiz);
        }
        _ => panic!("expected dashboard"),
    }
    press(&mut app, KeyCode::Char('1'));
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    match app.navigator.view() {
        ActiveView::Dashboard(browser) => {
            let outcome = browser.lesson().unwrap().mini_outcome().unwrap();
            assert_eq!(outcome.score, Some(0));
            assert_eq!(outcome.answered, 1);
        }
        _ => panic!("expected dashboard"),
    }

    press(&mut app, KeyCode::Char('o'));
    assert_eq!(app.screen(), Screen::Assessment);
    assert_eq!(app.navigator.assessment_course(), Some("web"));
}

#[test]
fn custom_catalog_file_drives_the_app() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(
        &path,
        r#"{
  "courses": [
    {"key": "rust", "title": "Rust", "description": "Systems programming",
     "chapters": [{"key": "own", "title": "Ownership", "description": "Moves and borrows",
                   "topics": [{"id": "borrow", "title": "Borrowing", "summary": "Shared and unique refs"}]}]}
  ],
  "paths": [{"level": "Beginner", "description": "Start here", "percent": 5}],
  "default_assessment": [{"prompt": "Is Rust memory safe?", "options": ["Yes", "No"], "answer": 0}],
  "mini_quiz": [{"prompt": "Who owns a value?", "options": ["One owner", "Everyone"], "answer": 0}]
}"#,
    )
    .unwrap();

    let catalog = loader::load_file(&path).unwrap();
    let mut app = App::new(Arc::new(catalog), Config::default(), None);
    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('e'));
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.navigator.assessment_course(), Some("rust"));
    press(&mut app, KeyCode::Char('1'));
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen(), Screen::Dashboard);
    assert_eq!(app.navigator.last_outcome().unwrap().total, 1);
}
