use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::app::App;
use crate::navigator::ActiveView;
use crate::session::auth::AuthForm;
use crate::session::course_select::CourseSelector;
use crate::session::dashboard::{DashboardBrowser, DashboardView};
use crate::session::lesson::{LessonPlan, OBJECTIVES, OVERVIEW, RESOURCES, STEP_DETAILS, STEPS, Section};
use crate::session::quiz::{QuizOutcome, QuizSession};
use crate::ui::components::auth_form::AuthFormView;
use crate::ui::components::menu::{Menu, MenuItem};
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::components::quiz_card::QuizCard;
use crate::ui::components::step_tracker::StepTracker;
use crate::ui::components::top_bar::TopBar;
use crate::ui::layout::{AppLayout, LessonLayout, centered_rect, pack_hint_lines};
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = &app.theme;
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.colors.bg()).fg(theme.colors.fg())),
        area,
    );

    let layout = AppLayout::new(area);
    let buf = frame.buffer_mut();
    match app.navigator.view() {
        ActiveView::Auth(form) => render_auth(form, &layout, theme, buf),
        ActiveView::CourseSelect(selector) => render_course_select(selector, &layout, theme, buf),
        ActiveView::Assessment(quiz) => {
            let course = app
                .navigator
                .assessment_course()
                .and_then(|key| app.navigator.catalog().course(key))
                .map(|c| c.title.as_str());
            render_assessment(quiz, course, &layout, theme, buf)
        }
        ActiveView::Dashboard(browser) => render_dashboard(browser, &layout, theme, buf),
    }
}

fn render_hints(hints: &[&str], area: Rect, theme: &Theme, buf: &mut Buffer) {
    let lines: Vec<Line> = pack_hint_lines(hints, area.width as usize)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(theme.colors.text_muted()))))
        .collect();
    Paragraph::new(lines).render(area, buf);
}

fn render_auth(form: &AuthForm, layout: &AppLayout, theme: &Theme, buf: &mut Buffer) {
    TopBar::new("EduPlanner", "Sign in to continue", theme).render(layout.header, buf);
    let card = centered_rect(50, 80, layout.main);
    AuthFormView::new(form, theme).render(card, buf);

    let hints: &[&str] = if form.is_editing() {
        &["[Tab] Next field", "[Esc] Actions", "[Enter] Submit", "[Ctrl-C] Quit"]
    } else {
        &["[Tab] Fields", "[Enter] Submit", "[g] Google", "[e] Explore", "[m] Switch mode", "[t] Theme", "[q] Quit"]
    };
    render_hints(hints, layout.footer, theme, buf);
}

fn render_course_select(selector: &CourseSelector, layout: &AppLayout, theme: &Theme, buf: &mut Buffer) {
    let catalog = selector.catalog();
    match selector.selected_course() {
        None => {
            TopBar::new("Explore courses", "Pick a course to see its learning paths.", theme)
                .render(layout.header, buf);
            let items = catalog
                .courses
                .iter()
                .enumerate()
                .map(|(i, c)| MenuItem::new((i + 1).to_string(), c.title.clone(), c.description.clone()))
                .collect();
            let menu = Menu::new("Courses", items, selector.cursor.index, theme);
            (&menu).render(layout.main, buf);
            render_hints(
                &["[↑↓] Move", "[Enter] Choose course", "[t] Theme", "[q] Quit"],
                layout.footer,
                theme,
                buf,
            );
        }
        Some(course) => {
            TopBar::new(&course.title, course.blurb_or_description(), theme).render(layout.header, buf);
            let items = catalog
                .paths
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    MenuItem::new((i + 1).to_string(), p.level.clone(), p.description.clone())
                        .with_progress(p.percent)
                })
                .collect();
            let menu = Menu::new("Learning paths", items, selector.cursor.index, theme);
            (&menu).render(layout.main, buf);
            render_hints(
                &["[↑↓] Move", "[Enter] Start assessment", "[c] Change course", "[t] Theme", "[q] Quit"],
                layout.footer,
                theme,
                buf,
            );
        }
    }
}

fn render_assessment(
    quiz: &QuizSession,
    course: Option<&str>,
    layout: &AppLayout,
    theme: &Theme,
    buf: &mut Buffer,
) {
    let subtitle = match course {
        Some(title) => format!("{title} placement check"),
        None => "General placement check".to_string(),
    };
    TopBar::new("Assessment", &subtitle, theme).render(layout.header, buf);
    let card = centered_rect(60, 80, layout.main);
    QuizCard::new("Assessment", quiz, theme).render(card, buf);
    render_hints(
        &["[↑↓/1-9] Choose", "[Enter] Next", "[t] Theme", "[q] Quit"],
        layout.footer,
        theme,
        buf,
    );
}

/// Area below the optional result banner. Shared with mouse hit-testing.
pub fn dashboard_body(main: Rect, browser: &DashboardBrowser) -> Rect {
    if browser.last_outcome().is_none() {
        return main;
    }
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(main);
    split[1]
}

fn outcome_banner(outcome: &QuizOutcome, theme: &Theme) -> Line<'static> {
    let colors = &theme.colors;
    let mut text = format!("Assessment complete: {} of {} answered", outcome.answered, outcome.total);
    if let Some(score) = outcome.score {
        text.push_str(&format!(", score {score}/{}", outcome.total));
    }
    if outcome.timed_out > 0 {
        text.push_str(&format!(", {} timed out", outcome.timed_out));
    }
    Line::from(Span::styled(
        format!(" {text}"),
        Style::default().fg(colors.success()).add_modifier(Modifier::BOLD),
    ))
}

fn render_dashboard(browser: &DashboardBrowser, layout: &AppLayout, theme: &Theme, buf: &mut Buffer) {
    let (title, subtitle) = browser.heading();
    TopBar::new(&title, &subtitle, theme).render(layout.header, buf);

    if let Some(outcome) = browser.last_outcome() {
        let banner = Rect::new(layout.main.x, layout.main.y, layout.main.width, 1);
        Paragraph::new(outcome_banner(outcome, theme)).render(banner, buf);
    }
    let body = dashboard_body(layout.main, browser);
    let catalog = browser.catalog();

    let hints: &[&str] = match browser.view() {
        DashboardView::Home => {
            let items = catalog
                .courses
                .iter()
                .enumerate()
                .map(|(i, c)| MenuItem::new((i + 1).to_string(), c.title.clone(), c.blurb_or_description()))
                .collect();
            let menu = Menu::new("Courses", items, browser.cursor.index, theme);
            (&menu).render(body, buf);
            &["[↑↓] Move", "[Enter] Open", "[a] Quick quiz", "[t] Theme", "[q] Quit"]
        }
        DashboardView::Chapters => {
            let items = browser
                .selected_course()
                .map(|c| {
                    c.chapters
                        .iter()
                        .enumerate()
                        .map(|(i, ch)| MenuItem::new((i + 1).to_string(), ch.title.clone(), ch.description.clone()))
                        .collect()
                })
                .unwrap_or_default();
            let menu = Menu::new("Chapters", items, browser.cursor.index, theme);
            (&menu).render(body, buf);
            &["[↑↓] Move", "[Enter] Open", "[Esc] Back", "[c] Change course", "[a] Quick quiz", "[q] Quit"]
        }
        DashboardView::Topics => {
            render_topics(browser, body, theme, buf);
            &["[↑↓] Move", "[Enter] Lesson plan", "[Esc] Back", "[c] Change course", "[a] Quick quiz", "[q] Quit"]
        }
        DashboardView::Lesson => {
            if let Some(plan) = browser.lesson() {
                render_lesson(plan, body, theme, buf);
            }
            &[
                "[←→] Step",
                "[Tab] Section",
                "[Space] Toggle",
                "[Enter] Answer",
                "[o] Open assessment",
                "[Esc] Back",
                "[q] Quit",
            ]
        }
    };
    render_hints(hints, layout.footer, theme, buf);
}

fn render_topics(browser: &DashboardBrowser, area: Rect, theme: &Theme, buf: &mut Buffer) {
    let colors = &theme.colors;
    let block = Block::bordered()
        .title(" Topics ")
        .border_style(Style::default().fg(colors.border()));
    let inner = block.inner(area);
    block.render(area, buf);

    let Some(chapter) = browser.selected_chapter() else {
        return;
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(chapter.topics.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
        .split(inner);

    for (i, topic) in chapter.topics.iter().enumerate() {
        let Some(row) = rows.get(i) else { break };
        let is_selected = i == browser.cursor.index;
        let indicator = if is_selected { ">" } else { " " };
        let title_style = if is_selected {
            Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.fg())
        };
        let line = Line::from(vec![
            Span::styled(format!(" {indicator} {}", topic.title), title_style),
            Span::styled(format!("  {}", topic.summary), Style::default().fg(colors.text_muted())),
        ]);
        Paragraph::new(line).render(Rect::new(row.x, row.y, row.width, 1), buf);
        if row.height > 1 {
            let bar = Rect::new(row.x + 3, row.y + 1, row.width.saturating_sub(6), 1);
            ProgressBar::inline("Progress", topic.progress_ratio(), theme).render(bar, buf);
        }
    }
}

fn section_header(plan: &LessonPlan, section: Section, theme: &Theme) -> Line<'static> {
    let colors = &theme.colors;
    let arrow = if plan.is_open(section) { "▾" } else { "▸" };
    let style = if plan.focus == section {
        Style::default()
            .fg(colors.accent())
            .bg(colors.selected_bg())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD)
    };
    Line::from(Span::styled(format!("{arrow} {}", section.title()), style))
}

fn render_lesson(plan: &LessonPlan, area: Rect, theme: &Theme, buf: &mut Buffer) {
    let colors = &theme.colors;
    let layout = LessonLayout::new(area);

    StepTracker {
        current_step: plan.current_step(),
        drag_position: plan.drag_position(),
        slider: layout.slider,
        focused: plan.focus == Section::Steps,
        theme,
    }
    .render(layout.tracker, buf);

    let muted = Style::default().fg(colors.text_muted());
    let mut lines = Vec::new();
    for section in [Section::Overview, Section::Objectives, Section::Steps, Section::Resources] {
        lines.push(section_header(plan, section, theme));
        if !plan.is_open(section) {
            continue;
        }
        match section {
            Section::Overview => lines.push(Line::from(Span::styled(format!("  {OVERVIEW}"), muted))),
            Section::Objectives => {
                for objective in OBJECTIVES {
                    lines.push(Line::from(Span::styled(format!("  • {objective}"), muted)));
                }
            }
            Section::Steps => {
                for (i, (name, detail)) in STEPS.iter().zip(STEP_DETAILS).enumerate() {
                    let current = i == plan.current_step();
                    let marker = if current { "▶" } else { " " };
                    let style = if current {
                        Style::default().fg(colors.accent())
                    } else {
                        muted
                    };
                    lines.push(Line::from(Span::styled(
                        format!("  {marker} {}. {name}: {detail}", i + 1),
                        style,
                    )));
                }
            }
            Section::Resources => {
                for resource in RESOURCES {
                    lines.push(Line::from(Span::styled(format!("  ↗ {resource}"), muted)));
                }
            }
            Section::Quiz => {}
        }
        lines.push(Line::from(""));
    }

    let block = Block::bordered()
        .title(format!(" {} ", plan.title))
        .border_style(Style::default().fg(colors.border()));
    Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .render(layout.sections, buf);

    if plan.is_open(Section::Quiz) {
        QuizCard::new(Section::Quiz.title(), plan.mini_quiz(), theme)
            .focused(plan.focus == Section::Quiz)
            .render(layout.quiz, buf);
    } else {
        let border = if plan.focus == Section::Quiz {
            colors.border_focused()
        } else {
            colors.border()
        };
        Paragraph::new(section_header(plan, Section::Quiz, theme))
            .block(Block::bordered().border_style(Style::default().fg(border)))
            .render(layout.quiz, buf);
    }
}
