use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::quiz::{QuizSession, Scoring};
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

/// Multiple-choice card used by both the assessment and the lesson mini-quiz.
pub struct QuizCard<'a> {
    pub title: &'a str,
    pub quiz: &'a QuizSession,
    pub focused: bool,
    pub theme: &'a Theme,
}

impl<'a> QuizCard<'a> {
    pub fn new(title: &'a str, quiz: &'a QuizSession, theme: &'a Theme) -> Self {
        Self {
            title,
            quiz,
            focused: true,
            theme,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn header_line(&self) -> Line<'static> {
        let colors = &self.theme.colors;
        let total = self.quiz.total();
        let mut spans = Vec::new();
        if let Some(idx) = self.quiz.current_index() {
            spans.push(Span::styled(
                format!("Question {} of {}", idx + 1, total),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            ));
        }
        if let Some(secs) = self.quiz.seconds_remaining() {
            let color = if secs <= 10 { colors.warning() } else { colors.text_muted() };
            spans.push(Span::styled(format!("   {secs}s left"), Style::default().fg(color)));
        }
        if self.quiz.scoring() == Scoring::Scored {
            if let Some(score) = self.quiz.score() {
                spans.push(Span::styled(
                    format!("   Score: {score}"),
                    Style::default().fg(colors.accent_alt()),
                ));
            }
        }
        Line::from(spans)
    }

    fn finished_lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let mut lines = vec![Line::from(Span::styled(
            "Finished!",
            Style::default().fg(colors.success()).add_modifier(Modifier::BOLD),
        ))];
        if let Some(score) = self.quiz.score() {
            lines.push(Line::from(Span::styled(
                format!("Score: {score} / {}", self.quiz.total()),
                Style::default().fg(colors.fg()),
            )));
        }
        lines
    }
}

impl Widget for QuizCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let border = if self.focused { colors.border_focused() } else { colors.border() };
        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(question) = self.quiz.current_question() else {
            Paragraph::new(self.finished_lines()).render(inner, buf);
            return;
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        Paragraph::new(self.header_line()).render(rows[0], buf);
        ProgressBar::inline("", self.quiz.progress(), self.theme).render(rows[1], buf);

        let mut lines = vec![
            Line::from(Span::styled(
                question.prompt.clone(),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (i, option) in question.options.iter().enumerate() {
            let is_selected = self.quiz.selected() == Some(i);
            let marker = if is_selected { "(•)" } else { "( )" };
            let style = if is_selected {
                Style::default()
                    .fg(colors.accent())
                    .bg(colors.selected_bg())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            lines.push(Line::from(Span::styled(format!(" {marker} {}. {option}", i + 1), style)));
        }
        lines.push(Line::from(""));
        let action = if self.quiz.is_last_question() { "Finish" } else { "Next" };
        lines.push(Line::from(Span::styled(
            format!(" [Enter] {action} "),
            Style::default().fg(colors.bg()).bg(colors.accent()),
        )));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(rows[3], buf);
    }
}
