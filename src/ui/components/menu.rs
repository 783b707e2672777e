use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

pub struct MenuItem {
    pub key: String,
    pub label: String,
    pub description: String,
    /// Optional completion shown as a percentage after the label.
    pub progress: Option<u8>,
}

impl MenuItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: description.into(),
            progress: None,
        }
    }

    pub fn with_progress(mut self, percent: u8) -> Self {
        self.progress = Some(percent.min(100));
        self
    }
}

/// Bordered list of two-line entries with one highlighted row.
pub struct Menu<'a> {
    pub title: &'a str,
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(title: &'a str, items: Vec<MenuItem>, selected: usize, theme: &'a Theme) -> Self {
        Self {
            title,
            items,
            selected,
            theme,
        }
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.items
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(inner);

        for (i, item) in self.items.iter().enumerate() {
            let Some(row) = rows.get(i) else { break };
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let mut label_spans = vec![Span::styled(
                format!(" {indicator} [{key}] {label}", key = item.key, label = item.label),
                Style::default()
                    .fg(if is_selected { colors.accent() } else { colors.fg() })
                    .add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
            )];
            if let Some(percent) = item.progress {
                label_spans.push(Span::styled(
                    format!("  {percent}%"),
                    Style::default().fg(colors.accent_alt()),
                ));
            }

            let lines = vec![
                Line::from(label_spans),
                Line::from(Span::styled(
                    format!("     {}", item.description),
                    Style::default().fg(colors.text_muted()),
                )),
            ];

            let style = if is_selected {
                Style::default().bg(colors.selected_bg())
            } else {
                Style::default()
            };
            Paragraph::new(lines).style(style).render(*row, buf);
        }
    }
}
