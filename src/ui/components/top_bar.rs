use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

/// Heading strip: bold title, muted subtitle, theme name on the right.
pub struct TopBar<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub theme: &'a Theme,
}

impl<'a> TopBar<'a> {
    pub fn new(title: &'a str, subtitle: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            subtitle,
            theme,
        }
    }
}

impl Widget for TopBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(Line::from(Span::styled(
                format!(" {} ", self.theme.name),
                Style::default().fg(colors.text_muted()),
            )).right_aligned())
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.header_bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let line = Line::from(vec![
            Span::styled(
                format!(" {}", self.title),
                Style::default()
                    .fg(colors.header_fg())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", self.subtitle),
                Style::default().fg(colors.text_muted()),
            ),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}
