use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::session::lesson::{STEPS, position_for_step};
use crate::ui::layout::slider_column;
use crate::ui::theme::Theme;

/// Progress timeline: step names on the first row, the draggable track on
/// the second. `slider` must be the rect from `LessonLayout`.
pub struct StepTracker<'a> {
    pub current_step: usize,
    pub drag_position: f64,
    pub slider: Rect,
    pub focused: bool,
    pub theme: &'a Theme,
}

impl Widget for StepTracker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let border = if self.focused { colors.border_focused() } else { colors.border() };
        let block = Block::bordered()
            .title(" Progress Timeline ")
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 2 || self.slider.width == 0 {
            return;
        }

        let labels_y = inner.y;
        for (i, name) in STEPS.iter().enumerate() {
            let column = slider_column(self.slider, position_for_step(i, STEPS.len()));
            let width = name.chars().count() as u16;
            // First label starts at its tick, last ends at it, others centre.
            let x = if i == 0 {
                column
            } else if i == STEPS.len() - 1 {
                column.saturating_sub(width.saturating_sub(1))
            } else {
                column.saturating_sub(width / 2)
            };
            let style = if i == self.current_step {
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD)
            } else if i < self.current_step {
                Style::default().fg(colors.success())
            } else {
                Style::default().fg(colors.text_muted())
            };
            let max = (inner.x + inner.width).saturating_sub(x) as usize;
            buf.set_stringn(x, labels_y, *name, max, style);
        }

        let handle = slider_column(self.slider, self.drag_position);
        for x in self.slider.x..self.slider.x + self.slider.width {
            let (symbol, color) = if x == handle {
                ("●", colors.accent())
            } else if x < handle {
                ("━", colors.bar_filled())
            } else {
                ("─", colors.bar_empty())
            };
            buf[(x, self.slider.y)]
                .set_symbol(symbol)
                .set_style(Style::default().fg(color));
        }
    }
}
