use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

pub struct ProgressBar<'a> {
    pub label: String,
    pub ratio: f64,
    pub bordered: bool,
    pub theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(label: &str, ratio: f64, theme: &'a Theme) -> Self {
        Self {
            label: label.to_string(),
            ratio: if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) },
            bordered: true,
            theme,
        }
    }

    /// Single-row variant without a frame, for dense lists.
    pub fn inline(label: &str, ratio: f64, theme: &'a Theme) -> Self {
        Self {
            bordered: false,
            ..Self::new(label, ratio, theme)
        }
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let inner = if self.bordered {
            let block = Block::bordered()
                .title(format!(" {} ", self.label))
                .border_style(Style::default().fg(colors.border()));
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled_width = (self.ratio * inner.width as f64) as u16;
        let label = if self.bordered {
            format!("{:.0}%", self.ratio * 100.0)
        } else {
            format!("{} {:.0}%", self.label, self.ratio * 100.0)
        };

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label_width = label.chars().count() as u16;
        let label_x = inner.x + (inner.width.saturating_sub(label_width)) / 2;
        buf.set_stringn(
            label_x,
            inner.y,
            &label,
            inner.width as usize,
            Style::default().fg(colors.fg()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_is_clamped() {
        let theme = Theme::default();
        assert_eq!(ProgressBar::new("x", 1.7, &theme).ratio, 1.0);
        assert_eq!(ProgressBar::new("x", -0.2, &theme).ratio, 0.0);
        assert_eq!(ProgressBar::new("x", f64::NAN, &theme).ratio, 0.0);
    }

    #[test]
    fn test_fill_width_follows_ratio() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        ProgressBar::inline("", 0.5, &theme).render(area, &mut buf);
        let filled = theme.colors.bar_filled();
        let count = (0..10).filter(|x| buf[(*x, 0)].bg == filled).count();
        assert_eq!(count, 5);
    }
}
