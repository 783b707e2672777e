use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen skeleton shared by every view: heading bar, body, key hints.
pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(2),
            ])
            .split(area);

        Self {
            header: vertical[0],
            main: vertical[1],
            footer: vertical[2],
        }
    }
}

/// Regions of the lesson view. Rendering and mouse hit-testing both use this
/// so a click lands on the slider that was drawn.
pub struct LessonLayout {
    pub tracker: Rect,
    pub slider: Rect,
    pub sections: Rect,
    pub quiz: Rect,
}

impl LessonLayout {
    pub fn new(main: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(main);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(vertical[1]);

        let tracker = vertical[0];
        // Inside the border, second row, with one column of padding each side.
        let slider = Rect::new(
            tracker.x.saturating_add(2),
            tracker.y.saturating_add(2),
            tracker.width.saturating_sub(4),
            if tracker.height >= 4 { 1 } else { 0 },
        );

        Self {
            tracker,
            slider,
            sections: body[0],
            quiz: body[1],
        }
    }

    /// Whether a pointer at (`column`, `row`) is over the slider track.
    pub fn hits_slider(&self, column: u16, row: u16) -> bool {
        self.slider.width > 0
            && row == self.slider.y
            && column >= self.slider.x
            && column < self.slider.x + self.slider.width
    }
}

/// Convert a terminal column into a slider position in `[0, 100]`.
pub fn slider_position(slider: Rect, column: u16) -> f64 {
    if slider.width <= 1 {
        return 0.0;
    }
    let offset = column.saturating_sub(slider.x).min(slider.width - 1);
    offset as f64 / (slider.width - 1) as f64 * 100.0
}

/// Column where the slider handle sits for `position`.
pub fn slider_column(slider: Rect, position: f64) -> u16 {
    if slider.width <= 1 {
        return slider.x;
    }
    let ratio = (position / 100.0).clamp(0.0, 1.0);
    slider.x + (ratio * (slider.width - 1) as f64).round() as u16
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = "  ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_WIDTH: u16 = 48;
    const MIN_HEIGHT: u16 = 14;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_hint_lines_wraps() {
        let lines = pack_hint_lines(&["[q] Quit", "[t] Theme", "[Enter] Select"], 22);
        assert_eq!(lines, vec!["  [q] Quit  [t] Theme", "  [Enter] Select"]);
    }

    #[test]
    fn test_pack_hint_lines_empty() {
        assert!(pack_hint_lines(&[], 80).is_empty());
        assert!(pack_hint_lines(&["x"], 0).is_empty());
    }

    #[test]
    fn test_centered_rect_stays_inside() {
        let area = Rect::new(0, 0, 40, 10);
        let r = centered_rect(50, 50, area);
        assert_eq!(r, area);
        let big = Rect::new(0, 0, 200, 60);
        let r = centered_rect(50, 50, big);
        assert_eq!((r.x, r.y, r.width, r.height), (50, 15, 100, 30));
    }

    #[test]
    fn test_slider_maps_edges() {
        let slider = Rect::new(10, 5, 101, 1);
        assert_eq!(slider_position(slider, 10), 0.0);
        assert_eq!(slider_position(slider, 60), 50.0);
        assert_eq!(slider_position(slider, 110), 100.0);
        assert_eq!(slider_position(slider, 0), 0.0);
        assert_eq!(slider_position(slider, 500), 100.0);
    }

    #[test]
    fn test_slider_column_inverts_position() {
        let slider = Rect::new(2, 0, 51, 1);
        for column in [2u16, 20, 27, 52] {
            let pos = slider_position(slider, column);
            assert_eq!(slider_column(slider, pos), column);
        }
    }

    #[test]
    fn test_lesson_layout_slider_inside_tracker() {
        let layout = LessonLayout::new(Rect::new(0, 3, 80, 20));
        assert_eq!(layout.tracker.height, 4);
        assert_eq!(layout.slider.y, 5);
        assert!(layout.hits_slider(2, 5));
        assert!(!layout.hits_slider(1, 5));
        assert!(!layout.hits_slider(40, 6));
    }
}
