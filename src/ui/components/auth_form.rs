use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::auth::{AuthField, AuthForm, AuthMode};
use crate::ui::theme::Theme;

pub struct AuthFormView<'a> {
    pub form: &'a AuthForm,
    pub theme: &'a Theme,
}

impl<'a> AuthFormView<'a> {
    pub fn new(form: &'a AuthForm, theme: &'a Theme) -> Self {
        Self { form, theme }
    }

    fn field(&self, label: &str, value: String, field: AuthField, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let focused = self.form.focus == Some(field);
        let border = if focused { colors.border_focused() } else { colors.border() };
        let block = Block::bordered()
            .title(format!(" {label} "))
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = vec![Span::styled(value, Style::default().fg(colors.fg()))];
        if focused {
            spans.push(Span::styled("█", Style::default().fg(colors.accent())));
        }
        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}

impl Widget for AuthFormView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let (title, cta, switch) = match self.form.mode {
            AuthMode::SignIn => ("Sign in", "Sign in", "New here? [m] Create an account"),
            AuthMode::SignUp => ("Create account", "Create account", "Have an account? [m] Sign in"),
        };

        let block = Block::bordered()
            .title(format!(" {title} "))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            "Learn smarter with interactive roadmaps",
            Style::default().fg(colors.text_muted()),
        )))
        .render(rows[0], buf);

        self.field("Email", self.form.email.clone(), AuthField::Email, rows[1], buf);
        self.field(
            "Password",
            self.form.masked_password(),
            AuthField::Password,
            rows[2],
            buf,
        );

        if let Some(error) = self.form.error {
            Paragraph::new(Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(colors.error()),
            )))
            .render(rows[3], buf);
        }

        let actions_focused = !self.form.is_editing();
        let action_style = if actions_focused {
            Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.text_muted())
        };
        let lines = vec![
            Line::from(Span::styled(format!("[Enter] {cta}"), action_style)),
            Line::from(Span::styled("[g] Continue with Google", action_style)),
            Line::from(Span::styled("[e] Explore courses", action_style)),
            Line::from(Span::styled(switch, Style::default().fg(colors.text_muted()))),
        ];
        Paragraph::new(lines).render(rows[4], buf);
    }
}
