use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::navigator::{AssessmentSettings, Navigator, Screen};
use crate::session::quiz::Scoring;
use crate::ui::theme::Theme;

pub struct App {
    pub navigator: Navigator,
    pub theme: Theme,
    pub config: Config,
    /// Where theme changes are persisted. `None` keeps them in memory.
    pub config_path: Option<PathBuf>,
    /// Left button went down on the lesson slider and has not been released.
    pub slider_drag: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(catalog: Arc<Catalog>, config: Config, config_path: Option<PathBuf>) -> Self {
        let theme = Theme::load(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "unknown theme, using default");
            Theme::default()
        });
        let settings = AssessmentSettings {
            question_seconds: config.question_seconds,
            scoring: if config.score_assessment {
                Scoring::Scored
            } else {
                Scoring::Unscored
            },
            shuffle: config.shuffle_questions,
        };
        Self {
            navigator: Navigator::new(catalog, settings),
            theme,
            config,
            config_path,
            slider_drag: false,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.navigator.screen()
    }

    pub fn tick(&mut self, now: Instant) {
        self.navigator.tick(now);
    }

    pub fn quit(&mut self) {
        tracing::info!(screen = self.screen().as_str(), "quit requested");
        self.should_quit = true;
    }

    /// Swap between the light and dark palettes and remember the choice.
    pub fn toggle_theme(&mut self) {
        let next = self.theme.toggled_name();
        let Some(theme) = Theme::load(next) else {
            tracing::warn!(theme = next, "theme not found");
            return;
        };
        self.theme = theme;
        self.config.theme = next.to_string();
        tracing::debug!(theme = next, "theme toggled");
        if let Some(path) = &self.config_path {
            // Re-read so command-line overrides are not written back.
            let saved = Config::load_from(path).and_then(|mut on_disk| {
                on_disk.theme = next.to_string();
                on_disk.save_to(path)
            });
            if let Err(err) = saved {
                tracing::warn!(path = %path.display(), %err, "could not save config");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::loader;

    fn app(config: Config, path: Option<PathBuf>) -> App {
        App::new(Arc::new(loader::load_embedded().unwrap()), config, path)
    }

    #[test]
    fn test_new_app_starts_at_auth() {
        let app = app(Config::default(), None);
        assert_eq!(app.screen(), Screen::Auth);
        assert_eq!(app.theme.name, "dark");
        assert!(!app.should_quit);
    }

    #[test]
    fn test_config_drives_assessment_settings() {
        let config = Config {
            question_seconds: 15,
            score_assessment: true,
            ..Config::default()
        };
        let app = app(config, None);
        let settings = app.navigator.settings();
        assert_eq!(settings.question_seconds, 15);
        assert_eq!(settings.scoring, Scoring::Scored);
    }

    #[test]
    fn test_toggle_theme_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut app = app(Config::default(), Some(path.clone()));
        app.toggle_theme();
        assert_eq!(app.theme.name, "light");
        assert_eq!(Config::load_from(&path).unwrap().theme, "light");
        app.toggle_theme();
        assert_eq!(app.theme.name, "dark");
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config = Config {
            theme: "neon".into(),
            ..Config::default()
        };
        assert_eq!(app(config, None).theme.name, "dark");
    }
}
