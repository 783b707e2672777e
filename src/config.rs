use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::session::timer::DEFAULT_QUESTION_SECS;

/// Smallest per-question limit a config file may request.
pub const MIN_QUESTION_SECS: u32 = 5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_question_seconds")]
    pub question_seconds: u32,
    #[serde(default = "default_score_assessment")]
    pub score_assessment: bool,
    #[serde(default = "default_shuffle_questions")]
    pub shuffle_questions: bool,
    #[serde(default)]
    pub catalog_path: Option<String>,
}

fn default_theme() -> String {
    "dark".to_string()
}
fn default_question_seconds() -> u32 {
    DEFAULT_QUESTION_SECS
}
fn default_score_assessment() -> bool {
    false
}
fn default_shuffle_questions() -> bool {
    false
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            question_seconds: default_question_seconds(),
            score_assessment: default_score_assessment(),
            shuffle_questions: default_shuffle_questions(),
            catalog_path: None,
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eduplanner")
            .join("config.toml")
    }

    /// Clamp values a hand-edited file might get wrong.
    pub fn normalize(&mut self) {
        if self.question_seconds < MIN_QUESTION_SECS {
            self.question_seconds = MIN_QUESTION_SECS;
        }
        if self.theme.trim().is_empty() {
            self.theme = default_theme();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.question_seconds, 60);
        assert_eq!(config.theme, "dark");
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_config_serde_partial_fields() {
        let toml_str = r#"
theme = "light"
score_assessment = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "light");
        assert!(config.score_assessment);
        assert!(!config.shuffle_questions);
        assert_eq!(config.question_seconds, 60);
    }

    #[test]
    fn test_normalize_clamps_question_seconds() {
        let mut config = Config {
            question_seconds: 1,
            theme: "  ".into(),
            ..Config::default()
        };
        config.normalize();
        assert_eq!(config.question_seconds, MIN_QUESTION_SECS);
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            theme: "light".into(),
            question_seconds: 30,
            catalog_path: Some("/tmp/catalog.json".into()),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "question_seconds = \"soon\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
