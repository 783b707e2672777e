use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub summary: String,
    /// Percentage 0-100, clamped on load.
    #[serde(default)]
    pub progress: u8,
}

impl Topic {
    pub fn progress_ratio(&self) -> f64 {
        f64::from(self.progress.min(100)) / 100.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub key: String,
    pub title: String,
    #[serde(alias = "desc")]
    pub description: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub key: String,
    pub title: String,
    #[serde(alias = "desc")]
    pub description: String,
    #[serde(default)]
    pub blurb: String,
    #[serde(default = "default_accent")]
    pub accent: [String; 2],
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

fn default_accent() -> [String; 2] {
    ["#4C9AFF".to_string(), "#8B5CF6".to_string()]
}

impl Course {
    pub fn chapter(&self, key: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.key == key)
    }

    /// Dashboard blurb, falling back to the short description.
    pub fn blurb_or_description(&self) -> &str {
        if self.blurb.is_empty() {
            &self.description
        } else {
            &self.blurb
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPath {
    pub level: String,
    pub description: String,
    #[serde(default)]
    pub percent: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct choice.
    pub answer: usize,
}

impl QuizQuestion {
    pub fn is_correct(&self, choice: Option<usize>) -> bool {
        choice == Some(self.answer)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub courses: Vec<Course>,
    pub paths: Vec<LearningPath>,
    #[serde(default)]
    pub default_assessment: Vec<QuizQuestion>,
    /// Course-specific assessments keyed by course key.
    #[serde(default)]
    pub assessments: HashMap<String, Vec<QuizQuestion>>,
    #[serde(default)]
    pub mini_quiz: Vec<QuizQuestion>,
}

impl Catalog {
    pub fn course(&self, key: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.key == key)
    }

    pub fn path(&self, level: &str) -> Option<&LearningPath> {
        self.paths.iter().find(|p| p.level == level)
    }

    /// Question set for a course's assessment, falling back to the default set.
    pub fn assessment_for(&self, course_key: Option<&str>) -> &[QuizQuestion] {
        course_key
            .and_then(|key| self.assessments.get(key))
            .filter(|qs| !qs.is_empty())
            .map(Vec::as_slice)
            .unwrap_or(&self.default_assessment)
    }
}
