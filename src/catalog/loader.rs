use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rust_embed::Embed;
use thiserror::Error;

use crate::catalog::schema::{Catalog, QuizQuestion};

#[derive(Embed)]
#[folder = "assets/catalog/"]
struct CatalogAssets;

const DEFAULT_CATALOG: &str = "default.toml";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported catalog format for {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),
    #[error("bundled catalog {0} is missing")]
    MissingAsset(&'static str),
    #[error("catalog has no courses")]
    NoCourses,
    #[error("catalog has no learning paths")]
    NoPaths,
    #[error("duplicate course key {0:?}")]
    DuplicateCourse(String),
    #[error("course {course:?} has duplicate chapter key {chapter:?}")]
    DuplicateChapter { course: String, chapter: String },
    #[error("chapter {chapter:?} in course {course:?} has duplicate topic id {topic:?}")]
    DuplicateTopic {
        course: String,
        chapter: String,
        topic: String,
    },
    #[error("{set} has no questions")]
    EmptyQuestionSet { set: String },
    #[error("{set} question {index} has no options")]
    NoOptions { set: String, index: usize },
    #[error("{set} question {index} marks option {answer} correct but has {options} options")]
    AnswerOutOfRange {
        set: String,
        index: usize,
        answer: usize,
        options: usize,
    },
}

/// Load the catalog bundled into the binary.
pub fn load_embedded() -> Result<Catalog, CatalogError> {
    let file = CatalogAssets::get(DEFAULT_CATALOG).ok_or(CatalogError::MissingAsset(DEFAULT_CATALOG))?;
    let content = String::from_utf8_lossy(file.data.as_ref());
    let catalog = parse_toml(&content)?;
    tracing::info!(source = "embedded", courses = catalog.courses.len(), "catalog loaded");
    Ok(catalog)
}

/// Load a catalog file; the format follows the file extension.
pub fn load_file(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => parse_toml(&content)?,
        Some("json") => parse_json(&content)?,
        _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
    };
    tracing::info!(source = %path.display(), courses = catalog.courses.len(), "catalog loaded");
    Ok(catalog)
}

pub fn parse_toml(content: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = toml::from_str(content)?;
    normalize(catalog)
}

pub fn parse_json(content: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = serde_json::from_str(content)?;
    normalize(catalog)
}

fn normalize(mut catalog: Catalog) -> Result<Catalog, CatalogError> {
    for course in &mut catalog.courses {
        for chapter in &mut course.chapters {
            for topic in &mut chapter.topics {
                topic.progress = topic.progress.min(100);
            }
        }
    }
    for path in &mut catalog.paths {
        path.percent = path.percent.min(100);
    }
    validate(&catalog)?;
    Ok(catalog)
}

fn validate(catalog: &Catalog) -> Result<(), CatalogError> {
    if catalog.courses.is_empty() {
        return Err(CatalogError::NoCourses);
    }
    if catalog.paths.is_empty() {
        return Err(CatalogError::NoPaths);
    }

    let mut seen = HashSet::new();
    for course in &catalog.courses {
        if !seen.insert(course.key.as_str()) {
            return Err(CatalogError::DuplicateCourse(course.key.clone()));
        }
        let mut chapters = HashSet::new();
        for chapter in &course.chapters {
            if !chapters.insert(chapter.key.as_str()) {
                return Err(CatalogError::DuplicateChapter {
                    course: course.key.clone(),
                    chapter: chapter.key.clone(),
                });
            }
            let mut topics = HashSet::new();
            for topic in &chapter.topics {
                if !topics.insert(topic.id.as_str()) {
                    return Err(CatalogError::DuplicateTopic {
                        course: course.key.clone(),
                        chapter: chapter.key.clone(),
                        topic: topic.id.clone(),
                    });
                }
            }
        }
    }

    validate_questions("default_assessment", &catalog.default_assessment)?;
    validate_questions("mini_quiz", &catalog.mini_quiz)?;
    // Sorted so the reported error does not depend on map order.
    let mut keys: Vec<&String> = catalog.assessments.keys().collect();
    keys.sort();
    for key in keys {
        validate_questions(&format!("assessments.{key}"), &catalog.assessments[key])?;
    }
    Ok(())
}

fn validate_questions(set: &str, questions: &[QuizQuestion]) -> Result<(), CatalogError> {
    if questions.is_empty() {
        return Err(CatalogError::EmptyQuestionSet {
            set: set.to_string(),
        });
    }
    for (index, q) in questions.iter().enumerate() {
        if q.options.is_empty() {
            return Err(CatalogError::NoOptions {
                set: set.to_string(),
                index,
            });
        }
        if q.answer >= q.options.len() {
            return Err(CatalogError::AnswerOutOfRange {
                set: set.to_string(),
                index,
                answer: q.answer,
                options: q.options.len(),
            });
        }
    }
    Ok(())
}
