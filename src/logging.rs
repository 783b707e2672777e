use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive, e.g. `eduplanner=debug`.
pub const LOG_ENV: &str = "EDUPLANNER_LOG";

pub fn default_log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("eduplanner")
        .join("eduplanner.log")
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. The terminal belongs to the UI, so events go
/// to a file; if it cannot be opened, logging stays off. Returns the path in use.
pub fn init(path: Option<PathBuf>) -> Option<PathBuf> {
    let path = path.unwrap_or_else(default_log_path);
    let file = match open_log_file(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("eduplanner: logging disabled, cannot open {}: {err}", path.display());
            return None;
        }
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok();

    installed.then_some(path)
}
