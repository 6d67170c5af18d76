//! Logging setup.
//!
//! The TUI owns the terminal, so logs go to a file. The filter comes from
//! `LOANA_LOG` (standard `EnvFilter` syntax) and defaults to `loana=info`.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "LOANA_LOG";

const DEFAULT_FILTER: &str = "loana=info";

/// Returns the default log file.
///
/// On Linux: ~/.local/share/loana/loana.log
pub fn default_log_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("loana")
        .join("loana.log")
}

/// Build the filter from the environment, falling back to the default.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn open_log(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber writing to `path`.
///
/// Returns the file in use. Fails if the file cannot be opened or a
/// subscriber is already installed; callers carry on without logging.
pub fn init(path: Option<&Path>) -> Result<PathBuf, String> {
    let path = path.map_or_else(default_log_file, Path::to_path_buf);
    let file = open_log(&path).map_err(|e| format!("{}: {}", path.display(), e))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| e.to_string())?;

    Ok(path)
}
