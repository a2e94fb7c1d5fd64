use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const APP_DIR_NAME: &str = "grid-snake";
const LOG_FILE_NAME: &str = "grid-snake.log";
const DEFAULT_FILTER: &str = "grid_snake=info";

/// Returns the platform-correct log file path.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    let mut base = dirs::data_local_dir()?;
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    Some(base)
}

/// Installs a file-backed tracing subscriber.
///
/// Stdout belongs to the terminal UI, so events only ever go to a file. Returns
/// the path in use, or `None` when no file could be opened (logging stays off).
pub fn init(explicit: Option<&Path>) -> Option<PathBuf> {
    let path = explicit.map(Path::to_path_buf).or_else(default_log_path)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = File::create(&path).ok()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .ok()?;

    Some(path)
}
