use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Environment variable that overrides the configured log level.
pub const LOG_ENV: &str = "TYPELINE_LOG";

/// Pick the filter directives: the environment wins over the configured level,
/// and anything unparsable falls back to `info`.
pub fn build_filter(env_directives: Option<&str>, level: &str) -> EnvFilter {
    env_directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Initialize the global tracing subscriber, appending to `path`.
///
/// The terminal is in raw mode on the alternate screen while the app runs, so
/// nothing may be written to stdout or stderr.
pub fn setup_logging(path: &Path, level: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let env = std::env::var(LOG_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(build_filter(env.as_deref(), level))
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
