//! Application configuration options

use std::path::PathBuf;
use std::time::Duration;

use crate::http::client::DEFAULT_TIMEOUT;
use crate::output::OutputFormat;

/// Main application options
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Session file, `~/.rapiddeploy` when unset
    pub session_file: Option<PathBuf>,

    /// Timeout of authenticated calls
    pub timeout: Duration,

    /// Rendering of listing commands
    pub output: OutputFormat,

    /// Directory downloads are written to
    pub work_dir: PathBuf,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            session_file: None,
            timeout: DEFAULT_TIMEOUT,
            output: OutputFormat::Table,
            work_dir: PathBuf::from("."),
        }
    }
}
