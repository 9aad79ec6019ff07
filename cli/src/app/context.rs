//! Per-invocation state handed to every command

use std::path::{Path, PathBuf};

use crate::app::options::AppOptions;
use crate::errors::CliError;
use crate::filesys::file::File;
use crate::http::client::HttpClient;
use crate::output::OutputFormat;
use crate::storage::layout::StorageLayout;
use crate::storage::session::{Session, SessionStore};

/// Session store, HTTP client and output settings for one invocation
#[derive(Debug, Clone)]
pub struct AppContext {
    pub store: SessionStore,
    pub http: HttpClient,
    pub output: OutputFormat,
    pub work_dir: PathBuf,
}

impl AppContext {
    pub fn new(
        store: SessionStore,
        http: HttpClient,
        output: OutputFormat,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            http,
            output,
            work_dir: work_dir.into(),
        }
    }

    pub fn from_options(options: AppOptions) -> Result<Self, CliError> {
        let file = match options.session_file {
            Some(path) => File::new(path),
            None => StorageLayout::home()?.session_file(),
        };
        let work_dir = std::path::absolute(&options.work_dir)?;
        Ok(Self::new(
            SessionStore::new(file),
            HttpClient::new(options.timeout)?,
            options.output,
            work_dir,
        ))
    }

    /// Session persisted by the last login
    pub async fn load_session(&self) -> Result<Session, CliError> {
        self.store.load().await
    }

    /// Path of `name` inside the working directory
    pub fn work_path(&self, name: impl AsRef<Path>) -> PathBuf {
        self.work_dir.join(name)
    }
}
