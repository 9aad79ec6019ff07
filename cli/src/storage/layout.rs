//! Storage layout configuration

use std::path::PathBuf;

use crate::errors::CliError;
use crate::filesys::file::File;

/// Name of the session file inside the home directory
pub const SESSION_FILE_NAME: &str = ".rapiddeploy";

/// Storage layout for the client
#[derive(Debug, Clone)]
pub struct StorageLayout {
    /// Base directory for all storage
    pub base_dir: PathBuf,
}

impl StorageLayout {
    /// Create a new storage layout
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Layout rooted at the current user's home directory
    pub fn home() -> Result<Self, CliError> {
        dirs::home_dir()
            .map(Self::new)
            .ok_or_else(|| CliError::Config("unable to determine the home directory".to_string()))
    }

    /// Get the session file path
    pub fn session_file(&self) -> File {
        File::new(self.base_dir.join(SESSION_FILE_NAME))
    }
}
