//! Project archive API

use http::{Method, StatusCode};
use rd_api::MessageDocument;

use crate::errors::CliError;
use crate::http::gateway::{CallOptions, Gateway, APPLICATION_ZIP};

/// Server answer to a project import
#[derive(Debug)]
pub enum ImportOutcome {
    Imported,
    Rejected(MessageDocument),
}

impl Gateway<'_> {
    /// Download a project as a ZIP archive
    pub async fn export_project(&self, project: &str) -> Result<Vec<u8>, CliError> {
        let path = format!("project/{}/export", project);
        let response = self
            .call(Method::GET, &path, None, APPLICATION_ZIP, CallOptions::ALLOW_BAD_REQUEST)
            .await?;
        if response.status == StatusCode::BAD_REQUEST {
            return Err(CliError::InvalidProject(project.to_string()));
        }
        Ok(response.body)
    }

    /// Upload a project ZIP archive
    pub async fn import_project(&self, archive: Vec<u8>) -> Result<ImportOutcome, CliError> {
        let response = self
            .call(
                Method::PUT,
                "project/import",
                Some(archive),
                APPLICATION_ZIP,
                CallOptions::ALLOW_BAD_REQUEST,
            )
            .await?;
        if response.status == StatusCode::BAD_REQUEST {
            return Ok(ImportOutcome::Rejected(MessageDocument::parse(&response.body)?));
        }
        Ok(ImportOutcome::Imported)
    }
}
