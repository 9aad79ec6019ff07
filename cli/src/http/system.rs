//! System information API

use http::Method;

use crate::errors::CliError;
use crate::http::gateway::{CallOptions, Gateway, APPLICATION_ZIP};

impl Gateway<'_> {
    pub async fn system_general_info(&self) -> Result<Vec<u8>, CliError> {
        self.fetch("system/general-info").await
    }

    /// Server `rapiddeploy.properties`
    pub async fn system_configuration(&self) -> Result<Vec<u8>, CliError> {
        self.fetch("system/configuration").await
    }

    /// ZIP archive of the server application logs
    pub async fn system_application_logs(&self) -> Result<Vec<u8>, CliError> {
        let response = self
            .call(
                Method::GET,
                "system/application-logs",
                None,
                APPLICATION_ZIP,
                CallOptions::default(),
            )
            .await?;
        Ok(response.body)
    }

    async fn fetch(&self, path: &str) -> Result<Vec<u8>, CliError> {
        let response = self.get_xml(path, CallOptions::default()).await?;
        Ok(response.body)
    }
}
