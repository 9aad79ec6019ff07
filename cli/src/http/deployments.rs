//! Deployment API: job triggers, job status and logs

use http::Method;
use rd_api::MessageDocument;

use crate::deploy::request::DeployRequest;
use crate::errors::CliError;
use crate::http::gateway::{CallOptions, Gateway, TEXT_XML};

impl Gateway<'_> {
    /// Trigger a deployment. Rejections come back as a 400 whose message
    /// list explains the problem.
    pub async fn trigger_deployment(
        &self,
        request: &DeployRequest,
    ) -> Result<MessageDocument, CliError> {
        let response = self
            .call(
                Method::PUT,
                &request.path(),
                None,
                TEXT_XML,
                CallOptions::ALLOW_BAD_REQUEST,
            )
            .await?;
        Ok(MessageDocument::parse(&response.body)?)
    }

    /// Current report for a deployment job
    pub async fn job_report(&self, job_id: &str) -> Result<MessageDocument, CliError> {
        let path = format!("deployment/display/job/{}", job_id);
        let response = self.get_xml(&path, CallOptions::default()).await?;
        Ok(MessageDocument::parse(&response.body)?)
    }

    /// Raw log of a deployment job
    pub async fn job_log(&self, job_id: &str) -> Result<Vec<u8>, CliError> {
        let path = format!("deployment/showlog/job/{}", job_id);
        let response = self.get_xml(&path, CallOptions::default()).await?;
        Ok(response.body)
    }

    pub async fn run_job_plan(&self, plan_id: u64) -> Result<MessageDocument, CliError> {
        let path = format!("deployment/jobPlan/run/{}", plan_id);
        let response = self
            .call(Method::PUT, &path, None, TEXT_XML, CallOptions::ALLOW_BAD_REQUEST)
            .await?;
        Ok(MessageDocument::parse(&response.body)?)
    }
}
