//! Inventory API: projects, servers, installations, targets and job plans

use rd_api::{Installation, JobPlan, MessageDocument, Project, Server};

use crate::errors::CliError;
use http::Method;

use crate::http::client::HttpResponse;
use crate::http::gateway::{CallOptions, Gateway};

impl Gateway<'_> {
    /// Cheap authenticated call used to check a session
    pub async fn probe(&self, content_type: &str) -> Result<HttpResponse, CliError> {
        self.call(Method::GET, "group/list", None, content_type, CallOptions::default())
            .await
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, CliError> {
        let response = self.get_xml("project/list", CallOptions::default()).await?;
        Ok(Project::parse_list(&response.body)?)
    }

    pub async fn list_servers(&self) -> Result<Vec<Server>, CliError> {
        let response = self.get_xml("server/list", CallOptions::default()).await?;
        Ok(Server::parse_list(&response.body)?)
    }

    pub async fn list_installations(&self, server: &str) -> Result<Vec<Installation>, CliError> {
        let path = format!("environment/{}/list", server);
        let response = self.get_xml(&path, CallOptions::default()).await?;
        Ok(Installation::parse_list(&response.body)?)
    }

    /// Deployment targets of a project. An unknown project answers 400 with
    /// the reason in the message list, so both come back as a document.
    pub async fn list_targets(&self, project: &str) -> Result<MessageDocument, CliError> {
        let path = format!("project/{}/list", project);
        let response = self.get_xml(&path, CallOptions::ALLOW_BAD_REQUEST).await?;
        Ok(MessageDocument::parse(&response.body)?)
    }

    pub async fn list_job_plans(&self) -> Result<Vec<JobPlan>, CliError> {
        let response = self
            .get_xml("deployment/jobPlan/list", CallOptions::default())
            .await?;
        Ok(JobPlan::parse_list(&response.body)?)
    }
}
