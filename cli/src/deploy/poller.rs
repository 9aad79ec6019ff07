//! Synchronous deployment: poll a job until it reaches a terminal status

use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use rd_api::MessageDocument;
use tracing::{debug, warn};

use crate::deploy::status::JobStatus;
use crate::errors::CliError;
use crate::filesys::file::File;
use crate::http::gateway::Gateway;
use crate::output::render_messages;

pub const JOB_STATUS_LABEL: &str = "Job Status";
pub const JOB_ID_LABEL: &str = "Job ID";
pub const FILE_PATH_LABEL: &str = "File Path";

/// Job reports and logs as seen by the poller
#[async_trait]
pub trait DeploymentApi: Send + Sync {
    async fn job_report(&self, job_id: &str) -> Result<MessageDocument, CliError>;

    async fn job_log(&self, job_id: &str) -> Result<Vec<u8>, CliError>;
}

#[async_trait]
impl<'a> DeploymentApi for Gateway<'a> {
    async fn job_report(&self, job_id: &str) -> Result<MessageDocument, CliError> {
        Gateway::job_report(self, job_id).await
    }

    async fn job_log(&self, job_id: &str) -> Result<Vec<u8>, CliError> {
        Gateway::job_log(self, job_id).await
    }
}

/// Poller options
#[derive(Debug, Clone, Default)]
pub struct PollOptions {
    /// Download the job log once the job is finished
    pub fetch_log: bool,

    /// Directory the log is written to
    pub log_dir: PathBuf,
}

/// How the polling ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOutcome {
    pub status: JobStatus,
    pub polls: usize,
    pub log_file: Option<PathBuf>,
}

impl PollOutcome {
    pub fn succeeded(&self) -> bool {
        !self.status.is_failure()
    }
}

/// Poll `job_id` until its status is terminal.
///
/// The first poll is immediate; each following one waits for the delay the
/// previous status asks for. Gateway failures end the loop right away.
pub async fn poll_until_finished<A, S, F>(
    api: &A,
    job_id: &str,
    project: &str,
    options: &PollOptions,
    out: &mut dyn Write,
    sleep_fn: S,
) -> Result<PollOutcome, CliError>
where
    A: DeploymentApi + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    let mut polls = 0;
    let (status, report) = loop {
        let report = api.job_report(job_id).await?;
        polls += 1;

        let status = match report.find(JOB_STATUS_LABEL) {
            Some(value) => JobStatus::parse(value),
            None => {
                warn!("Job {} report has no '{}' entry", job_id, JOB_STATUS_LABEL);
                JobStatus::Other(String::new())
            }
        };
        debug!("Job {} poll {}: {}", job_id, polls, status);
        writeln!(out, "> Deployment status: {}", status)?;

        let Some(delay) = status.next_poll_delay() else {
            break (status, report);
        };
        if let Some(message) = status.progress_message() {
            writeln!(out, "  {}", message)?;
        }
        if status == JobStatus::Scheduled {
            writeln!(out, "  > Printing out deployment details: ")?;
            render_messages(out, &report, |label, value| (label.to_string(), value.to_string()))?;
        }
        sleep_fn(delay).await;
    };

    writeln!(out, "Deployment finished with status: {}", status)?;
    if !status.is_failure() {
        writeln!(out, "Project '{}' successfully deployed!", project)?;
    }

    let mut log_file = None;
    if options.fetch_log {
        if let Some(name) = report.find(FILE_PATH_LABEL).and_then(log_base_name) {
            let path = options.log_dir.join(name);
            let log = api.job_log(job_id).await?;
            File::new(&path).write_bytes(&log).await?;
            writeln!(out, "Log file available at '{}'", path.display())?;
            log_file = Some(path);
        } else {
            debug!("Job {} report names no log file", job_id);
        }
    }

    Ok(PollOutcome {
        status,
        polls,
        log_file,
    })
}

/// Last component of a server side path, whichever separator it uses
pub fn log_base_name(server_path: &str) -> Option<&str> {
    let name = server_path.trim().rsplit(|c: char| c == '/' || c == '\\').next()?;
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(name)
}
