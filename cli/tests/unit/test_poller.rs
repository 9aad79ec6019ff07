//! Deployment poller unit tests

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rd_api::{Message, MessageDocument};

use rdcli::deploy::poller::{poll_until_finished, DeploymentApi, PollOptions};
use rdcli::deploy::status::JobStatus;
use rdcli::errors::CliError;

/// Serves queued job reports in order, then keeps repeating the last one
struct ScriptedJob {
    reports: Mutex<VecDeque<MessageDocument>>,
    last: MessageDocument,
    log: Vec<u8>,
}

impl ScriptedJob {
    fn with_statuses(statuses: &[&str]) -> Self {
        let mut reports: VecDeque<MessageDocument> =
            statuses.iter().map(|s| report(s, None)).collect();
        let last = reports.pop_back().unwrap_or_else(|| MessageDocument::new(Vec::new()));
        reports.push_back(last.clone());
        Self {
            reports: Mutex::new(reports),
            last,
            log: Vec::new(),
        }
    }

    fn finished_with_log(status: &str, file_path: &str, log: &[u8]) -> Self {
        let last = report(status, Some(file_path));
        Self {
            reports: Mutex::new(VecDeque::from([last.clone()])),
            last,
            log: log.to_vec(),
        }
    }
}

fn report(status: &str, file_path: Option<&str>) -> MessageDocument {
    let mut messages = vec![
        Message::new("Job ID", "77"),
        Message::new("Job Status", status),
    ];
    if let Some(path) = file_path {
        messages.push(Message::new("File Path", path));
    }
    MessageDocument::new(messages)
}

#[async_trait]
impl DeploymentApi for ScriptedJob {
    async fn job_report(&self, _job_id: &str) -> Result<MessageDocument, CliError> {
        let mut reports = self.reports.lock().unwrap();
        Ok(reports.pop_front().unwrap_or_else(|| self.last.clone()))
    }

    async fn job_log(&self, _job_id: &str) -> Result<Vec<u8>, CliError> {
        Ok(self.log.clone())
    }
}

struct FailingJob;

#[async_trait]
impl DeploymentApi for FailingJob {
    async fn job_report(&self, _job_id: &str) -> Result<MessageDocument, CliError> {
        Err(CliError::Config("server went away".to_string()))
    }

    async fn job_log(&self, _job_id: &str) -> Result<Vec<u8>, CliError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_failed_job_after_two_running_polls() {
    let job = ScriptedJob::with_statuses(&["QUEUED", "EXECUTING", "FAILED"]);
    let sleeps = Mutex::new(Vec::new());
    let mut out = Vec::new();

    let options = PollOptions::default();
    let outcome = poll_until_finished(&job, "77", "petclinic", &options, &mut out, |d| {
        sleeps.lock().unwrap().push(d);
        async {}
    })
    .await
    .unwrap();

    assert_eq!(outcome.status, JobStatus::Failed);
    assert_eq!(outcome.polls, 3);
    assert!(!outcome.succeeded());
    assert_eq!(
        *sleeps.lock().unwrap(),
        vec![Duration::from_secs(5), Duration::from_secs(5)]
    );

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("> Deployment status: QUEUED"));
    assert!(text.contains("Deployment running, next check in 5 seconds..."));
    assert!(text.contains("Deployment finished with status: FAILED"));
    assert!(!text.contains("successfully deployed"));
}

#[tokio::test]
async fn test_completed_job_reports_success() {
    let job = ScriptedJob::with_statuses(&["STARTING", "COMPLETED"]);
    let mut out = Vec::new();

    let options = PollOptions::default();
    let outcome = poll_until_finished(&job, "77", "petclinic", &options, &mut out, |_| async {})
        .await
        .unwrap();

    assert!(outcome.succeeded());
    assert_eq!(outcome.polls, 2);
    assert!(outcome.log_file.is_none());
    assert!(String::from_utf8(out)
        .unwrap()
        .contains("Project 'petclinic' successfully deployed!"));
}

#[tokio::test]
async fn test_scheduled_and_requested_waits() {
    let job = ScriptedJob::with_statuses(&["REQUESTED", "SCHEDULED", "COMPLETED"]);
    let sleeps = Mutex::new(Vec::new());
    let mut out = Vec::new();

    poll_until_finished(&job, "77", "petclinic", &PollOptions::default(), &mut out, |d| {
        sleeps.lock().unwrap().push(d);
        async {}
    })
    .await
    .unwrap();

    assert_eq!(
        *sleeps.lock().unwrap(),
        vec![Duration::from_secs(30), Duration::from_secs(300)]
    );
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Approval may be required"));
    assert!(text.contains("  > Printing out deployment details: "));
    assert!(text.contains("| Job ID "));
}

#[tokio::test]
async fn test_missing_status_ends_the_polling() {
    let job = ScriptedJob {
        reports: Mutex::new(VecDeque::new()),
        last: MessageDocument::new(vec![Message::new("Job ID", "77")]),
        log: Vec::new(),
    };
    let mut out = Vec::new();

    let options = PollOptions::default();
    let outcome = poll_until_finished(&job, "77", "petclinic", &options, &mut out, |_| async {})
        .await
        .unwrap();
    assert_eq!(outcome.polls, 1);
    assert!(outcome.succeeded());
}

#[tokio::test]
async fn test_log_is_downloaded_next_to_the_caller() {
    let dir = tempfile::tempdir().unwrap();
    let job =
        ScriptedJob::finished_with_log("COMPLETED", "C:\\rd\\logs\\job-77.log", b"step 1 ok\n");
    let options = PollOptions {
        fetch_log: true,
        log_dir: dir.path().to_path_buf(),
    };
    let mut out = Vec::new();

    let outcome = poll_until_finished(&job, "77", "petclinic", &options, &mut out, |_| async {})
        .await
        .unwrap();

    let expected = dir.path().join("job-77.log");
    assert_eq!(outcome.log_file.as_deref(), Some(expected.as_path()));
    assert_eq!(std::fs::read(&expected).unwrap(), b"step 1 ok\n");
    assert!(String::from_utf8(out)
        .unwrap()
        .contains(&format!("Log file available at '{}'", expected.display())));
}

#[tokio::test]
async fn test_report_failure_stops_the_polling() {
    let mut out = Vec::new();
    let options = PollOptions::default();
    let result =
        poll_until_finished(&FailingJob, "77", "petclinic", &options, &mut out, |_| async {}).await;
    assert!(matches!(result, Err(CliError::Config(_))));
    assert!(out.is_empty());
}
