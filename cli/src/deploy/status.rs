//! Deployment job status and the polling schedule it implies

use std::fmt;
use std::time::Duration;

/// Status reported for a deployment job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Deploying,
    Queued,
    Starting,
    Executing,
    Requested,
    RequestedScheduled,
    Scheduled,
    Completed,
    Failed,
    Rejected,
    Cancelled,
    Unexecutable,
    TimedOut,
    Unknown,
    /// Anything the client does not know about
    Other(String),
}

impl JobStatus {
    pub fn parse(status: &str) -> Self {
        match status.trim() {
            "DEPLOYING" => JobStatus::Deploying,
            "QUEUED" => JobStatus::Queued,
            "STARTING" => JobStatus::Starting,
            "EXECUTING" => JobStatus::Executing,
            "REQUESTED" => JobStatus::Requested,
            "REQUESTED_SCHEDULED" => JobStatus::RequestedScheduled,
            "SCHEDULED" => JobStatus::Scheduled,
            "COMPLETED" => JobStatus::Completed,
            "FAILED" => JobStatus::Failed,
            "REJECTED" => JobStatus::Rejected,
            "CANCELLED" => JobStatus::Cancelled,
            "UNEXECUTABLE" => JobStatus::Unexecutable,
            "TIMEDOUT" => JobStatus::TimedOut,
            "UNKNOWN" => JobStatus::Unknown,
            other => JobStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Deploying => "DEPLOYING",
            JobStatus::Queued => "QUEUED",
            JobStatus::Starting => "STARTING",
            JobStatus::Executing => "EXECUTING",
            JobStatus::Requested => "REQUESTED",
            JobStatus::RequestedScheduled => "REQUESTED_SCHEDULED",
            JobStatus::Scheduled => "SCHEDULED",
            JobStatus::Completed => "COMPLETED",
            JobStatus::Failed => "FAILED",
            JobStatus::Rejected => "REJECTED",
            JobStatus::Cancelled => "CANCELLED",
            JobStatus::Unexecutable => "UNEXECUTABLE",
            JobStatus::TimedOut => "TIMEDOUT",
            JobStatus::Unknown => "UNKNOWN",
            JobStatus::Other(other) => other,
        }
    }

    /// Wait before the next poll, `None` once the job is finished
    pub fn next_poll_delay(&self) -> Option<Duration> {
        match self {
            JobStatus::Deploying
            | JobStatus::Queued
            | JobStatus::Starting
            | JobStatus::Executing => Some(Duration::from_secs(5)),
            JobStatus::Requested | JobStatus::RequestedScheduled => Some(Duration::from_secs(30)),
            JobStatus::Scheduled => Some(Duration::from_secs(300)),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next_poll_delay().is_none()
    }

    /// Terminal statuses that mean the deployment did not succeed.
    ///
    /// This is a deny-list: a terminal status not listed here, including
    /// one the client has never heard of, counts as a success.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            JobStatus::Failed
                | JobStatus::Rejected
                | JobStatus::Cancelled
                | JobStatus::Unexecutable
                | JobStatus::TimedOut
                | JobStatus::Unknown
        )
    }

    /// Line explaining the wait while the job is still in flight
    pub fn progress_message(&self) -> Option<&'static str> {
        match self {
            JobStatus::Deploying
            | JobStatus::Queued
            | JobStatus::Starting
            | JobStatus::Executing => Some("Deployment running, next check in 5 seconds..."),
            JobStatus::Requested | JobStatus::RequestedScheduled => Some(
                "Deployment in a REQUESTED state. Approval may be required in RapidDeploy to continue with the execution, next check in 30 seconds...",
            ),
            JobStatus::Scheduled => Some(
                "Deployment in a SCHEDULED state, the execution will start in a future date, next check in 5 minutes...",
            ),
            _ => None,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
