//! Job status unit tests

use std::time::Duration;

use rdcli::deploy::status::JobStatus;

#[test]
fn test_running_statuses_poll_every_five_seconds() {
    for name in ["DEPLOYING", "QUEUED", "STARTING", "EXECUTING"] {
        let status = JobStatus::parse(name);
        assert_eq!(status.next_poll_delay(), Some(Duration::from_secs(5)), "{name}");
        assert!(!status.is_terminal());
    }
}

#[test]
fn test_requested_statuses_wait_for_approval() {
    assert_eq!(JobStatus::Requested.next_poll_delay(), Some(Duration::from_secs(30)));
    assert_eq!(
        JobStatus::parse("REQUESTED_SCHEDULED").next_poll_delay(),
        Some(Duration::from_secs(30))
    );
}

#[test]
fn test_scheduled_polls_every_five_minutes() {
    assert_eq!(JobStatus::Scheduled.next_poll_delay(), Some(Duration::from_secs(300)));
}

#[test]
fn test_failure_statuses() {
    for name in ["FAILED", "REJECTED", "CANCELLED", "UNEXECUTABLE", "TIMEDOUT", "UNKNOWN"] {
        let status = JobStatus::parse(name);
        assert!(status.is_terminal(), "{name}");
        assert!(status.is_failure(), "{name}");
    }
}

#[test]
fn test_completed_is_a_success() {
    let status = JobStatus::parse("COMPLETED");
    assert!(status.is_terminal());
    assert!(!status.is_failure());
    assert_eq!(status.to_string(), "COMPLETED");
}

#[test]
fn test_unrecognised_terminal_status_counts_as_success() {
    let status = JobStatus::parse("ROLLED_BACK");
    assert!(status.is_terminal());
    assert!(!status.is_failure());
}
