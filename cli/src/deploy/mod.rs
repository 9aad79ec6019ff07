//! Deployments: request building, job status and synchronous polling

pub mod poller;
pub mod request;
pub mod status;
