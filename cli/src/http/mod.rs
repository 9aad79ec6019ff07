//! HTTP access to the RapidDeploy web services

pub mod client;
pub mod deployments;
pub mod gateway;
pub mod inventory;
pub mod projects;
pub mod system;
