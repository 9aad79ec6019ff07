//! RapidDeploy web service models
//!
//! The server answers every call with XML: inventory listings come back as
//! plain entity documents, while actions (deployments, job plans, imports)
//! come back as HTML-like message documents holding label/value pairs.

pub mod error;
pub mod models;

pub use error::ParseError;
pub use models::inventory::{Installation, JobPlan, Project, Server};
pub use models::message::{Message, MessageDocument};
