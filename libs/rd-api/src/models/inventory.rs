//! Inventory listings: projects, servers, installations and job plans

use serde::Serialize;

use crate::error::ParseError;
use crate::models::{child_flag, child_text, children_named, text_of, with_root};

/// Project returned by `project/list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub enabled: bool,
    pub owner: Option<String>,
}

impl Project {
    pub fn parse_list(bytes: &[u8]) -> Result<Vec<Self>, ParseError> {
        with_root(bytes, |root| {
            children_named(root, "Project")
                .map(|node| Self {
                    name: child_text(node, "name"),
                    description: child_text(node, "description"),
                    enabled: child_flag(node, "enabled"),
                    owner: children_named(node, "owner")
                        .next()
                        .map(|owner| child_text(owner, "username"))
                        .filter(|username| !username.is_empty()),
                })
                .collect()
        })
    }
}

/// Server returned by `server/list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Server {
    pub display_name: String,
    pub hostname: String,
    pub hostnames: Vec<String>,
    pub product: String,
    pub version: String,
    pub enabled: bool,
}

impl Server {
    pub fn parse_list(bytes: &[u8]) -> Result<Vec<Self>, ParseError> {
        with_root(bytes, |root| {
            children_named(root, "Server")
                .map(|node| Self {
                    display_name: child_text(node, "displayname"),
                    hostname: child_text(node, "hostname"),
                    hostnames: children_named(node, "hostnames").map(text_of).collect(),
                    product: child_text(node, "product"),
                    version: child_text(node, "version"),
                    enabled: child_flag(node, "serverEnabled"),
                })
                .collect()
        })
    }

    /// Operating system product and version in one column
    pub fn platform(&self) -> String {
        format!("{} {}", self.product, self.version).trim().to_string()
    }
}

/// Installation (environment) returned by `environment/<server>/list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Installation {
    pub name: String,
    pub environment: String,
    pub live: String,
    pub approval_group: String,
    pub enabled: bool,
    pub server_display_name: String,
}

impl Installation {
    pub fn parse_list(bytes: &[u8]) -> Result<Vec<Self>, ParseError> {
        with_root(bytes, |root| {
            children_named(root, "environment")
                .map(|node| {
                    let env_type = children_named(node, "envType").next();
                    Self {
                        name: child_text(node, "name"),
                        environment: child_text(node, "envTypeName"),
                        live: env_type
                            .and_then(|t| t.attribute("live"))
                            .unwrap_or_default()
                            .to_string(),
                        approval_group: env_type
                            .map(|t| child_text(t, "configurationApprovalGroup"))
                            .unwrap_or_default(),
                        enabled: child_flag(node, "environmentEnabled"),
                        server_display_name: child_text(node, "serverDisplayName"),
                    }
                })
                .collect()
        })
    }
}

/// Job plan returned by `deployment/jobPlan/list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobPlan {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub description: String,
}

impl JobPlan {
    pub fn parse_list(bytes: &[u8]) -> Result<Vec<Self>, ParseError> {
        with_root(bytes, |root| {
            children_named(root, "JobPlan")
                .map(|node| Self {
                    id: child_text(node, "id"),
                    name: child_text(node, "name"),
                    owner: child_text(node, "securityName"),
                    description: child_text(node, "description"),
                })
                .collect()
        })
    }
}
