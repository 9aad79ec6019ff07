//! Error types for the rd command line client

use std::path::PathBuf;

use http::StatusCode;
use thiserror::Error;
use url::Url;

/// Main error type for the rd command line client
#[derive(Error, Debug)]
pub enum CliError {
    #[error("No login session found!\nPlease, perform a login before requesting any action.")]
    NoSession,

    #[error("Invalid login session found!\nPlease, perform a new login before requesting any action.")]
    InvalidSession,

    #[error("Configuration error: the login session has no server URL")]
    MissingBaseUrl,

    #[error("Configuration error: the login session has no authentication token")]
    MissingToken,

    #[error("Unable to connect to server '{base_url}'.\n{source}")]
    Transport {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{}", status_message(.base_url, .status))]
    Status { base_url: String, status: StatusCode },

    #[error("Unable to connect to server '{url}'.\nPlease check the credentials.")]
    CredentialsRejected { url: String },

    #[error("Invalid server URL '{input}': {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error(
        "Invalid target name '{0}'\nThe target name has to include the server, the installation and the configuration names:\ne.g. SERVER.INSTALLATION.CONFIGURATION"
    )]
    InvalidTarget(String),

    #[error("Invalid target name '{0}'\nPlease check the server and the installation names.")]
    UnknownTarget(String),

    #[error("Invalid job plan ID '{0}': it must be a number")]
    InvalidJobPlanId(String),

    #[error("Invalid project name: {0}")]
    InvalidProject(String),

    #[error("Project file '{}' was not imported", .0.display())]
    ImportRejected(PathBuf),

    #[error("The server response has no '{0}' entry")]
    MissingField(&'static str),

    #[error("{0}")]
    Usage(String),

    #[error("Unable to parse the server response: {0}")]
    Response(#[from] rd_api::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unable to write file '{}': {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Build a transport error naming the server
    pub fn transport(base_url: &Url, source: reqwest::Error) -> Self {
        CliError::Transport {
            base_url: base_url.to_string(),
            source,
        }
    }

    /// Process exit code for this error
    pub const fn exit_code(&self) -> i32 {
        1
    }
}

fn status_message(base_url: &str, status: &StatusCode) -> String {
    let reason = status.canonical_reason().unwrap_or("Unknown");
    let mut message = format!(
        "Unable to connect to server '{}'.\nServer returned response code {}: {}",
        base_url,
        status.as_u16(),
        reason
    );
    if *status == StatusCode::UNAUTHORIZED {
        message.push_str("\nPlease, perform a new login before requesting any action.");
    }
    message
}
