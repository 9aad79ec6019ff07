//! Credential candidates tried during login
//!
//! With the default admin user and no password, the password is looked up
//! in order from the cloud instance ID, the host machine ID and finally the
//! factory default. Any other combination gets exactly one attempt.

use std::path::PathBuf;

use async_trait::async_trait;
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use tracing::debug;
use url::Url;

use crate::errors::CliError;
use crate::http::client::{HttpClient, BOOTSTRAP_TIMEOUT};

pub const DEFAULT_USERNAME: &str = "mvadmin";
pub const DEFAULT_PASSWORD: &str = "mvadmin";

pub const INSTANCE_METADATA_URL: &str = "http://169.254.169.254/";
pub const MACHINE_ID_PATH: &str = "/etc/machine-id";

const METADATA_TOKEN_TTL_HEADER: &str = "x-aws-ec2-metadata-token-ttl-seconds";
const METADATA_TOKEN_HEADER: &str = "x-aws-ec2-metadata-token";
const METADATA_TOKEN_TTL_SECS: &str = "21600";

/// Where a candidate password comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// Password given on the command line, empty when absent
    Explicit,
    /// Cloud instance identifier, used by marketplace images
    CloudInstanceId,
    /// Host machine identifier
    HostMachineId,
    /// Factory default password
    DefaultPassword,
}

impl std::fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CandidateSource::Explicit => "supplied password",
            CandidateSource::CloudInstanceId => "cloud instance ID",
            CandidateSource::HostMachineId => "host machine ID",
            CandidateSource::DefaultPassword => "default password",
        };
        f.write_str(name)
    }
}

/// Secrets that may serve as the admin password
#[async_trait]
pub trait SecretProvider: Send + Sync {
    async fn cloud_instance_id(&self) -> Result<String, CliError>;

    async fn host_machine_id(&self) -> Result<String, CliError>;
}

/// Ordered, finite sequence of candidate sources
#[derive(Debug, Clone)]
pub struct CredentialChain {
    username: String,
    password: Option<String>,
    sources: std::vec::IntoIter<CandidateSource>,
}

impl CredentialChain {
    /// An empty password counts as not supplied
    pub fn new(username: impl Into<String>, password: Option<String>) -> Self {
        let username = username.into();
        let password = password.filter(|p| !p.is_empty());

        let sources = if username == DEFAULT_USERNAME && password.is_none() {
            vec![
                CandidateSource::CloudInstanceId,
                CandidateSource::HostMachineId,
                CandidateSource::DefaultPassword,
            ]
        } else {
            vec![CandidateSource::Explicit]
        };

        Self {
            username,
            password,
            sources: sources.into_iter(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password for `source`, fetching it through `secrets` when needed
    pub async fn password_for<P>(
        &self,
        source: CandidateSource,
        secrets: &P,
    ) -> Result<String, CliError>
    where
        P: SecretProvider + ?Sized,
    {
        let secret = match source {
            CandidateSource::Explicit => return Ok(self.password.clone().unwrap_or_default()),
            CandidateSource::DefaultPassword => return Ok(DEFAULT_PASSWORD.to_string()),
            CandidateSource::CloudInstanceId => secrets.cloud_instance_id().await?,
            CandidateSource::HostMachineId => secrets.host_machine_id().await?,
        };
        let secret = secret.trim();
        if secret.is_empty() {
            return Err(CliError::Config(format!("{} is empty", source)));
        }
        Ok(secret.to_string())
    }
}

impl Iterator for CredentialChain {
    type Item = CandidateSource;

    fn next(&mut self) -> Option<Self::Item> {
        self.sources.next()
    }
}

/// Secrets read from the instance metadata service and the local host
#[derive(Debug, Clone)]
pub struct HostSecrets {
    http: HttpClient,
    metadata_url: Url,
    machine_id_path: PathBuf,
}

impl HostSecrets {
    pub fn new(http: HttpClient, metadata_url: Url, machine_id_path: impl Into<PathBuf>) -> Self {
        Self {
            http,
            metadata_url,
            machine_id_path: machine_id_path.into(),
        }
    }

    /// Well-known metadata endpoint and machine ID file
    pub fn system() -> Result<Self, CliError> {
        let metadata_url = Url::parse(INSTANCE_METADATA_URL).map_err(|source| CliError::InvalidUrl {
            input: INSTANCE_METADATA_URL.to_string(),
            source,
        })?;
        Ok(Self::new(HttpClient::new(BOOTSTRAP_TIMEOUT)?, metadata_url, MACHINE_ID_PATH))
    }

    async fn metadata_call(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
    ) -> Result<String, CliError> {
        let url = self.metadata_url.join(path).map_err(|source| CliError::InvalidUrl {
            input: path.to_string(),
            source,
        })?;
        let response = self
            .http
            .send(method, url, headers, None)
            .await
            .map_err(|e| CliError::transport(&self.metadata_url, e))?;
        if response.status != StatusCode::OK {
            return Err(CliError::Status {
                base_url: self.metadata_url.to_string(),
                status: response.status,
            });
        }
        Ok(String::from_utf8_lossy(&response.body).into_owned())
    }
}

#[async_trait]
impl SecretProvider for HostSecrets {
    async fn cloud_instance_id(&self) -> Result<String, CliError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            METADATA_TOKEN_TTL_HEADER,
            HeaderValue::from_static(METADATA_TOKEN_TTL_SECS),
        );
        let token = self.metadata_call(Method::PUT, "latest/api/token", headers).await?;
        debug!("Instance metadata token acquired");

        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(token.trim())
            .map_err(|_| {
                CliError::Config("instance metadata token is not a valid header".to_string())
            })?;
        headers.insert(METADATA_TOKEN_HEADER, token);
        let instance_id = self
            .metadata_call(Method::GET, "latest/meta-data/instance-id", headers)
            .await?;
        debug!("Instance ID = {}", instance_id.trim());
        Ok(instance_id)
    }

    async fn host_machine_id(&self) -> Result<String, CliError> {
        let machine_id = tokio::fs::read_to_string(&self.machine_id_path).await?;
        debug!("Machine ID = {}", machine_id.trim());
        Ok(machine_id)
    }
}
