//! Login: turn credentials into a validated session

use async_trait::async_trait;
use http::{Method, StatusCode};
use tracing::{debug, info};
use url::Url;

use crate::authn::credentials::{CandidateSource, CredentialChain, SecretProvider};
use crate::errors::CliError;
use crate::http::client::HttpClient;
use crate::http::gateway::{CallOptions, Gateway, TEXT_PLAIN, TEXT_XML};
use crate::storage::session::Session;

/// Checks one candidate session against the server
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Return the session carrying a working token, or why it does not work
    async fn validate(&self, candidate: Session) -> Result<Session, CliError>;
}

/// Validates candidates by requesting a token and probing with it
#[derive(Debug, Clone)]
pub struct ServerValidator {
    http: HttpClient,
}

impl ServerValidator {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl SessionValidator for ServerValidator {
    async fn validate(&self, candidate: Session) -> Result<Session, CliError> {
        let body = candidate.token_request_body()?;
        let response = Gateway::new(&self.http, &candidate)
            .call(
                Method::POST,
                "user/create/token",
                Some(body),
                TEXT_PLAIN,
                CallOptions::ALLOW_BAD_REQUEST,
            )
            .await?;

        // whatever came back is the token, an empty one fails the probe below
        let token = String::from_utf8_lossy(&response.body).trim().to_string();
        let session = candidate.with_token(token);

        let probe = Gateway::new(&self.http, &session).probe(TEXT_XML).await?;
        if probe.status != StatusCode::OK {
            return Err(CliError::Status {
                base_url: server_url(&session),
                status: probe.status,
            });
        }
        Ok(session)
    }
}

fn server_url(session: &Session) -> String {
    session.base_url().map(Url::to_string).unwrap_or_default()
}

/// A validated session and how it was obtained
#[derive(Debug)]
pub struct LoginOutcome {
    pub session: Session,
    pub source: CandidateSource,
    /// Number of candidates sent to the server
    pub attempts: usize,
}

/// Try each candidate of `chain` in order until one validates.
///
/// Only an unparsable server URL is fatal up front. A candidate whose
/// secret is unavailable is skipped without contacting the server, and any
/// failure while validating moves on to the next candidate.
pub async fn establish_session<P, V>(
    server_url: &str,
    mut chain: CredentialChain,
    secrets: &P,
    validator: &V,
) -> Result<LoginOutcome, CliError>
where
    P: SecretProvider + ?Sized,
    V: SessionValidator + ?Sized,
{
    let base_url = Url::parse(server_url).map_err(|source| CliError::InvalidUrl {
        input: server_url.to_string(),
        source,
    })?;

    let mut attempts = 0;
    while let Some(source) = chain.next() {
        let password = match chain.password_for(source, secrets).await {
            Ok(password) => password,
            Err(e) => {
                debug!("Skipping {}: {}", source, e);
                continue;
            }
        };

        attempts += 1;
        debug!("Trying to log in to '{}' with the {}...", server_url, source);
        let candidate = Session::pending(base_url.clone(), chain.username(), &password);
        match validator.validate(candidate).await {
            Ok(session) => {
                info!("Logged in to '{}' with the {}", server_url, source);
                return Ok(LoginOutcome {
                    session,
                    source,
                    attempts,
                });
            }
            Err(e) => debug!("Login with the {} failed: {}", source, e),
        }
    }

    Err(CliError::CredentialsRejected {
        url: server_url.to_string(),
    })
}
