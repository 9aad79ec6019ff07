//! Login unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use httpmock::prelude::*;

use rdcli::app::context::AppContext;
use rdcli::authn::credentials::{CandidateSource, CredentialChain, SecretProvider, DEFAULT_USERNAME};
use rdcli::authn::login::{establish_session, ServerValidator, SessionValidator};
use rdcli::cli::LoginArgs;
use rdcli::commands::session::login_with;
use rdcli::errors::CliError;
use rdcli::filesys::file::File;
use rdcli::http::client::HttpClient;
use rdcli::output::OutputFormat;
use rdcli::storage::session::{Session, SessionStore};
use url::Url;

const SERVER_URL: &str = "http://localhost:9090/MidVision";

struct FixedSecrets;

#[async_trait]
impl SecretProvider for FixedSecrets {
    async fn cloud_instance_id(&self) -> Result<String, CliError> {
        Ok("i-0abc\n".to_string())
    }

    async fn host_machine_id(&self) -> Result<String, CliError> {
        Ok("machine-42".to_string())
    }
}

struct NoCloud;

#[async_trait]
impl SecretProvider for NoCloud {
    async fn cloud_instance_id(&self) -> Result<String, CliError> {
        Err(CliError::Config("no instance metadata".to_string()))
    }

    async fn host_machine_id(&self) -> Result<String, CliError> {
        Ok("machine-42".to_string())
    }
}

/// Accepts only the given password and counts the candidates it sees
struct AcceptPassword {
    password: &'static str,
    calls: AtomicUsize,
}

impl AcceptPassword {
    fn new(password: &'static str) -> Self {
        Self {
            password,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SessionValidator for AcceptPassword {
    async fn validate(&self, candidate: Session) -> Result<Session, CliError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if candidate.password() == self.password {
            Ok(candidate.with_token("granted"))
        } else {
            Err(CliError::Config("rejected".to_string()))
        }
    }
}

fn context_in(dir: &tempfile::TempDir) -> AppContext {
    AppContext::new(
        SessionStore::new(File::new(dir.path().join(".rapiddeploy"))),
        HttpClient::new(Duration::from_secs(5)).unwrap(),
        OutputFormat::Table,
        dir.path(),
    )
}

#[tokio::test]
async fn test_second_fallback_candidate_wins() {
    let validator = AcceptPassword::new("machine-42");
    let chain = CredentialChain::new(DEFAULT_USERNAME, None);

    let outcome = establish_session(SERVER_URL, chain, &FixedSecrets, &validator)
        .await
        .unwrap();

    assert_eq!(outcome.source, CandidateSource::HostMachineId);
    assert_eq!(outcome.attempts, 2);
    assert_eq!(outcome.session.auth_token(), "granted");
    assert_eq!(validator.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_cloud_secret_is_trimmed() {
    let validator = AcceptPassword::new("i-0abc");
    let chain = CredentialChain::new(DEFAULT_USERNAME, None);

    let outcome = establish_session(SERVER_URL, chain, &FixedSecrets, &validator)
        .await
        .unwrap();
    assert_eq!(outcome.source, CandidateSource::CloudInstanceId);
    assert_eq!(outcome.attempts, 1);
}

#[tokio::test]
async fn test_unavailable_secret_is_skipped_without_an_attempt() {
    let validator = AcceptPassword::new("mvadmin");
    let chain = CredentialChain::new(DEFAULT_USERNAME, None);

    let outcome = establish_session(SERVER_URL, chain, &NoCloud, &validator)
        .await
        .unwrap();
    assert_eq!(outcome.source, CandidateSource::DefaultPassword);
    assert_eq!(outcome.attempts, 2);
}

#[tokio::test]
async fn test_exhausted_chain_is_rejected() {
    let validator = AcceptPassword::new("nothing matches");
    let chain = CredentialChain::new(DEFAULT_USERNAME, None);

    let err = establish_session(SERVER_URL, chain, &FixedSecrets, &validator)
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::CredentialsRejected { .. }));
    assert_eq!(validator.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_bad_url_fails_before_any_attempt() {
    let validator = AcceptPassword::new("mvadmin");
    let chain = CredentialChain::new(DEFAULT_USERNAME, None);

    let err = establish_session("not a url", chain, &FixedSecrets, &validator)
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::InvalidUrl { .. }));
    assert_eq!(validator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_rejected_explicit_password_leaves_no_session() {
    let server = MockServer::start_async().await;
    let token = server.mock(|when, then| {
        when.method(POST).path("/MidVision/ws/user/create/token");
        then.status(200).body("tok-1");
    });
    let probe = server.mock(|when, then| {
        when.method(GET)
            .path("/MidVision/ws/group/list")
            .header("authorization", "tok-1");
        then.status(401);
    });

    let dir = tempfile::tempdir().unwrap();
    let ctx = context_in(&dir);
    let validator = ServerValidator::new(HttpClient::new(Duration::from_secs(5)).unwrap());
    let args = LoginArgs {
        url: server.url("/MidVision"),
        username: "deployer".to_string(),
        password: Some("wrong".to_string()),
    };

    let mut out = Vec::new();
    let err = login_with(&ctx, args, &FixedSecrets, &validator, &mut out)
        .await
        .unwrap_err();

    token.assert();
    probe.assert();
    assert!(err.to_string().contains("Please check the credentials."));
    assert_eq!(err.exit_code(), 1);
    assert!(out.is_empty());
    assert!(!ctx.store.file().path().exists());
}

#[tokio::test]
async fn test_successful_login_persists_the_session() {
    let server = MockServer::start_async().await;
    let url = server.url("/MidVision");
    let pending = Session::pending(Url::parse(&url).unwrap(), "deployer", "s3cret");
    let expected_body = String::from_utf8(pending.token_request_body().unwrap()).unwrap();
    assert!(expected_body.starts_with("\"eyJ"));

    let token = server.mock(|when, then| {
        when.method(POST)
            .path("/MidVision/ws/user/create/token")
            .header("authorization", "token")
            .header("content-type", "text/plain")
            .body(expected_body.as_str());
        then.status(200).body("  tok-2\n");
    });
    let probe = server.mock(|when, then| {
        when.method(GET)
            .path("/MidVision/ws/group/list")
            .header("authorization", "tok-2");
        then.status(200).body("<groups/>");
    });

    let dir = tempfile::tempdir().unwrap();
    let ctx = context_in(&dir);
    let validator = ServerValidator::new(HttpClient::new(Duration::from_secs(5)).unwrap());
    let args = LoginArgs {
        url: url.clone(),
        username: "deployer".to_string(),
        password: Some("s3cret".to_string()),
    };

    let mut out = Vec::new();
    let outcome = login_with(&ctx, args, &FixedSecrets, &validator, &mut out)
        .await
        .unwrap();

    token.assert();
    probe.assert();
    assert_eq!(outcome.attempts, 1);
    assert!(String::from_utf8(out)
        .unwrap()
        .contains(&format!("Successfully logged in to '{}'", url)));

    let saved = ctx.store.load().await.unwrap();
    assert_eq!(saved.auth_token(), "tok-2");
    assert_eq!(saved.username(), "deployer");
    assert_eq!(saved.password(), "s3cret");
}

#[tokio::test]
async fn test_login_probe_needs_a_plain_ok() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/MidVision/ws/user/create/token");
        then.status(201).body("tok-3");
    });
    let probe = server.mock(|when, then| {
        when.method(GET).path("/MidVision/ws/group/list");
        then.status(204);
    });

    let dir = tempfile::tempdir().unwrap();
    let ctx = context_in(&dir);
    let validator = ServerValidator::new(HttpClient::new(Duration::from_secs(5)).unwrap());
    let args = LoginArgs {
        url: server.url("/MidVision"),
        username: "deployer".to_string(),
        password: Some("s3cret".to_string()),
    };

    let mut out = Vec::new();
    let err = login_with(&ctx, args, &FixedSecrets, &validator, &mut out)
        .await
        .unwrap_err();

    probe.assert();
    assert!(matches!(err, CliError::CredentialsRejected { .. }));
    assert!(!ctx.store.file().path().exists());
}
