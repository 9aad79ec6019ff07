//! Session store unit tests

use rdcli::errors::CliError;
use rdcli::filesys::file::File;
use rdcli::storage::session::{RemoveOutcome, Session, SessionStore};
use url::Url;

fn store_in(dir: &tempfile::TempDir) -> SessionStore {
    SessionStore::new(File::new(dir.path().join(".rapiddeploy")))
}

fn sample_session() -> Session {
    Session::new(
        Some(Url::parse("http://localhost:9090/MidVision").unwrap()),
        "tok-123",
        "mvadmin",
        "s3cret",
    )
}

#[tokio::test]
async fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save(&sample_session()).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded.base_url().unwrap().as_str(), "http://localhost:9090/MidVision");
    assert_eq!(loaded.auth_token(), "tok-123");
    assert_eq!(loaded.username(), "mvadmin");
    assert_eq!(loaded.password(), "s3cret");
}

#[tokio::test]
async fn test_saved_file_is_tab_indented_json() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save(&sample_session()).await.unwrap();

    let text = std::fs::read_to_string(store.file().path()).unwrap();
    assert!(text.contains("\n\t\"url\": \"http://localhost:9090/MidVision\""));
    assert!(text.contains("\"param1\": \"mvadmin\""));
    assert!(text.contains("\"param2\": \"s3cret\""));
}

#[cfg(unix)]
#[tokio::test]
async fn test_saved_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save(&sample_session()).await.unwrap();

    let mode = std::fs::metadata(store.file().path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[tokio::test]
async fn test_missing_file_means_no_session() {
    let dir = tempfile::tempdir().unwrap();
    let err = store_in(&dir).load().await.unwrap_err();
    assert!(matches!(err, CliError::NoSession));
    assert!(err.to_string().contains("perform a login"));
}

#[tokio::test]
async fn test_garbage_file_is_an_invalid_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.file().path(), b"{ not json").unwrap();
    assert!(matches!(store.load().await, Err(CliError::InvalidSession)));
}

#[tokio::test]
async fn test_session_without_token_cannot_call() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.file().path(), br#"{"url": "http://localhost:9090/MidVision"}"#).unwrap();

    let session = store.load().await.unwrap();
    assert!(matches!(session.credentials(), Err(CliError::MissingToken)));
}

#[tokio::test]
async fn test_remove_twice() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save(&sample_session()).await.unwrap();

    assert_eq!(store.remove().await.unwrap(), RemoveOutcome::Removed);
    assert_eq!(store.remove().await.unwrap(), RemoveOutcome::NotFound);
    assert!(!store.file().path().exists());
}
