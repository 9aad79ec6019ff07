//! Login session persisted between invocations
//!
//! The session file is a small JSON document in the user's home directory:
//!
//! ```text
//! {
//! 	"url": "http://localhost:9090/MidVision",
//! 	"token": "...",
//! 	"param1": "mvadmin",
//! 	"param2": "..."
//! }
//! ```

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, warn};
use url::Url;

use crate::errors::CliError;
use crate::filesys::file::File;

/// Token sent while requesting the real one, the server rejects empty headers
pub const PENDING_TOKEN: &str = "token";

/// Server URL, authentication token and the credentials that produced it
#[derive(Debug, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "url", default)]
    base_url: Option<Url>,

    #[serde(rename = "token", default)]
    auth_token: String,

    #[serde(rename = "param1", default)]
    username: String,

    #[serde(rename = "param2", default = "secret_field::empty", with = "secret_field")]
    password: SecretString,
}

impl Session {
    pub fn new(
        base_url: Option<Url>,
        auth_token: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url,
            auth_token: auth_token.into(),
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Session used to request a token for the given credentials
    pub fn pending(base_url: Url, username: &str, password: &str) -> Self {
        Self::new(Some(base_url), PENDING_TOKEN, username, password)
    }

    /// Same session carrying the token returned by the server
    pub fn with_token(self, auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            ..self
        }
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }

    /// Base URL and token, or the configuration error that prevents any call
    pub fn credentials(&self) -> Result<(&Url, &str), CliError> {
        let base_url = self.base_url.as_ref().ok_or(CliError::MissingBaseUrl)?;
        if self.auth_token.is_empty() {
            return Err(CliError::MissingToken);
        }
        Ok((base_url, &self.auth_token))
    }

    /// Session as a JSON object
    pub fn to_json(&self) -> Result<Vec<u8>, CliError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Body of the token request: a JSON string holding the base64 of [`Self::to_json`]
    pub fn token_request_body(&self) -> Result<Vec<u8>, CliError> {
        let encoded = BASE64.encode(self.to_json()?);
        Ok(serde_json::to_vec(&encoded)?)
    }
}

/// Outcome of removing the session file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

/// Loads, saves and removes the session file
#[derive(Debug, Clone)]
pub struct SessionStore {
    file: File,
}

impl SessionStore {
    pub fn new(file: File) -> Self {
        Self { file }
    }

    pub fn file(&self) -> &File {
        &self.file
    }

    /// Load the persisted session.
    ///
    /// A missing file is [`CliError::NoSession`]; anything unreadable or
    /// unparsable is [`CliError::InvalidSession`].
    pub async fn load(&self) -> Result<Session, CliError> {
        let bytes = match self.file.read_bytes().await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(CliError::NoSession),
            Err(e) => {
                debug!("Unable to read session file {:?}: {}", self.file.path(), e);
                return Err(CliError::InvalidSession);
            }
        };
        serde_json::from_slice(&bytes).map_err(|e| {
            debug!("Unable to parse session file {:?}: {}", self.file.path(), e);
            CliError::InvalidSession
        })
    }

    /// Write the session as indented JSON readable by its owner only
    pub async fn save(&self, session: &Session) -> Result<(), CliError> {
        let mut contents = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"\t");
        let mut serializer = Serializer::with_formatter(&mut contents, formatter);
        session.serialize(&mut serializer)?;
        self.file.write_private(&contents).await?;
        debug!("Session saved to {:?}", self.file.path());
        Ok(())
    }

    /// Delete the session file. A missing file is only worth a warning.
    pub async fn remove(&self) -> Result<RemoveOutcome, CliError> {
        if self.file.remove().await? {
            Ok(RemoveOutcome::Removed)
        } else {
            warn!("No session file at {:?}", self.file.path());
            Ok(RemoveOutcome::NotFound)
        }
    }
}

mod secret_field {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        secret: &SecretString,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(secret.expose_secret())
    }

    pub fn empty() -> SecretString {
        SecretString::from(String::new())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<SecretString, D::Error> {
        String::deserialize(deserializer).map(SecretString::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("http://rd.local:9090/MidVision").unwrap()
    }

    #[test]
    fn empty_token_is_a_configuration_error() {
        let session = Session::new(Some(url()), "", "mvadmin", "secret");
        assert!(matches!(session.credentials(), Err(CliError::MissingToken)));
    }

    #[test]
    fn missing_url_is_a_configuration_error() {
        let session = Session::new(None, "abc", "mvadmin", "secret");
        assert!(matches!(session.credentials(), Err(CliError::MissingBaseUrl)));
    }

    #[test]
    fn serializes_with_legacy_field_names() {
        let session = Session::pending(url(), "mvadmin", "secret");
        let value: serde_json::Value = serde_json::from_slice(&session.to_json().unwrap()).unwrap();
        assert_eq!(value["url"], "http://rd.local:9090/MidVision");
        assert_eq!(value["token"], PENDING_TOKEN);
        assert_eq!(value["param1"], "mvadmin");
        assert_eq!(value["param2"], "secret");
    }

    #[test]
    fn token_request_body_is_a_base64_json_string() {
        let session = Session::pending(url(), "mvadmin", "secret");
        let body = session.token_request_body().unwrap();
        assert_eq!(body.first(), Some(&b'"'));

        let encoded: String = serde_json::from_slice(&body).unwrap();
        let decoded = BASE64.decode(encoded).unwrap();
        assert_eq!(decoded, session.to_json().unwrap());
    }

    #[test]
    fn debug_output_hides_the_password() {
        let session = Session::new(Some(url()), "abc", "mvadmin", "hunter2");
        assert!(!format!("{:?}", session).contains("hunter2"));
    }
}
