//! Authenticated calls against the `ws/` API root
//!
//! Every request made on behalf of a session goes through [`Gateway::call`],
//! which checks the session, resolves the URL, sets the headers and maps
//! transport and status failures onto [`CliError`].

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use url::Url;

use crate::errors::CliError;
use crate::http::client::{HttpClient, HttpResponse};
use crate::storage::session::Session;

pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_XML: &str = "text/xml";
pub const APPLICATION_ZIP: &str = "application/zip";

/// Per-call switches
#[derive(Debug, Clone, Copy, Default)]
pub struct CallOptions {
    /// Hand a 400 back to the caller instead of failing
    pub allow_bad_request: bool,
}

impl CallOptions {
    pub const ALLOW_BAD_REQUEST: Self = Self {
        allow_bad_request: true,
    };
}

/// Session-bound view over an [`HttpClient`]
#[derive(Debug, Clone, Copy)]
pub struct Gateway<'a> {
    http: &'a HttpClient,
    session: &'a Session,
}

impl<'a> Gateway<'a> {
    pub fn new(http: &'a HttpClient, session: &'a Session) -> Self {
        Self { http, session }
    }

    /// Send a request to `<base_url>/ws/<relative>`.
    ///
    /// An empty content type is sent as `text/plain`. Anything but a 2xx,
    /// or a 400 when `options` allows it, is an error.
    pub async fn call(
        &self,
        method: Method,
        relative: &str,
        body: Option<Vec<u8>>,
        content_type: &str,
        options: CallOptions,
    ) -> Result<HttpResponse, CliError> {
        let (base_url, token) = self.session.credentials()?;
        let url = api_url(base_url, relative)?;

        let content_type = if content_type.is_empty() {
            TEXT_PLAIN
        } else {
            content_type
        };
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, header_value(content_type)?);
        headers.insert(AUTHORIZATION, header_value(token)?);

        let response = self
            .http
            .send(method, url, headers, body)
            .await
            .map_err(|e| CliError::transport(base_url, e))?;

        let accepted = response.status.is_success()
            || (options.allow_bad_request && response.status == StatusCode::BAD_REQUEST);
        if !accepted {
            return Err(CliError::Status {
                base_url: base_url.to_string(),
                status: response.status,
            });
        }
        Ok(response)
    }

    /// GET with a `text/xml` content type
    pub async fn get_xml(
        &self,
        relative: &str,
        options: CallOptions,
    ) -> Result<HttpResponse, CliError> {
        self.call(Method::GET, relative, None, TEXT_XML, options).await
    }
}

/// Resolve a path relative to the API root of `base_url`
pub fn api_url(base_url: &Url, relative: &str) -> Result<Url, CliError> {
    let path = format!("{}/ws/{}", base_url.path().trim_end_matches('/'), relative);
    base_url.join(&path).map_err(|source| CliError::InvalidUrl {
        input: path,
        source,
    })
}

fn header_value(value: &str) -> Result<HeaderValue, CliError> {
    HeaderValue::from_str(value)
        .map_err(|_| CliError::Config("header value contains invalid characters".to_string()))
}
