//! HTTP client implementation

use std::time::Duration;

use http::{HeaderMap, Method, StatusCode};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Timeout for authenticated calls unless configured otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for the unauthenticated client used while logging in
pub const BOOTSTRAP_TIMEOUT: Duration = Duration::from_secs(5);

/// Raw result of one call, consumed right away by the caller
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// HTTP client for server communication
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Send a request and read the whole body
    pub async fn send(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse, reqwest::Error> {
        debug!("Request URL = {}", url);
        debug!("Request method = {}", method);
        debug!("Request headers = {:?}", headers.keys().collect::<Vec<_>>());

        let mut request = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            // bodies may carry credentials
            debug!("Request body = {} bytes", body.len());
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        debug!("Response code = {}", status.as_u16());
        debug!("Response body = {}", String::from_utf8_lossy(&body));

        Ok(HttpResponse { status, body })
    }
}
