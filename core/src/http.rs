//! HTTP transport types and the injectable client capability.
//!
//! # Design
//! Requests and responses are described as plain data. `EnclaveTransport`
//! builds an `HttpRequest`, hands it to an `HttpClient`, and parses the
//! returned `HttpResponse`. Only the `HttpClient` implementation touches the
//! network, so the transport's logic stays deterministic and tests can swap
//! in a fake client.
//!
//! All fields use owned types (`String`, `Vec`) so values can be recorded and
//! replayed without lifetime concerns.

use std::time::Duration;

use crate::error::TransportError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// `body` is `None` when the server sent no content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes a single HTTP exchange.
///
/// Implementations must return non-2xx responses as `Ok` data; only failures
/// below the HTTP layer (refused connection, DNS, timeout, unreadable body)
/// are reported as `Err`, using `TransportError::network`. Deadlines and
/// cancellation are the implementation's concern.
pub trait HttpClient: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking `HttpClient` backed by a shared `ureq::Agent`.
///
/// The agent has ureq's status-code-as-error behavior disabled so that 4xx
/// and 5xx responses come back as data and the transport decides what they
/// mean.
#[derive(Debug, Clone)]
pub struct UreqClient {
    agent: ureq::Agent,
}

impl UreqClient {
    pub fn new() -> Self {
        Self::with_timeout(None)
    }

    /// Client whose every call is bounded by `timeout` end to end.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for UreqClient {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(request.url.as_str());
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(request.url.as_str());
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(TransportError::network)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        // No size cap; bytes that are not UTF-8 are replaced rather than rejected.
        let bytes = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(TransportError::network)?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(HttpResponse {
            status,
            headers,
            body: (!body.is_empty()).then_some(body),
        })
    }
}
