//! Typed and raw request/response exchanges with an enclave.
//!
//! # Design
//! `EnclaveTransport` holds only the endpoint (`host`, `port`) and an
//! injected `HttpClient`; it keeps no state between calls. Each operation is
//! split into a `build_*` method that produces an `HttpRequest` and a
//! `parse_*` method that consumes an `HttpResponse`. `send` and `send_raw`
//! run exactly one round trip through the client between the two halves.
//!
//! The target URL is `{host}:{port}/{path}` with no validation or
//! normalization. `host` must carry its own scheme.
//!
//! `send_raw` returns the body for any status, unlike `send`, which turns a
//! non-2xx status into `TransportError::Connection`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::JsonCodec;
use crate::config::EnclaveConfig;
use crate::error::TransportError;
use crate::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, UreqClient};

/// Media type of typed request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Text substituted for a response that carried no body.
pub const NO_BODY: &str = "N/A";

/// The two exchanges an enclave client performs.
pub trait EnclaveService {
    /// POST `request` as JSON to `path` and decode the 2xx response as `T`.
    fn send<S, T>(&self, request: &S, path: &str) -> Result<T, TransportError>
    where
        S: Serialize + ?Sized,
        T: DeserializeOwned;

    /// GET `path` and return the body text whatever the status.
    fn send_raw(&self, path: &str) -> Result<String, TransportError>;
}

/// Synchronous JSON-over-HTTP transport to a single enclave endpoint.
#[derive(Debug, Clone)]
pub struct EnclaveTransport<C = UreqClient> {
    host: String,
    port: u16,
    client: C,
    codec: JsonCodec,
}

impl EnclaveTransport<UreqClient> {
    /// Transport backed by a `UreqClient` honoring `config.timeout`.
    pub fn from_config(config: &EnclaveConfig) -> Self {
        Self::new(
            &config.host,
            config.port,
            UreqClient::with_timeout(config.timeout),
        )
    }
}

impl<C> EnclaveTransport<C> {
    pub fn new(host: &str, port: u16, client: C) -> Self {
        Self {
            host: host.to_string(),
            port,
            client,
            codec: JsonCodec,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn url(&self, path: &str) -> String {
        format!("{}:{}/{path}", self.host, self.port)
    }

    pub fn build_send<S>(&self, request: &S, path: &str) -> Result<HttpRequest, TransportError>
    where
        S: Serialize + ?Sized,
    {
        let body = self.codec.encode(request)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.url(path),
            headers: vec![("content-type".to_string(), JSON_CONTENT_TYPE.to_string())],
            body: Some(body),
        })
    }

    pub fn parse_send<T>(&self, response: HttpResponse) -> Result<T, TransportError>
    where
        T: DeserializeOwned,
    {
        if !response.is_success() {
            let status = response.status;
            let text = response.body.unwrap_or_else(|| NO_BODY.to_string());
            tracing::warn!(status, %text, "enclave returned an error status");
            return Err(TransportError::Connection { status, text });
        }

        let body = response.body.unwrap_or_default();
        self.codec
            .decode(&body)
            .inspect_err(|err| tracing::debug!(error = %err, "enclave response did not decode"))
    }

    pub fn build_send_raw(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(path),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_send_raw(&self, response: HttpResponse) -> String {
        response.body.unwrap_or_else(|| NO_BODY.to_string())
    }
}

impl<C: HttpClient> EnclaveTransport<C> {
    /// POST `request` as JSON to `path` and decode the 2xx response as `T`.
    ///
    /// # Errors
    /// - `Encode` if `request` cannot be serialized; nothing is sent.
    /// - `Connection` on network failure (status `0`) or a non-2xx status,
    ///   carrying the response body or `"N/A"` when it was empty.
    /// - `Decode` if a 2xx body is empty or does not match `T`.
    pub fn send<S, T>(&self, request: &S, path: &str) -> Result<T, TransportError>
    where
        S: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build_send(request, path)?;
        tracing::debug!(method = ?request.method, url = %request.url, "sending enclave request");
        let response = self.client.execute(&request)?;
        self.parse_send(response)
    }

    /// GET `path` and return the body text, or `"N/A"` when it was empty.
    ///
    /// Fails only when no response could be obtained at all.
    pub fn send_raw(&self, path: &str) -> Result<String, TransportError> {
        let request = self.build_send_raw(path);
        tracing::debug!(method = ?request.method, url = %request.url, "sending raw enclave request");
        let response = self.client.execute(&request)?;
        Ok(self.parse_send_raw(response))
    }
}

impl<C: HttpClient> EnclaveService for EnclaveTransport<C> {
    fn send<S, T>(&self, request: &S, path: &str) -> Result<T, TransportError>
    where
        S: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        EnclaveTransport::send(self, request, path)
    }

    fn send_raw(&self, path: &str) -> Result<String, TransportError> {
        EnclaveTransport::send_raw(self, path)
    }
}
