//! Client-side transport for a private-transaction-manager enclave.
//!
//! # Overview
//! Sends typed JSON requests to an enclave over HTTP and decodes its JSON
//! responses, or fetches a path's raw body text. The HTTP client is injected,
//! so tests can replace the network with a fake.
//!
//! # Design
//! - `EnclaveTransport` is stateless: it holds the endpoint and the client.
//! - Each operation is split into `build_*` (produces an `HttpRequest`) and
//!   `parse_*` (consumes an `HttpResponse`), joined by one
//!   `HttpClient::execute` call in `send` / `send_raw`.
//! - Request and response payload types belong to callers; any
//!   `Serialize` / `DeserializeOwned` type works.

pub mod codec;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;

pub use codec::JsonCodec;
pub use config::EnclaveConfig;
pub use error::{ConfigError, TransportError};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, UreqClient};
pub use transport::{EnclaveService, EnclaveTransport, JSON_CONTENT_TYPE, NO_BODY};
