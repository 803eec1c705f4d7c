//! The pluggable "perform one HTTP call" boundary.
//!
//! The [`Client`](crate::Client) never talks to the network directly. It hands a
//! fully built [`TransportRequest`] to a [`Transport`] and classifies whatever
//! comes back. [`ReqwestTransport`] is the default; tests and unusual
//! environments can supply their own implementation through
//! [`ClientBuilder::transport`](crate::ClientBuilder::transport).

use crate::cancel::CancelSignal;
use crate::error::BoxError;
use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

/// A single HTTP call, ready to send.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// The HTTP method.
    pub method: Method,
    /// The fully-qualified URL, query included.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// JSON body bytes, if any.
    pub body: Option<Vec<u8>>,
    /// Fires when the call should be abandoned.
    ///
    /// Transports should stop work and return [`TransportError::Cancelled`]
    /// once it fires. The client also stops polling the transport at that
    /// point, so honoring it is cooperative rather than required.
    pub signal: Option<CancelSignal>,
}

/// The raw outcome of a call that produced an HTTP response.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Returns the body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A failure that happened before an HTTP response was available.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    /// The call was abandoned because its cancellation signal fired.
    #[error("request was cancelled")]
    Cancelled,

    /// The server could not be reached (DNS, refused connection, TLS, ...).
    #[error("{0}")]
    Connect(#[source] BoxError),

    /// Any other transport failure.
    #[error("{0}")]
    Other(#[source] BoxError),
}

/// Performs HTTP calls on behalf of the client.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use opendota::transport::{Transport, TransportError, TransportRequest, TransportResponse};
/// use http::{HeaderMap, StatusCode};
///
/// struct AlwaysHealthy;
///
/// #[async_trait]
/// impl Transport for AlwaysHealthy {
///     async fn send(&self, _request: TransportRequest) -> Result<TransportResponse, TransportError> {
///         Ok(TransportResponse {
///             status: StatusCode::OK,
///             headers: HeaderMap::new(),
///             body: br#"{"healthy":true}"#.to_vec(),
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request and returns its response.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// The default transport, backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default `reqwest::Client`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport around an existing `reqwest::Client`.
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    async fn execute(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .http_client
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify_reqwest_error)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Other(Box::new(e)))?
            .to_vec();

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

fn classify_reqwest_error(error: reqwest::Error) -> TransportError {
    if error.is_connect() || error.is_request() || error.is_timeout() {
        TransportError::Connect(Box::new(error))
    } else {
        TransportError::Other(Box::new(error))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        match request.signal.clone() {
            Some(signal) => {
                tokio::select! {
                    biased;
                    _ = signal.cancelled() => Err(TransportError::Cancelled),
                    result = self.execute(request) => result,
                }
            }
            None => self.execute(request).await,
        }
    }
}
