//! Error types for OpenDota API calls.
//!
//! Every failed call produces exactly one [`Error`]. The variants form a closed
//! taxonomy that callers can branch on directly, or coarsely through
//! [`Error::kind`], to decide how to react: back off longer on a rate limit,
//! show a "not found" message, give up on a network failure, and so on.

use crate::rate_limit::RateLimitInfo;
use crate::transport::TransportError;
use http::StatusCode;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Boxed error used as the cause of loosely classified failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The main error type for OpenDota API calls.
///
/// # Examples
///
/// ```no_run
/// use opendota::{Error, OpenDota};
///
/// # async fn example() -> Result<(), Error> {
/// let api = OpenDota::new()?;
///
/// match api.matches().get(7_000_000_000).await {
///     Ok(response) => println!("duration: {:?}", response.data.duration),
///     Err(Error::NotFound { url }) => eprintln!("no such match at {}", url),
///     Err(Error::RateLimit { retry_after, .. }) => {
///         eprintln!("rate limited, retry after {:?}", retry_after);
///     }
///     Err(e) => eprintln!("other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Fallback failure, also used for transport failures that are neither
    /// cancellations nor connectivity problems.
    #[error("{message}")]
    Generic {
        /// Human-readable description.
        message: String,
        /// The underlying cause, if any.
        #[source]
        source: Option<BoxError>,
    },

    /// The server answered with a non-2xx status that is not otherwise
    /// classified, or kept answering 5xx until retries ran out.
    #[error("{} error: {}", api_error_label(.status), .status.as_u16())]
    Api {
        /// The HTTP status code.
        status: StatusCode,
        /// The URL that was requested.
        url: Url,
        /// The response body, if it was valid JSON.
        body: Option<serde_json::Value>,
    },

    /// The server kept answering 429 until retries ran out.
    #[error("Rate limited: {url}")]
    RateLimit {
        /// The URL that was requested.
        url: Url,
        /// How long the server asked us to wait, from `Retry-After`.
        retry_after: Option<Duration>,
        /// Remaining quota reported alongside the final 429.
        rate_limit: RateLimitInfo,
    },

    /// The server answered 404. Never retried.
    #[error("Not found: {url}")]
    NotFound {
        /// The URL that was requested.
        url: Url,
    },

    /// The call's deadline elapsed, or the caller cancelled it.
    #[error("{reason}")]
    Timeout {
        /// The URL that was requested.
        url: Url,
        /// Which source ended the call.
        reason: TimeoutReason,
        /// The underlying cancellation, for caller-initiated cancels.
        #[source]
        source: Option<TransportError>,
    },

    /// The transport failed before any HTTP response arrived
    /// (DNS failure, connection refused, TLS handshake, ...).
    #[error("Network error: {source}")]
    Network {
        /// The URL that was requested.
        url: Url,
        /// The transport failure.
        #[source]
        source: TransportError,
    },

    /// A 2xx body could not be decoded into the expected type.
    #[error("Failed to deserialize response (status {status}): {source}")]
    Deserialization {
        /// The HTTP status code.
        status: StatusCode,
        /// The URL that was requested.
        url: Url,
        /// The raw response body.
        raw_body: String,
        /// The serde error.
        #[source]
        source: serde_json::Error,
    },

    /// The request body or query could not be serialized to JSON.
    #[error("Failed to serialize request: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Invalid client configuration (bad header value, HTTP client setup).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A base URL or request path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

fn api_error_label(status: &StatusCode) -> &'static str {
    if status.is_server_error() {
        "Server"
    } else {
        "API"
    }
}

/// Why a call ended as [`Error::Timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutReason {
    /// The effective deadline elapsed.
    Deadline(Duration),
    /// The caller-supplied cancellation signal fired.
    Cancelled,
}

impl fmt::Display for TimeoutReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeoutReason::Deadline(after) => {
                write!(f, "Request timed out after {}ms", after.as_millis())
            }
            TimeoutReason::Cancelled => f.write_str("Request was aborted"),
        }
    }
}

/// Coarse classification of an [`Error`].
///
/// Every error maps to exactly one kind; `Generic` is the base kind that
/// also covers serialization and configuration problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Fallback and local failures.
    Generic,
    /// Unclassified non-2xx response.
    Api,
    /// 429 after retries.
    RateLimit,
    /// 404.
    NotFound,
    /// Deadline or caller cancellation.
    Timeout,
    /// Connectivity failure.
    Network,
}

impl Error {
    pub(crate) fn generic(message: impl Into<String>) -> Self {
        Error::Generic {
            message: message.into(),
            source: None,
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Api { .. } => ErrorKind::Api,
            Error::RateLimit { .. } => ErrorKind::RateLimit,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::Network { .. } => ErrorKind::Network,
            Error::Generic { .. }
            | Error::Deserialization { .. }
            | Error::Serialization(_)
            | Error::Configuration(_)
            | Error::InvalidUrl(_) => ErrorKind::Generic,
        }
    }

    /// Returns the HTTP status code if this error carries one.
    ///
    /// # Examples
    ///
    /// ```
    /// use opendota::Error;
    /// use http::StatusCode;
    ///
    /// let err = Error::NotFound {
    ///     url: "https://api.opendota.com/api/matches/1".parse().unwrap(),
    /// };
    /// assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    /// ```
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::RateLimit { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            Error::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            Error::Deserialization { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the URL of the failed call, if the failure happened after the
    /// URL was built.
    pub fn url(&self) -> Option<&Url> {
        match self {
            Error::Api { url, .. }
            | Error::RateLimit { url, .. }
            | Error::NotFound { url }
            | Error::Timeout { url, .. }
            | Error::Network { url, .. }
            | Error::Deserialization { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Returns the server's `Retry-After` hint for rate-limit errors.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Returns the quota counters reported with a rate-limit error.
    pub fn rate_limit_info(&self) -> Option<&RateLimitInfo> {
        match self {
            Error::RateLimit { rate_limit, .. } => Some(rate_limit),
            _ => None,
        }
    }

    /// Returns `true` if trying again later could plausibly succeed.
    ///
    /// Rate limits, 5xx responses, elapsed deadlines and network failures are
    /// transient. 404s, other 4xx responses, explicit cancellation and local
    /// failures are not.
    ///
    /// # Examples
    ///
    /// ```
    /// use opendota::Error;
    /// use http::StatusCode;
    ///
    /// let url: url::Url = "https://api.opendota.com/api/health".parse().unwrap();
    ///
    /// let err = Error::Api { status: StatusCode::BAD_GATEWAY, url: url.clone(), body: None };
    /// assert!(err.is_retryable());
    ///
    /// let err = Error::Api { status: StatusCode::BAD_REQUEST, url, body: None };
    /// assert!(!err.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::RateLimit { .. } => true,
            Error::Api { status, .. } => status.is_server_error(),
            Error::Timeout { reason, .. } => matches!(reason, TimeoutReason::Deadline(_)),
            Error::Network { .. } => true,
            Error::Generic { .. }
            | Error::NotFound { .. }
            | Error::Deserialization { .. }
            | Error::Serialization(_)
            | Error::Configuration(_)
            | Error::InvalidUrl(_) => false,
        }
    }
}

/// A specialized `Result` type for OpenDota API calls.
pub type Result<T> = std::result::Result<T, Error>;
