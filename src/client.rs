//! HTTP execution core: request assembly, deadlines, cancellation and retries.
//!
//! The [`Client`] type performs every call made by the resource handles. Use
//! [`ClientBuilder`] to configure and create clients.

use crate::{
    cancel::{CancelSignal, CancelSource},
    error::TimeoutReason,
    rate_limit::{parse_retry_after, RateLimitInfo},
    request::{ApiRequest, Query, RequestOptions},
    retry::{RetryPolicy, StatusClass},
    transport::{ReqwestTransport, Transport, TransportError, TransportRequest, TransportResponse},
    Error, Response, Result,
};
use http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use url::Url;

/// Production origin of the OpenDota API.
pub const DEFAULT_BASE_URL: &str = "https://api.opendota.com/api";

/// Default overall deadline for a call, retries included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable read by [`ClientBuilder::from_env`] for the API key.
pub const API_KEY_ENV: &str = "OPENDOTA_API_KEY";

/// Environment variable read by [`ClientBuilder::from_env`] for the base URL.
pub const BASE_URL_ENV: &str = "OPENDOTA_BASE_URL";

/// An HTTP client for the OpenDota API.
///
/// The client is cheap to clone and safe to share between tasks: its
/// configuration is immutable after [`ClientBuilder::build`] and no state is
/// shared between calls.
///
/// # Examples
///
/// ```no_run
/// use opendota::{Client, Query, RequestOptions};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), opendota::Error> {
/// let client = Client::builder()
///     .api_key("my-key")
///     .max_retries(2)
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let wl: opendota::Response<serde_json::Value> = client
///     .get("/players/86745912/wl", Query::new().param("limit", 20), RequestOptions::default())
///     .await?;
/// println!("{}", wl.data);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Arc<dyn Transport>,
    base_url: String,
    default_headers: HeaderMap,
    retry_policy: RetryPolicy,
    timeout: Duration,
}

impl Client {
    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the default HTTP transport cannot be created.
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// Returns the base URL every path is appended to.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the retry policy.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.inner.retry_policy
    }

    /// Returns the client-wide timeout. `Duration::ZERO` means no deadline.
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Makes a typed API call.
    ///
    /// This is the single entry point used by every other method. It builds
    /// the URL and headers, serializes the body, arms the deadline, runs the
    /// retry loop and classifies the outcome.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use opendota::{ApiRequest, Client};
    ///
    /// # async fn example() -> Result<(), opendota::Error> {
    /// let client = Client::new()?;
    /// let request = ApiRequest::get("/search").with_query_param("q", "Dendi");
    ///
    /// let found = client.call::<(), serde_json::Value>(request, None).await?;
    /// println!("{}", found.data);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call<B, T>(&self, request: ApiRequest, body: Option<&B>) -> Result<Response<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.build_url(&request.path, &request.query)?;
        let body = body
            .map(|body| serde_json::to_vec(body))
            .transpose()
            .map_err(Error::Serialization)?;
        let headers = self.request_headers(body.is_some());

        let timeout = request.options.timeout.unwrap_or(self.inner.timeout);
        let deadline = (!timeout.is_zero()).then(|| Deadline::start(timeout));
        let signal = match (request.options.signal.as_ref(), deadline.as_ref()) {
            (Some(caller), Some(deadline)) => Some(caller.any(&deadline.signal())),
            (Some(caller), None) => Some(caller.clone()),
            (None, Some(deadline)) => Some(deadline.signal()),
            (None, None) => None,
        };

        let attempts = self.execute_with_retry::<T>(Attempt {
            method: &request.method,
            url: &url,
            headers: &headers,
            body: body.as_deref(),
            signal: signal.clone(),
            deadline: deadline.as_ref(),
            timeout,
        });

        match &signal {
            Some(signal) => {
                tokio::select! {
                    biased;
                    _ = signal.cancelled() => {
                        tracing::warn!(
                            method = %request.method,
                            url = %url,
                            "Request cancelled"
                        );
                        Err(cancellation_error(url.clone(), deadline.as_ref(), timeout))
                    }
                    result = attempts => result,
                }
            }
            None => attempts.await,
        }
    }

    /// Runs the retry loop for one call.
    async fn execute_with_retry<T>(&self, attempt_ctx: Attempt<'_>) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let Attempt {
            method,
            url,
            headers,
            body,
            signal,
            deadline,
            timeout,
        } = attempt_ctx;
        let policy = self.inner.retry_policy;
        let start_time = Instant::now();

        for attempt in 0..=policy.max_retries {
            tracing::debug!(
                method = %method,
                url = %url,
                attempt = attempt + 1,
                "Executing HTTP request"
            );

            let request = TransportRequest {
                method: method.clone(),
                url: url.clone(),
                headers: headers.clone(),
                body: body.map(<[u8]>::to_vec),
                signal: signal.clone(),
            };

            let response = match self.inner.transport.send(request).await {
                Ok(response) => response,
                Err(error) => return Err(classify_transport_error(error, url, deadline, timeout)),
            };

            let latency = start_time.elapsed();
            let rate_limit = RateLimitInfo::from_headers(&response.headers);

            tracing::info!(
                status = response.status.as_u16(),
                latency_ms = latency.as_millis(),
                attempts = attempt + 1,
                "Received HTTP response"
            );

            match StatusClass::of(response.status) {
                StatusClass::Success => {
                    return decode_success(response, rate_limit, url, latency, attempt as usize + 1);
                }
                StatusClass::NotFound => {
                    return Err(Error::NotFound { url: url.clone() });
                }
                StatusClass::Retryable if policy.is_last_attempt(attempt) => {
                    return Err(retries_exhausted(response, rate_limit, url));
                }
                StatusClass::Retryable => {
                    let delay = policy.backoff(attempt);
                    tracing::warn!(
                        status = response.status.as_u16(),
                        delay_ms = delay.as_millis(),
                        attempt = attempt + 1,
                        "Retrying request after delay"
                    );
                    tokio::time::sleep(delay).await;
                }
                StatusClass::Fatal => {
                    tracing::error!(
                        status = response.status.as_u16(),
                        response = %response.text(),
                        "Client error"
                    );
                    return Err(Error::Api {
                        status: response.status,
                        url: url.clone(),
                        body: response.json().ok(),
                    });
                }
            }
        }

        Err(Error::generic("Unexpected error in retry loop"))
    }

    /// Makes a GET request.
    ///
    /// Absent query values are dropped before encoding.
    pub async fn get<T>(
        &self,
        path: impl Into<String>,
        query: Query,
        options: RequestOptions,
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::GET, path)
            .with_query(query)
            .with_options(options);
        self.call::<(), T>(request, None).await
    }

    /// Makes a POST request with an optional JSON body.
    pub async fn post<B, T>(
        &self,
        path: impl Into<String>,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<Response<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::POST, path).with_options(options);
        self.call(request, body).await
    }

    /// Builds the full URL for `path`, setting every present query value.
    pub(crate) fn build_url(&self, path: &str, query: &Query) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.inner.base_url, path))?;

        if !query.is_empty() {
            let kept: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(key, _)| !query.contains(key))
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect();
            url.query_pairs_mut()
                .clear()
                .extend_pairs(kept)
                .extend_pairs(query.pairs());
        }

        Ok(url)
    }

    fn request_headers(&self, has_body: bool) -> HeaderMap {
        let mut headers = self.inner.default_headers.clone();
        if has_body {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }
        headers
    }
}

/// Borrowed inputs of one retry loop.
struct Attempt<'a> {
    method: &'a Method,
    url: &'a Url,
    headers: &'a HeaderMap,
    body: Option<&'a [u8]>,
    signal: Option<CancelSignal>,
    deadline: Option<&'a Deadline>,
    timeout: Duration,
}

/// Internal timer that fires a cancellation source once the call's deadline
/// elapses. The timer task is aborted when the guard is dropped.
struct Deadline {
    source: CancelSource,
    timer: JoinHandle<()>,
}

impl Deadline {
    fn start(after: Duration) -> Self {
        let source = CancelSource::new();
        let timer = tokio::spawn({
            let source = source.clone();
            async move {
                tokio::time::sleep(after).await;
                source.cancel();
            }
        });
        Self { source, timer }
    }

    fn signal(&self) -> CancelSignal {
        self.source.signal()
    }

    fn has_fired(&self) -> bool {
        self.source.is_cancelled()
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

fn cancellation_error(url: Url, deadline: Option<&Deadline>, timeout: Duration) -> Error {
    if deadline.is_some_and(Deadline::has_fired) {
        Error::Timeout {
            url,
            reason: TimeoutReason::Deadline(timeout),
            source: None,
        }
    } else {
        Error::Timeout {
            url,
            reason: TimeoutReason::Cancelled,
            source: Some(TransportError::Cancelled),
        }
    }
}

fn classify_transport_error(
    error: TransportError,
    url: &Url,
    deadline: Option<&Deadline>,
    timeout: Duration,
) -> Error {
    match error {
        TransportError::Cancelled => cancellation_error(url.clone(), deadline, timeout),
        error @ TransportError::Connect(_) => {
            tracing::warn!(url = %url, error = %error, "Network error");
            Error::Network {
                url: url.clone(),
                source: error,
            }
        }
        TransportError::Other(source) => Error::Generic {
            message: format!("Transport failure for {}: {}", url, source),
            source: Some(source),
        },
    }
}

fn decode_success<T>(
    response: TransportResponse,
    rate_limit: RateLimitInfo,
    url: &Url,
    latency: Duration,
    attempts: usize,
) -> Result<Response<T>>
where
    T: DeserializeOwned,
{
    let raw_body = response.text();

    match response.json::<T>() {
        Ok(data) => Ok(Response {
            data,
            rate_limit,
            status: response.status,
            headers: response.headers,
            raw_body,
            latency,
            attempts,
        }),
        Err(source) => {
            tracing::error!(
                error = %source,
                raw_response = %raw_body,
                "Failed to deserialize response"
            );

            Err(Error::Deserialization {
                status: response.status,
                url: url.clone(),
                raw_body,
                source,
            })
        }
    }
}

fn retries_exhausted(response: TransportResponse, rate_limit: RateLimitInfo, url: &Url) -> Error {
    if response.status == StatusCode::TOO_MANY_REQUESTS {
        Error::RateLimit {
            url: url.clone(),
            retry_after: parse_retry_after(&response.headers),
            rate_limit,
        }
    } else {
        Error::Api {
            status: response.status,
            url: url.clone(),
            body: response.json().ok(),
        }
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// Every setting is optional:
///
/// | Setting | Default |
/// |---|---|
/// | base URL | `https://api.opendota.com/api` |
/// | API key | none |
/// | max retries | 3 |
/// | retry base delay | 1s |
/// | timeout | 30s |
/// | transport | [`ReqwestTransport`] |
///
/// # Examples
///
/// ```no_run
/// use opendota::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), opendota::Error> {
/// let client = ClientBuilder::new()
///     .base_url("https://api.opendota.com/api/")?
///     .api_key("my-key")
///     .retry_base_delay(Duration::from_millis(250))
///     .default_header("User-Agent", "my-app/1.0")?
///     .build()?;
/// assert_eq!(client.base_url(), "https://api.opendota.com/api");
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: String,
    api_key: Option<String>,
    default_headers: HeaderMap,
    retry_policy: RetryPolicy,
    timeout: Duration,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            default_headers: HeaderMap::new(),
            retry_policy: RetryPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
            transport: None,
        }
    }

    /// Creates a builder configured from `OPENDOTA_API_KEY` and
    /// `OPENDOTA_BASE_URL`. Unset or empty variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `OPENDOTA_BASE_URL` is not a valid URL.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::new();

        if let Some(key) = non_empty_env(API_KEY_ENV) {
            builder = builder.api_key(key);
        }
        if let Some(base_url) = non_empty_env(BASE_URL_ENV) {
            builder = builder.base_url(base_url)?;
        }

        Ok(builder)
    }

    /// Sets the base URL. A single trailing slash is removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();
        Url::parse(url)?;
        self.base_url = url.strip_suffix('/').unwrap_or(url).to_string();
        Ok(self)
    }

    /// Sets the API key, sent as a bearer token on every request.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Adds a header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets how many times a 429 or 5xx response is retried.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.retry_policy.max_retries = max_retries;
        self
    }

    /// Sets the delay before the first retry; later retries double it.
    pub fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_policy.base_delay = delay;
        self
    }

    /// Sets the whole retry policy.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Sets the overall deadline of each call. `Duration::ZERO` disables it.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the HTTP transport.
    pub fn transport<T>(mut self, transport: T) -> Self
    where
        T: Transport + 'static,
    {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not a valid header value or the
    /// default HTTP transport cannot be created.
    pub fn build(self) -> Result<Client> {
        let mut default_headers = self.default_headers;
        default_headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(key) = self.api_key.filter(|key| !key.is_empty()) {
            let mut value = HeaderValue::try_from(format!("Bearer {}", key))
                .map_err(|e| Error::Configuration(format!("Invalid API key: {}", e)))?;
            value.set_sensitive(true);
            default_headers.insert(header::AUTHORIZATION, value);
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let http_client = reqwest::Client::builder().build().map_err(|e| {
                    Error::Configuration(format!("Failed to build HTTP client: {}", e))
                })?;
                Arc::new(ReqwestTransport::with_client(http_client))
            }
        };

        Ok(Client {
            inner: Arc::new(ClientInner {
                transport,
                base_url: self.base_url,
                default_headers,
                retry_policy: self.retry_policy,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
