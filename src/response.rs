//! Response envelope that pairs decoded data with quota and raw details.

use crate::rate_limit::RateLimitInfo;
use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// A successful API response.
///
/// `data` holds the decoded payload and `rate_limit` the quota counters from
/// the response headers. The status, headers and raw body are kept for
/// callers that need details not surfaced otherwise.
///
/// # Examples
///
/// ```no_run
/// use opendota::OpenDota;
///
/// # async fn example() -> Result<(), opendota::Error> {
/// let api = OpenDota::new()?;
/// let response = api.heroes().list().await?;
///
/// println!("{} heroes", response.data.len());
/// println!("{:?} calls left this minute", response.rate_limit.remaining_minute);
/// println!("took {:?} over {} attempt(s)", response.latency, response.attempts);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The decoded response data.
    pub data: T,

    /// Quota counters parsed from the response headers.
    pub rate_limit: RateLimitInfo,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// The raw response body.
    pub raw_body: String,

    /// Time from the first attempt until the successful response, including
    /// backoff delays.
    pub latency: Duration,

    /// Number of attempts made; `1` when no retry was needed.
    pub attempts: usize,
}

impl<T> Response<T> {
    /// Maps the response data to a different type, keeping the metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// # use opendota::{RateLimitInfo, Response};
    /// # use http::{HeaderMap, StatusCode};
    /// # use std::time::Duration;
    /// let response = Response {
    ///     data: vec![1, 2, 3],
    ///     rate_limit: RateLimitInfo::default(),
    ///     status: StatusCode::OK,
    ///     headers: HeaderMap::new(),
    ///     raw_body: "[1,2,3]".to_string(),
    ///     latency: Duration::from_millis(10),
    ///     attempts: 1,
    /// };
    ///
    /// let count = response.map(|ids| ids.len());
    /// assert_eq!(count.data, 3);
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            rate_limit: self.rate_limit,
            status: self.status,
            headers: self.headers,
            raw_body: self.raw_body,
            latency: self.latency,
            attempts: self.attempts,
        }
    }

    /// Returns `true` if the call needed more than one attempt.
    pub fn was_retried(&self) -> bool {
        self.attempts > 1
    }

    /// Returns a header value by name, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Consumes the response and returns the data.
    pub fn into_data(self) -> T {
        self.data
    }
}

impl<T> AsRef<T> for Response<T> {
    fn as_ref(&self) -> &T {
        &self.data
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
