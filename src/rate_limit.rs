//! Rate limit header parsing.
//!
//! OpenDota reports the remaining quota on every response, successful or not,
//! through two headers. A `Retry-After` header accompanies some 429 responses.

use http::HeaderMap;
use std::time::{Duration, SystemTime};

/// Header carrying the number of calls left in the current minute.
pub const REMAINING_MINUTE_HEADER: &str = "x-rate-limit-remaining-minute";

/// Header carrying the number of calls left today.
pub const REMAINING_DAY_HEADER: &str = "x-rate-limit-remaining-day";

/// Remaining quota extracted from a response.
///
/// Each counter is parsed independently; a missing or unparseable header
/// leaves that counter as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Calls left in the current minute.
    pub remaining_minute: Option<u64>,

    /// Calls left today.
    pub remaining_day: Option<u64>,
}

impl RateLimitInfo {
    /// Extracts rate limit counters from HTTP response headers.
    ///
    /// # Examples
    ///
    /// ```
    /// use opendota::RateLimitInfo;
    /// use http::HeaderMap;
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.insert("x-rate-limit-remaining-minute", "45".parse().unwrap());
    /// headers.insert("x-rate-limit-remaining-day", "1500".parse().unwrap());
    ///
    /// let info = RateLimitInfo::from_headers(&headers);
    /// assert_eq!(info.remaining_minute, Some(45));
    /// assert_eq!(info.remaining_day, Some(1500));
    /// ```
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            remaining_minute: parse_counter(headers, REMAINING_MINUTE_HEADER),
            remaining_day: parse_counter(headers, REMAINING_DAY_HEADER),
        }
    }

    /// Returns `true` if either quota is known to be used up.
    pub fn is_exhausted(&self) -> bool {
        self.remaining_minute == Some(0) || self.remaining_day == Some(0)
    }
}

fn parse_counter(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

/// Parses the Retry-After header.
///
/// Supports both delay-seconds (integer) and HTTP-date formats. A date in the
/// past yields `None`.
pub(crate) fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let header = headers.get(http::header::RETRY_AFTER)?.to_str().ok()?.trim();

    if let Ok(seconds) = header.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let date_time = httpdate::parse_http_date(header).ok()?;
    date_time.duration_since(SystemTime::now()).ok()
}
