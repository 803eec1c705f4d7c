//! Per-call request description: path, query and options.

use crate::cancel::CancelSignal;
use crate::{Error, Result};
use http::Method;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Query parameters for a single call.
///
/// Keys are unique; setting a key twice keeps the last value. Parameters with
/// an absent value are remembered but never encoded, so
/// `Query::new().param("a", "x").param_opt("b", None::<u32>)` encodes as `a=x`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: BTreeMap<String, Option<String>>,
}

impl Query {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter.
    pub fn param<V: ToString>(self, key: impl Into<String>, value: V) -> Self {
        self.param_opt(key, Some(value))
    }

    /// Sets a parameter that may be absent. `None` is never encoded.
    pub fn param_opt<V: ToString>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.params
            .insert(key.into(), value.map(|v| v.to_string()));
        self
    }

    /// Builds a query from any serializable map-like value.
    ///
    /// `null` fields are treated as absent, strings are used verbatim and
    /// every other value is encoded as its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if `params` cannot be serialized, or
    /// does not serialize to a JSON object.
    ///
    /// # Examples
    ///
    /// ```
    /// use opendota::Query;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Filters {
    ///     limit: Option<u32>,
    ///     hero_id: Option<u32>,
    /// }
    ///
    /// let query = Query::from_params(&Filters { limit: Some(10), hero_id: None }).unwrap();
    /// let pairs: Vec<_> = query.pairs().collect();
    /// assert_eq!(pairs, vec![("limit", "10")]);
    /// ```
    pub fn from_params<P: Serialize + ?Sized>(params: &P) -> Result<Self> {
        let value = serde_json::to_value(params).map_err(Error::Serialization)?;
        let object = match value {
            serde_json::Value::Object(object) => object,
            serde_json::Value::Null => return Ok(Self::new()),
            other => {
                return Err(Error::Serialization(serde::ser::Error::custom(format!(
                    "query parameters must serialize to an object, got {}",
                    other
                ))))
            }
        };

        let params = object
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::Null => None,
                    serde_json::Value::String(s) => Some(s),
                    other => Some(other.to_string()),
                };
                (key, value)
            })
            .collect();

        Ok(Self { params })
    }

    /// Iterates over the parameters that will actually be encoded.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .filter_map(|(key, value)| Some((key.as_str(), value.as_deref()?)))
    }

    /// Returns `true` if `key` is set to a present value.
    pub fn contains(&self, key: &str) -> bool {
        self.params.get(key).is_some_and(Option::is_some)
    }

    /// Returns `true` if no parameter would be encoded.
    pub fn is_empty(&self) -> bool {
        self.pairs().next().is_none()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for Query
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Query::new(), |query, (key, value)| query.param_opt(key, value))
    }
}

/// Per-call options.
///
/// # Examples
///
/// ```
/// use opendota::{cancel::CancelSource, RequestOptions};
/// use std::time::Duration;
///
/// let source = CancelSource::new();
/// let options = RequestOptions::new()
///     .signal(source.signal())
///     .timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Caller-supplied cancellation.
    pub signal: Option<CancelSignal>,

    /// Overrides the client-wide timeout for this call. `Duration::ZERO`
    /// disables the deadline.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cancellation signal.
    pub fn signal(mut self, signal: CancelSignal) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Sets the per-call timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Everything the client needs to perform one call, except the body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// The HTTP method. The OpenDota API only uses GET and POST.
    pub method: Method,

    /// The request path, appended verbatim to the base URL.
    pub path: String,

    /// Query parameters.
    pub query: Query,

    /// Per-call options.
    pub options: RequestOptions,
}

impl ApiRequest {
    /// Creates a request with the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Query::new(),
            options: RequestOptions::default(),
        }
    }

    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Replaces the query.
    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    /// Adds a query parameter.
    pub fn with_query_param<V: ToString>(mut self, key: impl Into<String>, value: V) -> Self {
        self.query = self.query.param(key, value);
        self
    }

    /// Replaces the per-call options.
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }
}
