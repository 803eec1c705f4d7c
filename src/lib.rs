//! # opendota - A typed client for the OpenDota API
//!
//! `opendota` wraps the [OpenDota REST API](https://docs.opendota.com) in typed,
//! retry-aware handles built on top of `reqwest`. Every call returns the decoded
//! payload together with the quota counters the API reports, and every failure
//! is classified into a small set of error kinds.
//!
//! ## Quick Start
//!
//! ```no_run
//! use opendota::OpenDota;
//! use opendota::resources::PlayerQuery;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), opendota::Error> {
//!     let api = OpenDota::from_client(
//!         OpenDota::builder()
//!             .api_key("my-key")
//!             .timeout(Duration::from_secs(10))
//!             .max_retries(2)
//!             .build()?,
//!     );
//!
//!     let player = api.players().get(86745912).await?;
//!     if let Some(profile) = &player.data.profile {
//!         println!("Player: {:?}", profile.personaname);
//!     }
//!
//!     let wl = api.players().win_loss(86745912, &PlayerQuery::default()).await?;
//!     println!("{}W {}L", wl.data.win, wl.data.lose);
//!     println!("{:?} calls left today", wl.rate_limit.remaining_day);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typed endpoints** - One handle per API resource, with serde models for the common payloads
//! - **Automatic retries** - 429 and 5xx responses are retried with exponential backoff and jitter
//! - **Deadlines and cancellation** - A per-call timeout composed with caller-supplied cancellation
//! - **Classified errors** - Not found, rate limited, API, timeout and network failures are distinct
//! - **Quota tracking** - Remaining per-minute and per-day calls on every response
//! - **Automatic logging** - Structured logging with `tracing`
//! - **Pluggable transport** - Swap the HTTP layer through the [`transport::Transport`] trait
//!
//! ## Error Handling
//!
//! ```no_run
//! use opendota::{Error, ErrorKind, OpenDota};
//!
//! # async fn example() -> Result<(), Error> {
//! # let api = OpenDota::new()?;
//! match api.matches().get(271145478).await {
//!     Ok(m) => println!("Duration: {:?}", m.data.duration),
//!     Err(Error::NotFound { url }) => eprintln!("No such match at {}", url),
//!     Err(Error::RateLimit { retry_after, .. }) => {
//!         eprintln!("Rate limited, retry after {:?}", retry_after);
//!     }
//!     Err(e) if e.kind() == ErrorKind::Timeout => eprintln!("Gave up: {}", e),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Cancellation
//!
//! ```no_run
//! use opendota::{cancel::CancelSource, OpenDota, RequestOptions};
//!
//! # async fn example() -> Result<(), opendota::Error> {
//! let api = OpenDota::new()?;
//! let source = CancelSource::new();
//!
//! let heroes = api.heroes().with_options(RequestOptions::new().signal(source.signal()));
//! source.cancel();
//!
//! assert!(heroes.list().await.is_err());
//! # Ok(())
//! # }
//! ```

pub mod cancel;
mod client;
mod error;
pub mod models;
pub mod rate_limit;
mod request;
pub mod resources;
mod response;
pub mod retry;
pub mod transport;

pub use client::{
    Client, ClientBuilder, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
};
pub use error::{BoxError, Error, ErrorKind, Result, TimeoutReason};
pub use rate_limit::RateLimitInfo;
pub use request::{ApiRequest, Query, RequestOptions};
pub use resources::OpenDota;
pub use response::Response;
pub use retry::RetryPolicy;
