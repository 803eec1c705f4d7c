//! Endpoint handles for the OpenDota API.
//!
//! [`OpenDota`] is the entry point. Each accessor returns a lightweight handle
//! borrowing the underlying [`Client`]; handles map their methods onto a path,
//! an optional query and a typed response, and carry [`RequestOptions`] set
//! with `with_options`.
//!
//! ```no_run
//! use opendota::{OpenDota, RequestOptions};
//! use opendota::resources::PlayerQuery;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), opendota::Error> {
//! let api = OpenDota::new()?;
//!
//! let query = PlayerQuery { limit: Some(20), ..Default::default() };
//! let wl = api
//!     .players()
//!     .with_options(RequestOptions::new().timeout(Duration::from_secs(5)))
//!     .win_loss(86745912, &query)
//!     .await?;
//! println!("{} wins / {} losses", wl.data.win, wl.data.lose);
//! # Ok(())
//! # }
//! ```

macro_rules! resource {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name<'a> {
            scope: crate::resources::Scope<'a>,
        }

        impl<'a> $name<'a> {
            pub(crate) fn new(client: &'a crate::Client) -> Self {
                Self {
                    scope: crate::resources::Scope {
                        client,
                        options: crate::RequestOptions::default(),
                    },
                }
            }

            /// Applies cancellation and timeout options to every call made
            /// through this handle.
            pub fn with_options(mut self, options: crate::RequestOptions) -> Self {
                self.scope.options = options;
                self
            }
        }
    };
}

mod heroes;
mod matches;
mod meta;
mod players;
mod teams;

pub use heroes::{Benchmarks, HeroStats, Heroes, Rankings, ScenarioQuery, Scenarios};
pub use matches::{
    Live, Matches, ParseRequests, ProMatches, ProMatchesQuery, PublicMatches, PublicMatchesQuery,
};
pub use meta::{Constants, Distributions, Explorer, Health, Metadata, Records, Schema, Status};
pub use players::{PlayerQuery, Players, ProPlayers, Search};
pub use teams::{Leagues, Teams};

use crate::{Client, ClientBuilder, Query, RequestOptions, Response, Result};
use serde::de::DeserializeOwned;

/// Shared state of every resource handle.
#[derive(Clone)]
struct Scope<'a> {
    client: &'a Client,
    options: RequestOptions,
}

impl<'a> Scope<'a> {
    async fn get<T>(&self, path: String, query: Query) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        self.client.get(path, query, self.options.clone()).await
    }

    async fn post<T>(&self, path: String) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        self.client
            .post::<(), T>(path, None, self.options.clone())
            .await
    }
}

/// Typed entry point to the OpenDota API.
///
/// # Examples
///
/// ```no_run
/// use opendota::OpenDota;
///
/// # async fn example() -> Result<(), opendota::Error> {
/// let client = OpenDota::builder().api_key("my-key").max_retries(1).build()?;
/// let api = OpenDota::from_client(client);
///
/// let heroes = api.heroes().list().await?;
/// println!("{} heroes, {:?} calls left today", heroes.data.len(), heroes.rate_limit.remaining_day);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct OpenDota {
    client: Client,
}

impl OpenDota {
    /// Creates an API handle with the default client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the default HTTP transport cannot be created.
    pub fn new() -> Result<Self> {
        Ok(Self::from_client(Client::new()?))
    }

    /// Creates an API handle configured from the environment.
    ///
    /// See [`ClientBuilder::from_env`].
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_client(ClientBuilder::from_env()?.build()?))
    }

    /// Returns a builder for the underlying client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Wraps an existing client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Returns the underlying client, for endpoints without a handle.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// `/matches`
    pub fn matches(&self) -> Matches<'_> {
        Matches::new(&self.client)
    }

    /// `/players`
    pub fn players(&self) -> Players<'_> {
        Players::new(&self.client)
    }

    /// `/proPlayers`
    pub fn pro_players(&self) -> ProPlayers<'_> {
        ProPlayers::new(&self.client)
    }

    /// `/proMatches`
    pub fn pro_matches(&self) -> ProMatches<'_> {
        ProMatches::new(&self.client)
    }

    /// `/publicMatches`
    pub fn public_matches(&self) -> PublicMatches<'_> {
        PublicMatches::new(&self.client)
    }

    /// `/heroes`
    pub fn heroes(&self) -> Heroes<'_> {
        Heroes::new(&self.client)
    }

    /// `/heroStats`
    pub fn hero_stats(&self) -> HeroStats<'_> {
        HeroStats::new(&self.client)
    }

    /// `/teams`
    pub fn teams(&self) -> Teams<'_> {
        Teams::new(&self.client)
    }

    /// `/leagues`
    pub fn leagues(&self) -> Leagues<'_> {
        Leagues::new(&self.client)
    }

    /// `/rankings`
    pub fn rankings(&self) -> Rankings<'_> {
        Rankings::new(&self.client)
    }

    /// `/benchmarks`
    pub fn benchmarks(&self) -> Benchmarks<'_> {
        Benchmarks::new(&self.client)
    }

    /// `/search`
    pub fn search(&self) -> Search<'_> {
        Search::new(&self.client)
    }

    /// `/explorer`
    pub fn explorer(&self) -> Explorer<'_> {
        Explorer::new(&self.client)
    }

    /// `/request`, the replay parse queue.
    pub fn parse_requests(&self) -> ParseRequests<'_> {
        ParseRequests::new(&self.client)
    }

    /// `/records`
    pub fn records(&self) -> Records<'_> {
        Records::new(&self.client)
    }

    /// `/live`
    pub fn live(&self) -> Live<'_> {
        Live::new(&self.client)
    }

    /// `/scenarios`
    pub fn scenarios(&self) -> Scenarios<'_> {
        Scenarios::new(&self.client)
    }

    /// `/constants`
    pub fn constants(&self) -> Constants<'_> {
        Constants::new(&self.client)
    }

    /// `/health`
    pub fn health(&self) -> Health<'_> {
        Health::new(&self.client)
    }

    /// `/status`
    pub fn status(&self) -> Status<'_> {
        Status::new(&self.client)
    }

    /// `/metadata`
    pub fn metadata(&self) -> Metadata<'_> {
        Metadata::new(&self.client)
    }

    /// `/distributions`
    pub fn distributions(&self) -> Distributions<'_> {
        Distributions::new(&self.client)
    }

    /// `/schema`
    pub fn schema(&self) -> Schema<'_> {
        Schema::new(&self.client)
    }
}

impl From<Client> for OpenDota {
    fn from(client: Client) -> Self {
        Self::from_client(client)
    }
}
