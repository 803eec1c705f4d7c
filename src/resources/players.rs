//! Player endpoints.

use crate::models::{Player, ProPlayer, SearchResult, WinLoss};
use crate::{Query, Response, Result};
use serde::Serialize;
use serde_json::Value;

/// Filters accepted by most `/players/{account_id}/...` endpoints.
///
/// Flags such as `win` and `significant` take `0` or `1`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayerQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub win: Option<u8>,
    pub patch: Option<u32>,
    pub game_mode: Option<u32>,
    pub lobby_type: Option<u32>,
    pub region: Option<u32>,
    /// Days before now.
    pub date: Option<u32>,
    pub lane_role: Option<u32>,
    pub hero_id: Option<u32>,
    pub is_radiant: Option<u8>,
    pub included_account_id: Option<u64>,
    pub excluded_account_id: Option<u64>,
    pub with_hero_id: Option<u32>,
    pub against_hero_id: Option<u32>,
    pub significant: Option<u8>,
    pub having: Option<u32>,
    pub sort: Option<String>,
}

resource!(
    /// `/players/{account_id}` endpoints.
    Players
);

impl Players<'_> {
    async fn filtered<T>(&self, account_id: u64, endpoint: &str, query: &PlayerQuery) -> Result<Response<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        self.scope
            .get(
                format!("/players/{account_id}/{endpoint}"),
                Query::from_params(query)?,
            )
            .await
    }

    /// Fetches a player summary.
    pub async fn get(&self, account_id: u64) -> Result<Response<Player>> {
        self.scope
            .get(format!("/players/{account_id}"), Query::new())
            .await
    }

    /// Fetches win/loss totals.
    pub async fn win_loss(&self, account_id: u64, query: &PlayerQuery) -> Result<Response<WinLoss>> {
        self.filtered(account_id, "wl", query).await
    }

    /// Lists recent matches.
    pub async fn recent_matches(&self, account_id: u64) -> Result<Response<Vec<Value>>> {
        self.scope
            .get(format!("/players/{account_id}/recentMatches"), Query::new())
            .await
    }

    /// Lists matches, filtered.
    pub async fn matches(&self, account_id: u64, query: &PlayerQuery) -> Result<Response<Vec<Value>>> {
        self.filtered(account_id, "matches", query).await
    }

    /// Lists heroes played.
    pub async fn heroes(&self, account_id: u64, query: &PlayerQuery) -> Result<Response<Vec<Value>>> {
        self.filtered(account_id, "heroes", query).await
    }

    /// Lists players played with.
    pub async fn peers(&self, account_id: u64, query: &PlayerQuery) -> Result<Response<Vec<Value>>> {
        self.filtered(account_id, "peers", query).await
    }

    /// Lists pro players played with.
    pub async fn pros(&self, account_id: u64, query: &PlayerQuery) -> Result<Response<Vec<Value>>> {
        self.filtered(account_id, "pros", query).await
    }

    pub async fn totals(&self, account_id: u64, query: &PlayerQuery) -> Result<Response<Vec<Value>>> {
        self.filtered(account_id, "totals", query).await
    }

    pub async fn counts(&self, account_id: u64, query: &PlayerQuery) -> Result<Response<Value>> {
        self.filtered(account_id, "counts", query).await
    }

    /// Distribution of matches over a single stat, e.g. `kills`.
    pub async fn histograms(
        &self,
        account_id: u64,
        field: &str,
        query: &PlayerQuery,
    ) -> Result<Response<Vec<Value>>> {
        self.filtered(account_id, &format!("histograms/{field}"), query)
            .await
    }

    pub async fn wardmap(&self, account_id: u64, query: &PlayerQuery) -> Result<Response<Value>> {
        self.filtered(account_id, "wardmap", query).await
    }

    pub async fn wordcloud(&self, account_id: u64, query: &PlayerQuery) -> Result<Response<Value>> {
        self.filtered(account_id, "wordcloud", query).await
    }

    pub async fn ratings(&self, account_id: u64) -> Result<Response<Vec<Value>>> {
        self.scope
            .get(format!("/players/{account_id}/ratings"), Query::new())
            .await
    }

    /// Hero rankings of the player.
    pub async fn rankings(&self, account_id: u64) -> Result<Response<Vec<Value>>> {
        self.scope
            .get(format!("/players/{account_id}/rankings"), Query::new())
            .await
    }

    /// Queues a refresh of the player's match history.
    pub async fn refresh(&self, account_id: u64) -> Result<Response<Value>> {
        self.scope
            .post(format!("/players/{account_id}/refresh"))
            .await
    }
}

resource!(
    /// `/proPlayers` endpoint.
    ProPlayers
);

impl ProPlayers<'_> {
    pub async fn list(&self) -> Result<Response<Vec<ProPlayer>>> {
        self.scope.get("/proPlayers".to_string(), Query::new()).await
    }
}

resource!(
    /// `/search` endpoint.
    Search
);

impl Search<'_> {
    /// Searches players by persona name.
    pub async fn players(&self, q: &str) -> Result<Response<Vec<SearchResult>>> {
        self.scope
            .get("/search".to_string(), Query::new().param("q", q))
            .await
    }
}
