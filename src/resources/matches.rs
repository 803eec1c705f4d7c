//! Match endpoints.

use crate::models::{Match, ProMatch, PublicMatch};
use crate::{Query, Response, Result};
use serde::Serialize;
use serde_json::Value;

resource!(
    /// `/matches` endpoints.
    Matches
);

impl Matches<'_> {
    /// Fetches a single match.
    pub async fn get(&self, match_id: u64) -> Result<Response<Match>> {
        self.scope
            .get(format!("/matches/{match_id}"), Query::new())
            .await
    }
}

/// Paging for `/proMatches`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProMatchesQuery {
    /// Only return matches with an id below this one.
    pub less_than_match_id: Option<u64>,
}

resource!(
    /// `/proMatches` endpoint.
    ProMatches
);

impl ProMatches<'_> {
    /// Lists recent professional matches.
    pub async fn list(&self, query: &ProMatchesQuery) -> Result<Response<Vec<ProMatch>>> {
        self.scope
            .get("/proMatches".to_string(), Query::from_params(query)?)
            .await
    }
}

/// Paging and rank filters for `/publicMatches`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PublicMatchesQuery {
    pub less_than_match_id: Option<u64>,
    pub mmr_ascending: Option<u32>,
    pub mmr_descending: Option<u32>,
}

resource!(
    /// `/publicMatches` endpoint.
    PublicMatches
);

impl PublicMatches<'_> {
    /// Lists a sample of recent public matches.
    pub async fn list(&self, query: &PublicMatchesQuery) -> Result<Response<Vec<PublicMatch>>> {
        self.scope
            .get("/publicMatches".to_string(), Query::from_params(query)?)
            .await
    }
}

resource!(
    /// `/live` endpoint.
    Live
);

impl Live<'_> {
    /// Lists top currently ongoing live games.
    pub async fn list(&self) -> Result<Response<Vec<Value>>> {
        self.scope.get("/live".to_string(), Query::new()).await
    }
}

resource!(
    /// `/request` endpoints, the replay parse queue.
    ParseRequests
);

impl ParseRequests<'_> {
    /// Submits a match for replay parsing.
    pub async fn submit(&self, match_id: u64) -> Result<Response<Value>> {
        self.scope.post(format!("/request/{match_id}")).await
    }

    /// Fetches the state of a parse job.
    pub async fn status(&self, job_id: &str) -> Result<Response<Value>> {
        self.scope
            .get(format!("/request/{job_id}"), Query::new())
            .await
    }
}
