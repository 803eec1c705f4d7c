//! Team and league endpoints.

use crate::models::{League, Team, TeamHero, TeamMatch, TeamPlayer};
use crate::{Query, Response, Result};
use serde_json::Value;

resource!(
    /// `/teams` endpoints.
    Teams
);

impl Teams<'_> {
    /// Lists teams ordered by rating.
    pub async fn list(&self) -> Result<Response<Vec<Team>>> {
        self.scope.get("/teams".to_string(), Query::new()).await
    }

    pub async fn get(&self, team_id: u64) -> Result<Response<Team>> {
        self.scope
            .get(format!("/teams/{team_id}"), Query::new())
            .await
    }

    pub async fn matches(&self, team_id: u64) -> Result<Response<Vec<TeamMatch>>> {
        self.scope
            .get(format!("/teams/{team_id}/matches"), Query::new())
            .await
    }

    pub async fn players(&self, team_id: u64) -> Result<Response<Vec<TeamPlayer>>> {
        self.scope
            .get(format!("/teams/{team_id}/players"), Query::new())
            .await
    }

    pub async fn heroes(&self, team_id: u64) -> Result<Response<Vec<TeamHero>>> {
        self.scope
            .get(format!("/teams/{team_id}/heroes"), Query::new())
            .await
    }
}

resource!(
    /// `/leagues` endpoints.
    Leagues
);

impl Leagues<'_> {
    pub async fn list(&self) -> Result<Response<Vec<League>>> {
        self.scope.get("/leagues".to_string(), Query::new()).await
    }

    /// Fetches a league. The API wraps the league in a list.
    pub async fn get(&self, league_id: u64) -> Result<Response<Vec<League>>> {
        self.scope
            .get(format!("/leagues/{league_id}"), Query::new())
            .await
    }

    pub async fn matches(&self, league_id: u64) -> Result<Response<Vec<Value>>> {
        self.scope
            .get(format!("/leagues/{league_id}/matches"), Query::new())
            .await
    }

    /// Ids of the league's matches. Ids may be encoded as strings.
    pub async fn match_ids(&self, league_id: u64) -> Result<Response<Vec<Value>>> {
        self.scope
            .get(format!("/leagues/{league_id}/match_ids"), Query::new())
            .await
    }

    pub async fn teams(&self, league_id: u64) -> Result<Response<Vec<Team>>> {
        self.scope
            .get(format!("/leagues/{league_id}/teams"), Query::new())
            .await
    }
}
