//! Hero endpoints.

use crate::models::{Hero, HeroBenchmarks, HeroDuration, HeroMatchup, HeroRankings};
use crate::{Query, Response, Result};
use serde::Serialize;
use serde_json::Value;

resource!(
    /// `/heroes` endpoints.
    Heroes
);

impl Heroes<'_> {
    /// Lists every hero.
    pub async fn list(&self) -> Result<Response<Vec<Hero>>> {
        self.scope.get("/heroes".to_string(), Query::new()).await
    }

    /// Recent matches featuring the hero.
    pub async fn matches(&self, hero_id: u32) -> Result<Response<Vec<Value>>> {
        self.scope
            .get(format!("/heroes/{hero_id}/matches"), Query::new())
            .await
    }

    pub async fn matchups(&self, hero_id: u32) -> Result<Response<Vec<HeroMatchup>>> {
        self.scope
            .get(format!("/heroes/{hero_id}/matchups"), Query::new())
            .await
    }

    pub async fn durations(&self, hero_id: u32) -> Result<Response<Vec<HeroDuration>>> {
        self.scope
            .get(format!("/heroes/{hero_id}/durations"), Query::new())
            .await
    }

    pub async fn players(&self, hero_id: u32) -> Result<Response<Vec<Value>>> {
        self.scope
            .get(format!("/heroes/{hero_id}/players"), Query::new())
            .await
    }

    /// Item popularity by game phase.
    pub async fn item_popularity(&self, hero_id: u32) -> Result<Response<Value>> {
        self.scope
            .get(format!("/heroes/{hero_id}/itemPopularity"), Query::new())
            .await
    }
}

resource!(
    /// `/heroStats` endpoint.
    HeroStats
);

impl HeroStats<'_> {
    /// Aggregate hero statistics over recent matches.
    pub async fn list(&self) -> Result<Response<Vec<Value>>> {
        self.scope.get("/heroStats".to_string(), Query::new()).await
    }
}

resource!(
    /// `/rankings` endpoint.
    Rankings
);

impl Rankings<'_> {
    pub async fn get(&self, hero_id: u32) -> Result<Response<HeroRankings>> {
        self.scope
            .get("/rankings".to_string(), Query::new().param("hero_id", hero_id))
            .await
    }
}

resource!(
    /// `/benchmarks` endpoint.
    Benchmarks
);

impl Benchmarks<'_> {
    pub async fn get(&self, hero_id: u32) -> Result<Response<HeroBenchmarks>> {
        self.scope
            .get("/benchmarks".to_string(), Query::new().param("hero_id", hero_id))
            .await
    }
}

/// Filters for `/scenarios`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScenarioQuery {
    pub hero_id: Option<u32>,
    pub lane_role: Option<u32>,
}

resource!(
    /// `/scenarios` endpoints.
    Scenarios
);

impl Scenarios<'_> {
    /// Win rates by item purchase timing.
    pub async fn item_timings(&self, query: &ScenarioQuery) -> Result<Response<Vec<Value>>> {
        self.scope
            .get("/scenarios/itemTimings".to_string(), Query::from_params(query)?)
            .await
    }

    /// Win rates by lane role and game duration.
    pub async fn lane_roles(&self, query: &ScenarioQuery) -> Result<Response<Vec<Value>>> {
        self.scope
            .get("/scenarios/laneRoles".to_string(), Query::from_params(query)?)
            .await
    }

    pub async fn misc(&self) -> Result<Response<Vec<Value>>> {
        self.scope
            .get("/scenarios/misc".to_string(), Query::new())
            .await
    }
}
