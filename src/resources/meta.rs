//! Database, constants and service status endpoints.

use crate::models::{ExplorerResult, Record};
use crate::{Query, Response, Result};
use serde_json::Value;

resource!(
    /// `/explorer` endpoint.
    Explorer
);

impl Explorer<'_> {
    /// Runs a read-only SQL query against the public database.
    ///
    /// A query error is reported in [`ExplorerResult::err`], not as an
    /// [`Error`](crate::Error).
    pub async fn query(&self, sql: &str) -> Result<Response<ExplorerResult>> {
        self.scope
            .get("/explorer".to_string(), Query::new().param("sql", sql))
            .await
    }
}

resource!(
    /// `/records` endpoint.
    Records
);

impl Records<'_> {
    /// Top performances for a stat such as `kills` or `duration`.
    pub async fn get(&self, field: &str) -> Result<Response<Vec<Record>>> {
        self.scope
            .get(format!("/records/{field}"), Query::new())
            .await
    }
}

resource!(
    /// `/constants` endpoint.
    Constants
);

impl Constants<'_> {
    /// Fetches a static game data table, e.g. `heroes` or `items`.
    pub async fn get(&self, resource: &str) -> Result<Response<Value>> {
        self.scope
            .get(format!("/constants/{resource}"), Query::new())
            .await
    }
}

resource!(
    /// `/health` endpoint.
    Health
);

impl Health<'_> {
    pub async fn get(&self) -> Result<Response<Value>> {
        self.scope.get("/health".to_string(), Query::new()).await
    }
}

resource!(
    /// `/status` endpoint.
    Status
);

impl Status<'_> {
    pub async fn get(&self) -> Result<Response<Value>> {
        self.scope.get("/status".to_string(), Query::new()).await
    }
}

resource!(
    /// `/metadata` endpoint.
    Metadata
);

impl Metadata<'_> {
    pub async fn get(&self) -> Result<Response<Value>> {
        self.scope.get("/metadata".to_string(), Query::new()).await
    }
}

resource!(
    /// `/distributions` endpoint.
    Distributions
);

impl Distributions<'_> {
    /// Rank tier and country MMR distributions.
    pub async fn get(&self) -> Result<Response<Value>> {
        self.scope
            .get("/distributions".to_string(), Query::new())
            .await
    }
}

resource!(
    /// `/schema` endpoint.
    Schema
);

impl Schema<'_> {
    /// Lists database tables and columns usable in explorer queries.
    pub async fn get(&self) -> Result<Response<Vec<Value>>> {
        self.scope.get("/schema".to_string(), Query::new()).await
    }
}
