mod client;
mod models;

pub use client::{ApiFootballClient, DEFAULT_BASE_URL};
pub use models::*;

use crate::{Result, traits::TeamSource};
use storage::models::UpsertTeam;

#[async_trait::async_trait]
impl TeamSource for ApiFootballClient {
    async fn fetch_team(&self, team_id: i64) -> Result<Option<UpsertTeam>> {
        let response = self.fetch_teams(team_id).await?;
        Ok(response.into_first_team())
    }

    fn name(&self) -> &'static str {
        "API-Football"
    }
}
