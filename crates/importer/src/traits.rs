use crate::Result;
use sqlx::PgPool;
use storage::{models::UpsertTeam, repository::team::TeamRepository};

pub struct ImportContext {
    pub pool: PgPool,
}

/// Remote provider of team reference data.
#[async_trait::async_trait]
pub trait TeamSource: Send + Sync {
    /// `Ok(None)` when the provider knows no team with this id.
    async fn fetch_team(&self, team_id: i64) -> Result<Option<UpsertTeam>>;

    fn name(&self) -> &'static str;
}

/// Destination for synced teams.
#[async_trait::async_trait]
pub trait TeamSink: Send + Sync {
    async fn upsert_team(&self, team: &UpsertTeam) -> Result<()>;
}

#[async_trait::async_trait]
impl TeamSink for ImportContext {
    async fn upsert_team(&self, team: &UpsertTeam) -> Result<()> {
        TeamRepository::new(&self.pool).upsert(team).await?;
        Ok(())
    }
}
