use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Cached team reference data synced from API-Football.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Team {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
    pub is_national: bool,
    pub country: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct UpsertTeam {
    pub team_id: i64,
    pub name: String,
    pub is_national: bool,
    pub country: String,
}

/// How a team is classified for the national/club rating views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TeamClassification {
    National,
    Club,
    /// The team id is absent from the local `teams` table.
    Unsynced,
}

impl TeamClassification {
    pub fn of(team: Option<&Team>) -> Self {
        match team {
            Some(team) if team.is_national => Self::National,
            Some(_) => Self::Club,
            None => Self::Unsynced,
        }
    }
}
