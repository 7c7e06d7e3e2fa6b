use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::EntityType;

/// A single score given to a player or coach inside a submission.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MatchRating {
    pub rating_id: Uuid,
    pub submission_id: Uuid,
    pub match_id: i64,
    pub team_id: i64,
    pub entity_type: EntityType,
    pub entity_id: i64,
    pub name: String,
    pub photo: Option<String>,
    pub rating: Decimal,
    pub is_mom: bool,
    pub position: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewMatchRating {
    pub entity_type: EntityType,
    pub entity_id: i64,
    pub name: String,
    pub photo: Option<String>,
    pub rating: Decimal,
    pub is_mom: bool,
}
