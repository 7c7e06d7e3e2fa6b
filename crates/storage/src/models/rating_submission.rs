use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One user's rating event for a match/team pair, holding the caption
/// shown in the feed. Ratings hang off it through `submission_id`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RatingSubmission {
    pub submission_id: Uuid,
    pub match_id: i64,
    pub team_id: i64,
    pub rated_by: i64,
    pub home_team_name: Option<String>,
    pub away_team_name: Option<String>,
    pub caption: String,
    pub likes_count: i32,
    pub dislikes_count: i32,
    pub comments_count: i32,
    pub submitted_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

/// Header values for a submission about to be written.
#[derive(Debug, Clone)]
pub struct NewRatingSubmission {
    pub match_id: i64,
    pub team_id: i64,
    pub rated_by: i64,
    pub home_team_name: Option<String>,
    pub away_team_name: Option<String>,
    pub caption: String,
}
