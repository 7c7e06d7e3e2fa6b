use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::decimal_to_f64;
use crate::models::{EntityType, MatchRating, RatingSubmission, TeamClassification};
use crate::services::rating_aggregation::{EntityAverage, RankedPlayer, RatingSummary};

/// Request payload for rating the players and coach of one team in a match
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitRatingsRequest {
    #[validate(range(min = 1, message = "match_id must be a positive integer"))]
    pub match_id: i64,

    #[validate(range(min = 1, message = "team_id must be a positive integer"))]
    pub team_id: i64,

    #[validate(length(
        min = 1,
        max = 1000,
        message = "Caption must be between 1 and 1000 characters"
    ))]
    pub caption: String,

    #[validate(length(max = 255))]
    pub home_team_name: Option<String>,

    #[validate(length(max = 255))]
    pub away_team_name: Option<String>,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Between 1 and 100 ratings are required"
    ))]
    #[validate(nested)]
    pub ratings: Vec<RatingEntryRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RatingEntryRequest {
    pub entity_type: EntityType,

    #[validate(range(min = 1, message = "entity_id must be a positive integer"))]
    pub entity_id: i64,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(max = 2048))]
    pub photo: Option<String>,

    #[schema(value_type = f64, example = 7.5)]
    #[validate(custom(function = "validate_rating"))]
    pub rating: Decimal,

    #[serde(default)]
    pub is_mom: bool,
}

fn validate_rating(rating: &Decimal) -> Result<(), validator::ValidationError> {
    if *rating < Decimal::ZERO || *rating > Decimal::TEN {
        let mut error = validator::ValidationError::new("rating_out_of_range");
        error.message = Some("Rating must be between 0 and 10".into());
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct SummaryQuery {
    #[validate(range(min = 1))]
    pub match_id: i64,
    #[validate(range(min = 1))]
    pub team_id: i64,
}

#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct LatestMatchesQuery {
    #[validate(range(min = 1, max = 50, message = "limit must be between 1 and 50"))]
    pub limit: Option<u32>,
}

impl LatestMatchesQuery {
    pub const DEFAULT_LIMIT: u32 = 10;

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RatingResponse {
    pub rating_id: Uuid,
    pub entity_type: EntityType,
    pub entity_id: i64,
    pub name: String,
    pub photo: Option<String>,
    pub rating: f64,
    pub is_mom: bool,
}

impl From<MatchRating> for RatingResponse {
    fn from(rating: MatchRating) -> Self {
        Self {
            rating_id: rating.rating_id,
            entity_type: rating.entity_type,
            entity_id: rating.entity_id,
            name: rating.name,
            photo: rating.photo,
            rating: decimal_to_f64(rating.rating),
            is_mom: rating.is_mom,
        }
    }
}

/// A submission with the individual ratings it carried
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubmissionResponse {
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
    pub ratings: Vec<RatingResponse>,
}

impl SubmissionResponse {
    pub fn new(submission: RatingSubmission, ratings: Vec<MatchRating>) -> Self {
        Self {
            submission_id: submission.submission_id,
            match_id: submission.match_id,
            team_id: submission.team_id,
            rated_by: submission.rated_by,
            home_team_name: submission.home_team_name,
            away_team_name: submission.away_team_name,
            caption: submission.caption,
            likes_count: submission.likes_count,
            dislikes_count: submission.dislikes_count,
            comments_count: submission.comments_count,
            submitted_at: submission.submitted_at,
            ratings: ratings.into_iter().map(RatingResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EntityAverageResponse {
    pub entity_type: EntityType,
    pub entity_id: i64,
    pub name: String,
    pub photo: Option<String>,
    pub average_rating: f64,
    pub rating_count: usize,
    pub mom_votes: u32,
}

impl From<EntityAverage> for EntityAverageResponse {
    fn from(entity: EntityAverage) -> Self {
        Self {
            entity_type: entity.entity_type,
            entity_id: entity.entity_id,
            name: entity.name,
            photo: entity.photo,
            average_rating: decimal_to_f64(entity.average_rating),
            rating_count: entity.rating_count,
            mom_votes: entity.mom_votes,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TopPlayerResponse {
    pub rank: usize,
    pub entity_id: i64,
    pub name: String,
    pub photo: Option<String>,
    pub average_rating: f64,
    pub mom_votes: u32,
    pub score: f64,
}

impl TopPlayerResponse {
    fn new(rank: usize, ranked: RankedPlayer) -> Self {
        Self {
            rank,
            entity_id: ranked.player.entity_id,
            name: ranked.player.name,
            photo: ranked.player.photo,
            average_rating: decimal_to_f64(ranked.player.average_rating),
            mom_votes: ranked.player.mom_votes,
            score: decimal_to_f64(ranked.score),
        }
    }
}

/// Community ratings for one team in one match
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RatingSummaryResponse {
    pub match_id: i64,
    pub team_id: i64,
    pub entities: Vec<EntityAverageResponse>,
    pub mom_player: Option<EntityAverageResponse>,
    pub top_players: Vec<TopPlayerResponse>,
    pub top_rated_player: Option<EntityAverageResponse>,
}

impl RatingSummaryResponse {
    pub fn new(match_id: i64, team_id: i64, summary: RatingSummary) -> Self {
        Self {
            match_id,
            team_id,
            entities: summary
                .entities
                .into_iter()
                .map(EntityAverageResponse::from)
                .collect(),
            mom_player: summary.mom_player.map(EntityAverageResponse::from),
            top_players: summary
                .top_players
                .into_iter()
                .enumerate()
                .map(|(index, ranked)| TopPlayerResponse::new(index + 1, ranked))
                .collect(),
            top_rated_player: summary.top_rated_player.map(EntityAverageResponse::from),
        }
    }
}

/// The caller's latest national or club submission next to the community view
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MyRatingResponse {
    pub submission: SubmissionResponse,
    pub team_classification: TeamClassification,
    pub total_raters: i64,
    pub summary: RatingSummaryResponse,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedEntry {
    pub submission: SubmissionResponse,
    pub top_rated_player: Option<EntityAverageResponse>,
}

/// A match/team pair ordered by its most recent submission
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LatestRatedMatch {
    pub match_id: i64,
    pub team_id: i64,
    pub home_team_name: Option<String>,
    pub away_team_name: Option<String>,
    pub total_raters: i64,
    pub last_submitted_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn entry(rating: &str) -> RatingEntryRequest {
        RatingEntryRequest {
            entity_type: EntityType::Player,
            entity_id: 1100,
            name: "Erling Haaland".to_string(),
            photo: None,
            rating: rating.parse().unwrap(),
            is_mom: false,
        }
    }

    fn request(ratings: Vec<RatingEntryRequest>) -> SubmitRatingsRequest {
        SubmitRatingsRequest {
            match_id: 1208021,
            team_id: 50,
            caption: "Dominant second half".to_string(),
            home_team_name: Some("Manchester City".to_string()),
            away_team_name: Some("Arsenal".to_string()),
            ratings,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request(vec![entry("0.0"), entry("10.0"), entry("6.5")]).validate().is_ok());
    }

    #[test]
    fn test_empty_ratings_rejected() {
        let errors = request(Vec::new()).validate().unwrap_err();
        assert!(errors.errors().contains_key("ratings"));
    }

    #[test]
    fn test_too_many_ratings_rejected() {
        let errors = request(vec![entry("7.0"); 101]).validate().unwrap_err();
        assert!(errors.errors().contains_key("ratings"));
        assert!(request(vec![entry("7.0"); 100]).validate().is_ok());
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        assert!(request(vec![entry("10.5")]).validate().is_err());
        assert!(request(vec![entry("-0.1")]).validate().is_err());
    }

    #[test]
    fn test_blank_caption_and_name_rejected() {
        let mut req = request(vec![entry("7.0")]);
        req.caption = String::new();
        assert!(req.validate().is_err());

        let mut bad_entry = entry("7.0");
        bad_entry.name = String::new();
        assert!(request(vec![bad_entry]).validate().is_err());
    }

    #[test]
    fn test_is_mom_defaults_to_false() {
        let json = r#"{"entity_type":"coach","entity_id":4,"name":"Pep Guardiola","rating":8.5}"#;
        let parsed: RatingEntryRequest = serde_json::from_str(json).unwrap();
        assert!(!parsed.is_mom);
        assert_eq!(parsed.entity_type, EntityType::Coach);
        assert_eq!(parsed.rating, "8.5".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_latest_matches_limit() {
        assert_eq!(LatestMatchesQuery { limit: None }.limit(), 10);
        assert!(LatestMatchesQuery { limit: Some(0) }.validate().is_err());
        assert!(LatestMatchesQuery { limit: Some(51) }.validate().is_err());
        assert!(LatestMatchesQuery { limit: Some(25) }.validate().is_ok());
    }
}
