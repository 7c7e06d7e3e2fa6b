use sqlx::PgPool;
use storage::{
    dto::{
        common::{PaginatedResponse, PaginationParams},
        match_rating::{
            FeedEntry, LatestRatedMatch, MyRatingResponse, RatingSummaryResponse,
            SubmissionResponse, SubmitRatingsRequest,
        },
    },
    error::Result,
    repository::{match_rating::MatchRatingRepository, team::TeamRepository},
    services::match_ratings,
};

/// Store a user's ratings for one team in one match
pub async fn submit_ratings(
    pool: &PgPool,
    user_id: i64,
    request: &SubmitRatingsRequest,
) -> Result<SubmissionResponse> {
    let repo = MatchRatingRepository::new(pool);
    match_ratings::submit_ratings(&repo, user_id, request).await
}

/// Community averages and rankings for a match/team pair
pub async fn get_summary(pool: &PgPool, match_id: i64, team_id: i64) -> Result<RatingSummaryResponse> {
    let repo = MatchRatingRepository::new(pool);
    match_ratings::summarize(&repo, match_id, team_id).await
}

pub async fn get_feed(
    pool: &PgPool,
    pagination: &PaginationParams,
) -> Result<PaginatedResponse<FeedEntry>> {
    let repo = MatchRatingRepository::new(pool);
    match_ratings::feed(&repo, pagination).await
}

pub async fn get_latest_rated_matches(pool: &PgPool, limit: u32) -> Result<Vec<LatestRatedMatch>> {
    let repo = MatchRatingRepository::new(pool);
    match_ratings::latest_rated_matches(&repo, limit).await
}

/// Latest club submission of the user with its community summary
pub async fn get_my_rating(pool: &PgPool, user_id: i64) -> Result<MyRatingResponse> {
    let repo = MatchRatingRepository::new(pool);
    let teams = TeamRepository::new(pool);
    match_ratings::my_latest_summary(&repo, &teams, user_id).await
}

/// Latest national team submission of the user with its community summary
pub async fn get_my_national_rating(pool: &PgPool, user_id: i64) -> Result<MyRatingResponse> {
    let repo = MatchRatingRepository::new(pool);
    let teams = TeamRepository::new(pool);
    match_ratings::my_latest_national_summary(&repo, &teams, user_id).await
}
