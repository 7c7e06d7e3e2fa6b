use async_trait::async_trait;
use rust_decimal::RoundingStrategy;
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::{PaginatedResponse, PaginationParams};
use crate::dto::match_rating::{
    EntityAverageResponse, FeedEntry, LatestRatedMatch, MyRatingResponse, RatingSummaryResponse,
    SubmissionResponse, SubmitRatingsRequest,
};
use crate::error::{Result, StorageError};
use crate::models::{
    MatchRating, NewMatchRating, NewRatingSubmission, RatingSubmission, Team, TeamClassification,
};
use crate::services::rating_aggregation;

pub const ALREADY_RATED_MESSAGE: &str = "You have already rated this match.";

/// Persistence operations the rating aggregator relies on.
#[async_trait]
pub trait RatingStore: Send + Sync {
    async fn find_submission(
        &self,
        user_id: i64,
        match_id: i64,
        team_id: i64,
    ) -> Result<Option<RatingSubmission>>;

    /// Writes the header and every record as one unit. A duplicate
    /// (user, match, team) must surface as [`StorageError::Conflict`].
    async fn insert_submission_with_records(
        &self,
        header: &NewRatingSubmission,
        records: &[NewMatchRating],
    ) -> Result<(RatingSubmission, Vec<MatchRating>)>;

    /// Records of a match/team pair, oldest submission first, entry order kept.
    async fn find_records(&self, match_id: i64, team_id: i64) -> Result<Vec<MatchRating>>;

    async fn count_distinct_users(&self, match_id: i64, team_id: i64) -> Result<i64>;

    /// All submissions of a user, newest first.
    async fn find_user_submissions(&self, user_id: i64) -> Result<Vec<RatingSubmission>>;

    async fn find_submission_records(&self, submission_ids: &[Uuid]) -> Result<Vec<MatchRating>>;

    /// One page of submissions, newest first, with the total count.
    async fn list_feed(&self, pagination: &PaginationParams)
    -> Result<(Vec<RatingSubmission>, i64)>;

    async fn latest_rated_matches(&self, limit: u32) -> Result<Vec<LatestRatedMatch>>;
}

/// Team reference data used to tell national fixtures from club ones.
#[async_trait]
pub trait TeamDirectory: Send + Sync {
    async fn find_team_by_id(&self, team_id: i64) -> Result<Option<Team>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingScope {
    Club,
    National,
}

impl RatingScope {
    /// Unsynced teams count as club teams: only the national view requires
    /// a positive match in the reference table.
    pub fn accepts(&self, classification: TeamClassification) -> bool {
        match self {
            Self::National => classification == TeamClassification::National,
            Self::Club => classification != TeamClassification::National,
        }
    }
}

pub async fn submit_ratings<S>(
    store: &S,
    user_id: i64,
    request: &SubmitRatingsRequest,
) -> Result<SubmissionResponse>
where
    S: RatingStore + ?Sized,
{
    request
        .validate()
        .map_err(|e| StorageError::Validation(e.to_string()))?;

    if store
        .find_submission(user_id, request.match_id, request.team_id)
        .await?
        .is_some()
    {
        return Err(StorageError::Conflict(ALREADY_RATED_MESSAGE.to_string()));
    }

    let header = NewRatingSubmission {
        match_id: request.match_id,
        team_id: request.team_id,
        rated_by: user_id,
        home_team_name: request.home_team_name.clone(),
        away_team_name: request.away_team_name.clone(),
        caption: request.caption.clone(),
    };

    let records: Vec<NewMatchRating> = request
        .ratings
        .iter()
        .map(|entry| NewMatchRating {
            entity_type: entry.entity_type,
            entity_id: entry.entity_id,
            name: entry.name.clone(),
            photo: entry.photo.clone(),
            rating: entry
                .rating
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
            is_mom: entry.is_mom,
        })
        .collect();

    let (submission, ratings) = store
        .insert_submission_with_records(&header, &records)
        .await?;

    info!(
        user_id,
        match_id = submission.match_id,
        team_id = submission.team_id,
        "Stored {} ratings for submission {}",
        ratings.len(),
        submission.submission_id
    );

    Ok(SubmissionResponse::new(submission, ratings))
}

/// Community summary of a match/team pair; never empty.
pub async fn summarize<S>(store: &S, match_id: i64, team_id: i64) -> Result<RatingSummaryResponse>
where
    S: RatingStore + ?Sized,
{
    let records = store.find_records(match_id, team_id).await?;

    let summary = rating_aggregation::summarize(&records).ok_or_else(|| {
        StorageError::not_found(format!(
            "No ratings found for fixture {} and team {}",
            match_id, team_id
        ))
    })?;

    Ok(RatingSummaryResponse::new(match_id, team_id, summary))
}

pub async fn my_latest_summary<S, T>(
    store: &S,
    teams: &T,
    user_id: i64,
) -> Result<MyRatingResponse>
where
    S: RatingStore + ?Sized,
    T: TeamDirectory + ?Sized,
{
    my_latest_summary_in_scope(store, teams, user_id, RatingScope::Club).await
}

pub async fn my_latest_national_summary<S, T>(
    store: &S,
    teams: &T,
    user_id: i64,
) -> Result<MyRatingResponse>
where
    S: RatingStore + ?Sized,
    T: TeamDirectory + ?Sized,
{
    my_latest_summary_in_scope(store, teams, user_id, RatingScope::National).await
}

async fn my_latest_summary_in_scope<S, T>(
    store: &S,
    teams: &T,
    user_id: i64,
    scope: RatingScope,
) -> Result<MyRatingResponse>
where
    S: RatingStore + ?Sized,
    T: TeamDirectory + ?Sized,
{
    let submissions = store.find_user_submissions(user_id).await?;
    let mut classifications: HashMap<i64, TeamClassification> = HashMap::new();

    let mut selected = None;
    for submission in submissions {
        let classification = match classifications.get(&submission.team_id) {
            Some(classification) => *classification,
            None => {
                let team = teams.find_team_by_id(submission.team_id).await?;
                let classification = TeamClassification::of(team.as_ref());
                classifications.insert(submission.team_id, classification);
                classification
            }
        };

        if scope.accepts(classification) {
            selected = Some((submission, classification));
            break;
        }
    }

    let (submission, classification) = selected.ok_or_else(|| {
        StorageError::not_found(match scope {
            RatingScope::Club => "No club match ratings found for this user",
            RatingScope::National => "No national match ratings found for this user",
        })
    })?;

    if classification == TeamClassification::Unsynced {
        warn!(
            team_id = submission.team_id,
            "Team missing from reference data, treating as club team"
        );
    }

    let summary = summarize(store, submission.match_id, submission.team_id).await?;
    let total_raters = store
        .count_distinct_users(submission.match_id, submission.team_id)
        .await?;
    let records = store
        .find_submission_records(&[submission.submission_id])
        .await?;

    Ok(MyRatingResponse {
        submission: SubmissionResponse::new(submission, records),
        team_classification: classification,
        total_raters,
        summary,
    })
}

pub async fn feed<S>(
    store: &S,
    pagination: &PaginationParams,
) -> Result<PaginatedResponse<FeedEntry>>
where
    S: RatingStore + ?Sized,
{
    let (submissions, total_items) = store.list_feed(pagination).await?;

    let ids: Vec<Uuid> = submissions.iter().map(|s| s.submission_id).collect();
    let mut records_by_submission: HashMap<Uuid, Vec<MatchRating>> = HashMap::new();
    if !ids.is_empty() {
        for record in store.find_submission_records(&ids).await? {
            records_by_submission
                .entry(record.submission_id)
                .or_default()
                .push(record);
        }
    }

    let entries = submissions
        .into_iter()
        .map(|submission| {
            let records = records_by_submission
                .remove(&submission.submission_id)
                .unwrap_or_default();
            let top_rated_player = rating_aggregation::summarize(&records)
                .and_then(|s| s.top_rated_player)
                .map(EntityAverageResponse::from);

            FeedEntry {
                submission: SubmissionResponse::new(submission, records),
                top_rated_player,
            }
        })
        .collect();

    Ok(PaginatedResponse::new(
        entries,
        pagination.page,
        pagination.page_size,
        total_items,
    ))
}

pub async fn latest_rated_matches<S>(store: &S, limit: u32) -> Result<Vec<LatestRatedMatch>>
where
    S: RatingStore + ?Sized,
{
    store.latest_rated_matches(limit).await
}
