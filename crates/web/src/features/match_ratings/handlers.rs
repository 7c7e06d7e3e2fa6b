use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        match_rating::{
            FeedEntry, LatestMatchesQuery, LatestRatedMatch, MyRatingResponse,
            RatingSummaryResponse, SubmissionResponse, SubmitRatingsRequest, SummaryQuery,
        },
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;

use super::services;

#[utoipa::path(
    post,
    path = "/api/match-ratings",
    request_body = SubmitRatingsRequest,
    params(
        ("x-user-id" = i64, Header, description = "Authenticated user id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Ratings stored", body = SubmissionResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "The user already rated this match and team")
    ),
    tag = "match-ratings"
)]
pub async fn submit_ratings(
    State(db): State<Database>,
    CurrentUser(user_id): CurrentUser,
    payload: Result<Json<SubmitRatingsRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = payload?;
    req.validate()?;

    let submission = services::submit_ratings(db.pool(), user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(submission)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/match-ratings/summary",
    params(SummaryQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Community ratings for the match and team", body = RatingSummaryResponse),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No ratings for this match and team")
    ),
    tag = "match-ratings"
)]
pub async fn get_summary(
    State(db): State<Database>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(query) = query?;
    query.validate()?;

    let summary = services::get_summary(db.pool(), query.match_id, query.team_id).await?;

    Ok(Json(summary).into_response())
}

#[utoipa::path(
    get,
    path = "/api/match-ratings/feed",
    params(PaginationParams),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Submissions, newest first", body = PaginatedResponse<FeedEntry>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "match-ratings"
)]
pub async fn get_feed(
    State(db): State<Database>,
    pagination: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(pagination) = pagination?;
    pagination.validate().map_err(WebError::BadRequest)?;

    let feed = services::get_feed(db.pool(), &pagination).await?;

    Ok(Json(feed).into_response())
}

#[utoipa::path(
    get,
    path = "/api/match-ratings/latest-matches",
    params(LatestMatchesQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Most recently rated match/team pairs", body = Vec<LatestRatedMatch>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "match-ratings"
)]
pub async fn get_latest_rated_matches(
    State(db): State<Database>,
    query: Result<Query<LatestMatchesQuery>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(query) = query?;
    query.validate()?;

    let matches = services::get_latest_rated_matches(db.pool(), query.limit()).await?;

    Ok(Json(matches).into_response())
}

#[utoipa::path(
    get,
    path = "/api/match-ratings/my-rating",
    params(
        ("x-user-id" = i64, Header, description = "Authenticated user id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Latest club submission of the user", body = MyRatingResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "The user has no club submissions")
    ),
    tag = "match-ratings"
)]
pub async fn get_my_rating(
    State(db): State<Database>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Response, WebError> {
    let response = services::get_my_rating(db.pool(), user_id).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/match-ratings/my-national-rating",
    params(
        ("x-user-id" = i64, Header, description = "Authenticated user id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Latest national team submission of the user", body = MyRatingResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "The user has no national team submissions")
    ),
    tag = "match-ratings"
)]
pub async fn get_my_national_rating(
    State(db): State<Database>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Response, WebError> {
    let response = services::get_my_national_rating(db.pool(), user_id).await?;

    Ok(Json(response).into_response())
}
