use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        team::{NationalTeamsFilter, TeamResponse},
    },
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/teams/national",
    params(NationalTeamsFilter),
    responses(
        (status = 200, description = "National teams retrieved successfully", body = PaginatedResponse<TeamResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "teams"
)]
pub async fn list_national_teams(
    State(db): State<Database>,
    filter: Result<Query<NationalTeamsFilter>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(filter) = filter?;
    filter.validate().map_err(WebError::BadRequest)?;

    let (teams, total_items) = services::list_national_teams(db.pool(), &filter).await?;

    let response = PaginatedResponse::new(teams, filter.page, filter.page_size, total_items);

    Ok(Json(response).into_response())
}
