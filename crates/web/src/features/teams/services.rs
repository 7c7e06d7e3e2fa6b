use sqlx::PgPool;
use storage::{
    dto::team::{NationalTeamsFilter, TeamResponse},
    error::Result,
    repository::team::TeamRepository,
};

/// National teams matching the filter, with the total count
pub async fn list_national_teams(
    pool: &PgPool,
    filter: &NationalTeamsFilter,
) -> Result<(Vec<TeamResponse>, i64)> {
    let repo = TeamRepository::new(pool);
    let (teams, total_items) = repo
        .list_national(filter.search_term(), &filter.pagination())
        .await?;

    Ok((teams.into_iter().map(TeamResponse::from).collect(), total_items))
}
