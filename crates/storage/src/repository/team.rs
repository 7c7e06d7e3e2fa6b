use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};

use crate::dto::common::PaginationParams;
use crate::error::Result;
use crate::models::{Team, UpsertTeam};
use crate::services::match_ratings::TeamDirectory;

pub struct TeamRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TeamRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find a team by its API-Football id
    pub async fn find_by_team_id(&self, team_id: i64) -> Result<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, team_id, name, is_national, country, created_at, updated_at
            FROM teams
            WHERE team_id = $1
            "#,
        )
        .bind(team_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(team)
    }

    /// Insert a team or refresh it when the external id is already known
    pub async fn upsert(&self, team: &UpsertTeam) -> Result<Team> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (team_id, name, is_national, country)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (team_id) DO UPDATE
            SET name = EXCLUDED.name,
                is_national = EXCLUDED.is_national,
                country = EXCLUDED.country,
                updated_at = NOW()
            RETURNING id, team_id, name, is_national, country, created_at, updated_at
            "#,
        )
        .bind(team.team_id)
        .bind(&team.name)
        .bind(team.is_national)
        .bind(&team.country)
        .fetch_one(self.pool)
        .await?;

        Ok(team)
    }

    /// National teams ordered by name, optionally filtered by a name fragment
    pub async fn list_national(
        &self,
        search: Option<&str>,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Team>, i64)> {
        let pattern = search.map(like_pattern);

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM teams WHERE is_national = TRUE");
        if let Some(ref pattern) = pattern {
            count.push(" AND name ILIKE ");
            count.push_bind(pattern);
        }
        let total_items = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new(
            r#"
            SELECT id, team_id, name, is_national, country, created_at, updated_at
            FROM teams
            WHERE is_national = TRUE
            "#,
        );
        if let Some(ref pattern) = pattern {
            query.push(" AND name ILIKE ");
            query.push_bind(pattern);
        }
        query.push(" ORDER BY name, team_id LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let teams: Vec<Team> = query.build_query_as().fetch_all(self.pool).await?;

        Ok((teams, total_items))
    }
}

#[async_trait]
impl<'a> TeamDirectory for TeamRepository<'a> {
    async fn find_team_by_id(&self, team_id: i64) -> Result<Option<Team>> {
        self.find_by_team_id(team_id).await
    }
}

/// Escapes LIKE wildcards so the search matches literally.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("bra"), "%bra%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
