use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::match_rating::LatestRatedMatch;
use crate::error::{Result, StorageError};
use crate::models::{MatchRating, NewMatchRating, NewRatingSubmission, RatingSubmission};
use crate::services::match_ratings::{ALREADY_RATED_MESSAGE, RatingStore};

const SUBMISSION_COLUMNS: &str = r#"
    submission_id, match_id, team_id, rated_by, home_team_name, away_team_name,
    caption, likes_count, dislikes_count, comments_count, submitted_at, created_at
"#;

const RATING_COLUMNS: &str = r#"
    rating_id, submission_id, match_id, team_id, entity_type, entity_id,
    name, photo, rating, is_mom, position, created_at
"#;

pub struct MatchRatingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MatchRatingRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

/// Unique violations on `rating_submissions` mean another request for the
/// same user, match and team committed first.
fn map_duplicate(error: sqlx::Error) -> StorageError {
    let error = StorageError::from(error);
    if error.is_unique_violation() {
        StorageError::Conflict(ALREADY_RATED_MESSAGE.to_string())
    } else {
        error
    }
}

#[async_trait]
impl<'a> RatingStore for MatchRatingRepository<'a> {
    async fn find_submission(
        &self,
        user_id: i64,
        match_id: i64,
        team_id: i64,
    ) -> Result<Option<RatingSubmission>> {
        let sql = format!(
            "SELECT {} FROM rating_submissions WHERE match_id = $1 AND team_id = $2 AND rated_by = $3",
            SUBMISSION_COLUMNS
        );

        let submission = sqlx::query_as::<_, RatingSubmission>(&sql)
            .bind(match_id)
            .bind(team_id)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(submission)
    }

    async fn insert_submission_with_records(
        &self,
        header: &NewRatingSubmission,
        records: &[NewMatchRating],
    ) -> Result<(RatingSubmission, Vec<MatchRating>)> {
        if records.is_empty() {
            return Err(StorageError::Validation(
                "At least one rating is required".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let insert_submission = format!(
            r#"
            INSERT INTO rating_submissions
                (match_id, team_id, rated_by, home_team_name, away_team_name, caption, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING {}
            "#,
            SUBMISSION_COLUMNS
        );

        let submission = sqlx::query_as::<_, RatingSubmission>(&insert_submission)
            .bind(header.match_id)
            .bind(header.team_id)
            .bind(header.rated_by)
            .bind(&header.home_team_name)
            .bind(&header.away_team_name)
            .bind(&header.caption)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_duplicate)?;

        let mut query = QueryBuilder::new(
            r#"
            INSERT INTO match_ratings
                (submission_id, match_id, team_id, entity_type, entity_id, name, photo, rating, is_mom, position)
            "#,
        );

        query.push_values(records.iter().enumerate(), |mut row, (position, record)| {
            row.push_bind(submission.submission_id)
                .push_bind(header.match_id)
                .push_bind(header.team_id)
                .push_bind(record.entity_type)
                .push_bind(record.entity_id)
                .push_bind(&record.name)
                .push_bind(&record.photo)
                .push_bind(record.rating)
                .push_bind(record.is_mom)
                .push_bind(position as i32);
        });
        query.push(" RETURNING ");
        query.push(RATING_COLUMNS);

        let mut ratings: Vec<MatchRating> = query.build_query_as().fetch_all(&mut *tx).await?;
        ratings.sort_by_key(|r| r.position);

        tx.commit().await?;

        Ok((submission, ratings))
    }

    async fn find_records(&self, match_id: i64, team_id: i64) -> Result<Vec<MatchRating>> {
        let ratings = sqlx::query_as::<_, MatchRating>(
            r#"
            SELECT r.rating_id, r.submission_id, r.match_id, r.team_id, r.entity_type,
                   r.entity_id, r.name, r.photo, r.rating, r.is_mom, r.position, r.created_at
            FROM match_ratings r
            INNER JOIN rating_submissions s ON s.submission_id = r.submission_id
            WHERE r.match_id = $1 AND r.team_id = $2
            ORDER BY s.submitted_at, s.submission_id, r.position
            "#,
        )
        .bind(match_id)
        .bind(team_id)
        .fetch_all(self.pool)
        .await?;

        Ok(ratings)
    }

    async fn count_distinct_users(&self, match_id: i64, team_id: i64) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT rated_by)
            FROM rating_submissions
            WHERE match_id = $1 AND team_id = $2
            "#,
        )
        .bind(match_id)
        .bind(team_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    async fn find_user_submissions(&self, user_id: i64) -> Result<Vec<RatingSubmission>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM rating_submissions
            WHERE rated_by = $1
            ORDER BY submitted_at DESC, submission_id DESC
            "#,
            SUBMISSION_COLUMNS
        );

        let submissions = sqlx::query_as::<_, RatingSubmission>(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        Ok(submissions)
    }

    async fn find_submission_records(&self, submission_ids: &[Uuid]) -> Result<Vec<MatchRating>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM match_ratings
            WHERE submission_id = ANY($1)
            ORDER BY submission_id, position
            "#,
            RATING_COLUMNS
        );

        let ratings = sqlx::query_as::<_, MatchRating>(&sql)
            .bind(submission_ids)
            .fetch_all(self.pool)
            .await?;

        Ok(ratings)
    }

    async fn list_feed(
        &self,
        pagination: &PaginationParams,
    ) -> Result<(Vec<RatingSubmission>, i64)> {
        let total_items = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rating_submissions")
            .fetch_one(self.pool)
            .await?;

        let sql = format!(
            r#"
            SELECT {}
            FROM rating_submissions
            ORDER BY submitted_at DESC, submission_id DESC
            LIMIT $1 OFFSET $2
            "#,
            SUBMISSION_COLUMNS
        );

        let submissions = sqlx::query_as::<_, RatingSubmission>(&sql)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(self.pool)
            .await?;

        Ok((submissions, total_items))
    }

    async fn latest_rated_matches(&self, limit: u32) -> Result<Vec<LatestRatedMatch>> {
        let matches = sqlx::query_as::<_, LatestRatedMatch>(
            r#"
            SELECT
                match_id,
                team_id,
                (ARRAY_AGG(home_team_name ORDER BY submitted_at DESC))[1] AS home_team_name,
                (ARRAY_AGG(away_team_name ORDER BY submitted_at DESC))[1] AS away_team_name,
                COUNT(DISTINCT rated_by) AS total_raters,
                MAX(submitted_at) AS last_submitted_at
            FROM rating_submissions
            GROUP BY match_id, team_id
            ORDER BY last_submitted_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityType;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::fmt;

    #[derive(Debug)]
    struct PgCode(&'static str);

    impl fmt::Display for PgCode {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "postgres error {}", self.0)
        }
    }

    impl std::error::Error for PgCode {}

    impl DatabaseError for PgCode {
        fn message(&self) -> &str {
            "constraint violated"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.0 {
                "23505" => ErrorKind::UniqueViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    #[test]
    fn test_unique_violation_becomes_conflict() {
        let error = map_duplicate(sqlx::Error::Database(Box::new(PgCode("23505"))));
        assert!(matches!(error, StorageError::Conflict(ref msg) if msg == ALREADY_RATED_MESSAGE));
    }

    #[test]
    fn test_other_database_errors_pass_through() {
        let error = map_duplicate(sqlx::Error::Database(Box::new(PgCode("23503"))));
        assert!(matches!(error, StorageError::Database(_)));

        let error = map_duplicate(sqlx::Error::PoolTimedOut);
        assert!(matches!(error, StorageError::Database(sqlx::Error::PoolTimedOut)));
    }

    async fn live_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").unwrap();
        let db = crate::Database::new(&url).await.unwrap();
        db.run_migrations().await.unwrap();
        db.pool().clone()
    }

    fn unique_id() -> i64 {
        (Uuid::new_v4().as_u128() % 1_000_000_000) as i64 + 1
    }

    fn header(match_id: i64, team_id: i64, rated_by: i64, home: &str) -> NewRatingSubmission {
        NewRatingSubmission {
            match_id,
            team_id,
            rated_by,
            home_team_name: Some(home.to_string()),
            away_team_name: Some("Arsenal".to_string()),
            caption: "Solid display".to_string(),
        }
    }

    fn records() -> Vec<NewMatchRating> {
        vec![
            NewMatchRating {
                entity_type: EntityType::Player,
                entity_id: 1100,
                name: "Erling Haaland".to_string(),
                photo: None,
                rating: "8.5".parse().unwrap(),
                is_mom: true,
            },
            NewMatchRating {
                entity_type: EntityType::Coach,
                entity_id: 4,
                name: "Pep Guardiola".to_string(),
                photo: None,
                rating: "7.0".parse().unwrap(),
                is_mom: false,
            },
        ]
    }

    #[tokio::test]
    #[ignore] // Needs DATABASE_URL pointing at a disposable Postgres
    async fn test_duplicate_insert_is_conflict_and_keeps_records() {
        let pool = live_pool().await;
        let repo = MatchRatingRepository::new(&pool);
        let (match_id, team_id) = (unique_id(), 50);

        let (_, inserted) = repo
            .insert_submission_with_records(&header(match_id, team_id, 7, "Man City"), &records())
            .await
            .unwrap();
        assert_eq!(inserted.len(), 2);
        assert_eq!(inserted[0].position, 0);

        let error = repo
            .insert_submission_with_records(&header(match_id, team_id, 7, "Man City"), &records())
            .await
            .unwrap_err();
        assert!(matches!(error, StorageError::Conflict(_)));

        assert_eq!(repo.find_records(match_id, team_id).await.unwrap().len(), 2);
        assert_eq!(repo.count_distinct_users(match_id, team_id).await.unwrap(), 1);
    }

    #[tokio::test]
    #[ignore] // Needs DATABASE_URL pointing at a disposable Postgres
    async fn test_latest_rated_matches_groups_by_match_and_team() {
        let pool = live_pool().await;
        let repo = MatchRatingRepository::new(&pool);
        let (match_id, team_id) = (unique_id(), 50);

        let (first, _) = repo
            .insert_submission_with_records(&header(match_id, team_id, 1, "Man City"), &records())
            .await
            .unwrap();
        let (second, _) = repo
            .insert_submission_with_records(&header(match_id, team_id, 2, "Manchester City"), &records())
            .await
            .unwrap();

        let latest = repo.latest_rated_matches(50).await.unwrap();
        let entry = latest
            .iter()
            .find(|m| m.match_id == match_id && m.team_id == team_id)
            .unwrap();

        assert_eq!(entry.total_raters, 2);
        assert_eq!(
            entry.last_submitted_at,
            first.submitted_at.max(second.submitted_at)
        );
        assert_eq!(
            latest.iter().filter(|m| m.match_id == match_id).count(),
            1
        );
    }
}
