use std::ops::RangeInclusive;

use tracing::{debug, error, info};

use crate::traits::{TeamSink, TeamSource};

/// Outcome of one sync run over a range of team ids
#[derive(Debug, Default)]
pub struct SyncReport {
    pub stored: usize,
    pub missing: Vec<i64>,
    pub failed: Vec<(i64, String)>,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Fetches every id in `ids` from `source` and upserts the known teams into
/// `sink`. A failing id is recorded and the run continues with the next one.
pub async fn sync_teams<S, K>(source: &S, sink: &K, ids: RangeInclusive<i64>) -> SyncReport
where
    S: TeamSource + ?Sized,
    K: TeamSink + ?Sized,
{
    let mut report = SyncReport::default();

    for team_id in ids {
        let team = match source.fetch_team(team_id).await {
            Ok(Some(team)) => team,
            Ok(None) => {
                debug!("{} has no team with id {}", source.name(), team_id);
                report.missing.push(team_id);
                continue;
            }
            Err(e) => {
                error!("Failed to fetch team {}: {}", team_id, e);
                report.failed.push((team_id, e.to_string()));
                continue;
            }
        };

        match sink.upsert_team(&team).await {
            Ok(()) => {
                info!(
                    "Stored team {} ({}, national: {})",
                    team.team_id, team.name, team.is_national
                );
                report.stored += 1;
            }
            Err(e) => {
                error!("Failed to store team {}: {}", team_id, e);
                report.failed.push((team_id, e.to_string()));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ImporterError, Result};
    use std::sync::Mutex;
    use storage::{StorageError, models::UpsertTeam};

    struct FakeSource;

    #[async_trait::async_trait]
    impl TeamSource for FakeSource {
        async fn fetch_team(&self, team_id: i64) -> Result<Option<UpsertTeam>> {
            match team_id {
                3 => Err(ImporterError::ApiError("rateLimit: Too many requests".into())),
                5 => Ok(None),
                id => Ok(Some(UpsertTeam {
                    team_id: id,
                    name: format!("Team {}", id),
                    is_national: id % 2 == 0,
                    country: "Somewhere".to_string(),
                })),
            }
        }

        fn name(&self) -> &'static str {
            "fake"
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        teams: Mutex<Vec<UpsertTeam>>,
        reject: Option<i64>,
    }

    #[async_trait::async_trait]
    impl TeamSink for RecordingSink {
        async fn upsert_team(&self, team: &UpsertTeam) -> Result<()> {
            if self.reject == Some(team.team_id) {
                return Err(ImporterError::StorageError(StorageError::Validation(
                    "name too long".into(),
                )));
            }
            self.teams.lock().unwrap().push(team.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_sync_stores_known_teams_and_counts_failures() {
        let sink = RecordingSink::default();

        let report = sync_teams(&FakeSource, &sink, 1..=6).await;

        assert_eq!(report.stored, 4);
        assert_eq!(report.missing, vec![5]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, 3);
        assert!(!report.is_success());

        let ids: Vec<i64> = sink.teams.lock().unwrap().iter().map(|t| t.team_id).collect();
        assert_eq!(ids, vec![1, 2, 4, 6]);
    }

    #[tokio::test]
    async fn test_sink_failure_does_not_stop_the_run() {
        let sink = RecordingSink {
            reject: Some(1),
            ..Default::default()
        };

        let report = sync_teams(&FakeSource, &sink, 1..=2).await;

        assert_eq!(report.stored, 1);
        assert_eq!(
            report.failed,
            vec![(
                1,
                "Storage error: Validation error: name too long".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_clean_run_is_success() {
        let sink = RecordingSink::default();
        let report = sync_teams(&FakeSource, &sink, 6..=6).await;
        assert!(report.is_success());
        assert_eq!(report.stored, 1);
    }
}
