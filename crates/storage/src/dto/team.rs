use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common::PaginationParams;
use crate::models::Team;

#[derive(Debug, Deserialize, IntoParams)]
pub struct NationalTeamsFilter {
    /// Case-insensitive substring of the team name
    pub search: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

impl NationalTeamsFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.page_size)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.pagination().validate()?;

        if let Some(ref search) = self.search
            && search.chars().count() > 100
        {
            return Err("search must be at most 100 characters".to_string());
        }

        Ok(())
    }

    /// Trimmed search term, `None` when blank
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamResponse {
    pub team_id: i64,
    pub name: String,
    pub is_national: bool,
    pub country: String,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            team_id: team.team_id,
            name: team.name,
            is_national: team.is_national,
            country: team.country,
        }
    }
}
