use serde::{Deserialize, Serialize};
use storage::models::UpsertTeam;

/// Envelope of `GET /teams`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TeamsResponse {
    /// An empty array on success, an object keyed by field otherwise
    #[serde(default)]
    pub errors: serde_json::Value,
    #[serde(default)]
    pub response: Vec<TeamEntry>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TeamEntry {
    pub team: ApiTeam,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiTeam {
    pub id: i64,
    pub name: String,
    pub national: Option<bool>,
    pub country: Option<String>,
}

impl TeamsResponse {
    /// Error messages reported in the body, if any
    pub fn error_messages(&self) -> Vec<String> {
        match &self.errors {
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(key, value)| match value.as_str() {
                    Some(message) => format!("{}: {}", key, message),
                    None => format!("{}: {}", key, value),
                })
                .collect(),
            serde_json::Value::Array(items) => items.iter().map(|v| v.to_string()).collect(),
            _ => Vec::new(),
        }
    }

    pub fn into_first_team(self) -> Option<UpsertTeam> {
        self.response.into_iter().next().map(|entry| entry.team.into())
    }
}

impl From<ApiTeam> for UpsertTeam {
    fn from(team: ApiTeam) -> Self {
        Self {
            team_id: team.id,
            name: team.name,
            is_national: team.national.unwrap_or(false),
            country: team.country.unwrap_or_default(),
        }
    }
}
