use super::models::TeamsResponse;
use crate::error::{ImporterError, Result};

pub const DEFAULT_BASE_URL: &str = "https://v3.football.api-sports.io/";

const API_KEY_HEADER: &str = "x-apisports-key";

pub struct ApiFootballClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl ApiFootballClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
            client: reqwest::Client::builder()
                .user_agent(concat!("match-ratings-importer/", env!("CARGO_PKG_VERSION")))
                .build()?,
        })
    }

    pub fn teams_url(&self) -> String {
        format!("{}teams", self.base_url)
    }

    pub async fn fetch_teams(&self, team_id: i64) -> Result<TeamsResponse> {
        let response = self
            .client
            .get(self.teams_url())
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("id", team_id)])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let data: TeamsResponse = serde_json::from_str(&body)?;

        let errors = data.error_messages();
        if !errors.is_empty() {
            return Err(ImporterError::ApiError(errors.join(", ")));
        }

        Ok(data)
    }
}
