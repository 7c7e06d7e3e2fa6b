use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Kind of rated entity. Mirrors the `entity_type` Postgres enum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "entity_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Coach,
    Player,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coach => "coach",
            Self::Player => "player",
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self, Self::Player)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
