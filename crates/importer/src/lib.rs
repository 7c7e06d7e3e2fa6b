pub mod error;
pub mod sources;
pub mod team_sync;
pub mod traits;

pub use error::{ImporterError, Result};
pub use team_sync::{SyncReport, sync_teams};
pub use traits::{ImportContext, TeamSink, TeamSource};

pub use sources::api_football::{ApiFootballClient, DEFAULT_BASE_URL as API_FOOTBALL_DEFAULT_BASE_URL};
