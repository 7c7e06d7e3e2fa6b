use axum::{Router, routing::get};
use storage::Database;

use super::handlers::list_national_teams;

pub fn routes() -> Router<Database> {
    Router::new().route("/national", get(list_national_teams))
}
