use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{
    get_feed, get_latest_rated_matches, get_my_national_rating, get_my_rating, get_summary,
    submit_ratings,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .route("/", post(submit_ratings))
        .route("/summary", get(get_summary))
        .route("/feed", get(get_feed))
        .route("/latest-matches", get(get_latest_rated_matches))
        .route("/my-rating", get(get_my_rating))
        .route("/my-national-rating", get(get_my_national_rating))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
