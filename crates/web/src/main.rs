use anyhow::Context;
use storage::Database;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod routes;

use config::Config;
use features::{match_ratings, teams};
use middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        match_ratings::handlers::submit_ratings,
        match_ratings::handlers::get_summary,
        match_ratings::handlers::get_feed,
        match_ratings::handlers::get_latest_rated_matches,
        match_ratings::handlers::get_my_rating,
        match_ratings::handlers::get_my_national_rating,
        teams::handlers::list_national_teams,
    ),
    components(
        schemas(
            storage::dto::match_rating::SubmitRatingsRequest,
            storage::dto::match_rating::RatingEntryRequest,
            storage::dto::match_rating::RatingResponse,
            storage::dto::match_rating::SubmissionResponse,
            storage::dto::match_rating::EntityAverageResponse,
            storage::dto::match_rating::TopPlayerResponse,
            storage::dto::match_rating::RatingSummaryResponse,
            storage::dto::match_rating::MyRatingResponse,
            storage::dto::match_rating::FeedEntry,
            storage::dto::match_rating::LatestRatedMatch,
            storage::dto::team::TeamResponse,
            storage::dto::common::PaginationMeta,
            storage::models::EntityType,
            storage::models::TeamClassification,
        )
    ),
    tags(
        (name = "match-ratings", description = "Community player and coach ratings"),
        (name = "teams", description = "Team reference data"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting match ratings API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::with_max_connections(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("API_KEYS is empty, every protected route will answer 401");
    }

    let app = routes::api_router(db, api_keys)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app).await?;

    Ok(())
}
