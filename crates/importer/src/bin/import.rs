use clap::{Parser, Subcommand};
use importer::{API_FOOTBALL_DEFAULT_BASE_URL, ApiFootballClient, ImportContext, sync_teams};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "match-ratings-import")]
#[command(about = "Team reference data importer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(long, env = "API_FOOTBALL_BASE_URL", default_value = API_FOOTBALL_DEFAULT_BASE_URL)]
    api_football_base_url: String,

    #[arg(long, env = "API_FOOTBALL_KEY", hide_env_values = true)]
    api_football_key: String,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch teams by id from API-Football and upsert them
    Teams {
        #[arg(long, default_value_t = 1)]
        from: i64,

        #[arg(long, default_value_t = 32)]
        to: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("import={},importer={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Teams { from, to } => {
            handle_team_sync(
                from,
                to,
                &cli.database_url,
                &cli.api_football_base_url,
                &cli.api_football_key,
            )
            .await?;
        }
    }

    Ok(())
}

async fn handle_team_sync(
    from: i64,
    to: i64,
    database_url: &str,
    base_url: &str,
    api_key: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if from < 1 || from > to {
        return Err(format!("Invalid team id range {}..={}", from, to).into());
    }

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    let context = ImportContext { pool };

    let client = ApiFootballClient::new(base_url, api_key)?;

    tracing::info!("Syncing teams {}..={} from {}", from, to, base_url);
    let report = sync_teams(&client, &context, from..=to).await;

    tracing::info!(
        "Summary: {} stored, {} unknown, {} failed",
        report.stored,
        report.missing.len(),
        report.failed.len()
    );

    if !report.is_success() {
        return Err(format!("{} team id(s) failed to import", report.failed.len()).into());
    }

    tracing::info!("Teams have been successfully fetched and stored");

    Ok(())
}
