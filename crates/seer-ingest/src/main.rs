//! Seer Ingest - reference catalog loader

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use seer_common::logging::{init_logging, LogConfig, LogLevel};
use seer_ingest::config::Config;
use seer_ingest::db;
use seer_ingest::linguist::{
    HttpCatalogFetcher, LinguistPipeline, PgCatalogStore, ProjectionOptions,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "seer-ingest")]
#[command(author, version, about = "Seer reference catalog loader")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply schema migrations, then load the language catalog into an empty table
    Migrate(MigrateArgs),
}

#[derive(Args, Debug)]
struct MigrateArgs {
    /// URL of Linguist's languages.yml
    #[arg(long = "linguist-language-remote-path")]
    linguist_url: Option<String>,

    /// Deadline for the whole catalog load, in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Store types and interpreters exactly as the catalog publishes them
    #[arg(long)]
    fix_legacy_shims: bool,

    /// Skip schema migrations
    #[arg(long)]
    skip_schema: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables take precedence over flags
    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("seer-ingest")
        .build()
        .merge_env()?;

    let _guard = init_logging(&log_config)?;

    let mut config = Config::load().context("Failed to load configuration")?;

    match cli.command {
        Command::Migrate(args) => {
            if let Some(url) = args.linguist_url {
                config.linguist.remote_url = url;
            }
            if let Some(timeout_ms) = args.timeout_ms {
                config.timeout_ms = timeout_ms;
            }
            if args.fix_legacy_shims {
                config.linguist.projection = ProjectionOptions::catalog_faithful();
            }
            config.validate().context("Invalid configuration")?;

            migrate(&config, args.skip_schema).await?;
        },
    }

    info!("Ingestion complete");
    Ok(())
}

async fn migrate(config: &Config, skip_schema: bool) -> Result<()> {
    let pool = db::create_pool(&config.database)
        .await
        .context("Failed to connect to database")?;

    if skip_schema {
        info!("Skipping schema migrations");
    } else {
        db::run_migrations(&pool).await?;
    }

    let store = PgCatalogStore::new(pool.clone());
    let fetcher = HttpCatalogFetcher::default();

    info!(url = %config.linguist.remote_url, timeout_ms = config.timeout_ms, "Loading language catalog");
    let result = LinguistPipeline::new(&store, &fetcher, &config.linguist)
        .run_with_deadline(config.timeout())
        .await;

    pool.close().await;

    let outcome = result.context("Language catalog load failed")?;
    info!("{}", outcome.summary());
    Ok(())
}
