//! tablecache - browse restaurants, favorites and reviews from the terminal.
//!
//! Data is read through a local cache so everything keeps working offline;
//! reviews written while offline are queued and delivered by `sync`.

mod command;
mod utils;
mod view;

use std::io;

use anyhow::{bail, Result};
use clap::Parser;
use tablecache_core::helper::parse_filter;
use tablecache_core::{Config, DataHelper, HelperError};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use command::{Cli, Command, ConfigArgs};

/// Overrides the server address from the config file
const API_URL_ENV: &str = "TABLECACHE_API_URL";

/// Prefix of the daily log files written to the cache directory
const LOG_FILE_PREFIX: &str = "tablecache.log";

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr; with `log_to_file` they are also written to a daily
/// rolling file. The returned guard must live until exit to flush it.
fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match config.log_to_file.then(|| config.cache_dir()) {
        Some(Ok(dir)) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let command = Cli::parse().into_command();

    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let _log_guard = init_tracing(&config);

    if let Command::Config(args) = command {
        if let Some(e) = config_error {
            // Saving now would replace the unreadable file with defaults
            if args.has_changes() {
                return Err(e);
            }
            warn!(error = %e, "Failed to load config, showing defaults");
        }
        return configure(config, args);
    }
    if let Some(e) = config_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }
    if let Ok(url) = std::env::var(API_URL_ENV) {
        config.api_base_url = Some(url);
    }

    let helper = DataHelper::from_config(&config)?;
    info!(?command, server = config.base_url(), "Running command");
    run(command, &helper, &config).await
}

/// Print the settings from the config file, saving any requested changes first.
///
/// Works on the file as stored, without the environment override.
fn configure(mut config: Config, args: ConfigArgs) -> Result<()> {
    let path = Config::config_path()?;
    if args.has_changes() {
        args.apply(&mut config);
        config.save()?;
        info!(path = %path.display(), "Config saved");
    }
    println!("{}", view::settings(&path.display().to_string(), &config));
    Ok(())
}

async fn run(command: Command, helper: &DataHelper, config: &Config) -> Result<()> {
    match command {
        Command::List {
            cuisine,
            neighborhood,
        } => {
            let restaurants = helper
                .fetch_restaurants_by_cuisine_and_neighborhood(
                    parse_filter(&cuisine),
                    parse_filter(&neighborhood),
                )
                .await?;
            println!("{}", view::restaurant_list(&restaurants));
        }
        Command::Show { id } => {
            let restaurant = helper.fetch_restaurant_by_id(id).await?;
            let reviews = match helper.fetch_restaurant_reviews(id).await {
                Ok(reviews) => reviews,
                Err(e) => {
                    warn!(error = %e, "Reviews unavailable");
                    Vec::new()
                }
            };
            println!("{}", view::restaurant_detail(&restaurant, &reviews));
        }
        Command::Cuisines => {
            for cuisine in helper.fetch_cuisines().await? {
                println!("{}", cuisine);
            }
        }
        Command::Neighborhoods => {
            for neighborhood in helper.fetch_neighborhoods().await? {
                println!("{}", neighborhood);
            }
        }
        Command::Favorites => {
            let favorites = helper.fetch_favorites().await?;
            println!("{}", view::restaurant_list(&favorites));
        }
        Command::Favorite { id } => {
            let toggle = helper.toggle_favorite(id).await?;
            let is_favorite = toggle.is_favorite;
            let label = if is_favorite { "Marked" } else { "Unmarked" };
            match toggle.confirm().await {
                Ok(_) => println!("{} restaurant {} as favorite.", label, id),
                Err(HelperError::Remote(e)) => println!(
                    "{} restaurant {} as favorite locally; the server was not updated ({}).",
                    label, id, e
                ),
                Err(e) => return Err(e.into()),
            }
        }
        Command::Review(args) => {
            let review = helper.stage_review(args.into()).await?;
            println!("Saved review #{} for restaurant {}.", review.id, review.restaurant_id);
            let report = helper.sync().await?;
            println!("{}", view::sync_summary(&report));
        }
        Command::Pending => {
            println!("{}", view::pending_list(&helper.pending_reviews()?));
        }
        Command::Sync => {
            let report = helper.sync().await?;
            println!("{}", view::sync_summary(&report));
        }
        Command::Status => {
            println!("{}", view::status(config.base_url(), &helper.store().ages()));
        }
        Command::Reload => {
            helper.store().clear_cached()?;
            let restaurants = helper.fetch_restaurants().await?;
            let reviews = helper.fetch_reviews().await?;
            let favorites = helper.fetch_favorites().await?;
            println!(
                "Reloaded {} restaurants, {} reviews and {} favorites.",
                restaurants.len(),
                reviews.len(),
                favorites.len()
            );
        }
        Command::Config(_) => bail!("config is handled before the helper is built"),
    }
    Ok(())
}
