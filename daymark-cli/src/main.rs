//! Daymark CLI — serve, query, and cache management commands.
//!
//! Commands:
//! - `serve` — run the MCP stdio server
//! - `query` — classify a single date from the command line
//! - `cache status` — report artifact year, day count, hash, fetch time
//! - `cache refresh` — force a fetch and overwrite the artifact

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use daymark_core::calendar::DayIndex;
use daymark_core::classify::classify;
use daymark_core::data::{FeedStore, HolidayCache, HttpFeedProvider};
use daymark_core::validate::validate;
use daymark_server::{McpServer, ServerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "daymark", about = "Daymark CLI — holiday calendar lookup service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MCP server over stdio.
    Serve {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Data directory for the cache artifact. Overrides the config file.
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Feed URL template with a {year} placeholder. Overrides the config file.
        #[arg(long)]
        feed_url: Option<String>,
    },
    /// Classify a single date (defaults to today).
    Query {
        /// Date to classify, YYYY-MM-DD.
        date: Option<String>,

        /// Data directory for the cache artifact.
        #[arg(long, default_value = "holiday_data")]
        data_dir: PathBuf,

        /// Feed URL template with a {year} placeholder.
        #[arg(long)]
        feed_url: Option<String>,

        /// Print the raw JSON object instead of the text summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Cache management commands.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Report artifact presence, fetched year, day count, and fetch time.
    Status {
        /// Data directory for the cache artifact.
        #[arg(long, default_value = "holiday_data")]
        data_dir: PathBuf,
    },
    /// Force a fetch for the current year and overwrite the artifact.
    Refresh {
        /// Data directory for the cache artifact.
        #[arg(long, default_value = "holiday_data")]
        data_dir: PathBuf,

        /// Feed URL template with a {year} placeholder.
        #[arg(long)]
        feed_url: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            data_dir,
            feed_url,
        } => run_serve(config, data_dir, feed_url),
        Commands::Query {
            date,
            data_dir,
            feed_url,
            json,
        } => run_query(date, data_dir, feed_url, json),
        Commands::Cache { action } => match action {
            CacheAction::Status { data_dir } => run_cache_status(data_dir),
            CacheAction::Refresh { data_dir, feed_url } => run_cache_refresh(data_dir, feed_url),
        },
    }
}

fn resolve_config(
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    feed_url: Option<String>,
) -> Result<ServerConfig> {
    let mut config = match config_path {
        Some(path) => ServerConfig::from_file(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    if let Some(url) = feed_url {
        config.feed_url = url;
    }
    Ok(config)
}

fn build_cache(data_dir: PathBuf, feed_url: Option<String>) -> Result<HolidayCache> {
    let config = resolve_config(None, Some(data_dir), feed_url)?;
    let store = FeedStore::open(&config.data_dir)
        .with_context(|| format!("opening data dir {}", config.data_dir.display()))?;
    let provider = Arc::new(HttpFeedProvider::with_timeout(
        config.feed_url,
        Duration::from_secs(config.timeout_secs),
    ));
    Ok(HolidayCache::new(store, provider))
}

fn run_serve(
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    feed_url: Option<String>,
) -> Result<()> {
    let config = resolve_config(config_path, data_dir, feed_url)?;
    eprintln!(
        "daymark serving on stdio (data dir: {})",
        config.data_dir.display()
    );
    McpServer::from_config(&config)?.run()
}

fn run_query(
    date: Option<String>,
    data_dir: PathBuf,
    feed_url: Option<String>,
    json: bool,
) -> Result<()> {
    let date = match validate(date.as_deref()) {
        Ok(date) => date,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let cache = build_cache(data_dir, feed_url)?;
    let dataset = cache.get(chrono::Local::now().year())?;
    let info = classify(date, &DayIndex::from_dataset(&dataset));

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{} ({})", info.date, info.weekday_name);
    println!(
        "  holiday: {}",
        if info.is_holiday { "yes" } else { "no" }
    );
    println!(
        "  workday: {}",
        if info.is_workday { "yes" } else { "no" }
    );
    Ok(())
}

fn run_cache_status(data_dir: PathBuf) -> Result<()> {
    let store = FeedStore::open(&data_dir)?;

    match store.meta() {
        Some(meta) => {
            println!("Cache: {}", store.data_dir().display());
            println!("Fetched year: {}", meta.fetched_year);
            println!("Days:         {}", meta.day_count);
            println!("Hash:         {}", meta.data_hash);
            println!("Cached at:    {}", meta.cached_at);
        }
        None => match store.artifact_year() {
            Some(year) => {
                println!("Cache: {} (no sidecar)", store.data_dir().display());
                println!("Year from file time: {year}");
            }
            None => println!("Cache is empty: {}", store.data_dir().display()),
        },
    }
    Ok(())
}

fn run_cache_refresh(data_dir: PathBuf, feed_url: Option<String>) -> Result<()> {
    let cache = build_cache(data_dir, feed_url)?;
    let year = chrono::Local::now().year();

    let dataset = cache.refresh(year)?;
    println!("Refreshed {year}: {} days cached", dataset.len());
    Ok(())
}
