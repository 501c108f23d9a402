use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use wikiart_fetch::{CheckScope, FetchConfig, Fetcher, WikiArtClient};
use wikiart_model::ArtistGroup;

#[derive(Parser)]
#[command(name = "wikiart")]
#[command(about = "WikiArt metadata and image dataset fetch tool")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    /// Root output directory (meta/, dataset/, metadata.csv)
    #[arg(long, global = true, default_value = "wikiart")]
    base_dir: PathBuf,

    /// Pre-seeded curated dataset; matching files suppress downloads
    #[arg(long, global = true, default_value = "raw")]
    raw_dir: PathBuf,

    /// Do not persist fetched metadata to disk
    #[arg(long, global = true)]
    no_commit: bool,

    /// Ignore caches and existing files; re-fetch and re-download
    #[arg(long = "override", global = true)]
    override_existing: bool,

    /// Minimum delay between outbound requests, in milliseconds
    #[arg(long, global = true, default_value_t = 1000)]
    pace_ms: u64,

    /// Curated style group; output is scoped under <BASE_DIR>/<GROUP>.
    /// The slug is validated against the known group set.
    #[arg(long, global = true)]
    group: Option<ArtistGroup>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch everything: artists, painting metadata, then every image
    Fetch,

    /// Fetch the artist listing only
    Artists,

    /// Fetch metadata and images for artists matching a name substring
    Artist {
        /// Case-insensitive substring of the artist name (e.g., "monet")
        name: String,
    },

    /// List the valid curated style group slugs
    Groups,

    /// Audit the on-disk data and report missing files
    Check {
        /// Scope of the audit
        #[arg(long, default_value = "all", value_enum)]
        only: CheckOnly,
    },

    /// Exchange an access/secret code pair for a session key
    Login {
        /// Access code from the WikiArt API registration page
        #[arg(long)]
        access_code: String,

        /// Secret code from the WikiArt API registration page
        #[arg(long)]
        secret_code: String,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum CheckOnly {
    Artists,
    Paintings,
    All,
}

impl From<CheckOnly> for CheckScope {
    fn from(only: CheckOnly) -> Self {
        match only {
            CheckOnly::Artists => CheckScope::Artists,
            CheckOnly::Paintings => CheckScope::Paintings,
            CheckOnly::All => CheckScope::All,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug,hyper=warn,reqwest=info",
        LogLevel::Trace => "trace,hyper=warn,reqwest=info",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    let base_dir = match cli.group {
        Some(group) => cli.base_dir.join(group.as_slug()),
        None => cli.base_dir,
    };
    let config = FetchConfig {
        base_dir,
        raw_dir: cli.raw_dir,
        commit: !cli.no_commit,
        override_existing: cli.override_existing,
        pacing: Duration::from_millis(cli.pace_ms),
        ..FetchConfig::default()
    };

    match cli.command {
        Commands::Fetch => {
            let mut fetcher = Fetcher::new(config)?;
            fetcher.prepare()?;
            let stats = fetcher.fetch_all().await?;
            tracing::info!(
                saved = stats.saved,
                skipped = stats.skipped,
                failed = stats.failed,
                "Fetch complete"
            );
        }
        Commands::Artists => {
            let mut fetcher = Fetcher::new(config)?;
            fetcher.prepare()?;
            fetcher.fetch_artists().await;
            tracing::info!(artists = fetcher.artists().len(), "Artist listing loaded");
        }
        Commands::Artist { name } => {
            let mut fetcher = Fetcher::new(config)?;
            fetcher.prepare()?;
            fetcher.fetch_artists().await;
            fetcher.fetch_artist(&name).await?;
            let paintings: usize = fetcher.painting_groups().iter().map(|g| g.len()).sum();
            tracing::info!(
                groups = fetcher.painting_groups().len(),
                paintings,
                "Painting metadata loaded"
            );
            let stats = fetcher.copy_everything().await?;
            tracing::info!(
                saved = stats.saved,
                skipped = stats.skipped,
                failed = stats.failed,
                "Artist fetch complete"
            );
        }
        Commands::Groups => {
            for group in ArtistGroup::ALL {
                println!("{group}");
            }
        }
        Commands::Check { only } => {
            let mut fetcher = Fetcher::new(config)?;
            // The audit reports what is on disk; nothing is fetched
            fetcher.load_cached_state();
            let report = fetcher.check(only.into());
            if report.is_clean() {
                tracing::info!("All expected files are present");
            } else {
                tracing::warn!(
                    missing_meta = report.missing_painting_meta.len(),
                    missing_images = report.missing_images.len(),
                    artists_index_missing = report.artists_index_missing,
                    "Data is incomplete"
                );
            }
        }
        Commands::Login { access_code, secret_code } => {
            let client = WikiArtClient::new(&config)?;
            let session_key = client.login(&access_code, &secret_code).await?;
            tracing::info!("Login succeeded");
            println!("{session_key}");
        }
    }

    Ok(())
}
