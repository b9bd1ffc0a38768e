mod explore;
mod profile;

use clap::{Args, Parser, Subcommand};
use infldb_core::{AppConfig, ProfileFilter, ProfileSet, DEFAULT_MAX_FOLLOWERS};
use infldb_ingest::{IngestError, ProfileLoader, SourceClient};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "infldb-cli")]
#[command(about = "Browse and filter the creator directory")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List profiles matching the given filters
    Explore(ExploreArgs),
    /// Show one profile, addressed by composite id and platform
    Show(LookupArgs),
    /// Show monthly performance analytics for one profile
    Performance(LookupArgs),
    /// Print the effective source list
    Sources,
}

#[derive(Debug, Args)]
struct ExploreArgs {
    /// Substring matched against each tag (case-insensitive)
    #[arg(long)]
    niche: Option<String>,
    /// Substring matched against each tag, independently of --niche
    #[arg(long)]
    tags: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long, default_value_t = 0)]
    min_followers: u64,
    #[arg(long, default_value_t = DEFAULT_MAX_FOLLOWERS)]
    max_followers: u64,
    #[arg(long)]
    platform: Option<String>,
    #[arg(long, default_value_t = 25)]
    limit: usize,
    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl ExploreArgs {
    fn to_filter(&self) -> ProfileFilter {
        ProfileFilter {
            niche: self.niche.clone().unwrap_or_default(),
            tags: self.tags.clone().unwrap_or_default(),
            location: self.location.clone().unwrap_or_default(),
            min_followers: self.min_followers,
            max_followers: self.max_followers,
            platform: self.platform.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Args)]
struct LookupArgs {
    /// Composite id (platform offset + base id)
    #[arg(long)]
    id: u32,
    #[arg(long)]
    platform: String,
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse first so `--help` works even when the environment is misconfigured.
    let cli = Cli::parse();

    let config = infldb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Explore(args) => explore::run_explore(&config, &args).await,
        Commands::Show(args) => profile::run_show(&config, &args).await,
        Commands::Performance(args) => profile::run_performance(&config, &args).await,
        Commands::Sources => explore::run_sources(&config),
    }
}

/// Loads every configured source, giving up on Ctrl-C.
pub(crate) async fn load_profiles(config: &AppConfig) -> anyhow::Result<ProfileSet> {
    let sources = infldb_core::load_sources_or_default(&config.sources_path)?;
    let client = SourceClient::from_config(config)?;
    let loader = ProfileLoader::new(client, sources.sources);

    match loader.load_all_until(ctrl_c()).await {
        Ok(set) => Ok(set),
        Err(IngestError::Cancelled) => anyhow::bail!("interrupted before all sources loaded"),
        Err(e) => Err(anyhow::anyhow!("failed to load profiles: {e}")),
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for ctrl-c; loading without interruption");
        std::future::pending::<()>().await;
    }
}
