use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finals_stats::api::state::AppState;
use finals_stats::api::{build_router, cors_layer};
use finals_stats::calculate::{compute_statistics, statistics_by_linked_account};
use finals_stats::config::AppConfig;
use finals_stats::dashboard::render::{platform_card, rank_table, render_snapshot, render_statistics};
use finals_stats::dashboard::{self, DashboardSnapshot, LoadStatus, LOAD_FAILED_PREFIX};
use finals_stats::fetch::{fetch_all, LeaderboardClient, LeaderboardSource};
use finals_stats::models::Platform;

#[derive(Parser)]
#[command(name = "finals-stats")]
#[command(about = "THE FINALS leaderboard statistics per platform")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all four leaderboards and print per-platform statistics
    Stats {
        /// Only show this platform (crossplay, steam, psn, xbox)
        #[arg(long)]
        platform: Option<Platform>,

        /// Players listed per platform (default from config)
        #[arg(long)]
        limit: Option<usize>,

        /// Print statistics as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Fetch one leaderboard and list its players
    Players {
        #[arg(long)]
        platform: Platform,

        /// Max players to list (default from config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Statistics by linked account name over all four leaderboards combined
    Linked {
        /// Print statistics as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the rank catalog
    Ranks,

    /// Start the dashboard API server
    Serve {
        /// Bind address (default from config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (default from config)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    // Initialize tracing
    let log_level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::debug!("Starting finals-stats v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Stats {
            platform,
            limit,
            json,
        } => {
            let client = build_client(&config)?;
            let list_limit = limit.unwrap_or(config.dashboard.list_limit);
            let snapshot = dashboard::refresh(&DashboardSnapshot::new(list_limit), &client).await;

            if snapshot.status == LoadStatus::Failed {
                bail!(snapshot
                    .error
                    .unwrap_or_else(|| LOAD_FAILED_PREFIX.to_string()));
            }

            let platforms: Vec<Platform> = match platform {
                Some(p) => vec![p],
                None => Platform::ALL.to_vec(),
            };

            if json {
                let stats: BTreeMap<_, _> = platforms
                    .iter()
                    .map(|&p| (p, snapshot.statistics(p).cloned().unwrap_or_default()))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", render_snapshot(&snapshot, &platforms));
            }
        }
        Commands::Players { platform, limit } => {
            let client = build_client(&config)?;
            let players = client
                .fetch_platform(platform)
                .await
                .with_context(|| format!("Failed to load {} leaderboard", platform))?;

            let limit = limit.unwrap_or(config.dashboard.list_limit);
            let shown = &players[..players.len().min(limit)];
            print!(
                "{}",
                platform_card(platform, &compute_statistics(&players), shown)
            );
            if shown.len() < players.len() {
                println!("  ({} of {} players shown)", shown.len(), players.len());
            }
        }
        Commands::Linked { json } => {
            let client = build_client(&config)?;
            let combined: Vec<_> = fetch_all(&client)
                .await
                .context(LOAD_FAILED_PREFIX)?
                .iter()
                .flat_map(|(_, players)| players.iter().cloned())
                .collect();

            tracing::info!("Separating {} players by linked account", combined.len());
            let stats = statistics_by_linked_account(&combined);
            let platforms: Vec<Platform> = Platform::ALL
                .into_iter()
                .filter(Platform::has_account_names)
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{}", render_statistics(&stats, &platforms));
            }
        }
        Commands::Ranks => {
            print!("{}", rank_table());
        }
        Commands::Serve { host, port } => {
            let client = build_client(&config)?;
            let state = AppState::new(Arc::new(client), config.dashboard.list_limit);

            let interval = config
                .dashboard
                .refresh_interval()
                .unwrap_or(Duration::from_secs(600));
            let refresher = state.clone();
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                loop {
                    ticker.tick().await;
                    let snapshot = refresher.refresh().await;
                    tracing::info!("Refresh finished: {:?}", snapshot.status);
                }
            });

            let app = build_router(state).layer(cors_layer(&config.server.cors_origin));
            let addr = format!(
                "{}:{}",
                host.unwrap_or_else(|| config.server.host.clone()),
                port.unwrap_or(config.server.port)
            );
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard API: http://{}/api/dashboard", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

fn build_client(config: &AppConfig) -> Result<LeaderboardClient> {
    let client_config = config.api.client_config()?;
    Ok(LeaderboardClient::new(client_config)?)
}
