pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;

use std::sync::Arc;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;
use services::RecordOutcome;
use state::SharedState;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let builder = PrometheusBuilder::new();
        let handle = builder
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        info!("Prometheus metrics recorder initialized");
        Some(handle)
    } else {
        None
    };

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let mut log_level = config.general.log_level.clone();
    if config.general.suppress_connection_errors {
        log_level.push_str(",reqwest::retry=off,hyper_util=off");
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let fmt_layer = tracing_subscriber::fmt::layer();

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    if config.observability.loki_enabled {
        let url = url::Url::parse(&config.observability.loki_url).context("Invalid Loki URL")?;

        let (layer, task) = tracing_loki::builder()
            .label("app", "flickarr")?
            .extra_field("env", "production")?
            .build_url(url)?;

        tokio::spawn(task);

        registry.with(layer).init();
        info!(
            "Loki logging initialized at {}",
            config.observability.loki_url
        );
    } else {
        registry.init();
    }

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_long_help()?;
        return Ok(());
    };

    match command {
        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists.");
            }
            Ok(())
        }

        Commands::Daemon => {
            config.validate()?;
            run_daemon(config, prometheus_handle).await
        }

        Commands::Search { query } => {
            config.validate()?;
            let query = query.join(" ");
            cmd_search(&config, &query).await
        }

        Commands::Trending { limit } => {
            config.validate()?;
            cmd_trending(&config, limit).await
        }
    }
}

async fn run_daemon(
    config: Config,
    prometheus_handle: Option<metrics_exporter_prometheus::PrometheusHandle>,
) -> anyhow::Result<()> {
    info!(
        "Flickarr v{} starting in daemon mode...",
        env!("CARGO_PKG_VERSION")
    );

    if !config.server.enabled {
        anyhow::bail!("Server is disabled in config.toml; nothing to run");
    }

    let shared = Arc::new(SharedState::new(config.clone())?);
    let api_state = api::create_app_state(shared, prometheus_handle);

    let port = config.server.port;
    info!("Starting Web API on port {}", port);

    let app = api::router(api_state);
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let server_handle = tokio::spawn(async move {
        info!("🌐 Web Server running at http://0.0.0.0:{}", port);
        if let Err(e) = axum::serve(listener, app).await {
            error!("Web server error: {}", e);
        }
    });

    info!("Daemon running. Press Ctrl+C to stop.");

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            error!("Error listening for shutdown: {}", e);
        }
    }

    server_handle.abort();
    info!("Daemon stopped");

    Ok(())
}

async fn cmd_search(config: &Config, query: &str) -> anyhow::Result<()> {
    println!("Searching for: {}", query);

    let shared = SharedState::new(config.clone())?;
    let movies = shared.tmdb.search_movies(query).await?;

    if movies.is_empty() {
        println!("No movies found matching '{}'", query);
        return Ok(());
    }

    println!();
    println!("Search Results:");
    println!("{:-<60}", "");

    for (i, movie) in movies.iter().enumerate().take(10) {
        let year = movie
            .release_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .unwrap_or("?");
        let rating = movie
            .vote_average
            .map(|v| format!("{v:.1}"))
            .unwrap_or_else(|| "?".to_string());

        println!("[{}] {} ({})", i + 1, movie.title, year);
        println!("    Rating: {} | ID: {}", rating, movie.id);
        println!();
    }

    if let Some(metrics) = &shared.metrics_service
        && let Some(first) = movies.first()
    {
        match metrics.record_search(query, first).await {
            Ok(RecordOutcome::Inserted) => {
                println!("Recorded first search of '{}'.", query);
            }
            Ok(RecordOutcome::Incremented { count }) => {
                println!("'{}' has now been searched {} times.", query, count);
            }
            Err(e) => println!("Warning: failed to record search metric: {}", e),
        }
    }

    Ok(())
}

async fn cmd_trending(config: &Config, limit: usize) -> anyhow::Result<()> {
    let shared = SharedState::new(config.clone())?;

    let Some(metrics) = &shared.metrics_service else {
        println!("Search metrics are disabled in config.toml.");
        return Ok(());
    };

    let rows = metrics.trending(limit).await?;

    if rows.is_empty() {
        println!("No searches recorded yet.");
        return Ok(());
    }

    println!("Top {} search terms", rows.len());
    println!("{:-<60}", "");

    for (i, row) in rows.iter().enumerate() {
        println!("[{}] {} ({} searches)", i + 1, row.search_term, row.count);
        println!("    Movie ID: {}", row.movie_id);
    }

    Ok(())
}
