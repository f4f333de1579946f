//! logsim - synthetic log generator
//!
//! Usage:
//!   logsim serve --port 5000 --log-dir logs
//!   logsim serve --rotation hourly
//!   logsim sample --category access --count 5

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;

use logsim::api::{AppState, build_router, print_api_docs};
use logsim::{EmissionLoop, RateStore, Rotation, SimConfig, SimError, generate_named};

#[derive(Parser)]
#[command(name = "logsim")]
#[command(about = "Rate-controlled synthetic log generator with an HTTP control surface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the emission loop and the HTTP control surface
    Serve {
        /// Host to bind to
        #[arg(long, env = "LOGSIM_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "LOGSIM_PORT", default_value = "5000")]
        port: u16,

        /// Directory for the per-category log files
        #[arg(long, env = "LOGSIM_LOG_DIR", default_value = "logs")]
        log_dir: PathBuf,

        /// File rotation: never or hourly
        #[arg(long, env = "LOGSIM_ROTATION", default_value = "never")]
        rotation: Rotation,

        /// Pause after a pass with nothing to emit, in milliseconds
        #[arg(long, env = "LOGSIM_IDLE_MS", default_value = "100")]
        idle_ms: u64,
    },

    /// Print synthesized lines to stdout
    Sample {
        /// system, error, application or access
        #[arg(short, long)]
        category: String,

        /// Number of lines
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            log_dir,
            rotation,
            idle_ms,
        } => {
            let config = SimConfig {
                host,
                port,
                log_dir,
                rotation,
                idle_interval_ms: idle_ms,
            };
            run_serve(config).await
        }
        Commands::Sample { category, count } => run_sample(&category, count),
    }
}

async fn run_serve(config: SimConfig) -> anyhow::Result<()> {
    let addr = config.bind_addr()?;
    let idle_interval = config.idle_interval()?;

    let store = RateStore::new();
    let engine = EmissionLoop::new(store.clone(), config.file_sink())
        .with_idle_interval(idle_interval);
    let stats = engine.stats();
    let cancel = engine.cancellation();
    let loop_handle = engine.spawn();

    let app = build_router(AppState::new(store, stats));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| SimError::io(format!("bind {addr}"), e))?;

    print_api_docs(&config);
    info!(%addr, log_dir = %config.log_dir.display(), "logsim listening");

    let shutdown = cancel.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(error) = tokio::signal::ctrl_c().await {
                tracing::error!(%error, "failed to listen for ctrl-c");
            }
            info!("shutting down");
            shutdown.cancel();
        })
        .await
        .map_err(|e| SimError::io("serve HTTP", e))?;

    // Stop the loop even if the server exited on its own
    cancel.cancel();
    loop_handle.await.context("emission loop panicked")?;
    info!("emission loop drained, bye");
    Ok(())
}

fn run_sample(category: &str, count: usize) -> anyhow::Result<()> {
    for _ in 0..count {
        let line = generate_named(category)
            .with_context(|| format!("cannot sample category {category:?}"))?;
        println!("{line}");
    }
    Ok(())
}
