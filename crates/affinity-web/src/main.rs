//! Affinity web server
//!
//! Run with: cargo run -p affinity-web -- --model-path model/qsar_model.pkl

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use affinity_chem::RdkitToolkit;
use affinity_common::AppConfig;
use affinity_web::{router::build_router, state::AppState};

#[derive(Debug, Parser)]
#[command(name = "affinity-web", about = "pKi / Ki prediction service", version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "AFFINITY_CONFIG")]
    config: Option<PathBuf>,

    /// Model artifact (overrides the configuration file)
    #[arg(long)]
    model_path: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:5000
    #[arg(long)]
    bind: Option<String>,

    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Exit instead of serving without a model
    #[arg(long)]
    require_model: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("affinity=debug,tower_http=info,info")),
        )
        .init();

    let args = Args::parse();
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(path) = args.model_path {
        config.model_path = path;
    }
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }
    if let Some(dir) = args.static_dir {
        config.static_dir = dir;
    }
    config.require_model |= args.require_model;

    info!("Starting affinity web server...");
    info!(
        model_path = %config.model_path.display(),
        static_dir = %config.static_dir.display(),
        require_model = config.require_model,
        "Configuration loaded"
    );

    let chem = RdkitToolkit::init().context("RDKit is not importable by the embedded Python interpreter")?;
    let state = AppState::from_config(config, Arc::new(chem))?;
    let addr = state.config.bind_address.clone();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
