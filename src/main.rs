use anyhow::Context;
use axum::Router;
use clap::Parser;
use devdle_server::cli::Args;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing(&args.log_level)?;
    info!(
        "Pool size {}, daily cache {}, scheduling {} days ahead",
        args.db_pool_max_size, args.daily_cache, args.schedule_days
    );

    let router = devdle_server::init_router(&args)
        .await
        .context("Failed to build the application")?;

    serve(router, args.server_address)
        .await
        .context("Server failed to run")
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(log_level)
        .with_context(|| format!("Invalid log filter '{}'", log_level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(())
}

async fn serve(router: Router, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to address {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, router).await.context("Axum server error")
}
