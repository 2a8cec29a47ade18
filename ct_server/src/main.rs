//! Single-table card server.
//!
//! Serves seat requests over HTTP and pushes table events to every connected
//! WebSocket client.

use std::net::SocketAddr;

use anyhow::Error;
use ct_server::{api, config::ServerConfig, logging, metrics};
use log::info;
use pico_args::Arguments;

const HELP: &str = "\
Run a single-table card server

USAGE:
  ct_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_HOST:PORT or 0.0.0.0:8080]
  --port       PORT        Port to listen on           [default: env PORT or 8080]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  PORT                     Port to listen on
  SERVER_HOST              Interface to listen on
  TABLE_NAME               Table name
  TABLE_MAX_SEATS          Number of seats
  TABLE_MIN_BUY_IN         Smallest accepted buy-in
  TABLE_MAX_BUY_IN         Largest accepted buy-in
  SESSION_MAILBOX_CAPACITY Queued events per connection before it is dropped
  HUB_INBOX_CAPACITY       Hub inbox capacity
  METRICS_BIND             Prometheus listener address (disabled when unset)
  RUST_LOG                 Log filter
";

struct Args {
    bind: Option<SocketAddr>,
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        bind: pargs.opt_value_from_str("--bind")?,
        port: pargs.opt_value_from_str("--port")?,
    };

    logging::init();

    let config = ServerConfig::from_env(args.bind, args.port)?;
    config.validate()?;

    if let Some(metrics_bind) = config.metrics_bind {
        metrics::init_metrics(metrics_bind).map_err(Error::msg)?;
        info!("Prometheus metrics listening on {}", metrics_bind);
    }

    info!(
        "Table '{}': {} seats, buy-in {}..={}",
        config.table.name, config.table.max_seats, config.table.min_buy_in, config.table.max_buy_in
    );

    let state = api::AppState::from_config(&config);
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Resolves on Ctrl+C. If the handler cannot be installed the server keeps
/// running until the process is killed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
}
