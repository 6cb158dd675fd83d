//! Point Rush Game Server
//!
//! Hosts the authoritative game evaluator behind a control WebSocket
//! (inbound phone events) and a view WebSocket (outbound state snapshots).

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use point_rush::network::server::{GameServer, ServerConfig};
use point_rush::VERSION;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Address accepting inbound controller connections
    #[arg(long, default_value = "0.0.0.0:8181")]
    control_addr: SocketAddr,

    /// Address accepting outbound view connections
    #[arg(long, default_value = "0.0.0.0:8080")]
    view_addr: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let args = Args::parse();

    info!("Point Rush Server v{}", VERSION);

    let config = ServerConfig {
        control_addr: args.control_addr,
        view_addr: args.view_addr,
    };

    GameServer::new(config)
        .run()
        .await
        .context("game server exited")?;

    Ok(())
}
