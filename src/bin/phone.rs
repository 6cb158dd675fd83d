//! Phone Controller Emulator
//!
//! Sends directional events and game commands to a running Point Rush
//! server, emulating a phone controller from the command line:
//!
//! ```text
//! phone --id alice --direction s --multiplier 5
//! phone --id alice --command q
//! ```

use anyhow::Context;
use clap::Parser;
use futures_util::SinkExt;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use point_rush::network::protocol::ControlMessage;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(group(
    clap::ArgGroup::new("input")
        .required(true)
        .args(["direction", "command"])
))]
struct Args {
    /// Identifier of the phone
    #[arg(short, long)]
    id: String,

    /// Direction to send to the game server (n, s, e, or w)
    #[arg(short, long)]
    direction: Option<String>,

    /// Number of times to repeat the direction
    #[arg(short, long, default_value_t = 1)]
    multiplier: u32,

    /// Command to send to the game server (n = new game, q = quit)
    #[arg(short, long)]
    command: Option<String>,

    /// Control endpoint of the game server
    #[arg(long, default_value = "ws://127.0.0.1:8181")]
    url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (mut socket, _response) = connect_async(args.url.as_str())
        .await
        .with_context(|| format!("failed to connect to {}", args.url))?;

    if let Some(command) = args.command {
        let message = ControlMessage {
            id: args.id,
            dir: None,
            cmd: Some(command),
        };
        socket.send(Message::Text(message.to_json()?)).await?;
    } else if let Some(direction) = args.direction {
        for _ in 0..args.multiplier {
            let message = ControlMessage {
                id: args.id.clone(),
                dir: Some(direction.clone()),
                cmd: None,
            };
            socket.send(Message::Text(message.to_json()?)).await?;
        }
    }

    socket.close(None).await?;
    Ok(())
}
