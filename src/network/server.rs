//! WebSocket Game Server
//!
//! Two endpoints around a single evaluator task: a control endpoint
//! accepting inbound events from phone controllers, and a view endpoint
//! pushing a fresh game snapshot to every subscribed client after each
//! processed event.
//!
//! All inbound events funnel through one bounded channel into the
//! evaluator task, which owns the [`Game`] exclusively. That single
//! consumer is what serializes state mutation: each event is evaluated to
//! completion, in arrival order, before the next is accepted.

use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, mpsc};
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

use crate::game::input::ControlEvent;
use crate::game::state::Game;
use crate::network::protocol::{ControlMessage, GameSnapshot};

/// Bound on queued control events awaiting evaluation.
const EVENT_QUEUE_DEPTH: usize = 256;

/// Bound on snapshots buffered per lagging view client.
const SNAPSHOT_QUEUE_DEPTH: usize = 64;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address accepting inbound controller connections.
    pub control_addr: SocketAddr,
    /// Address accepting outbound view connections.
    pub view_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            control_addr: "0.0.0.0:8181".parse().unwrap(),
            view_addr: "0.0.0.0:8080".parse().unwrap(),
        }
    }
}

/// Game server errors.
#[derive(Debug, thiserror::Error)]
pub enum GameServerError {
    /// Failed to bind a listener.
    #[error("Failed to bind: {0}")]
    BindFailed(#[from] std::io::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

/// The game server.
pub struct GameServer {
    /// Server configuration.
    config: ServerConfig,
    /// Shutdown signal.
    shutdown_tx: broadcast::Sender<()>,
}

impl GameServer {
    /// Create a new game server.
    pub fn new(config: ServerConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            config,
            shutdown_tx,
        }
    }

    /// Signal every task spawned by [`run`](Self::run) to stop.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Run the server until shutdown.
    pub async fn run(&self) -> Result<(), GameServerError> {
        let control_listener = TcpListener::bind(&self.config.control_addr).await?;
        info!("Control listening on {}", self.config.control_addr);

        let view_listener = TcpListener::bind(&self.config.view_addr).await?;
        info!("View listening on {}", self.config.view_addr);

        let (event_tx, event_rx) = mpsc::channel::<ControlEvent>(EVENT_QUEUE_DEPTH);
        let (snapshot_tx, _) = broadcast::channel::<String>(SNAPSHOT_QUEUE_DEPTH);

        let evaluator = tokio::spawn(run_evaluator(Game::new(), event_rx, snapshot_tx.clone()));

        let mut shutdown_rx = self.shutdown_tx.subscribe();

        loop {
            tokio::select! {
                result = control_listener.accept() => {
                    match result {
                        Ok((stream, addr)) => {
                            debug!("New control connection from {}", addr);
                            tokio::spawn(handle_control_connection(
                                stream,
                                addr,
                                event_tx.clone(),
                                self.shutdown_tx.subscribe(),
                            ));
                        }
                        Err(e) => error!("Control accept error: {}", e),
                    }
                }
                result = view_listener.accept() => {
                    match result {
                        Ok((stream, addr)) => {
                            debug!("New view connection from {}", addr);
                            tokio::spawn(handle_view_connection(
                                stream,
                                addr,
                                snapshot_tx.subscribe(),
                                self.shutdown_tx.subscribe(),
                            ));
                        }
                        Err(e) => error!("View accept error: {}", e),
                    }
                }
                _ = shutdown_rx.recv() => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        // Once the listeners stop and connection tasks drain, the event
        // channel closes and the evaluator exits on its own.
        drop(event_tx);
        let _ = evaluator.await;

        Ok(())
    }
}

/// Drain inbound events one at a time, mutate the game, and publish the
/// resulting snapshot to every view subscriber.
async fn run_evaluator(
    mut game: Game,
    mut events: mpsc::Receiver<ControlEvent>,
    snapshots: broadcast::Sender<String>,
) {
    while let Some(event) = events.recv().await {
        game.evaluate(&event);
        match GameSnapshot::from(&game).to_json() {
            // A send error only means no view client is connected
            Ok(json) => {
                let _ = snapshots.send(json);
            }
            Err(e) => error!("Failed to serialize snapshot: {}", e),
        }
    }
    debug!("Evaluator stopped: event channel closed");
}

/// Receive control frames from one phone controller, parse them, and feed
/// them to the evaluator. Malformed frames are dropped here, so the
/// evaluator only ever sees structurally valid events.
async fn handle_control_connection(
    stream: TcpStream,
    addr: SocketAddr,
    events: mpsc::Sender<ControlEvent>,
    mut shutdown: broadcast::Receiver<()>,
) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            error!("WebSocket handshake failed for {}: {}", addr, e);
            return;
        }
    };
    info!("Control connected: {}", addr);

    let (mut sender, mut receiver) = ws_stream.split();

    loop {
        tokio::select! {
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        debug!("Control input from {}: {}", addr, text);
                        match ControlMessage::from_json(&text) {
                            Ok(message) => {
                                if events.send(message.into_event()).await.is_err() {
                                    // Evaluator is gone; nothing left to do
                                    break;
                                }
                            }
                            Err(e) => {
                                warn!("Discarding malformed control message from {}: {}", addr, e);
                            }
                        }
                    }
                    Some(Ok(Message::Ping(payload))) => {
                        let _ = sender.send(Message::Pong(payload)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("Control disconnected: {}", addr);
                        break;
                    }
                    Some(Err(e)) => {
                        error!("Control socket error for {}: {}", addr, e);
                        break;
                    }
                    _ => {}
                }
            }
            _ = shutdown.recv() => {
                let _ = sender.send(Message::Close(None)).await;
                break;
            }
        }
    }
}

/// Push game snapshots to one view client until it disconnects. View
/// clients are passive; anything they send besides pings is ignored.
async fn handle_view_connection(
    stream: TcpStream,
    addr: SocketAddr,
    mut snapshots: broadcast::Receiver<String>,
    mut shutdown: broadcast::Receiver<()>,
) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            error!("WebSocket handshake failed for {}: {}", addr, e);
            return;
        }
    };
    info!("View client connected: {}", addr);

    let (mut sender, mut receiver) = ws_stream.split();

    loop {
        tokio::select! {
            update = snapshots.recv() => {
                match update {
                    Ok(json) => {
                        if sender.send(Message::Text(json)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("View client {} lagging, dropped {} snapshots", addr, skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Ping(payload))) => {
                        let _ = sender.send(Message::Pong(payload)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("View client disconnected: {}", addr);
                        break;
                    }
                    Some(Err(e)) => {
                        error!("View socket error for {}: {}", addr, e);
                        break;
                    }
                    _ => {}
                }
            }
            _ = shutdown.recv() => {
                let _ = sender.send(Message::Close(None)).await;
                break;
            }
        }
    }
}
