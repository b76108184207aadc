//! Background WebSocket connection loop with auto-reconnect.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use reqwest::Url;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::protocol::FeedMessage;

use super::handler::handle_text_message;
use super::types::{RealtimeConfig, TransportEvent};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How a single connected session ended.
enum SessionEnd {
    /// Socket dropped; reconnect.
    Lost,
    /// Cancelled or nobody is listening anymore; stop for good.
    Stop,
}

// ---------------------------------------------------------------------------
// Connection Loop
// ---------------------------------------------------------------------------

/// Background task managing one subscription's socket.
///
/// Runs until `cancel` fires or the event receiver is dropped. Failed or
/// lost connections are retried with exponential backoff.
pub(crate) async fn connection_loop(
    config: RealtimeConfig,
    url: Url,
    event_tx: mpsc::Sender<TransportEvent>,
    cancel: CancellationToken,
) {
    let mut reconnect_delay = config.reconnect_delay_secs.max(1);
    let connect_timeout = Duration::from_secs(config.connect_timeout_secs);
    let log_url = format!("{}://{}{}", url.scheme(), url.host_str().unwrap_or(""), url.path());

    loop {
        info!(url = %log_url, "Connecting to presence feed");

        let attempt = tokio::select! {
            _ = cancel.cancelled() => return,
            attempt = tokio::time::timeout(
                connect_timeout,
                tokio_tungstenite::connect_async(url.as_str()),
            ) => attempt,
        };

        match attempt {
            Ok(Ok((ws_stream, _))) => {
                reconnect_delay = config.reconnect_delay_secs.max(1);
                if event_tx.send(TransportEvent::Connected).await.is_err() {
                    return;
                }
                match run_session(ws_stream, &config, &event_tx, &cancel).await {
                    SessionEnd::Stop => return,
                    SessionEnd::Lost => {
                        if event_tx.send(TransportEvent::Disconnected).await.is_err() {
                            return;
                        }
                    }
                }
            }
            Ok(Err(e)) => {
                error!(error = %e, "Failed to connect to presence feed");
                if event_tx
                    .send(TransportEvent::Error(format!("connection failed: {e}")))
                    .await
                    .is_err()
                {
                    return;
                }
            }
            Err(_elapsed) => {
                error!(
                    timeout_secs = config.connect_timeout_secs,
                    "Presence feed connection timed out"
                );
                if event_tx
                    .send(TransportEvent::Error(format!(
                        "connection timed out after {}s",
                        config.connect_timeout_secs
                    )))
                    .await
                    .is_err()
                {
                    return;
                }
            }
        }

        // Exponential backoff reconnect.
        info!(delay = reconnect_delay, "Reconnecting in {} seconds", reconnect_delay);
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(Duration::from_secs(reconnect_delay)) => {}
        }
        reconnect_delay = (reconnect_delay * 2).min(config.max_reconnect_delay_secs.max(1));
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

async fn run_session(
    ws_stream: WsStream,
    config: &RealtimeConfig,
    event_tx: &mpsc::Sender<TransportEvent>,
    cancel: &CancellationToken,
) -> SessionEnd {
    let (mut ws_write, mut ws_read) = ws_stream.split();
    let period = Duration::from_secs(config.heartbeat_interval_secs.max(1));
    let mut heartbeat = tokio::time::interval_at(tokio::time::Instant::now() + period, period);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Closing presence feed socket");
                let _ = ws_write.send(WsMessage::Close(None)).await;
                return SessionEnd::Stop;
            }
            _ = heartbeat.tick() => {
                let Ok(json) = serde_json::to_string(&FeedMessage::heartbeat()) else {
                    continue;
                };
                if ws_write.send(WsMessage::Text(json.into())).await.is_err() {
                    warn!("Heartbeat send failed");
                    return SessionEnd::Lost;
                }
            }
            msg = ws_read.next() => match msg {
                Some(Ok(WsMessage::Text(text))) => {
                    if !handle_text_message(&text, event_tx).await {
                        return SessionEnd::Stop;
                    }
                }
                Some(Ok(WsMessage::Close(_))) | None => {
                    info!("Presence feed closed connection");
                    return SessionEnd::Lost;
                }
                Some(Err(e)) => {
                    warn!(error = %e, "WebSocket error");
                    return SessionEnd::Lost;
                }
                Some(Ok(_)) => {}
            },
        }
    }
}
