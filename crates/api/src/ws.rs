use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubscribeQuery {
    pub run_id: String,
}

/// `/ws/benchmark` (§4.8, §4.5): one socket relays exactly one run's event stream.
/// A client that wants another run's events reconnects with a different `run_id` —
/// subscriptions never survive a reconnect (§9), so there is nothing to resume.
#[instrument(skip(state, ws), name = "api_ws_benchmark")]
pub async fn ws_benchmark(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(query): Query<SubscribeQuery>,
) -> Response {
    ws.on_upgrade(move |socket| relay(socket, state, query.run_id))
}

async fn relay(mut socket: WebSocket, state: AppState, run_id: String) {
    let mut subscription = state.events.subscribe(&run_id).await;
    info!(run_id = %run_id, "ws subscriber attached");

    loop {
        tokio::select! {
            event = subscription.recv() => {
                match event {
                    Some(event) => {
                        let terminal = event.is_terminal();
                        let payload = match serde_json::to_string(&event) {
                            Ok(payload) => payload,
                            Err(err) => {
                                debug!(run_id = %run_id, error = %err, "failed to serialize benchmark event");
                                continue;
                            }
                        };
                        if socket.send(Message::Text(payload.into())).await.is_err() {
                            break;
                        }
                        if terminal {
                            let _ = socket.send(Message::Close(None)).await;
                            break;
                        }
                    }
                    None => {
                        let _ = socket.send(Message::Close(None)).await;
                        break;
                    }
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(_)) => break,
                }
            }
        }
    }

    debug!(run_id = %run_id, "ws subscriber detached");
}
