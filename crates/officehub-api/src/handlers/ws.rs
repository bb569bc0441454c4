//! WebSocket upgrade handlers and the per-session loop.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, Query, State, WebSocketUpgrade};
use axum::http::HeaderMap;
use axum::response::Response;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::time::{Instant, interval_at};
use tracing::{debug, info, warn};

use officehub_core::error::AppError;
use officehub_entity::UserProfile;
use officehub_realtime::connection::{Beat, HeartbeatConfig};
use officehub_realtime::{ConnectionHandle, OutboundMessage, Topic};

use crate::error::ApiResult;
use crate::extractors::{USER_ID_HEADER, resolve_user};
use crate::state::AppState;

/// Query parameters of the system topic.
#[derive(Debug, Default, Deserialize)]
pub struct SystemQuery {
    /// Optional viewer, used for announcement targeting.
    pub user_id: Option<String>,
}

/// GET /ws/notifications/{user_id}
pub async fn notifications_ws(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> ApiResult<Response> {
    let user = authorize_owner(&state, &user_id, &headers).await?;
    Ok(upgrade(state, ws, Topic::User(user.id), Some(user)))
}

/// GET /ws/tasks/{user_id}
pub async fn tasks_ws(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> ApiResult<Response> {
    let user = authorize_owner(&state, &user_id, &headers).await?;
    Ok(upgrade(state, ws, Topic::Tasks(user.id), Some(user)))
}

/// GET /ws/attendance/{user_id}
pub async fn attendance_ws(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> ApiResult<Response> {
    let user = authorize_owner(&state, &user_id, &headers).await?;
    Ok(upgrade(state, ws, Topic::Attendance(user.id), Some(user)))
}

/// GET /ws/system
///
/// Anonymous sessions are allowed; a `user_id` query parameter that does
/// not resolve refuses the upgrade.
pub async fn system_ws(
    State(state): State<AppState>,
    Query(query): Query<SystemQuery>,
    ws: WebSocketUpgrade,
) -> ApiResult<Response> {
    let viewer = match query.user_id.as_deref() {
        Some(raw) => Some(resolve_user(&state, raw).await?),
        None => None,
    };
    Ok(upgrade(state, ws, Topic::SystemAnnouncements, viewer))
}

/// Resolve the path user and check it against the caller header, if any.
async fn authorize_owner(
    state: &AppState,
    path_id: &str,
    headers: &HeaderMap,
) -> Result<UserProfile, AppError> {
    let user = resolve_user(state, path_id).await?;

    if let Some(raw) = headers.get(USER_ID_HEADER).and_then(|v| v.to_str().ok()) {
        let caller = resolve_user(state, raw).await?;
        if caller.id != user.id {
            return Err(AppError::forbidden("Cannot subscribe to another user's topic"));
        }
    }
    Ok(user)
}

fn upgrade(
    state: AppState,
    ws: WebSocketUpgrade,
    topic: Topic,
    viewer: Option<UserProfile>,
) -> Response {
    ws.on_upgrade(move |socket| run_session(state, socket, topic, viewer))
}

/// Drive one accepted session until either side closes it.
async fn run_session(state: AppState, socket: WebSocket, topic: Topic, viewer: Option<UserProfile>) {
    let realtime = &state.realtime;
    let (handle, outbound_rx) = realtime.connections.register(topic, viewer);
    let conn_id = handle.id;

    realtime.inbound.on_connect(&handle).await;

    let (ws_tx, mut ws_rx) = socket.split();
    let forwarder = tokio::spawn(forward_outbound(
        ws_tx,
        outbound_rx,
        handle.clone(),
        realtime.connections.heartbeat(),
    ));

    loop {
        tokio::select! {
            frame = ws_rx.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    realtime.inbound.handle(&handle, text.as_str()).await;
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => handle.touch(),
                Some(Err(e)) => {
                    warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                    break;
                }
            },
            _ = handle.closed() => break,
        }
    }

    realtime.connections.unregister(&conn_id);
    if let Err(e) = forwarder.await {
        warn!(conn_id = %conn_id, error = %e, "Outbound forwarder panicked");
    }

    info!(conn_id = %conn_id, topic = %topic, "WebSocket session ended");
}

/// Write queued events to the socket and keep the heartbeat going.
async fn forward_outbound(
    mut ws_tx: SplitSink<WebSocket, Message>,
    mut outbound_rx: mpsc::Receiver<OutboundMessage>,
    handle: Arc<ConnectionHandle>,
    heartbeat: HeartbeatConfig,
) {
    let period = heartbeat.ping_interval;
    let mut ticker = interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            msg = outbound_rx.recv() => {
                let Some(msg) = msg else { break };
                let text = match serde_json::to_string(&msg) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(conn_id = %handle.id, error = %e, "Failed to encode event");
                        continue;
                    }
                };
                if ws_tx.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
            _ = ticker.tick() => match heartbeat.check(&handle) {
                Beat::Ping => {
                    if ws_tx.send(Message::Ping(Default::default())).await.is_err() {
                        break;
                    }
                }
                Beat::Expired => break,
            },
            _ = handle.closed() => break,
        }
    }

    handle.close();
    let _ = ws_tx.send(Message::Close(None)).await;
    debug!(conn_id = %handle.id, "Outbound forwarder stopped");
}
