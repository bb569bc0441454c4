//! Domain event intake.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use officehub_core::events::DomainEvent;

use crate::dto::response::EventAccepted;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/events
pub async fn publish_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut event): Json<DomainEvent>,
) -> ApiResult<(StatusCode, Json<EventAccepted>)> {
    auth.require_admin()?;
    if event.actor_id.is_none() {
        event.actor_id = Some(auth.user_id());
    }

    let created = state.realtime.bridge.handle(&event).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(EventAccepted {
            event_id: event.id,
            event: event.name().to_string(),
            notifications: created.len(),
        }),
    ))
}
