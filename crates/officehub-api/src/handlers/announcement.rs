//! Announcement handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use officehub_entity::{NewAnnouncement, SystemAnnouncement};

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/announcements
pub async fn list_announcements(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<SystemAnnouncement>>> {
    let announcements = state.announcements.list_for(&auth).await?;
    Ok(Json(announcements))
}

/// POST /api/announcements
///
/// A published announcement whose publish time has come is pushed to
/// the system topic right away; scheduled ones are left to the worker.
pub async fn create_announcement(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<NewAnnouncement>,
) -> ApiResult<(StatusCode, Json<SystemAnnouncement>)> {
    let announcement = state.announcements.create(&auth, input).await?;

    if announcement.is_published && announcement.is_due(auth.request_time) {
        state.realtime.bridge.announce(&announcement);
    }
    Ok((StatusCode::CREATED, Json(announcement)))
}
