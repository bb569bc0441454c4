//! Preference handlers.

use axum::Json;
use axum::extract::State;

use officehub_entity::{NotificationPreference, PreferencePatch};

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/notifications/preferences
pub async fn get_preferences(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<NotificationPreference>> {
    let prefs = state.preferences.get(auth.user_id()).await?;
    Ok(Json(prefs))
}

/// PUT /api/notifications/preferences
pub async fn update_preferences(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(patch): Json<PreferencePatch>,
) -> ApiResult<Json<NotificationPreference>> {
    let prefs = state.preferences.update(auth.user_id(), patch).await?;
    Ok(Json(prefs))
}
