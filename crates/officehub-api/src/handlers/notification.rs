//! Notification handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use validator::Validate;

use officehub_core::error::AppError;
use officehub_core::types::{NotificationId, PageRequest, PageResponse};
use officehub_database::NotificationStats;
use officehub_entity::Notification;

use crate::dto::request::CreateNotificationRequest;
use crate::dto::response::{CountResponse, UpdatedResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> ApiResult<Json<PageResponse<Notification>>> {
    let result = state.notifications.list(&auth, page).await?;
    Ok(Json(result))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CountResponse>> {
    let count = state.notifications.unread_count(auth.user_id()).await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/notifications/stats
pub async fn stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<NotificationStats>> {
    let stats = state.notifications.stats(auth.user_id()).await?;
    Ok(Json(stats))
}

/// POST /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw): Path<String>,
) -> ApiResult<Json<Notification>> {
    let id: NotificationId = raw
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid notification id '{raw}'")))?;
    let notification = state.notifications.mark_read(auth.user_id(), id).await?;
    state
        .realtime
        .dispatcher
        .push_unread_count(auth.user_id())
        .await;
    Ok(Json(notification))
}

/// POST /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UpdatedResponse>> {
    let updated = state.notifications.mark_all_read(auth.user_id()).await?;
    if updated > 0 {
        state
            .realtime
            .dispatcher
            .push_unread_count(auth.user_id())
            .await;
    }
    Ok(Json(UpdatedResponse { updated }))
}

/// POST /api/notifications
pub async fn create_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateNotificationRequest>,
) -> ApiResult<(StatusCode, Json<Vec<Notification>>)> {
    auth.require_admin()?;
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))?;

    let audience = req.audience()?;
    let draft = req.draft()?;

    let created = state
        .notifications
        .notify(&audience, &draft, req.exclude)
        .await?;
    state.realtime.dispatcher.deliver_all(&created).await;

    tracing::info!(
        actor = %auth.user_id(),
        audience = ?audience,
        count = created.len(),
        "Notifications created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}
