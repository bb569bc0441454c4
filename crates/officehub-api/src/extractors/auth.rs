//! `AuthUser` extractor: resolves the `X-User-Id` header against the user
//! directory and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use officehub_core::error::AppError;
use officehub_core::types::UserId;
use officehub_entity::UserProfile;
use officehub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the acting user's ID.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing X-User-Id header"))?;

        let user = resolve_user(state, raw).await?;
        Ok(AuthUser(RequestContext::new(user)))
    }
}

/// Resolve a raw user ID to an active user.
///
/// Unparseable or unknown IDs are authentication failures; inactive
/// accounts are authorization failures.
pub async fn resolve_user(state: &AppState, raw: &str) -> Result<UserProfile, AppError> {
    let id: UserId = raw
        .trim()
        .parse()
        .map_err(|_| AppError::authentication("Invalid user id"))?;

    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::authentication("Unknown user"))?;

    if !user.is_active {
        return Err(AppError::forbidden("User account is inactive"));
    }
    Ok(user)
}
