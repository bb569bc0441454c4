//! Reading and updating notification preferences.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use officehub_core::error::AppError;
use officehub_core::types::UserId;
use officehub_database::PreferenceStore;
use officehub_entity::{NotificationPreference, PreferencePatch};

/// Manages per-user notification preferences.
#[derive(Clone)]
pub struct PreferenceService {
    store: Arc<dyn PreferenceStore>,
}

impl PreferenceService {
    /// Creates a new preference service.
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// The user's preferences, or the all-enabled defaults when none were
    /// ever saved. Reading never creates a record.
    pub async fn get(&self, user_id: UserId) -> Result<NotificationPreference, AppError> {
        Ok(self
            .store
            .find(user_id)
            .await?
            .unwrap_or_else(|| NotificationPreference::defaults_for(user_id)))
    }

    /// Preferences used for a delivery decision.
    ///
    /// A store failure falls back to the defaults so that delivery stays
    /// fail-open.
    pub async fn resolve(&self, user_id: UserId) -> NotificationPreference {
        match self.get(user_id).await {
            Ok(pref) => pref,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Preference lookup failed, using defaults");
                NotificationPreference::defaults_for(user_id)
            }
        }
    }

    /// Apply a partial update and persist the result.
    pub async fn update(
        &self,
        user_id: UserId,
        patch: PreferencePatch,
    ) -> Result<NotificationPreference, AppError> {
        let mut pref = self.get(user_id).await?;
        pref.apply(patch, Utc::now());

        if pref.quiet_hours_enabled
            && (pref.quiet_hours_start.is_none() || pref.quiet_hours_end.is_none())
        {
            return Err(AppError::validation(
                "Quiet hours need both a start and an end time",
            ));
        }

        let saved = self.store.upsert(&pref).await?;
        info!(user_id = %user_id, "Notification preferences updated");
        Ok(saved)
    }
}
