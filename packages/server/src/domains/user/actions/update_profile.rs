//! Update profile action

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::domains::user::models::{ProfileUpdate, User};

/// Apply a partial profile update to the caller's own record.
///
/// Callers must reject empty payloads before getting here; an empty update
/// would be a no-op write.
pub async fn update_profile(user_id: Uuid, update: ProfileUpdate, pool: &PgPool) -> Result<User> {
    let user = User::apply_update(user_id, &update, pool).await?;
    info!("Profile updated for user {}", user.id);
    Ok(user)
}
