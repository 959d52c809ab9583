//! Signup action

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::domains::user::models::{SignupPayload, User};

/// Result of a signup request
#[derive(Debug)]
pub enum SignupOutcome {
    Created { user: User },
    AlreadyExists,
}

/// Complete onboarding for a new user after OTP verification.
///
/// The identifier is split into email or phone on the presence of `@`.
/// Signup trusts the client-supplied identifier; it does not re-check that
/// an OTP was verified for it.
pub async fn signup(payload: SignupPayload, pool: &PgPool) -> Result<SignupOutcome> {
    if User::find_by_identifier(&payload.identifier, pool)
        .await?
        .is_some()
    {
        info!("Signup rejected, user exists for {}", payload.identifier);
        return Ok(SignupOutcome::AlreadyExists);
    }

    let user = match User::insert_from_signup(&payload, pool).await {
        Ok(user) => user,
        // Lost the check-then-insert race to a concurrent signup for the
        // same identifier
        Err(e) if is_unique_violation(&e) => {
            info!("Signup rejected, user exists for {}", payload.identifier);
            return Ok(SignupOutcome::AlreadyExists);
        }
        Err(e) => return Err(e),
    };

    info!("Signup completed for user {}", user.id);

    Ok(SignupOutcome::Created { user })
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
