//! Verify OTP action

use anyhow::Result;
use tracing::info;

use crate::domains::auth::models::{Otp, MAX_ATTEMPTS};
use crate::domains::user::models::User;
use crate::kernel::ServerDeps;

/// Result of verifying an OTP
#[derive(Debug)]
pub enum VerifyOtpOutcome {
    /// Code accepted but no user yet - caller must proceed to signup
    NewUser { identifier: String },
    /// Code accepted for an existing user - session token issued
    LoggedIn { user: User, access_token: String },
    /// No live record, wrong code, or a lost race to a concurrent attempt
    InvalidOrExpired,
    /// The record matched but its attempt budget is exhausted
    TooManyAttempts,
}

/// Verify a presented code against the live records for the identifier.
///
/// The lookup matches identifier and code together, so after a resend every
/// still-live code is accepted exactly once. A code matching no live record
/// counts against the newest live record's attempt budget. Consumption is
/// a conditional update so a code can only ever be spent once, even under
/// concurrent verification.
pub async fn verify_otp(
    identifier: String,
    code: String,
    deps: &ServerDeps,
) -> Result<VerifyOtpOutcome> {
    let Some(otp) = Otp::find_live_matching(&identifier, &code, &deps.db_pool).await? else {
        match Otp::find_live(&identifier, &deps.db_pool).await? {
            Some(latest) => {
                Otp::record_failed_attempt(latest.id, &deps.db_pool).await?;
                info!("Wrong OTP code for {}", identifier);
            }
            None => info!("No live OTP for {}", identifier),
        }
        return Ok(VerifyOtpOutcome::InvalidOrExpired);
    };

    if otp.attempts >= MAX_ATTEMPTS {
        info!("OTP attempt budget exhausted for {}", identifier);
        return Ok(VerifyOtpOutcome::TooManyAttempts);
    }

    if Otp::consume(otp.id, &deps.db_pool).await?.is_none() {
        // A concurrent verification spent this record first
        return Ok(VerifyOtpOutcome::InvalidOrExpired);
    }

    match User::find_by_identifier(&identifier, &deps.db_pool).await? {
        None => {
            info!("OTP verified for {}, signup required", identifier);
            Ok(VerifyOtpOutcome::NewUser { identifier })
        }
        Some(user) => {
            let user = User::touch_last_login(user.id, &deps.db_pool).await?;
            let access_token = deps.jwt_service.create_token(user.id, user.role)?;

            info!("Login successful for user {}", user.id);
            Ok(VerifyOtpOutcome::LoggedIn { user, access_token })
        }
    }
}
