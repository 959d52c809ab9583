//! Send OTP action

use anyhow::Result;
use rand::Rng;
use tracing::{debug, error, info};

use crate::domains::auth::models::Otp;
use crate::kernel::ServerDeps;

/// Issue a one-time passcode for an identifier.
///
/// The record is persisted first; delivery failure is logged and swallowed
/// so issuance never depends on the mail relay being up.
pub async fn send_otp(identifier: String, deps: &ServerDeps) -> Result<()> {
    let code = generate_code();

    let otp = Otp::create(&identifier, &code, &deps.db_pool).await?;
    debug!("OTP for {}: {}", otp.identifier, otp.code);

    if let Err(e) = deps.mailer.send_otp(&identifier, &code).await {
        error!("Failed to deliver OTP to {}: {}", identifier, e);
    }

    info!("OTP issued for {}", identifier);
    Ok(())
}

/// Uniformly random 6-digit code
fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_codes_are_six_digits_in_range() {
        for _ in 0..1_000 {
            let code = generate_code();
            assert_eq!(code.len(), 6);

            let value: u32 = code.parse().unwrap();
            assert!((100_000..=999_999).contains(&value));
        }
    }
}
