// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
//
// Naming convention: Base* for trait names

use anyhow::Result;
use async_trait::async_trait;

/// OTP delivery channel (SMTP in production, mock in tests)
#[async_trait]
pub trait BaseMailer: Send + Sync {
    /// Deliver a one-time passcode to a recipient
    async fn send_otp(&self, recipient: &str, code: &str) -> Result<()>;
}
