//! Server dependencies (using traits for testability)
//!
//! Central dependency container handed to domain actions. External services
//! sit behind trait abstractions so tests can swap them out.

use anyhow::Result;
use async_trait::async_trait;
use mailer::MailerService;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::auth::JwtService;
use crate::kernel::BaseMailer;

// =============================================================================
// MailerService Adapter (implements BaseMailer trait)
// =============================================================================

/// Wrapper around the SMTP client that implements the BaseMailer trait
pub struct MailerAdapter(pub Arc<MailerService>);

impl MailerAdapter {
    pub fn new(service: Arc<MailerService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseMailer for MailerAdapter {
    async fn send_otp(&self, recipient: &str, code: &str) -> Result<()> {
        self.0
            .send_otp_email(recipient, code)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Dependencies accessible to domain actions
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub mailer: Arc<dyn BaseMailer>,
    /// JWT service for session token creation
    pub jwt_service: Arc<JwtService>,
}

impl ServerDeps {
    pub fn new(db_pool: PgPool, mailer: Arc<dyn BaseMailer>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            db_pool,
            mailer,
            jwt_service,
        }
    }
}
