// MockMailer - mock OTP delivery for testing
//
// Captures every (recipient, code) pair instead of touching SMTP.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::kernel::BaseMailer;

pub struct MockMailer {
    fail: bool,
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            fail: false,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A mailer whose every send fails, for delivery-failure paths
    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All (recipient, code) pairs delivered so far
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMailer for MockMailer {
    async fn send_otp(&self, recipient: &str, code: &str) -> Result<()> {
        if self.fail {
            bail!("mock mailer configured to fail");
        }

        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), code.to_string()));
        Ok(())
    }
}
