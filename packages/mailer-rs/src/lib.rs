//! Thin SMTP client for one-time passcode delivery.
//!
//! Wraps lettre's async SMTP transport behind a small service type so the
//! server never touches transport mechanics directly.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailerError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),
}

#[derive(Debug, Clone)]
pub struct MailerOptions {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

/// SMTP relay client. Cheap to clone; the underlying transport pools
/// connections.
#[derive(Clone)]
pub struct MailerService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl MailerService {
    /// Build a STARTTLS relay client from SMTP options.
    pub fn new(options: MailerOptions) -> Result<Self, MailerError> {
        let creds = Credentials::new(options.username, options.password);

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&options.host)?
            .port(options.port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from_address: options.from_address,
        })
    }

    /// Send a one-time passcode to `recipient`.
    pub async fn send_otp_email(&self, recipient: &str, code: &str) -> Result<(), MailerError> {
        let message = Message::builder()
            .from(self.from_address.parse()?)
            .to(recipient.parse()?)
            .subject("Your Project Sprint OTP code")
            .header(ContentType::TEXT_PLAIN)
            .body(format!(
                "Your OTP code is {code}. It will expire in 10 minutes."
            ))?;

        self.transport.send(message).await?;
        Ok(())
    }
}
