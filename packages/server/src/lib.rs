// Project Sprint - API Core
//
// Onboarding/authentication backend: email OTP issuance and verification,
// user signup and login, JWT session tokens, profile updates.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
