//! Auth domain - email OTP issuance/verification and session tokens
//!
//! Responsibilities:
//! - 6-digit OTP generation, persistence and single-use verification
//! - Signup after a verified OTP
//! - JWT session token creation and validation

pub mod actions;
pub mod jwt;
pub mod models;

pub use jwt::{Claims, JwtService};
