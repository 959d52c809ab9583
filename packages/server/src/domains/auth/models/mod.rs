pub mod otp;

pub use otp::{Otp, MAX_ATTEMPTS, OTP_TTL_MINUTES};
