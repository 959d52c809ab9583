pub mod send_otp;
pub mod signup;
pub mod verify_otp;

pub use send_otp::send_otp;
pub use signup::{signup, SignupOutcome};
pub use verify_otp::{verify_otp, VerifyOtpOutcome};
