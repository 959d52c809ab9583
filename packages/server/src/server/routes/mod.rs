// HTTP routes
pub mod auth;
pub mod health;
pub mod home;

pub use auth::*;
pub use health::*;
pub use home::*;
