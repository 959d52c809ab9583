pub mod user;

pub use user::{split_identifier, ProfileUpdate, SignupPayload, User, UserRole};
