//! User domain - the profile directory keyed by email or phone

pub mod actions;
pub mod models;
