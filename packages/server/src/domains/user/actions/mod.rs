pub mod update_profile;

pub use update_profile::update_profile;
