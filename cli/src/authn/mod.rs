//! Authentication

pub mod credentials;
pub mod login;
