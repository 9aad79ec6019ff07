//! Command handlers, one module per command family

pub mod deploy;
pub mod inventory;
pub mod projects;
pub mod session;
pub mod verify;
