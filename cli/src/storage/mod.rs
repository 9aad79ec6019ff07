//! Persistent client state

pub mod layout;
pub mod session;
