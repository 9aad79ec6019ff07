//! Application wiring

pub mod context;
pub mod options;
