//! RapidDeploy command line client
//!
//! Library side of the `rd` binary: session handling, the RapidDeploy web
//! service gateway and one handler per command.

pub mod app;
pub mod authn;
pub mod cli;
pub mod commands;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod output;
pub mod storage;
pub mod utils;
