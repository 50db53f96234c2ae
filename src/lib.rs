pub mod cli;
pub mod config;
pub mod diag;
pub mod error;
pub mod filestore;
pub mod k8s;
pub mod outcome;
pub mod runtime;
pub mod server;

pub use error::{Error, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
