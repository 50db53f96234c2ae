//! Resolved server configuration.
//!
//! Built once from the command line at startup and shared read-only with every
//! component afterwards.

use crate::cli::Cli;
use crate::{Error, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
    pub message: String,
    pub config_file: PathBuf,
    pub data_dir: PathBuf,
    pub debug: bool,
    /// Scheduler parallelism the runtime was built with.
    pub worker_threads: usize,
}

impl ServerConfig {
    pub fn from_cli(cli: &Cli, worker_threads: usize) -> Self {
        Self {
            addr: cli.addr.clone(),
            message: cli.msg.clone(),
            config_file: cli.config.clone(),
            data_dir: cli.data_dir.clone().unwrap_or_else(std::env::temp_dir),
            debug: cli.debug,
            worker_threads,
        }
    }

    /// Parse the listen address. A bare `:PORT` binds every interface.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = if self.addr.starts_with(':') {
            format!("0.0.0.0{}", self.addr)
        } else {
            self.addr.clone()
        };

        addr.parse()
            .map_err(|e| Error::Config(format!("invalid listen address {:?}: {}", self.addr, e)))
    }
}
