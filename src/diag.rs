//! Process and configuration diagnostics.

use crate::config::ServerConfig;
use crate::runtime;
use crate::{Error, Result, VERSION};
use std::fmt::Write;
use std::sync::Arc;
use tokio::fs::File;

#[derive(Debug, Clone)]
pub struct Diagnostics {
    config: Arc<ServerConfig>,
}

impl Diagnostics {
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self { config }
    }

    pub fn health(&self) -> &'static str {
        "ok"
    }

    /// Plain-text status report. Counters that cannot be read are left out.
    pub fn status_report(&self) -> String {
        let mut out = String::new();

        if let Ok(hn) = hostname::get() {
            let _ = writeln!(out, "hostname: {}", hn.to_string_lossy());
        }

        let _ = writeln!(out, "CPU         : {}", runtime::logical_cpus());
        let _ = writeln!(out, "workers     : {}", self.config.worker_threads);
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let _ = writeln!(out, "tasks       : {}", handle.metrics().num_alive_tasks());
        }
        if let Some(threads) = runtime::os_threads() {
            let _ = writeln!(out, "threads     : {}", threads);
        }

        let _ = writeln!(out, "config : {}", self.config.config_file.display());
        let _ = writeln!(out, "version: {}", VERSION);
        let _ = writeln!(out, "message: {}", self.config.message);
        out
    }

    /// Every environment variable as `KEY=VALUE`, one per line.
    pub fn env_report(&self) -> String {
        std::env::vars_os()
            .map(|(k, v)| format!("{}={}\n", k.to_string_lossy(), v.to_string_lossy()))
            .collect()
    }

    pub async fn open_config(&self) -> Result<File> {
        let file = File::open(&self.config.config_file).await?;
        if !file.metadata().await?.is_file() {
            return Err(Error::NotAFile(
                self.config.config_file.display().to_string(),
            ));
        }
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn diagnostics(config_file: PathBuf) -> Diagnostics {
        Diagnostics::new(Arc::new(ServerConfig {
            addr: ":80".to_string(),
            message: "hello from test".to_string(),
            config_file,
            data_dir: std::env::temp_dir(),
            debug: false,
            worker_threads: 3,
        }))
    }

    #[test]
    fn test_health() {
        assert_eq!(diagnostics(PathBuf::from("config.json")).health(), "ok");
    }

    #[test]
    fn test_status_report_lines() {
        let report = diagnostics(PathBuf::from("/etc/app/config.json")).status_report();

        assert!(report.contains("workers     : 3\n"));
        assert!(report.contains("config : /etc/app/config.json\n"));
        assert!(report.contains(&format!("version: {}\n", VERSION)));
        assert!(report.ends_with("message: hello from test\n"));
        // no runtime outside tokio
        assert!(!report.contains("tasks"));
    }

    #[tokio::test]
    async fn test_status_report_inside_runtime() {
        let report = diagnostics(PathBuf::from("config.json")).status_report();
        assert!(report.contains("tasks       : "));
    }

    #[test]
    fn test_env_report() {
        std::env::set_var("KDEBUG_DIAG_TEST", "visible");
        let report = diagnostics(PathBuf::from("config.json")).env_report();

        assert!(report.lines().any(|l| l == "KDEBUG_DIAG_TEST=visible"));
    }

    #[tokio::test]
    async fn test_open_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let diag = diagnostics(dir.path().join("missing.json"));

        assert!(matches!(diag.open_config().await, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn test_config_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let diag = diagnostics(dir.path().to_path_buf());

        assert!(matches!(diag.open_config().await, Err(Error::NotAFile(_))));
    }
}
