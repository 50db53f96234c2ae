//! Container-aware runtime sizing
//!
//! Reads the CPU quota of the cgroup the process runs in and sizes the tokio
//! worker pool to it instead of to the host's CPU count.
//!
//! Supported layouts:
//! - cgroup v2: `cpu.max`
//! - cgroup v1: `cpu/cpu.cfs_quota_us` + `cpu/cpu.cfs_period_us`

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Cgroup root path
const CGROUP_ROOT: &str = "/sys/fs/cgroup";

pub struct CpuQuota {
    cgroup_root: PathBuf,
}

impl CpuQuota {
    pub fn new() -> Self {
        Self {
            cgroup_root: PathBuf::from(CGROUP_ROOT),
        }
    }

    /// Use a custom cgroup root (for testing)
    pub fn with_root(cgroup_root: PathBuf) -> Self {
        Self { cgroup_root }
    }

    /// CPU limit in whole cores, rounded up. `None` when no quota applies.
    pub fn limit(&self) -> Option<usize> {
        self.limit_v2().or_else(|| self.limit_v1())
    }

    fn limit_v2(&self) -> Option<usize> {
        let raw = read_trimmed(&self.cgroup_root.join("cpu.max"))?;
        let mut fields = raw.split_whitespace();
        let quota = fields.next()?;
        let period = fields.next()?.parse::<i64>().ok()?;

        if quota == "max" {
            return None;
        }
        cores(quota.parse().ok()?, period)
    }

    fn limit_v1(&self) -> Option<usize> {
        let dir = self.cgroup_root.join("cpu");
        let quota = read_trimmed(&dir.join("cpu.cfs_quota_us"))?.parse().ok()?;
        let period = read_trimmed(&dir.join("cpu.cfs_period_us"))?.parse().ok()?;
        cores(quota, period)
    }
}

impl Default for CpuQuota {
    fn default() -> Self {
        Self::new()
    }
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

fn cores(quota: i64, period: i64) -> Option<usize> {
    // v1 reports -1 for "no limit"
    if quota <= 0 || period <= 0 {
        return None;
    }
    Some(((quota + period - 1) / period) as usize)
}

/// Logical CPUs visible to the process.
pub fn logical_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Worker count for the async runtime: the cgroup CPU quota clamped to
/// `[1, logical CPUs]`, or all logical CPUs when unconstrained.
pub fn worker_threads() -> usize {
    worker_threads_for(&CpuQuota::new(), logical_cpus())
}

pub fn worker_threads_for(quota: &CpuQuota, cpus: usize) -> usize {
    let workers = match quota.limit() {
        Some(limit) => limit.clamp(1, cpus.max(1)),
        None => cpus.max(1),
    };
    debug!(workers, cpus, "sized runtime worker pool");
    workers
}

/// Number of OS threads in this process, from `/proc/self/status`.
pub fn os_threads() -> Option<usize> {
    let status = fs::read_to_string("/proc/self/status").ok()?;
    parse_threads(&status)
}

fn parse_threads(status: &str) -> Option<usize> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("Threads:"))
        .and_then(|v| v.trim().parse().ok())
}
