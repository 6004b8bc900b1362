//! Resource collector for CPU, memory, disk, network, load and process count.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Instant;

use sysinfo::Disks;
use tracing::debug;

use crate::collector::procfs::parser::{
    CpuStat, LoadAvg, MemInfo, external_traffic, parse_global_stat, parse_loadavg, parse_meminfo,
    parse_net_dev,
};
use crate::collector::traits::FileSystem;
use crate::config::Config;
use crate::model::{CPU_HISTORY_LEN, ResourceSnapshot, round_to};

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Error type for collection failures.
#[derive(Debug)]
pub enum CollectError {
    /// I/O error reading a `/proc` file.
    Io(std::io::Error),
    /// Parse error in a `/proc` file.
    Parse(String),
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Io(e) => write!(f, "I/O error: {}", e),
            CollectError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for CollectError {}

impl From<std::io::Error> for CollectError {
    fn from(e: std::io::Error) -> Self {
        CollectError::Io(e)
    }
}

/// Cumulative network counters at the previous sample.
#[derive(Debug, Clone, Copy, Default)]
struct NetSample {
    sent: u64,
    recv: u64,
    at: Option<Instant>,
}

/// State carried between resource samples.
///
/// Owned by the application root and passed into every
/// [`ResourceCollector::collect`] call. Tests build a fresh one each.
#[derive(Debug, Clone, Default)]
pub struct ResourceContext {
    cpu_history: VecDeque<f64>,
    prev_cpu: Option<CpuStat>,
    net: NetSample,
}

impl ResourceContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// CPU samples, oldest first. Never longer than [`CPU_HISTORY_LEN`].
    pub fn cpu_history(&self) -> Vec<f64> {
        self.cpu_history.iter().copied().collect()
    }

    fn push_cpu(&mut self, percent: f64) {
        self.cpu_history.push_back(percent);
        while self.cpu_history.len() > CPU_HISTORY_LEN {
            self.cpu_history.pop_front();
        }
    }
}

/// Samples OS resource usage from `/proc` and the disk list.
pub struct ResourceCollector<F: FileSystem> {
    fs: F,
    proc_path: String,
    disk_mount: PathBuf,
    /// `None` when disk usage is not sampled.
    disks: Option<Disks>,
}

impl<F: FileSystem> ResourceCollector<F> {
    /// Creates a new resource collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `config` - Supplies the proc path and the disk mount point
    pub fn new(fs: F, config: &Config) -> Self {
        let mut collector = Self::without_disks(fs, config);
        collector.disks = Some(Disks::new_with_refreshed_list());
        collector
    }

    /// Creates a collector that reports zero disk usage.
    pub fn without_disks(fs: F, config: &Config) -> Self {
        Self {
            fs,
            proc_path: config.proc_path.clone(),
            disk_mount: config.disk_mount.clone(),
            disks: None,
        }
    }

    /// Takes one sample, updating the CPU history and network baseline in `ctx`.
    ///
    /// Never fails: unreadable sources leave their fields at zero.
    pub fn collect(&mut self, ctx: &mut ResourceContext) -> ResourceSnapshot {
        self.collect_at(ctx, Instant::now())
    }

    /// Same as [`ResourceCollector::collect`] with an explicit sample time.
    pub fn collect_at(&mut self, ctx: &mut ResourceContext, now: Instant) -> ResourceSnapshot {
        let mut snapshot = ResourceSnapshot::default();

        snapshot.cpu_percent = self.sample_cpu(ctx);
        ctx.push_cpu(snapshot.cpu_percent);
        snapshot.cpu_history = ctx.cpu_history();

        match self.read_meminfo() {
            Ok(mem) => {
                let used = mem.used();
                snapshot.memory_percent = round_to(used as f64 / mem.mem_total as f64 * 100.0, 1);
                snapshot.memory_used_gb = kb_to_gb(used);
                snapshot.memory_total_gb = kb_to_gb(mem.mem_total);
            }
            Err(e) => debug!(error = %e, "meminfo unavailable"),
        }

        let (used, total) = self.disk_usage();
        if total > 0 {
            snapshot.disk_percent = round_to(used as f64 / total as f64 * 100.0, 1);
            snapshot.disk_used_gb = round_to(used as f64 / BYTES_PER_GB, 1);
            snapshot.disk_total_gb = round_to(total as f64 / BYTES_PER_GB, 1);
        }

        let (sent_rate, recv_rate) = self.sample_net(ctx, now);
        snapshot.net_sent_bytes_per_sec = sent_rate;
        snapshot.net_recv_bytes_per_sec = recv_rate;

        match self.read_loadavg() {
            Ok(load) => snapshot.load_average_1m = load.load1,
            Err(e) => debug!(error = %e, "loadavg unavailable"),
        }

        snapshot.process_count = self.count_processes();

        snapshot
    }

    fn proc_file(&self, name: &str) -> PathBuf {
        Path::new(&self.proc_path).join(name)
    }

    fn read_meminfo(&self) -> Result<MemInfo, CollectError> {
        let content = self.fs.read_to_string(&self.proc_file("meminfo"))?;
        parse_meminfo(&content).map_err(|e| CollectError::Parse(e.message))
    }

    fn read_loadavg(&self) -> Result<LoadAvg, CollectError> {
        let content = self.fs.read_to_string(&self.proc_file("loadavg"))?;
        parse_loadavg(&content).map_err(|e| CollectError::Parse(e.message))
    }

    fn read_cpu(&self) -> Result<CpuStat, CollectError> {
        let content = self.fs.read_to_string(&self.proc_file("stat"))?;
        parse_global_stat(&content).map_err(|e| CollectError::Parse(e.message))
    }

    fn read_net(&self) -> Result<(u64, u64), CollectError> {
        let content = self.fs.read_to_string(&self.proc_file("net/dev"))?;
        let devices = parse_net_dev(&content).map_err(|e| CollectError::Parse(e.message))?;
        Ok(external_traffic(&devices))
    }

    /// Busy share of the ticks elapsed since the previous sample.
    ///
    /// The first sample has no baseline and reads 0.
    fn sample_cpu(&self, ctx: &mut ResourceContext) -> f64 {
        let current = match self.read_cpu() {
            Ok(cpu) => cpu,
            Err(e) => {
                debug!(error = %e, "cpu stat unavailable");
                return 0.0;
            }
        };
        let Some(prev) = ctx.prev_cpu.replace(current) else {
            return 0.0;
        };

        let total = current.total().saturating_sub(prev.total());
        let busy = current.busy().saturating_sub(prev.busy());
        if total == 0 {
            return 0.0;
        }
        round_to((busy as f64 / total as f64 * 100.0).min(100.0), 1)
    }

    /// Bytes per second since the previous sample.
    ///
    /// Without a previous sample the elapsed time is taken as one second
    /// against zero counters, so the first rate equals the cumulative totals.
    fn sample_net(&self, ctx: &mut ResourceContext, now: Instant) -> (i64, i64) {
        let (sent, recv) = match self.read_net() {
            Ok(counters) => counters,
            Err(e) => {
                debug!(error = %e, "net/dev unavailable");
                return (0, 0);
            }
        };

        let elapsed = ctx
            .net
            .at
            .map(|at| now.saturating_duration_since(at).as_secs_f64())
            .filter(|secs| *secs > 0.0)
            .unwrap_or(1.0);
        // A counter reset (interface gone, wrap) reads as zero traffic.
        let rate = |current: u64, previous: u64| -> i64 {
            (current.saturating_sub(previous) as f64 / elapsed) as i64
        };
        let rates = (rate(sent, ctx.net.sent), rate(recv, ctx.net.recv));

        ctx.net = NetSample {
            sent,
            recv,
            at: Some(now),
        };
        rates
    }

    /// `(used, total)` bytes of the disk mounted closest to `disk_mount`.
    fn disk_usage(&mut self) -> (u64, u64) {
        let Some(disks) = self.disks.as_mut() else {
            return (0, 0);
        };
        disks.refresh();
        if disks.list().is_empty() {
            disks.refresh_list();
        }

        disks
            .list()
            .iter()
            .filter(|disk| self.disk_mount.starts_with(disk.mount_point()))
            .max_by_key(|disk| disk.mount_point().as_os_str().len())
            .map(|disk| {
                let total = disk.total_space();
                (total.saturating_sub(disk.available_space()), total)
            })
            .unwrap_or((0, 0))
    }

    /// Number of numeric entries (pids) under the proc path.
    fn count_processes(&self) -> u32 {
        match self.fs.read_dir(Path::new(&self.proc_path)) {
            Ok(entries) => entries
                .iter()
                .filter_map(|path| path.file_name()?.to_str()?.parse::<u32>().ok())
                .count() as u32,
            Err(e) => {
                debug!(error = %e, "process list unavailable");
                0
            }
        }
    }
}

fn kb_to_gb(kb: u64) -> f64 {
    round_to(kb as f64 * 1024.0 / BYTES_PER_GB, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use std::time::Duration;

    fn collector(fs: MockFs) -> ResourceCollector<MockFs> {
        ResourceCollector::without_disks(fs, &Config::default())
    }

    #[test]
    fn test_typical_system() {
        let mut c = collector(MockFs::typical_system());
        let mut ctx = ResourceContext::new();
        let snapshot = c.collect(&mut ctx);

        assert_eq!(snapshot.cpu_percent, 0.0);
        assert_eq!(snapshot.cpu_history, vec![0.0]);
        assert_eq!(snapshot.memory_total_gb, 15.6);
        assert_eq!(snapshot.memory_used_gb, 4.2);
        assert_eq!(snapshot.memory_percent, 26.8);
        assert_eq!(snapshot.disk_total_gb, 0.0);
        assert!((snapshot.load_average_1m - 0.15).abs() < 0.001);
        assert_eq!(snapshot.process_count, 5);
    }

    #[test]
    fn test_cpu_percent_from_tick_delta() {
        let mut fs = MockFs::typical_system();
        let mut ctx = ResourceContext::new();
        collector(fs.clone()).collect(&mut ctx);

        fs.advance_cpu(300, 700);
        let snapshot = collector(fs).collect(&mut ctx);
        assert_eq!(snapshot.cpu_percent, 30.0);
        assert_eq!(snapshot.cpu_history, vec![0.0, 30.0]);
    }

    #[test]
    fn test_cpu_history_is_bounded() {
        let mut c = collector(MockFs::typical_system());
        let mut ctx = ResourceContext::new();
        for _ in 0..40 {
            let snapshot = c.collect(&mut ctx);
            assert!(snapshot.cpu_history.len() <= CPU_HISTORY_LEN);
        }
        assert_eq!(ctx.cpu_history().len(), CPU_HISTORY_LEN);
    }

    #[test]
    fn test_net_rate_between_samples() {
        let mut fs = MockFs::typical_system();
        let mut ctx = ResourceContext::new();
        let t0 = Instant::now();

        // First sample: no baseline, the rate is the raw cumulative counters.
        let first = collector(fs.clone()).collect_at(&mut ctx, t0);
        assert_eq!(first.net_sent_bytes_per_sec, 500_000);
        assert_eq!(first.net_recv_bytes_per_sec, 1_000_000);

        fs.set_net_counters(3_000_000, 1_500_000);
        let second = collector(fs).collect_at(&mut ctx, t0 + Duration::from_secs(2));
        assert_eq!(second.net_sent_bytes_per_sec, 500_000);
        assert_eq!(second.net_recv_bytes_per_sec, 1_000_000);
    }

    #[test]
    fn test_net_counter_reset_reads_zero() {
        let mut fs = MockFs::typical_system();
        let mut ctx = ResourceContext::new();
        let t0 = Instant::now();
        collector(fs.clone()).collect_at(&mut ctx, t0);

        fs.set_net_counters(10, 10);
        let snapshot = collector(fs).collect_at(&mut ctx, t0 + Duration::from_secs(1));
        assert_eq!(snapshot.net_sent_bytes_per_sec, 0);
        assert_eq!(snapshot.net_recv_bytes_per_sec, 0);
    }

    #[test]
    fn test_missing_proc_degrades_to_zero() {
        let mut c = collector(MockFs::new());
        let mut ctx = ResourceContext::new();
        let snapshot = c.collect(&mut ctx);

        assert_eq!(
            snapshot,
            ResourceSnapshot {
                cpu_history: vec![0.0],
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_custom_proc_path() {
        let mut fs = MockFs::new();
        fs.add_file("/host/proc/loadavg", "2.50 1.00 0.50 3/200 999\n");
        fs.add_pids("/host/proc", [7, 8]);
        let config = Config {
            proc_path: "/host/proc".to_string(),
            ..Config::default()
        };

        let snapshot =
            ResourceCollector::without_disks(fs, &config).collect(&mut ResourceContext::new());
        assert_eq!(snapshot.load_average_1m, 2.5);
        assert_eq!(snapshot.process_count, 2);
    }
}
