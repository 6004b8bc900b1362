//! Point-in-time OS resource usage.

use serde::{Deserialize, Serialize};

/// Maximum number of CPU samples kept for the sparkline.
pub const CPU_HISTORY_LEN: usize = 30;

/// Resource usage captured by one `ResourceCollector::collect` call.
///
/// `cpu_history` is a copy of the rolling buffer at capture time, oldest first.
/// Network rates are bytes per second since the previous sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub cpu_percent: f64,
    pub cpu_history: Vec<f64>,
    pub memory_percent: f64,
    pub memory_used_gb: f64,
    pub memory_total_gb: f64,
    pub disk_percent: f64,
    pub disk_used_gb: f64,
    pub disk_total_gb: f64,
    pub net_sent_bytes_per_sec: i64,
    pub net_recv_bytes_per_sec: i64,
    pub load_average_1m: f64,
    pub process_count: u32,
}
