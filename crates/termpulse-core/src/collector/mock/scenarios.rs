//! Pre-built mock scenarios for testing.
//!
//! These provide realistic `/proc`, shell-history and VCS states.

use super::filesystem::MockFs;
use super::runner::MockRunner;

/// `/proc/stat` for a 4-CPU machine; [`MockFs::advance_cpu`] adds load on top.
pub const TYPICAL_STAT: &str = "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 2500 125 750 20000 250 50 25 0 0 0
cpu1 2500 125 750 20000 250 50 25 0 0 0
cpu2 2500 125 750 20000 250 50 25 0 0 0
cpu3 2500 125 750 20000 250 50 25 0 0 0
intr 1000000 50 0 0 0 0 0 0 0 1 0 0 0 100 0 0 1000
ctxt 500000
btime 1700000000
processes 10000
procs_running 2
procs_blocked 0
";

impl MockFs {
    /// Creates a typical system: 16 GB of memory, light load, one uplink.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file("/proc/loadavg", "0.15 0.10 0.05 1/150 1234\n");
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
Active:          4096000 kB
Inactive:        2048000 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
Dirty:              1024 kB
Writeback:             0 kB
Slab:             512000 kB
SReclaimable:     256000 kB
",
        );
        fs.add_file("/proc/stat", TYPICAL_STAT);
        fs.add_file("/proc/net/dev", net_dev(1_000_000, 500_000));
        fs.add_pids("/proc", [1, 2, 42, 1234, 5678]);
        fs.add_file("/proc/self/status", "Name:\ttermpulse\n");

        fs
    }

    /// Rewrites `/proc/stat` with `busy` user ticks and `idle` idle ticks
    /// added to the aggregate line of [`TYPICAL_STAT`].
    pub fn advance_cpu(&mut self, busy: u64, idle: u64) {
        let line = format!(
            "cpu  {} 500 3000 {} 1000 200 100 0 0 0",
            10000 + busy,
            80000 + idle
        );
        let stat = TYPICAL_STAT.replacen(
            "cpu  10000 500 3000 80000 1000 200 100 0 0 0",
            &line,
            1,
        );
        self.add_file("/proc/stat", stat);
    }

    /// Rewrites `/proc/net/dev` with the given eth0 counters.
    pub fn set_net_counters(&mut self, rx_bytes: u64, tx_bytes: u64) {
        self.add_file("/proc/net/dev", net_dev(rx_bytes, tx_bytes));
    }

    /// Home directory with a zsh extended-format history.
    pub fn zsh_home(home: &str) -> Self {
        let mut fs = Self::new();
        fs.add_file(
            format!("{}/.zsh_history", home),
            "\
: 1700000000:0;cd ~/src/termpulse
: 1700000060:0;git status
: 1700000120:0;cargo test
: 1700000130:0;/usr/bin/git diff
: 1700000200:0;nvim src/lib.rs
: 1700000900:0;python3 scripts/bench.py
",
        );
        fs
    }
}

/// Loopback traffic is present but never counted.
fn net_dev(rx_bytes: u64, tx_bytes: u64) -> String {
    format!(
        "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo: 12345678     9876    0    0    0     0          0         0 12345678     9876    0    0    0     0       0          0
  eth0: {rx_bytes}   654321    5   10    0     0          0       100 {tx_bytes}   456789    2    5    0     0       0          0
"
    )
}

impl MockRunner {
    /// A repository on `main` with staged, unstaged, untracked and
    /// conflicted files, two stashes and a commit 40 minutes before
    /// `1_700_003_600`.
    pub fn dirty_repository() -> Self {
        Self::new()
            .with(&["rev-parse", "--is-inside-work-tree"], "true\n")
            .with(&["branch", "--show-current"], "main\n")
            .with(
                &["rev-list", "--left-right", "--count", "HEAD...@{u}"],
                "2\t1\n",
            )
            .with(
                &["status", "--porcelain"],
                "M  src/app.rs\nMM src/lib.rs\n D README.md\n?? notes.txt\nUU Cargo.lock\n",
            )
            .with(&["log", "-1", "--format=%ct"], "1700001200\n")
            .with(&["log", "-1", "--format=%s"], "Add drift meter\n")
            .with(
                &["log", "--oneline", "-5"],
                "a1b2c3d Add drift meter\nb2c3d4e Parse numstat\nc3d4e5f Initial commit\n",
            )
            .with(&["stash", "list"], "stash@{0}: WIP on main\nstash@{1}: WIP on main\n")
            .with(
                &["log", "--oneline", "--since=1.hour.ago"],
                "a1b2c3d Add drift meter\nb2c3d4e Parse numstat\n",
            )
            .with(
                &["diff", "--numstat"],
                "10\t2\tsrc/lib.rs\n0\t3\tREADME.md\n",
            )
            .with(
                &["diff", "--numstat", "--cached"],
                "5\t1\tsrc/app.rs\n4\t0\tsrc/lib.rs\n",
            )
            .with(
                &["diff", "--", "src/lib.rs"],
                "diff --git a/src/lib.rs b/src/lib.rs\n--- a/src/lib.rs\n+++ b/src/lib.rs\n@@ -1,3 +1,11 @@\n+pub mod model;\n context\n",
            )
            .with(&["diff", "--", "src/app.rs"], "")
            .with(
                &["diff", "--cached", "--", "src/app.rs"],
                "diff --git a/src/app.rs b/src/app.rs\n@@ -10,2 +10,6 @@\n+fn tick() {}\n",
            )
            .with(
                &["diff", "--", "README.md"],
                "diff --git a/README.md b/README.md\ndeleted file mode 100644\n@@ -1,3 +0,0 @@\n-# termpulse\n",
            )
    }
}
