//! termpulse - Ambient terminal dashboard for the current project.
//!
//! Usage:
//!   termpulse                      # dashboard for the current directory
//!   termpulse --cwd ~/src/app      # dashboard for another directory
//!   termpulse --once               # collect everything once, print JSON
//!   termpulse --log-file /tmp/tp.log -v

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use tracing::{Level, debug, info};
use tracing_subscriber::EnvFilter;

use termpulse_core::Config;
use termpulse_core::collector::{
    DiffCollector, HistoryCollector, MomentumCollector, RealFs, RepositoryCollector,
    ResourceCollector, ResourceContext, Session, SystemRunner,
};
use termpulse_core::model::{
    CommandEntry, DiffFile, HeatmapEntry, MomentumSnapshot, RepositorySnapshot, ResourceSnapshot,
};
use termpulse_core::tui::App;

/// How often the event loop wakes to check collector deadlines.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Gap between the two resource samples in `--once` mode.
const ONCE_SAMPLE_GAP: Duration = Duration::from_millis(200);

/// Ambient terminal dashboard: repository pulse, system vitals, command flow.
#[derive(Parser)]
#[command(name = "termpulse", about = "Ambient terminal dashboard", version)]
struct Args {
    /// Project directory to watch (default: current directory).
    #[arg(long, value_name = "DIR")]
    cwd: Option<PathBuf>,

    /// Collect every snapshot once and print it as JSON.
    #[arg(long)]
    once: bool,

    /// Shell history file. Overrides HISTFILE and the usual candidates.
    #[arg(long, value_name = "PATH")]
    history_file: Option<PathBuf>,

    /// Number of trailing history lines to read.
    #[arg(long, value_name = "N")]
    history_limit: Option<usize>,

    /// Version-control binary.
    #[arg(long, value_name = "PATH", default_value = "git")]
    git: String,

    /// Resource panel refresh interval in seconds.
    #[arg(long, value_name = "SECS")]
    interval_resources: Option<u64>,

    /// Repository panel refresh interval in seconds.
    #[arg(long, value_name = "SECS")]
    interval_repository: Option<u64>,

    /// Command panel refresh interval in seconds.
    #[arg(long, value_name = "SECS")]
    interval_commands: Option<u64>,

    /// Momentum panel refresh interval in seconds.
    #[arg(long, value_name = "SECS")]
    interval_momentum: Option<u64>,

    /// Diff view refresh interval in seconds.
    #[arg(long, value_name = "SECS")]
    interval_diff: Option<u64>,

    /// Heatmap view refresh interval in seconds.
    #[arg(long, value_name = "SECS")]
    interval_heatmap: Option<u64>,

    /// Write logs to this file. The dashboard owns the terminal, so without
    /// it logs are only shown in --once mode.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn to_config(&self) -> Config {
        let mut config = Config::default().with_vcs_binary(&self.git);
        if let Some(ref path) = self.history_file {
            config = config.with_history_file(path);
        }
        if let Some(limit) = self.history_limit {
            config.history_limit = limit;
        }

        let intervals = &mut config.intervals;
        let overrides = [
            (&mut intervals.resources, self.interval_resources),
            (&mut intervals.repository, self.interval_repository),
            (&mut intervals.commands, self.interval_commands),
            (&mut intervals.momentum, self.interval_momentum),
            (&mut intervals.diff, self.interval_diff),
            (&mut intervals.heatmap, self.interval_heatmap),
        ];
        for (slot, secs) in overrides {
            if let Some(secs) = secs {
                *slot = Duration::from_secs(secs.max(1));
            }
        }
        config
    }
}

/// Initializes the tracing subscriber.
///
/// Default level is INFO. Logs go to `log_file` when given, to stderr when
/// `to_stderr` is set, and nowhere otherwise.
fn init_logging(verbose: u8, quiet: bool, log_file: Option<&Path>, to_stderr: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("termpulse={},termpulse_core={}", level, level))
    });

    if let Some(path) = log_file {
        match File::create(path) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .init();
            }
            Err(e) => eprintln!("Warning: cannot open log file '{}': {}", path.display(), e),
        }
    } else if to_stderr {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}

/// Everything the dashboard shows, collected once.
#[derive(Serialize)]
struct Report {
    cwd: String,
    collected_at: String,
    repository: RepositorySnapshot,
    resources: ResourceSnapshot,
    commands: Vec<CommandEntry>,
    momentum: MomentumSnapshot,
    changed_files: Vec<DiffFile>,
    heatmap: Vec<HeatmapEntry>,
}

fn collect_once(cwd: &Path, config: &Config) -> Report {
    let runner = SystemRunner::new();

    // Rates need two samples.
    let mut resources = ResourceCollector::new(RealFs::new(), config);
    let mut ctx = ResourceContext::new();
    resources.collect(&mut ctx);
    thread::sleep(ONCE_SAMPLE_GAP);
    let resources = resources.collect(&mut ctx);

    let repository = RepositoryCollector::new(runner, config).collect(cwd);
    let commands = HistoryCollector::from_config(RealFs::new(), config).collect(config.history_limit);
    let momentum = MomentumCollector::new(runner, config).collect(
        &Session::start_now(),
        cwd,
        &repository,
        &commands,
    );

    let diff = DiffCollector::new(runner, config);
    let changed_files = diff.collect_changed_files(cwd);
    let heatmap = diff.collect_heatmap(cwd, config.heatmap_commits, config.heatmap_top);

    Report {
        cwd: cwd.display().to_string(),
        collected_at: Utc::now().to_rfc3339(),
        repository,
        resources,
        commands,
        momentum,
        changed_files,
        heatmap,
    }
}

fn resolve_cwd(arg: Option<&Path>) -> Result<PathBuf, String> {
    let path = match arg {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir().map_err(|e| format!("cannot read current directory: {}", e))?,
    };
    match path.canonicalize() {
        Ok(p) if p.is_dir() => Ok(p),
        _ => Err(format!("directory not found: {}", path.display())),
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet, args.log_file.as_deref(), args.once);

    let cwd = match resolve_cwd(args.cwd.as_deref()) {
        Ok(cwd) => cwd,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let config = args.to_config();
    debug!(?config, "configuration");

    if args.once {
        let report = collect_once(&cwd, &config);
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error encoding report: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    info!(cwd = %cwd.display(), "starting dashboard");
    let app = App::new(cwd, config);
    if let Err(e) = app.run(TICK_RATE) {
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
}
