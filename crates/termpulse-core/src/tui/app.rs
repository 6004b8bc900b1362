//! Main TUI application.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info};

use crate::collector::{
    DiffCollector, HistoryCollector, MomentumCollector, RealFs, RepositoryCollector,
    ResourceCollector, ResourceContext, Session, SystemRunner,
};
use crate::config::Config;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::schedule::{Schedule, Task};
use super::state::AppState;

/// Main TUI application.
///
/// Owns every collector and the state they feed. Collectors run on the
/// event-loop thread, each on its own cadence.
pub struct App {
    cwd: PathBuf,
    config: Config,
    state: AppState,
    schedule: Schedule,
    session: Session,
    resources: ResourceCollector<RealFs>,
    resource_ctx: ResourceContext,
    repository: RepositoryCollector<SystemRunner>,
    history: HistoryCollector<RealFs>,
    momentum: MomentumCollector<SystemRunner>,
    diff: DiffCollector<SystemRunner>,
    should_quit: bool,
}

impl App {
    /// Creates a new App watching `cwd`.
    pub fn new(cwd: PathBuf, config: Config) -> Self {
        let runner = SystemRunner::new();
        Self {
            state: AppState::new(&cwd),
            schedule: Schedule::new(config.intervals),
            session: Session::start_now(),
            resources: ResourceCollector::new(RealFs::new(), &config),
            resource_ctx: ResourceContext::new(),
            repository: RepositoryCollector::new(runner, &config),
            history: HistoryCollector::from_config(RealFs::new(), &config),
            momentum: MomentumCollector::new(runner, &config),
            diff: DiffCollector::new(runner, &config),
            cwd,
            config,
            should_quit: false,
        }
    }

    /// Runs the TUI application.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);
        info!(cwd = %self.cwd.display(), "dashboard started");

        // Initial data fetch
        self.poll(Instant::now());

        loop {
            terminal.draw(|frame| render(frame, &self.state))?;

            match events.next() {
                Ok(Event::Tick) => {
                    if !self.state.paused {
                        self.poll(Instant::now());
                    }
                }
                Ok(Event::Key(key)) => match handle_key(&mut self.state, key) {
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::RefreshAll => {
                        self.schedule.reset();
                        self.poll(Instant::now());
                    }
                    KeyAction::ViewChanged => {
                        self.schedule.reset_task(Task::Diff);
                        self.schedule.reset_task(Task::Heatmap);
                        self.poll(Instant::now());
                    }
                    KeyAction::None => {}
                },
                // Next draw picks up the new size.
                Ok(Event::Resize) => {}
                Err(_) => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        info!("dashboard stopped");
        Ok(())
    }

    /// Runs every task that is due at `now`.
    fn poll(&mut self, now: Instant) {
        for task in self.schedule.due(now, self.state.view) {
            let started = Instant::now();
            self.run_task(task);
            debug!(?task, elapsed_ms = started.elapsed().as_millis() as u64, "task done");
        }
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::Resources => {
                self.state.resources = self.resources.collect(&mut self.resource_ctx);
            }
            Task::Repository => {
                self.state.repository = self.repository.collect(&self.cwd);
            }
            Task::Commands => {
                self.state.commands = self.history.collect(self.config.history_limit);
            }
            Task::Momentum => {
                self.state.momentum = self.momentum.collect(
                    &self.session,
                    &self.cwd,
                    &self.state.repository,
                    &self.state.commands,
                );
            }
            Task::Diff => {
                let files = self.diff.collect_changed_files(&self.cwd);
                self.state.set_diff_files(files);
            }
            Task::Heatmap => {
                let entries = self.diff.collect_heatmap(
                    &self.cwd,
                    self.config.heatmap_commits,
                    self.config.heatmap_top,
                );
                self.state.set_heatmap(entries);
            }
        }
    }
}
