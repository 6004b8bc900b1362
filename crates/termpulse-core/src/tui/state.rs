//! Application state for the dashboard.

use std::path::Path;

use crate::model::{
    CommandEntry, DiffFile, HeatmapEntry, MomentumSnapshot, RepositorySnapshot, ResourceSnapshot,
};

/// Which screen fills the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Diff,
    Heatmap,
}

impl View {
    pub fn name(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Diff => "Diff",
            View::Heatmap => "Heatmap",
        }
    }
}

/// Latest snapshots plus UI state.
///
/// Snapshots are replaced wholesale by the collectors; the UI only reads them.
#[derive(Debug, Default)]
pub struct AppState {
    /// Directory name shown in the header.
    pub project: String,
    pub cwd: String,
    pub view: View,
    pub paused: bool,
    pub show_help: bool,

    pub repository: RepositorySnapshot,
    pub resources: ResourceSnapshot,
    pub commands: Vec<CommandEntry>,
    pub momentum: MomentumSnapshot,
    pub diff_files: Vec<DiffFile>,
    pub heatmap: Vec<HeatmapEntry>,

    pub diff_selected: usize,
    pub heatmap_selected: usize,
    /// Scroll offset of the selected file's diff text.
    pub diff_scroll: u16,
}

impl AppState {
    pub fn new(cwd: &Path) -> Self {
        let project = cwd
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| cwd.display().to_string());
        Self {
            project,
            cwd: cwd.display().to_string(),
            ..Default::default()
        }
    }

    /// Switches to `view`, or back to the dashboard if it is already open.
    pub fn toggle_view(&mut self, view: View) {
        self.view = if self.view == view {
            View::Dashboard
        } else {
            view
        };
    }

    pub fn select_next(&mut self) {
        match self.view {
            View::Dashboard => {}
            View::Diff => {
                if self.diff_selected + 1 < self.diff_files.len() {
                    self.diff_selected += 1;
                    self.diff_scroll = 0;
                }
            }
            View::Heatmap => {
                if self.heatmap_selected + 1 < self.heatmap.len() {
                    self.heatmap_selected += 1;
                }
            }
        }
    }

    pub fn select_prev(&mut self) {
        match self.view {
            View::Dashboard => {}
            View::Diff => {
                if self.diff_selected > 0 {
                    self.diff_selected -= 1;
                    self.diff_scroll = 0;
                }
            }
            View::Heatmap => self.heatmap_selected = self.heatmap_selected.saturating_sub(1),
        }
    }

    pub fn scroll_diff(&mut self, down: bool) {
        self.diff_scroll = if down {
            self.diff_scroll.saturating_add(1)
        } else {
            self.diff_scroll.saturating_sub(1)
        };
    }

    /// Replaces the changed-file list, keeping the selection on the same
    /// path when it is still present.
    pub fn set_diff_files(&mut self, files: Vec<DiffFile>) {
        let selected_path = self.selected_diff().map(|f| f.path.clone());
        self.diff_files = files;
        let position = selected_path
            .and_then(|path| self.diff_files.iter().position(|f| f.path == path));
        match position {
            Some(i) => self.diff_selected = i,
            None => {
                self.diff_selected = clamp_index(self.diff_selected, self.diff_files.len());
                self.diff_scroll = 0;
            }
        }
    }

    pub fn set_heatmap(&mut self, entries: Vec<HeatmapEntry>) {
        self.heatmap = entries;
        self.heatmap_selected = clamp_index(self.heatmap_selected, self.heatmap.len());
    }

    pub fn selected_diff(&self) -> Option<&DiffFile> {
        self.diff_files.get(self.diff_selected)
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DiffStatus;

    fn files(paths: &[&str]) -> Vec<DiffFile> {
        paths
            .iter()
            .map(|p| DiffFile::new(*p, DiffStatus::Modified))
            .collect()
    }

    #[test]
    fn test_project_name_from_cwd() {
        let state = AppState::new(Path::new("/home/dev/src/termpulse"));
        assert_eq!(state.project, "termpulse");
        assert_eq!(state.cwd, "/home/dev/src/termpulse");
        assert_eq!(AppState::new(Path::new("/")).project, "/");
    }

    #[test]
    fn test_toggle_view() {
        let mut state = AppState::default();
        state.toggle_view(View::Diff);
        assert_eq!(state.view, View::Diff);
        state.toggle_view(View::Heatmap);
        assert_eq!(state.view, View::Heatmap);
        state.toggle_view(View::Heatmap);
        assert_eq!(state.view, View::Dashboard);
    }

    #[test]
    fn test_selection_is_bounded() {
        let mut state = AppState {
            view: View::Diff,
            ..Default::default()
        };
        state.set_diff_files(files(&["a", "b"]));

        state.select_prev();
        assert_eq!(state.diff_selected, 0);
        state.select_next();
        state.select_next();
        assert_eq!(state.diff_selected, 1);
        assert_eq!(state.selected_diff().map(|f| f.path.as_str()), Some("b"));
    }

    #[test]
    fn test_selection_follows_path_across_refresh() {
        let mut state = AppState {
            view: View::Diff,
            ..Default::default()
        };
        state.set_diff_files(files(&["a", "c"]));
        state.select_next();
        state.scroll_diff(true);

        state.set_diff_files(files(&["a", "b", "c"]));
        assert_eq!(state.diff_selected, 2);
        assert_eq!(state.diff_scroll, 1);

        state.set_diff_files(files(&["a"]));
        assert_eq!(state.diff_selected, 0);
        assert_eq!(state.diff_scroll, 0);

        state.set_diff_files(Vec::new());
        assert_eq!(state.diff_selected, 0);
        assert!(state.selected_diff().is_none());
    }
}
