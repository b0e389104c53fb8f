use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::view_model::AppViewModel;
use crate::{BatchResult, DependencyReport, JobList, RunKind, SelectionSet};

/// The orchestration core's model. Only [`crate::update`] mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    jobs: JobList,
    selection: SelectionSet,
    destination_root: PathBuf,
    active_run: Option<RunKind>,
    /// Job urls handed to the active songs run and still in the list.
    run_members: BTreeSet<String>,
    fetch_in_flight: bool,
    progress: f32,
    dependencies: Option<DependencyReport>,
    last_result: Option<BatchResult>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}

impl AppState {
    pub fn new(destination_root: PathBuf) -> Self {
        Self {
            jobs: JobList::new(),
            selection: SelectionSet::new(),
            destination_root,
            active_run: None,
            run_members: BTreeSet::new(),
            fetch_in_flight: false,
            progress: 0.0,
            dependencies: None,
            last_result: None,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::from_state(self)
    }

    pub fn jobs(&self) -> &JobList {
        &self.jobs
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    pub fn active_run(&self) -> Option<RunKind> {
        self.active_run
    }

    pub fn is_fetching(&self) -> bool {
        self.fetch_in_flight
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn dependencies(&self) -> Option<&DependencyReport> {
        self.dependencies.as_ref()
    }

    pub fn last_result(&self) -> Option<&BatchResult> {
        self.last_result.as_ref()
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn jobs_mut(&mut self) -> &mut JobList {
        self.dirty = true;
        &mut self.jobs
    }

    pub(crate) fn selection_mut(&mut self) -> &mut SelectionSet {
        self.dirty = true;
        &mut self.selection
    }

    pub(crate) fn set_destination_root(&mut self, root: PathBuf) {
        self.destination_root = root;
        self.dirty = true;
    }

    pub(crate) fn begin_run(
        &mut self,
        kind: RunKind,
        members: impl IntoIterator<Item = String>,
    ) {
        self.active_run = Some(kind);
        self.run_members = members.into_iter().collect();
        self.dirty = true;
    }

    /// Whether status reports for `url` belong to a job of the active run.
    pub(crate) fn is_run_member(&self, url: &str) -> bool {
        self.run_members.contains(url)
    }

    /// A job that leaves the list stops belonging to the run, even if the
    /// same url is added again later.
    pub(crate) fn release_run_member(&mut self, url: &str) {
        self.run_members.remove(url);
    }

    pub(crate) fn release_all_run_members(&mut self) {
        self.run_members.clear();
    }

    pub(crate) fn finish_run(&mut self, result: BatchResult) {
        self.active_run = None;
        self.run_members.clear();
        self.progress = 0.0;
        self.last_result = Some(result);
        self.dirty = true;
    }

    pub(crate) fn set_fetching(&mut self, fetching: bool) {
        self.fetch_in_flight = fetching;
        self.dirty = true;
    }

    pub(crate) fn set_progress(&mut self, fraction: f32) {
        self.progress = fraction.clamp(0.0, 1.0);
        self.dirty = true;
    }

    pub(crate) fn set_dependencies(&mut self, report: DependencyReport) {
        self.dependencies = Some(report);
        self.dirty = true;
    }
}
