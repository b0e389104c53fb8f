use std::path::PathBuf;

use crate::{
    AppState, BatchResult, DependencyReport, JobStatus, RunKind, SelectionSummary, MAX_JOBS,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub jobs: Vec<JobRowView>,
    pub job_count: usize,
    pub job_capacity: usize,
    pub playlist: Vec<PlaylistRowView>,
    pub selection: SelectionSummary,
    pub destination_root: PathBuf,
    pub active_run: Option<RunKind>,
    pub fetch_in_flight: bool,
    pub progress: f32,
    pub dependencies: Option<DependencyReport>,
    pub last_result: Option<BatchResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub position: usize,
    pub title: String,
    pub url: String,
    pub status: JobStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRowView {
    pub position: usize,
    pub title: String,
    pub external_id: String,
    pub duration: String,
    pub included: bool,
}

impl AppViewModel {
    pub(crate) fn from_state(state: &AppState) -> Self {
        let jobs = state
            .jobs()
            .items()
            .iter()
            .map(|item| JobRowView {
                position: item.position,
                title: item.title.clone(),
                url: item.url.clone(),
                status: item.status,
            })
            .collect::<Vec<_>>();
        let playlist = state
            .selection()
            .entries()
            .iter()
            .map(|entry| PlaylistRowView {
                position: entry.position,
                title: entry.title.clone(),
                external_id: entry.external_id.clone(),
                duration: entry.duration_label(),
                included: entry.included,
            })
            .collect();

        Self {
            job_count: jobs.len(),
            jobs,
            job_capacity: MAX_JOBS,
            playlist,
            selection: state.selection().counted(),
            destination_root: state.destination_root().to_path_buf(),
            active_run: state.active_run(),
            fetch_in_flight: state.is_fetching(),
            progress: state.progress(),
            dependencies: state.dependencies().cloned(),
            last_result: state.last_result().cloned(),
        }
    }

    /// `Songs: 3/15`
    pub fn job_counter_label(&self) -> String {
        format!("Songs: {}/{}", self.job_count, self.job_capacity)
    }

    pub fn playlist_counter_label(&self) -> String {
        playlist_counter_label(&self.selection)
    }
}

/// `Will download: 2/5 songs • Total: 7:41`, with the total omitted when no
/// included entry has a known duration.
pub fn playlist_counter_label(summary: &SelectionSummary) -> String {
    if summary.total == 0 {
        return "No playlist loaded".to_string();
    }
    let head = format!(
        "Will download: {}/{} songs",
        summary.included_count, summary.total
    );
    match summary.total_duration_label() {
        Some(total) => format!("{head} • Total: {total}"),
        None => head,
    }
}
