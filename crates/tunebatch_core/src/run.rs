use serde::Serialize;
use thiserror::Error;

use crate::{JobItem, PlaylistEntry};

/// Which collection a run consumes; also selects the on-disk subdirectory and
/// filename template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunKind {
    Songs,
    Playlist,
}

impl RunKind {
    pub fn label(self) -> &'static str {
        match self {
            RunKind::Songs => "songs",
            RunKind::Playlist => "playlist",
        }
    }
}

/// What the runner needs to know about one item, detached from the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadableItem {
    pub url: String,
    pub label: String,
    pub duration_seconds: Option<u64>,
}

impl From<&JobItem> for DownloadableItem {
    fn from(item: &JobItem) -> Self {
        Self {
            url: item.url.clone(),
            label: item.title.clone(),
            duration_seconds: None,
        }
    }
}

impl From<&PlaylistEntry> for DownloadableItem {
    fn from(entry: &PlaylistEntry) -> Self {
        Self {
            url: entry.url.clone(),
            label: entry.title.clone(),
            duration_seconds: entry.duration_seconds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    Completed,
    /// The invocation mechanism itself failed and the rest of the batch was skipped.
    Aborted { message: String },
}

/// Figures derived at the end of a run; never stored on the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub kind: RunKind,
    pub total: usize,
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub elapsed_ms: u64,
    /// Sum of the known durations of the items that were attempted.
    pub known_duration_seconds: u64,
    pub outcome: RunOutcome,
}

impl BatchResult {
    pub fn new(kind: RunKind, total: usize) -> Self {
        Self {
            kind,
            total,
            attempted: 0,
            succeeded: 0,
            failed: 0,
            elapsed_ms: 0,
            known_duration_seconds: 0,
            outcome: RunOutcome::Completed,
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self.outcome, RunOutcome::Aborted { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunRejection {
    #[error("A download is already running")]
    AlreadyRunning,
    #[error("No songs to download")]
    NoSongs,
    #[error("No songs selected for download")]
    NothingSelected,
}
