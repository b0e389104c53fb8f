use std::path::PathBuf;

use crate::{BatchResult, DependencyReport, FetchError, LogLevel, PlaylistEntry, RunKind};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User submitted one URL for the job list.
    AddUrl(String),
    /// User removed the job at a 0-based position.
    RemoveJob(usize),
    /// User cleared the job list.
    ClearJobs,
    /// User picked a new destination root.
    SetDestination(PathBuf),
    /// User asked to load a playlist.
    LoadPlaylist(String),
    /// User flipped inclusion of the entry at a 0-based position.
    ToggleEntry(usize),
    IncludeAll,
    ExcludeAll,
    InvertSelection,
    /// User started a run over the job list.
    StartSongsRun,
    /// User started a run over the included playlist entries.
    StartPlaylistRun,
    /// Startup or user request to probe the external binaries.
    CheckDependencies,
    /// Engine finished probing.
    DependenciesProbed(DependencyReport),
    /// Engine finished a playlist fetch.
    PlaylistFetched(Result<Vec<PlaylistEntry>, FetchError>),
    /// Engine log line for the active run.
    RunLog { message: String, level: LogLevel },
    /// Engine progress fraction for the active run.
    RunProgress(f32),
    /// Engine is about to invoke the extractor for `url`.
    ItemStarted { kind: RunKind, url: String },
    /// Engine finished (or faulted on) `url`.
    ItemFinished {
        kind: RunKind,
        url: String,
        succeeded: bool,
    },
    /// Engine completed or aborted the active run.
    RunFinished(BatchResult),
    /// Fallback for placeholder wiring.
    NoOp,
}
