use std::path::PathBuf;

use crate::{DownloadableItem, RunKind, StatusEvent};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Forward to the status sink.
    Status(StatusEvent),
    FetchPlaylist {
        url: String,
    },
    StartRun {
        kind: RunKind,
        items: Vec<DownloadableItem>,
        destination_root: PathBuf,
    },
    ProbeDependencies,
}
