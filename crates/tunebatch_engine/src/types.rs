use tunebatch_core::{
    BatchResult, DependencyReport, FetchError, LogLevel, PlaylistEntry, RunKind,
};

/// Everything the engine reports back to the consumer loop.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Log {
        message: String,
        level: LogLevel,
    },
    Progress(f32),
    ItemStarted {
        kind: RunKind,
        index: usize,
        url: String,
    },
    ItemFinished {
        kind: RunKind,
        index: usize,
        url: String,
        succeeded: bool,
    },
    RunFinished(BatchResult),
    PlaylistFetched(Result<Vec<PlaylistEntry>, FetchError>),
    DependenciesProbed(DependencyReport),
}

impl EngineEvent {
    pub(crate) fn log(level: LogLevel, message: impl Into<String>) -> Self {
        EngineEvent::Log {
            message: message.into(),
            level,
        }
    }
}
