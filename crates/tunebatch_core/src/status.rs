use serde::Serialize;

use crate::{JobItem, PlaylistEntry, RunKind, SelectionSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Everything the presentation layer is told. Snapshots are whole, never diffs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StatusEvent {
    Log { message: String, level: LogLevel },
    Progress { fraction: f32 },
    ListChanged { items: Vec<JobItem> },
    PlaylistLoaded {
        entries: Vec<PlaylistEntry>,
        summary: SelectionSummary,
    },
    SelectionChanged {
        entries: Vec<PlaylistEntry>,
        summary: SelectionSummary,
    },
    RunFinished { kind: RunKind },
}

impl StatusEvent {
    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        StatusEvent::Log {
            message: message.into(),
            level,
        }
    }
}

/// Consumer of status events. Implementations render; they never mutate the model.
pub trait StatusSink {
    fn emit(&self, event: &StatusEvent);
}
