use std::fmt::Write as _;

use chrono::Local;
use engine_logging::engine_warn;
use tunebatch_core::{
    playlist_counter_label, AppViewModel, JobItem, JobStatus, LogLevel, PlaylistEntry,
    StatusEvent, StatusSink, MAX_JOBS,
};

use crate::platform::config::EventFormat;

/// Writes each status event to stdout as it arrives.
pub struct TerminalSink {
    format: EventFormat,
}

impl TerminalSink {
    pub fn new(format: EventFormat) -> Self {
        Self { format }
    }
}

impl StatusSink for TerminalSink {
    fn emit(&self, event: &StatusEvent) {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        if let Some(text) = format_event(event, &timestamp, self.format) {
            println!("{text}");
        }
    }
}

pub fn format_event(event: &StatusEvent, timestamp: &str, format: EventFormat) -> Option<String> {
    match format {
        EventFormat::Json => match serde_json::to_string(event) {
            Ok(line) => Some(line),
            Err(err) => {
                engine_warn!("Could not serialize status event: {err}");
                None
            }
        },
        EventFormat::Text => Some(format_text(event, timestamp)),
    }
}

fn format_text(event: &StatusEvent, timestamp: &str) -> String {
    match event {
        StatusEvent::Log { message, level } => {
            format!("[{timestamp}] {:<5} {message}", level_tag(*level))
        }
        StatusEvent::Progress { fraction } => {
            format!("[{timestamp}] Progress: {:.0}%", fraction * 100.0)
        }
        StatusEvent::ListChanged { items } => {
            let mut text = format!("Songs: {}/{}", items.len(), MAX_JOBS);
            for item in items {
                push_job_row(&mut text, item);
            }
            text
        }
        StatusEvent::PlaylistLoaded { entries, summary }
        | StatusEvent::SelectionChanged { entries, summary } => {
            let mut text = playlist_counter_label(summary);
            for entry in entries {
                push_entry_row(&mut text, entry);
            }
            text
        }
        StatusEvent::RunFinished { kind } => {
            format!("[{timestamp}] Finished {} download", kind.label())
        }
    }
}

/// Full snapshot printed by the `show` command.
pub fn render_view(view: &AppViewModel) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Download location: {}", view.destination_root.display());
    match view.active_run {
        Some(kind) => {
            let _ = writeln!(
                text,
                "Downloading {}: {:.0}%",
                kind.label(),
                view.progress * 100.0
            );
        }
        None if view.fetch_in_flight => {
            let _ = writeln!(text, "Loading playlist...");
        }
        None => {}
    }
    if let Some(result) = &view.last_result {
        let _ = writeln!(
            text,
            "Last {} run: {}/{} succeeded in {:.1}s",
            result.kind.label(),
            result.succeeded,
            result.total,
            result.elapsed_ms as f64 / 1000.0
        );
    }

    text.push_str(&view.job_counter_label());
    for row in &view.jobs {
        let _ = write!(
            text,
            "\n  {:>2}. {} [{}] {}",
            row.position + 1,
            row.title,
            status_label(row.status),
            row.url
        );
    }

    text.push('\n');
    text.push_str(&view.playlist_counter_label());
    for row in &view.playlist {
        let _ = write!(
            text,
            "\n  [{}] {:>2}. {} ({})",
            if row.included { 'x' } else { ' ' },
            row.position + 1,
            row.title,
            row.duration
        );
    }
    text
}

fn push_job_row(text: &mut String, item: &JobItem) {
    let _ = write!(
        text,
        "\n  {:>2}. {} [{}] {}",
        item.position + 1,
        item.title,
        status_label(item.status),
        item.url
    );
}

fn push_entry_row(text: &mut String, entry: &PlaylistEntry) {
    let _ = write!(
        text,
        "\n  [{}] {:>2}. {} ({})",
        if entry.included { 'x' } else { ' ' },
        entry.position + 1,
        entry.title,
        entry.duration_label()
    );
}

fn level_tag(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Info => "INFO",
        LogLevel::Success => "OK",
        LogLevel::Warning => "WARN",
        LogLevel::Error => "ERROR",
    }
}

fn status_label(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Pending => "pending",
        JobStatus::Downloading => "downloading",
        JobStatus::Completed => "completed",
        JobStatus::Failed => "failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunebatch_core::{update, AppState, Msg, RunKind, SelectionSummary};

    #[test]
    fn log_lines_carry_timestamp_and_level() {
        let event = StatusEvent::log(LogLevel::Success, "Completed: Song 1");
        assert_eq!(
            format_event(&event, "12:00:01", EventFormat::Text).unwrap(),
            "[12:00:01] OK    Completed: Song 1"
        );
    }

    #[test]
    fn progress_is_shown_as_percent() {
        let event = StatusEvent::Progress { fraction: 0.5 };
        assert_eq!(
            format_event(&event, "t", EventFormat::Text).unwrap(),
            "[t] Progress: 50%"
        );
    }

    #[test]
    fn json_lines_are_tagged_by_event() {
        let event = StatusEvent::RunFinished {
            kind: RunKind::Playlist,
        };
        assert_eq!(
            format_event(&event, "t", EventFormat::Json).unwrap(),
            r#"{"event":"run_finished","kind":"playlist"}"#
        );
    }

    #[test]
    fn job_list_snapshot_lists_every_row() {
        let (state, _) = update(
            AppState::default(),
            Msg::AddUrl("https://youtu.be/dQw4w9WgXcQ".to_string()),
        );
        let event = StatusEvent::ListChanged {
            items: state.jobs().snapshot(),
        };
        assert_eq!(
            format_event(&event, "t", EventFormat::Text).unwrap(),
            "Songs: 1/15\n   1. Song 1 [pending] https://youtu.be/dQw4w9WgXcQ"
        );
    }

    #[test]
    fn empty_playlist_uses_placeholder_label() {
        let event = StatusEvent::SelectionChanged {
            entries: Vec::new(),
            summary: SelectionSummary::default(),
        };
        assert_eq!(
            format_event(&event, "t", EventFormat::Text).unwrap(),
            "No playlist loaded"
        );
    }

    #[test]
    fn view_includes_counters() {
        let view = AppState::new("/music".into()).view();
        let text = render_view(&view);
        assert!(text.starts_with("Download location: /music\n"));
        assert!(text.contains("Songs: 0/15"));
        assert!(text.ends_with("No playlist loaded"));
    }
}
