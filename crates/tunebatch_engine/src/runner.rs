use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use engine_logging::{engine_error, engine_info, engine_warn};
use thiserror::Error;
use tunebatch_core::{BatchResult, DownloadableItem, LogLevel, RunKind, RunOutcome};

use crate::persist::{prepare_run_dir, PersistError};
use crate::settings::ToolSettings;
use crate::sink::ProgressSink;
use crate::tool::{InvocationError, ToolInvocation, ToolRunner};
use crate::EngineEvent;

/// Faults that end a run before every item was attempted.
#[derive(Debug, Error)]
enum RunFault {
    #[error(transparent)]
    OutputDir(#[from] PersistError),
    #[error(transparent)]
    Invocation(#[from] InvocationError),
}

/// Drives one extraction per item, strictly in list order.
#[derive(Clone)]
pub struct DownloadRunner {
    tools: Arc<dyn ToolRunner>,
    settings: ToolSettings,
}

impl DownloadRunner {
    pub fn new(tools: Arc<dyn ToolRunner>, settings: ToolSettings) -> Self {
        Self { tools, settings }
    }

    /// Playlist runs prefix the 1-based rank so files sort in playlist order.
    pub fn output_template(&self, kind: RunKind, output_dir: &Path, rank: usize) -> String {
        let file = match kind {
            RunKind::Songs => "%(title)s.%(ext)s".to_string(),
            RunKind::Playlist => format!("{rank:02} - %(title)s.%(ext)s"),
        };
        output_dir.join(file).to_string_lossy().into_owned()
    }

    pub fn extraction_invocation(
        &self,
        kind: RunKind,
        output_dir: &Path,
        rank: usize,
        url: &str,
    ) -> ToolInvocation {
        ToolInvocation::new(&self.settings.extractor_program)
            .arg("--extract-audio")
            .arg("--audio-format")
            .arg(&self.settings.audio_format)
            .arg("--output")
            .arg(self.output_template(kind, output_dir, rank))
            .arg("--no-playlist")
            .arg("--no-warnings")
            .arg(url)
    }

    /// Runs the batch to completion or to the first invocation fault. Always
    /// ends with a `RunFinished` event carrying the returned result.
    pub async fn run(
        &self,
        kind: RunKind,
        items: &[DownloadableItem],
        destination_root: &Path,
        sink: &dyn ProgressSink,
    ) -> BatchResult {
        let started = Instant::now();
        let mut result = BatchResult::new(kind, items.len());
        engine_info!(
            "Starting {} run with {} items under {}",
            kind.label(),
            items.len(),
            destination_root.display()
        );

        let outcome = match prepare_run_dir(destination_root, self.settings.run_dir_name(kind)) {
            Ok(output_dir) => {
                self.download_all(kind, items, &output_dir, sink, &mut result)
                    .await
            }
            Err(err) => Err(RunFault::from(err)),
        };

        match outcome {
            Ok(()) => {
                sink.emit(EngineEvent::Progress(1.0));
                let summary = match kind {
                    RunKind::Songs => format!(
                        "Download complete! {}/{} songs downloaded",
                        result.succeeded, result.total
                    ),
                    RunKind::Playlist => format!(
                        "Playlist download complete! {}/{} songs",
                        result.succeeded, result.total
                    ),
                };
                sink.emit(EngineEvent::log(LogLevel::Success, summary));
            }
            Err(fault) => {
                let message = fault.to_string();
                engine_error!("{} run aborted: {message}", kind.label());
                sink.emit(EngineEvent::log(
                    LogLevel::Error,
                    format!("Download error: {message}"),
                ));
                result.outcome = RunOutcome::Aborted { message };
            }
        }

        result.elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        engine_info!(
            "Finished {} run: {}/{} succeeded, {} failed in {}ms",
            kind.label(),
            result.succeeded,
            result.total,
            result.failed,
            result.elapsed_ms
        );
        sink.emit(EngineEvent::RunFinished(result.clone()));
        result
    }

    async fn download_all(
        &self,
        kind: RunKind,
        items: &[DownloadableItem],
        output_dir: &Path,
        sink: &dyn ProgressSink,
        result: &mut BatchResult,
    ) -> Result<(), RunFault> {
        let total = items.len();
        for (index, item) in items.iter().enumerate() {
            sink.emit(EngineEvent::Progress(index as f32 / total as f32));
            sink.emit(EngineEvent::log(
                LogLevel::Info,
                format!("Downloading {}/{}: {}", index + 1, total, item.label),
            ));
            sink.emit(EngineEvent::ItemStarted {
                kind,
                index,
                url: item.url.clone(),
            });
            result.attempted += 1;
            result.known_duration_seconds = result
                .known_duration_seconds
                .saturating_add(item.duration_seconds.unwrap_or(0));

            let invocation = self.extraction_invocation(kind, output_dir, index + 1, &item.url);
            let succeeded = match self.tools.run(&invocation).await {
                Ok(output) => {
                    if !output.success() {
                        engine_warn!(
                            "Extraction of {} exited with {:?}: {}",
                            item.url,
                            output.exit_code,
                            output.stderr.trim()
                        );
                    }
                    output.success()
                }
                Err(err) => {
                    result.failed += 1;
                    sink.emit(EngineEvent::ItemFinished {
                        kind,
                        index,
                        url: item.url.clone(),
                        succeeded: false,
                    });
                    return Err(err.into());
                }
            };

            if succeeded {
                result.succeeded += 1;
            } else {
                result.failed += 1;
            }
            sink.emit(EngineEvent::ItemFinished {
                kind,
                index,
                url: item.url.clone(),
                succeeded,
            });
            sink.emit(if succeeded {
                EngineEvent::log(LogLevel::Success, format!("Completed: {}", item.label))
            } else {
                EngineEvent::log(LogLevel::Error, format!("Failed: {}", item.label))
            });
        }
        Ok(())
    }
}
