use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use tunebatch_core::{Effect, Msg, StatusSink};
use tunebatch_engine::{EngineEvent, EngineHandle, ToolSettings};

use super::ui::commands::Command;

/// Executes effects returned by `update`: status events go to the sink,
/// everything else to the engine.
pub struct EffectRunner {
    engine: EngineHandle,
    sink: Box<dyn StatusSink>,
}

impl EffectRunner {
    pub fn new(
        cmd_tx: mpsc::Sender<Command>,
        settings: ToolSettings,
        sink: Box<dyn StatusSink>,
    ) -> Self {
        let runner = Self::with_engine(EngineHandle::new(settings), sink);
        runner.spawn_event_loop(cmd_tx);
        runner
    }

    fn with_engine(engine: EngineHandle, sink: Box<dyn StatusSink>) -> Self {
        Self { engine, sink }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Status(event) => self.sink.emit(&event),
                Effect::FetchPlaylist { url } => {
                    engine_info!("FetchPlaylist url={}", url);
                    self.engine.fetch_playlist(url);
                }
                Effect::StartRun {
                    kind,
                    items,
                    destination_root,
                } => {
                    engine_info!(
                        "StartRun kind={} items={} root={:?}",
                        kind.label(),
                        items.len(),
                        destination_root
                    );
                    self.engine.start_run(kind, items, destination_root);
                }
                Effect::ProbeDependencies => self.engine.probe_dependencies(),
            }
        }
    }

    fn spawn_event_loop(&self, cmd_tx: mpsc::Sender<Command>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                if cmd_tx.send(Command::Dispatch(map_event(event))).is_err() {
                    engine_debug!("Consumer loop gone; stopping engine event pump");
                    return;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Log { message, level } => Msg::RunLog { message, level },
        EngineEvent::Progress(fraction) => Msg::RunProgress(fraction),
        EngineEvent::ItemStarted { kind, url, .. } => Msg::ItemStarted { kind, url },
        EngineEvent::ItemFinished {
            kind,
            url,
            succeeded,
            ..
        } => Msg::ItemFinished {
            kind,
            url,
            succeeded,
        },
        EngineEvent::RunFinished(result) => Msg::RunFinished(result),
        EngineEvent::PlaylistFetched(result) => {
            if let Err(err) = &result {
                engine_warn!("Playlist fetch failed: {}", err);
            }
            Msg::PlaylistFetched(result)
        }
        EngineEvent::DependenciesProbed(report) => Msg::DependenciesProbed(report),
    }
}
