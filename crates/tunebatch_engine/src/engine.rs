use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use engine_logging::engine_debug;
use tunebatch_core::{DownloadableItem, RunKind};

use crate::fetch::PlaylistFetcher;
use crate::probe::DependencyProber;
use crate::runner::DownloadRunner;
use crate::settings::ToolSettings;
use crate::sink::ChannelProgressSink;
use crate::tool::{ProcessToolRunner, ToolRunner};
use crate::EngineEvent;

enum EngineCommand {
    FetchPlaylist {
        url: String,
    },
    Run {
        kind: RunKind,
        items: Vec<DownloadableItem>,
        destination_root: PathBuf,
    },
    ProbeDependencies,
}

struct Services {
    fetcher: PlaylistFetcher,
    runner: DownloadRunner,
    prober: DependencyProber,
}

/// Owns a background thread with a tokio runtime. Every command becomes an
/// independent task; results come back as [`EngineEvent`]s.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ToolSettings) -> Self {
        Self::with_runner(settings, Arc::new(ProcessToolRunner))
    }

    pub fn with_runner(settings: ToolSettings, tools: Arc<dyn ToolRunner>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let services = Arc::new(Services {
            fetcher: PlaylistFetcher::new(tools.clone(), settings.clone()),
            runner: DownloadRunner::new(tools.clone(), settings.clone()),
            prober: DependencyProber::new(tools, settings),
        });

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let services = services.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(&services, command, event_tx).await;
                });
            }
            engine_debug!("Engine command channel closed");
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn fetch_playlist(&self, url: impl Into<String>) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::FetchPlaylist { url: url.into() });
    }

    pub fn start_run(&self, kind: RunKind, items: Vec<DownloadableItem>, destination_root: PathBuf) {
        let _ = self.cmd_tx.send(EngineCommand::Run {
            kind,
            items,
            destination_root,
        });
    }

    pub fn probe_dependencies(&self) {
        let _ = self.cmd_tx.send(EngineCommand::ProbeDependencies);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    services: &Services,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::FetchPlaylist { url } => {
            let result = services.fetcher.fetch(&url).await;
            let _ = event_tx.send(EngineEvent::PlaylistFetched(result));
        }
        EngineCommand::Run {
            kind,
            items,
            destination_root,
        } => {
            let sink = ChannelProgressSink::new(event_tx);
            services
                .runner
                .run(kind, &items, &destination_root, &sink)
                .await;
        }
        EngineCommand::ProbeDependencies => {
            let report = services.prober.probe().await;
            let _ = event_tx.send(EngineEvent::DependenciesProbed(report));
        }
    }
}
