//! Tunebatch engine: external tool invocation and effect execution.
mod engine;
mod fetch;
mod persist;
mod probe;
mod runner;
mod settings;
mod sink;
mod tool;
mod types;

pub use engine::EngineHandle;
pub use fetch::PlaylistFetcher;
pub use persist::{ensure_output_dir, prepare_run_dir, PersistError};
pub use probe::DependencyProber;
pub use runner::DownloadRunner;
pub use settings::ToolSettings;
pub use sink::{ChannelProgressSink, ProgressSink};
pub use tool::{InvocationError, ProcessToolRunner, ToolInvocation, ToolOutput, ToolRunner};
pub use types::EngineEvent;
