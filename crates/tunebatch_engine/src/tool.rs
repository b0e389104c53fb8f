use std::io;
use std::process::Stdio;
use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use thiserror::Error;
use tokio::process::Command;

/// One external command: program, arguments and an optional wall-clock bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Option<Duration>,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// The invocation mechanism itself failed; distinct from a non-zero exit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvocationError {
    #[error("{program} did not finish within {}s", .after.as_secs())]
    Timeout { program: String, after: Duration },
    #[error("failed to start {program}: {message}")]
    Spawn { program: String, message: String },
    #[error("io error while running tool: {0}")]
    Io(String),
}

#[async_trait::async_trait]
pub trait ToolRunner: Send + Sync {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput, InvocationError>;
}

/// Runs invocations as child processes on the tokio runtime. A timed-out
/// child is killed when its future is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessToolRunner;

#[async_trait::async_trait]
impl ToolRunner for ProcessToolRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput, InvocationError> {
        engine_debug!(
            "Running {} with {} args timeout={:?}",
            invocation.program,
            invocation.args.len(),
            invocation.timeout
        );

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let spawn_error = |err: io::Error| match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => InvocationError::Spawn {
                program: invocation.program.clone(),
                message: err.to_string(),
            },
            _ => InvocationError::Io(err.to_string()),
        };
        let output = match invocation.timeout {
            Some(after) => tokio::time::timeout(after, command.output())
                .await
                .map_err(|_| {
                    engine_warn!("{} timed out after {:?}", invocation.program, after);
                    InvocationError::Timeout {
                        program: invocation.program.clone(),
                        after,
                    }
                })?
                .map_err(spawn_error)?,
            None => command.output().await.map_err(spawn_error)?,
        };

        let output = ToolOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        engine_debug!(
            "{} exited with {:?}",
            invocation.program,
            output.exit_code
        );
        Ok(output)
    }
}
