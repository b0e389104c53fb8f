#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

use tunebatch_engine::{
    EngineEvent, InvocationError, ProgressSink, ToolInvocation, ToolOutput, ToolRunner,
};

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(engine_logging::initialize_for_tests);
}

pub fn exit_with(code: i32, stdout: &str, stderr: &str) -> Result<ToolOutput, InvocationError> {
    Ok(ToolOutput {
        exit_code: Some(code),
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    })
}

/// Answers invocations from a script, in order, and records what was asked.
/// An exhausted script answers with a silent success.
#[derive(Default)]
pub struct ScriptedRunner {
    script: Mutex<VecDeque<Result<ToolOutput, InvocationError>>>,
    seen: Mutex<Vec<ToolInvocation>>,
}

impl ScriptedRunner {
    pub fn new(script: Vec<Result<ToolOutput, InvocationError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn invocations(&self) -> Vec<ToolInvocation> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ToolRunner for ScriptedRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput, InvocationError> {
        self.seen.lock().unwrap().push(invocation.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| exit_with(0, "", ""))
    }
}

#[derive(Default)]
pub struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn progress_values(events: &[EngineEvent]) -> Vec<f32> {
    events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::Progress(fraction) => Some(*fraction),
            _ => None,
        })
        .collect()
}

pub fn log_messages(events: &[EngineEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::Log { message, .. } => Some(message.clone()),
            _ => None,
        })
        .collect()
}
