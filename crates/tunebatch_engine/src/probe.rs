use std::sync::Arc;

use engine_logging::{engine_info, engine_warn};
use tunebatch_core::DependencyReport;

use crate::settings::ToolSettings;
use crate::tool::{ToolInvocation, ToolRunner};

/// Checks both external binaries through their version flags. A missing
/// binary, a timeout and a non-zero exit all count as "not OK".
#[derive(Clone)]
pub struct DependencyProber {
    tools: Arc<dyn ToolRunner>,
    settings: ToolSettings,
}

impl DependencyProber {
    pub fn new(tools: Arc<dyn ToolRunner>, settings: ToolSettings) -> Self {
        Self { tools, settings }
    }

    pub async fn probe(&self) -> DependencyReport {
        let extractor = self
            .version_of(&self.settings.extractor_program, "--version")
            .await;
        let transcoder = self
            .version_of(&self.settings.transcoder_program, "-version")
            .await;

        let report = DependencyReport {
            extractor_ok: extractor.is_some(),
            extractor_version: extractor
                .map(|stdout| stdout.trim().to_string())
                .filter(|version| !version.is_empty()),
            transcoder_ok: transcoder.is_some(),
            transcoder_version: transcoder
                .and_then(|stdout| stdout.lines().next().map(|line| line.trim().to_string()))
                .filter(|banner| !banner.is_empty()),
        };
        engine_info!(
            "Dependency probe: extractor_ok={} transcoder_ok={}",
            report.extractor_ok,
            report.transcoder_ok
        );
        report
    }

    /// Stdout of a successful version call, or `None`.
    async fn version_of(&self, program: &str, flag: &str) -> Option<String> {
        let invocation = ToolInvocation::new(program)
            .arg(flag)
            .timeout(self.settings.probe_timeout);
        match self.tools.run(&invocation).await {
            Ok(output) if output.success() => Some(output.stdout),
            Ok(output) => {
                engine_warn!("{program} {flag} exited with {:?}", output.exit_code);
                None
            }
            Err(err) => {
                engine_warn!("{program} probe failed: {err}");
                None
            }
        }
    }
}
