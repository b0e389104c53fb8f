use std::sync::Arc;

use engine_logging::{engine_info, engine_warn};
use tunebatch_core::{is_playlist_url, parse_listing, FetchError, PlaylistEntry, LISTING_TEMPLATE};

use crate::settings::ToolSettings;
use crate::tool::{InvocationError, ToolInvocation, ToolRunner};

/// Shown when the extractor fails without writing anything to stderr.
const UNKNOWN_TOOL_ERROR: &str = "Unknown error occurred";

/// Enumerates a playlist through the extractor's flat listing mode.
#[derive(Clone)]
pub struct PlaylistFetcher {
    tools: Arc<dyn ToolRunner>,
    settings: ToolSettings,
}

impl PlaylistFetcher {
    pub fn new(tools: Arc<dyn ToolRunner>, settings: ToolSettings) -> Self {
        Self { tools, settings }
    }

    pub fn listing_invocation(&self, url: &str) -> ToolInvocation {
        ToolInvocation::new(&self.settings.extractor_program)
            .arg("--flat-playlist")
            .arg("--print")
            .arg(LISTING_TEMPLATE)
            .arg("--no-warnings")
            .arg(url)
            .timeout(self.settings.listing_timeout)
    }

    pub async fn fetch(&self, playlist_url: &str) -> Result<Vec<PlaylistEntry>, FetchError> {
        let url = playlist_url.trim();
        if !is_playlist_url(url) {
            return Err(FetchError::InvalidPlaylistUrl);
        }

        engine_info!("Fetching playlist listing for {url}");
        let output = self
            .tools
            .run(&self.listing_invocation(url))
            .await
            .map_err(|err| match err {
                InvocationError::Timeout { after, .. } => FetchError::Timeout {
                    after_secs: after.as_secs(),
                },
                other => FetchError::InvocationError(other.to_string()),
            })?;

        if !output.success() {
            let stderr = output.stderr.trim();
            engine_warn!(
                "Playlist listing exited with {:?}: {stderr}",
                output.exit_code
            );
            let message = if stderr.is_empty() {
                UNKNOWN_TOOL_ERROR.to_string()
            } else {
                stderr.to_string()
            };
            return Err(FetchError::ExternalToolError(message));
        }

        let entries = parse_listing(&output.stdout);
        engine_info!("Playlist listing returned {} entries", entries.len());
        Ok(entries)
    }
}
