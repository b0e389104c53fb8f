use std::time::Duration;

use tunebatch_core::RunKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
    pub extractor_program: String,
    pub transcoder_program: String,
    /// Codec container passed to the extractor's audio conversion.
    pub audio_format: String,
    /// Bound on the playlist enumeration command.
    pub listing_timeout: Duration,
    /// Bound on each version probe.
    pub probe_timeout: Duration,
    pub songs_dir_name: String,
    pub playlists_dir_name: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            extractor_program: "yt-dlp".to_string(),
            transcoder_program: "ffmpeg".to_string(),
            audio_format: "opus".to_string(),
            listing_timeout: Duration::from_secs(60),
            probe_timeout: Duration::from_secs(10),
            songs_dir_name: "YouTube_Music_Songs".to_string(),
            playlists_dir_name: "YouTube_Music_Playlists".to_string(),
        }
    }
}

impl ToolSettings {
    pub fn run_dir_name(&self, kind: RunKind) -> &str {
        match kind {
            RunKind::Songs => &self.songs_dir_name,
            RunKind::Playlist => &self.playlists_dir_name,
        }
    }
}
