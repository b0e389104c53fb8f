use serde::Serialize;

pub const EXTRACTOR_NAME: &str = "yt-dlp";
pub const TRANSCODER_NAME: &str = "FFmpeg";

/// Presence and version of the two external binaries. Advisory only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DependencyReport {
    pub extractor_ok: bool,
    pub extractor_version: Option<String>,
    pub transcoder_ok: bool,
    pub transcoder_version: Option<String>,
}

impl DependencyReport {
    pub fn all_ready(&self) -> bool {
        self.extractor_ok && self.transcoder_ok
    }

    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.extractor_ok {
            missing.push(EXTRACTOR_NAME);
        }
        if !self.transcoder_ok {
            missing.push(TRANSCODER_NAME);
        }
        missing
    }

    /// Short transcoder version: the third token of its banner line
    /// (`ffmpeg version 6.1 Copyright ...` -> `6.1`).
    pub fn transcoder_short_version(&self) -> Option<&str> {
        self.transcoder_version
            .as_deref()
            .and_then(|banner| banner.split_whitespace().nth(2))
    }
}
