//! Startup configuration loaded from a RON file.
//!
//! Only settings live here; job lists and playlists are never written to disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::engine_info;
use serde::Deserialize;
use thiserror::Error;
use tunebatch_engine::ToolSettings;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "tunebatch.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// How status events are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum EventFormat {
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Falls back to the current working directory.
    pub destination_root: Option<PathBuf>,
    pub log_destination: LogDestination,
    pub event_format: EventFormat,
    pub tools: ToolOverrides,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ToolOverrides {
    pub extractor_program: Option<String>,
    pub transcoder_program: Option<String>,
    pub audio_format: Option<String>,
    pub listing_timeout_secs: Option<u64>,
    pub probe_timeout_secs: Option<u64>,
    pub songs_dir_name: Option<String>,
    pub playlists_dir_name: Option<String>,
}

impl ToolOverrides {
    pub fn apply(&self, mut settings: ToolSettings) -> ToolSettings {
        if let Some(program) = &self.extractor_program {
            settings.extractor_program = program.clone();
        }
        if let Some(program) = &self.transcoder_program {
            settings.transcoder_program = program.clone();
        }
        if let Some(format) = &self.audio_format {
            settings.audio_format = format.clone();
        }
        if let Some(secs) = self.listing_timeout_secs {
            settings.listing_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.probe_timeout_secs {
            settings.probe_timeout = Duration::from_secs(secs);
        }
        if let Some(name) = &self.songs_dir_name {
            settings.songs_dir_name = name.clone();
        }
        if let Some(name) = &self.playlists_dir_name {
            settings.playlists_dir_name = name.clone();
        }
        settings
    }
}

impl AppConfig {
    pub fn tool_settings(&self) -> ToolSettings {
        self.tools.apply(ToolSettings::default())
    }

    pub fn destination_root(&self) -> PathBuf {
        self.destination_root.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        })
    }
}

/// Load `path`; a missing file means defaults.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    engine_info!("Loaded configuration from {:?}", path);
    Ok(config)
}
