use serde::Serialize;
use thiserror::Error;

/// Token the enumeration tool prints for a field it cannot resolve.
pub const NOT_AVAILABLE: &str = "NA";

/// Print template handed to the enumeration tool; one line per entry.
pub const LISTING_TEMPLATE: &str = "%(title)s|%(id)s|%(url)s|%(duration)s";

/// Display text for a duration that could not be parsed.
pub const UNKNOWN_DURATION: &str = "Unknown";

const FIELD_DELIMITER: char = '|';
const TRAILING_FIELDS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistEntry {
    pub title: String,
    pub external_id: String,
    pub url: String,
    pub duration_seconds: Option<u64>,
    /// 0-based index among accepted listing lines; also the selection key.
    pub position: usize,
    pub included: bool,
}

impl PlaylistEntry {
    pub fn duration_label(&self) -> String {
        self.duration_seconds
            .map(format_duration)
            .unwrap_or_else(|| UNKNOWN_DURATION.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("invalid playlist url")]
    InvalidPlaylistUrl,
    #[error("external tool failed: {0}")]
    ExternalToolError(String),
    #[error("timed out after {after_secs}s")]
    Timeout { after_secs: u64 },
    #[error("could not run external tool: {0}")]
    InvocationError(String),
}

/// Parses the enumeration tool's stdout into playlist entries.
///
/// Lines that are blank or carry fewer than three fields are skipped without
/// error. Positions are dense over the accepted lines; the synthetic
/// `Song N` title uses the raw 1-based line number.
pub fn parse_listing(stdout: &str) -> Vec<PlaylistEntry> {
    let mut entries = Vec::new();
    for (line_index, line) in stdout.trim().lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let Some(fields) = split_fields(line) else {
            continue;
        };
        let title = if fields.title == NOT_AVAILABLE {
            format!("Song {}", line_index + 1)
        } else {
            fields.title
        };
        entries.push(PlaylistEntry {
            title,
            external_id: fields.id.to_string(),
            url: fields.url.to_string(),
            duration_seconds: fields.duration.and_then(parse_duration),
            position: entries.len(),
            included: true,
        });
    }
    entries
}

struct ListingFields<'a> {
    title: String,
    id: &'a str,
    url: &'a str,
    duration: Option<&'a str>,
}

fn split_fields(line: &str) -> Option<ListingFields<'_>> {
    let parts: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    match parts.len() {
        0..=2 => None,
        3 => Some(ListingFields {
            title: parts[0].to_string(),
            id: parts[1],
            url: parts[2],
            duration: None,
        }),
        n => {
            // Only the title is free text, so surplus delimiters belong to it.
            let head = n - TRAILING_FIELDS;
            Some(ListingFields {
                title: parts[..head].join("|"),
                id: parts[head],
                url: parts[head + 1],
                duration: Some(parts[head + 2]),
            })
        }
    }
}

/// Parses a seconds value as printed by the enumeration tool (`"185"`,
/// `"185.0"`). Missing, sentinel, negative or non-numeric input is unknown.
pub fn parse_duration(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() || raw == NOT_AVAILABLE || raw == UNKNOWN_DURATION {
        return None;
    }
    let seconds: f64 = raw.parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some(seconds.trunc() as u64)
}

/// Formats seconds as `H:MM:SS` when at least an hour, otherwise `M:SS`.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}
