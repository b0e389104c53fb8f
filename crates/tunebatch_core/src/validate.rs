use std::sync::LazyLock;

use regex::RegexSet;

/// Host/path shapes accepted for a single track: watch links, short links,
/// music-subdomain links, embed links and mobile-subdomain links.
const TRACK_PATTERNS: &[&str] = &[
    r"youtube\.com/watch\?v=",
    r"youtu\.be/",
    r"music\.youtube\.com/watch\?v=",
    r"youtube\.com/embed/",
    r"m\.youtube\.com/watch\?v=",
];

const PLAYLIST_MARKER: &str = "playlist";
const PLAYLIST_HOSTS: &[&str] = &["youtube.com", "music.youtube.com"];

static TRACK_SET: LazyLock<RegexSet> =
    LazyLock::new(|| RegexSet::new(TRACK_PATTERNS).expect("static track patterns compile"));

/// Returns true if `url` looks like a link to a single track on a recognised host.
///
/// Pure pattern match: no normalisation, no network access.
pub fn is_acceptable(url: &str) -> bool {
    TRACK_SET.is_match(url)
}

/// Returns true if `url` is non-blank, carries the playlist marker and names a
/// recognised host.
pub fn is_playlist_url(url: &str) -> bool {
    let url = url.trim();
    !url.is_empty()
        && url.contains(PLAYLIST_MARKER)
        && PLAYLIST_HOSTS.iter().any(|host| url.contains(host))
}
