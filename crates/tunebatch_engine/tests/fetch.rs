mod common;

use std::time::Duration;

use common::{exit_with, init_logging, ScriptedRunner};
use pretty_assertions::assert_eq;
use tunebatch_core::{FetchError, LISTING_TEMPLATE};
use tunebatch_engine::{InvocationError, PlaylistFetcher, ToolSettings};

const PLAYLIST_URL: &str = "https://music.youtube.com/playlist?list=PLabc";

#[tokio::test]
async fn listing_is_parsed_into_entries() {
    init_logging();
    let tools = ScriptedRunner::new(vec![exit_with(
        0,
        "Intro|id1|https://youtu.be/id1|61\nNA|id2|https://youtu.be/id2|NA\n",
        "",
    )]);
    let fetcher = PlaylistFetcher::new(tools.clone(), ToolSettings::default());

    let entries = fetcher.fetch(PLAYLIST_URL).await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "Intro");
    assert_eq!(entries[0].duration_seconds, Some(61));
    assert_eq!(entries[1].title, "Song 2");
    assert_eq!(entries[1].duration_seconds, None);
    assert!(entries.iter().all(|entry| entry.included));

    let invocation = &tools.invocations()[0];
    assert_eq!(invocation.program, "yt-dlp");
    assert_eq!(
        invocation.args,
        vec![
            "--flat-playlist",
            "--print",
            LISTING_TEMPLATE,
            "--no-warnings",
            PLAYLIST_URL,
        ]
    );
    assert_eq!(invocation.timeout, Some(Duration::from_secs(60)));
}

#[tokio::test]
async fn non_playlist_url_never_reaches_the_tool() {
    init_logging();
    let tools = ScriptedRunner::new(Vec::new());
    let fetcher = PlaylistFetcher::new(tools.clone(), ToolSettings::default());

    let result = fetcher.fetch("https://www.youtube.com/watch?v=abc").await;

    assert_eq!(result, Err(FetchError::InvalidPlaylistUrl));
    assert!(tools.invocations().is_empty());
}

#[tokio::test]
async fn non_zero_exit_carries_stderr() {
    init_logging();
    let tools = ScriptedRunner::new(vec![exit_with(
        1,
        "",
        "ERROR: The playlist does not exist.\n",
    )]);
    let fetcher = PlaylistFetcher::new(tools, ToolSettings::default());

    let result = fetcher.fetch(PLAYLIST_URL).await;

    assert_eq!(
        result,
        Err(FetchError::ExternalToolError(
            "ERROR: The playlist does not exist.".to_string()
        ))
    );
}

#[tokio::test]
async fn silent_failure_gets_a_generic_message() {
    init_logging();
    let tools = ScriptedRunner::new(vec![exit_with(2, "", "  ")]);
    let fetcher = PlaylistFetcher::new(tools, ToolSettings::default());

    let result = fetcher.fetch(PLAYLIST_URL).await;

    assert_eq!(
        result,
        Err(FetchError::ExternalToolError(
            "Unknown error occurred".to_string()
        ))
    );
}

#[tokio::test]
async fn timeout_and_spawn_faults_are_distinguished() {
    init_logging();
    let tools = ScriptedRunner::new(vec![
        Err(InvocationError::Timeout {
            program: "yt-dlp".to_string(),
            after: Duration::from_secs(60),
        }),
        Err(InvocationError::Spawn {
            program: "yt-dlp".to_string(),
            message: "not found".to_string(),
        }),
    ]);
    let fetcher = PlaylistFetcher::new(tools, ToolSettings::default());

    assert_eq!(
        fetcher.fetch(PLAYLIST_URL).await,
        Err(FetchError::Timeout { after_secs: 60 })
    );
    assert_eq!(
        fetcher.fetch(PLAYLIST_URL).await,
        Err(FetchError::InvocationError(
            "failed to start yt-dlp: not found".to_string()
        ))
    );
}

#[tokio::test]
async fn empty_listing_is_an_empty_playlist() {
    init_logging();
    let tools = ScriptedRunner::new(vec![exit_with(0, "\n", "")]);
    let fetcher = PlaylistFetcher::new(tools, ToolSettings::default());

    assert_eq!(fetcher.fetch(PLAYLIST_URL).await, Ok(Vec::new()));
}
