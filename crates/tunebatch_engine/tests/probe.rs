mod common;

use std::time::Duration;

use common::{exit_with, init_logging, ScriptedRunner};
use pretty_assertions::assert_eq;
use tunebatch_core::DependencyReport;
use tunebatch_engine::{DependencyProber, InvocationError, ToolSettings};

#[tokio::test]
async fn both_tools_present() {
    init_logging();
    let tools = ScriptedRunner::new(vec![
        exit_with(0, "2024.08.06\n", ""),
        exit_with(
            0,
            "ffmpeg version 6.1.1 Copyright (c) 2000-2023\nbuilt with gcc\n",
            "",
        ),
    ]);
    let prober = DependencyProber::new(tools.clone(), ToolSettings::default());

    let report = prober.probe().await;

    assert_eq!(
        report,
        DependencyReport {
            extractor_ok: true,
            extractor_version: Some("2024.08.06".to_string()),
            transcoder_ok: true,
            transcoder_version: Some("ffmpeg version 6.1.1 Copyright (c) 2000-2023".to_string()),
        }
    );
    assert_eq!(report.transcoder_short_version(), Some("6.1.1"));

    let invocations = tools.invocations();
    assert_eq!(invocations[0].program, "yt-dlp");
    assert_eq!(invocations[0].args, vec!["--version"]);
    assert_eq!(invocations[1].program, "ffmpeg");
    assert_eq!(invocations[1].args, vec!["-version"]);
    assert!(invocations
        .iter()
        .all(|invocation| invocation.timeout == Some(Duration::from_secs(10))));
}

#[tokio::test]
async fn missing_timed_out_and_failing_tools_all_read_as_not_ok() {
    init_logging();
    let tools = ScriptedRunner::new(vec![
        Err(InvocationError::Spawn {
            program: "yt-dlp".to_string(),
            message: "not found".to_string(),
        }),
        Err(InvocationError::Timeout {
            program: "ffmpeg".to_string(),
            after: Duration::from_secs(10),
        }),
        exit_with(0, "2024.08.06", ""),
        exit_with(1, "", "bad flag"),
    ]);
    let prober = DependencyProber::new(tools, ToolSettings::default());

    let first = prober.probe().await;
    assert!(!first.extractor_ok);
    assert!(!first.transcoder_ok);
    assert_eq!(first.missing(), vec!["yt-dlp", "FFmpeg"]);

    let second = prober.probe().await;
    assert!(second.extractor_ok);
    assert!(!second.transcoder_ok);
    assert_eq!(second.transcoder_version, None);
}

#[tokio::test]
async fn configured_program_names_are_used() {
    init_logging();
    let tools = ScriptedRunner::new(Vec::new());
    let settings = ToolSettings {
        extractor_program: "/opt/bin/yt-dlp".to_string(),
        transcoder_program: "/opt/bin/ffmpeg".to_string(),
        ..ToolSettings::default()
    };
    let prober = DependencyProber::new(tools.clone(), settings);

    let report = prober.probe().await;

    assert!(report.all_ready());
    assert_eq!(report.extractor_version, None);
    let programs: Vec<String> = tools
        .invocations()
        .into_iter()
        .map(|invocation| invocation.program)
        .collect();
    assert_eq!(programs, vec!["/opt/bin/yt-dlp", "/opt/bin/ffmpeg"]);
}
