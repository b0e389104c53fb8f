#![cfg(unix)]

mod common;

use std::time::Duration;

use common::init_logging;
use tunebatch_engine::{InvocationError, ProcessToolRunner, ToolInvocation, ToolRunner};

fn sh(script: &str) -> ToolInvocation {
    ToolInvocation::new("sh").arg("-c").arg(script)
}

#[tokio::test]
async fn captures_exit_code_and_both_streams() {
    init_logging();
    let output = ProcessToolRunner
        .run(&sh("echo out; echo err 1>&2; exit 3"))
        .await
        .unwrap();

    assert_eq!(output.exit_code, Some(3));
    assert!(!output.success());
    assert_eq!(output.stdout, "out\n");
    assert_eq!(output.stderr, "err\n");
}

#[tokio::test]
async fn zero_exit_is_success() {
    init_logging();
    let output = ProcessToolRunner
        .run(&sh("printf 'a|b|c|1'").timeout(Duration::from_secs(5)))
        .await
        .unwrap();

    assert!(output.success());
    assert_eq!(output.stdout, "a|b|c|1");
}

#[tokio::test]
async fn slow_process_hits_the_timeout() {
    init_logging();
    let err = ProcessToolRunner
        .run(&sh("sleep 5").timeout(Duration::from_millis(200)))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        InvocationError::Timeout {
            program: "sh".to_string(),
            after: Duration::from_millis(200),
        }
    );
}

#[tokio::test]
async fn missing_binary_is_a_spawn_fault() {
    init_logging();
    let err = ProcessToolRunner
        .run(&ToolInvocation::new("tunebatch-no-such-binary").arg("--version"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        InvocationError::Spawn { ref program, .. } if program == "tunebatch-no-such-binary"
    ));
}
