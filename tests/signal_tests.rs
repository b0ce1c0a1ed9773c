#![cfg(unix)]

use mysql_workload::workload::signal::cancel_on_termination;
use std::process::Command;
use std::time::Duration;
use workload_engine::CancellationToken;

#[tokio::test]
async fn test_sigterm_before_first_poll_cancels_token() {
    let token = CancellationToken::new();
    cancel_on_termination(token.clone()).unwrap();

    // Blocks the runtime thread, so the listening task has not run yet when
    // the signal arrives.
    let status = Command::new("kill")
        .args(["-TERM", &std::process::id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    tokio::time::timeout(Duration::from_secs(5), token.cancelled())
        .await
        .expect("SIGTERM did not cancel the token");
}
