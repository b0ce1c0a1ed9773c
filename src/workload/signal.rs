//! Binding of process termination signals to a cancellation token.

use tracing::info;
use workload_engine::CancellationToken;

/// Cancel `token` on the first SIGINT or SIGTERM.
///
/// The handlers are registered before this returns, so a signal delivered
/// while the listening task is still unpolled is not lost.
#[cfg(unix)]
pub fn cancel_on_termination(token: CancellationToken) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    tokio::spawn(async move {
        tokio::select! {
            _ = interrupt.recv() => info!("Received interrupt signal (Ctrl+C)"),
            _ = terminate.recv() => info!("Received SIGTERM"),
        }
        token.cancel();
    });
    Ok(())
}

/// Cancel `token` on the first Ctrl+C.
#[cfg(windows)]
pub fn cancel_on_termination(token: CancellationToken) -> std::io::Result<()> {
    let mut ctrl_c = tokio::signal::windows::ctrl_c()?;

    tokio::spawn(async move {
        ctrl_c.recv().await;
        info!("Received interrupt signal (Ctrl+C)");
        token.cancel();
    });
    Ok(())
}
