use std::{path::Path, time::Duration};

use tokio::time::sleep;

/// Fixed polling interval of the readiness watcher.
pub const POLL_INTERVAL_MS: u64 = 500;

/// Waits until the file at `path` exists and has stopped growing.
///
/// The file is produced asynchronously by an external writer, so presence
/// alone proves nothing; a file counts as ready only after its size has
/// been equal and non-zero across two consecutive observations. Polling
/// runs at [`POLL_INTERVAL_MS`] using a cancellable sleep, so dropping the
/// surrounding task (process shutdown) never leaves a blocked thread.
///
/// # Arguments
///
/// * `path` - File the external producer is writing
/// * `timeout_secs` - Budget before giving up; a file that never appears
///   fails after exactly `timeout_secs * 2` polls
///
/// # Returns
///
/// `true` once two stable reads were seen within the budget, `false` on
/// timeout. On `false` the caller must notify the requester and abort the
/// dependent upload; a partially written file is left in place for external
/// cleanup, never consumed.
pub async fn await_stable(path: &Path, timeout_secs: u64) -> bool {
    let attempts = timeout_secs.saturating_mul(1000) / POLL_INTERVAL_MS;
    let mut last_size: u64 = 0;

    for _ in 0..attempts {
        sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;

        let size = match async_fs::metadata(path).await {
            Ok(meta) => meta.len(),
            Err(_) => 0,
        };

        if size > 0 && size == last_size {
            return true;
        }
        last_size = size;
    }

    false
}
