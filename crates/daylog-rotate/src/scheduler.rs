//! Cancellable background task driving the daily rotation cycle

use crate::compress::compress;
use crate::state::RotationState;
use chrono::{DateTime, Local, LocalResult, TimeZone};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// One long-lived background task per logger instance.
///
/// The loop sleeps until the next local midnight, swaps the day's file, lets
/// in-flight writers drain, and compresses the retired file off the logging
/// hot path. Rotation and compression failures are reported through
/// `tracing` diagnostics and never reach logging callers.
#[derive(Debug)]
pub struct Scheduler {
    token: CancellationToken,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Scheduler {
    /// Spawns the rotation loop for `state`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(state: Arc<RotationState>) -> Self {
        let token = CancellationToken::new();
        let loop_token = token.clone();
        let handle = tokio::spawn(run(state, loop_token));
        Self {
            token,
            handle: Mutex::new(Some(handle)),
        }
    }

    /// Cancels the loop and waits for the task to exit.
    ///
    /// A sleep in progress is abandoned promptly; rotation transitions are
    /// atomic under the state's lock, so no partial state survives.
    pub async fn shutdown(&self) {
        self.token.cancel();
        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn run(state: Arc<RotationState>, token: CancellationToken) {
    loop {
        let wait = until_next_midnight(Local::now());
        debug!(wait_secs = wait.as_secs(), "sleeping until next rotation");
        tokio::select! {
            () = token.cancelled() => break,
            () = tokio::time::sleep(wait) => {}
        }
        rotate_once(&state).await;
    }
}

/// Runs one rotation cycle immediately: swap to today's file if the date has
/// changed, then compress whatever was retired.
pub async fn rotate_once(state: &Arc<RotationState>) {
    let today = Local::now().date_naive();
    match state.rotate_to(today) {
        Ok(Some(retired)) => {
            let path = retired.settle().await;
            let archived = path.clone();
            match tokio::task::spawn_blocking(move || compress(&archived)).await {
                Ok(Ok(())) => debug!(path = %path.display(), "compressed rotated log file"),
                Ok(Err(err)) => warn!(
                    path = %path.display(),
                    %err,
                    "failed to compress rotated log file; keeping it uncompressed"
                ),
                Err(err) => warn!(%err, "compression task failed"),
            }
        }
        Ok(None) => {}
        Err(err) => warn!(%err, "rotation failed; keeping the current log file"),
    }
}

/// Time remaining until the next midnight in `now`'s time zone.
///
/// A midnight skipped by a DST transition falls back to now + 24h; the next
/// cycle re-synchronizes.
pub fn until_next_midnight<Tz: TimeZone>(now: DateTime<Tz>) -> Duration {
    let Some(midnight) = now
        .date_naive()
        .succ_opt()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    else {
        return Duration::from_secs(24 * 60 * 60);
    };
    let next = match now.timezone().from_local_datetime(&midnight) {
        LocalResult::Single(next) => next,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => now.clone() + chrono::Duration::hours(24),
    };
    (next - now).to_std().unwrap_or(Duration::ZERO)
}
