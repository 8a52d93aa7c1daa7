//! Periodic eviction of expired admin sessions.
//!
//! Expired tokens are already rejected on lookup; this job keeps tokens that
//! are never presented again from accumulating in memory.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::auth::session::SessionStore;

/// How often the purge job runs.
pub const PURGE_INTERVAL: Duration = Duration::from_secs(3600);

/// Run the session purge loop until `cancel` is triggered.
pub async fn run(sessions: Arc<SessionStore>, interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Session purge job started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session purge job stopping");
                break;
            }
            _ = ticker.tick() => {
                let purged = sessions.purge_expired().await;
                if purged > 0 {
                    tracing::info!(purged, "Session purge: evicted expired sessions");
                } else {
                    tracing::debug!("Session purge: nothing to evict");
                }
            }
        }
    }
}
