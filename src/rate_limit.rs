use std::time::Duration;

use tokio::{
    sync::Mutex,
    time::{sleep_until, Instant},
};
use tracing::debug;

/// Enforces a minimum spacing between calls across every caller sharing it.
/// The lock is held while waiting, so callers go through one at a time.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    /// Wait out whatever is left of the interval since the previous call, then
    /// record this call.
    pub async fn wait(&self) {
        let mut last_call = self.last_call.lock().await;
        if let Some(previous) = *last_call {
            let ready_at = previous + self.min_interval;
            if ready_at > Instant::now() {
                debug!("rate limited, waiting {:?}", ready_at - Instant::now());
                sleep_until(ready_at).await;
            }
        }
        *last_call = Some(Instant::now());
    }
}
