use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Spaces consecutive outbound requests by a minimum interval.
///
/// The run is strictly sequential, so a single padder threaded through the
/// pipeline is enough to keep every paced request at least one interval
/// apart from the previous one.
#[derive(Debug)]
pub struct RequestPadder {
    interval: Duration,
    last_start: Option<Instant>,
    requests: u64,
}

impl RequestPadder {
    pub fn new(interval: Duration) -> Self {
        RequestPadder {
            interval,
            last_start: None,
            requests: 0,
        }
    }

    /// Wait out the remainder of the pacing interval, then mark the start
    /// of a new request.
    pub async fn request_start(&mut self) {
        if let Some(prev) = self.last_start {
            let since = prev.elapsed();
            if since < self.interval {
                sleep(self.interval - since).await;
            }
        }
        self.last_start = Some(Instant::now());
    }

    /// Mark a request as finished. Bookkeeping only.
    pub fn request_finished(&mut self) {
        self.requests += 1;
    }

    /// Requests completed so far in this run.
    pub fn completed(&self) -> u64 {
        self.requests
    }
}
