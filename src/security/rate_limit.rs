use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::Instant;

pub const MAX_SUBMISSIONS: usize = 5;
pub const WINDOW_SECS: u64 = 3600; // 1 hour

/// Per-IP sliding-window limiter for contact submissions. Every processed
/// submission counts toward the window, successful or not.
#[derive(Clone)]
pub struct RateLimiter {
    submissions: Arc<Mutex<HashMap<IpAddr, Vec<Instant>>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            submissions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Check if the given IP is rate-limited. Returns true if blocked.
    /// Also lazily cleans up stale entries for the checked IP.
    pub fn is_blocked(&self, ip: IpAddr) -> bool {
        let mut map = self.submissions.lock().unwrap_or_else(|e| e.into_inner());
        // None if the monotonic clock is younger than the window; nothing
        // can be stale yet in that case.
        let cutoff = Instant::now().checked_sub(std::time::Duration::from_secs(WINDOW_SECS));

        if let Some(timestamps) = map.get_mut(&ip) {
            if let Some(cutoff) = cutoff {
                timestamps.retain(|t| *t > cutoff);
            }
            timestamps.len() >= MAX_SUBMISSIONS
        } else {
            false
        }
    }

    /// Record a processed submission for the given IP.
    pub fn record(&self, ip: IpAddr) {
        let mut map = self.submissions.lock().unwrap_or_else(|e| e.into_inner());
        map.entry(ip).or_default().push(Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
