//! Sliding-window request limiter keyed by client identity.
//!
//! Every client keeps a log of its recent request times. A request is allowed
//! while fewer than `max_requests` entries fall inside the window; rejected
//! requests are not logged.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: usize },
    Limited { retry_after_secs: u64 },
}

#[derive(Debug)]
struct LimiterState {
    clients: HashMap<String, VecDeque<DateTime<Utc>>>,
    last_cleanup: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct RateLimiter {
    window: chrono::Duration,
    max_requests: usize,
    state: Mutex<LimiterState>,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: usize) -> Self {
        Self {
            window: chrono::Duration::from_std(window).unwrap_or(chrono::Duration::MAX),
            max_requests,
            state: Mutex::new(LimiterState {
                clients: HashMap::new(),
                last_cleanup: None,
            }),
        }
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub fn window_secs(&self) -> u64 {
        self.window.num_seconds().max(0) as u64
    }

    pub async fn check(&self, client: &str) -> RateLimitDecision {
        self.check_at(client, Utc::now()).await
    }

    /// Record a request from `client` at `now` if the window has room.
    pub async fn check_at(&self, client: &str, now: DateTime<Utc>) -> RateLimitDecision {
        let mut state = self.state.lock().await;
        let window = self.window;

        if state.last_cleanup.map_or(true, |last| now - last >= window) {
            state
                .clients
                .retain(|_, log| log.back().is_some_and(|newest| now - *newest < window));
            state.last_cleanup = Some(now);
        }

        let log = state.clients.entry(client.to_string()).or_default();
        while log.front().is_some_and(|oldest| now - *oldest >= window) {
            log.pop_front();
        }

        if log.len() >= self.max_requests {
            let retry_after = log
                .front()
                .map(|oldest| window - (now - *oldest))
                .unwrap_or(window);
            return RateLimitDecision::Limited {
                retry_after_secs: ceil_secs(retry_after),
            };
        }

        log.push_back(now);
        RateLimitDecision::Allowed {
            remaining: self.max_requests - log.len(),
        }
    }

    #[cfg(test)]
    async fn tracked_clients(&self) -> usize {
        self.state.lock().await.clients.len()
    }
}

fn ceil_secs(duration: chrono::Duration) -> u64 {
    let millis = duration.num_milliseconds().max(0) as u64;
    (millis + 999) / 1000
}
