//! Process-local fixed-window rate limiter.
//!
//! Each identity gets `max_requests` within a window that starts at its first
//! request. Counters live in memory only and vanish on restart. Expired
//! windows are swept at most once per window length while checking.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: Instant,
}

#[derive(Debug)]
struct Windows {
    by_identity: HashMap<String, Window>,
    next_sweep: Option<Instant>,
}

impl Windows {
    fn sweep(&mut self, now: Instant) -> usize {
        let before = self.by_identity.len();
        self.by_identity.retain(|_, w| w.reset_at > now);
        before - self.by_identity.len()
    }
}

/// Outcome of an accepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub remaining: u32,
    pub reset_in: Duration,
}

/// Returned when an identity has exhausted its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimited {
    pub retry_after: Duration,
}

#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<Windows>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(Windows {
                by_identity: HashMap::new(),
                next_sweep: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Windows> {
        self.windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn check(&self, identity: &str) -> Result<RateLimitStatus, RateLimited> {
        self.check_at(identity, Instant::now())
    }

    /// Counts one request for `identity` at `now`.
    pub fn check_at(&self, identity: &str, now: Instant) -> Result<RateLimitStatus, RateLimited> {
        let mut windows = self.lock();

        let next_sweep = windows.next_sweep;
        match next_sweep {
            Some(due) if now < due => {}
            Some(_) => {
                let dropped = windows.sweep(now);
                if dropped > 0 {
                    log::debug!("Rate limiter dropped {dropped} expired windows");
                }
                windows.next_sweep = Some(now + self.window);
            }
            None => windows.next_sweep = Some(now + self.window),
        }

        let window = windows
            .by_identity
            .entry(identity.to_string())
            .and_modify(|w| {
                if now >= w.reset_at {
                    *w = Window {
                        count: 0,
                        reset_at: now + self.window,
                    };
                }
            })
            .or_insert(Window {
                count: 0,
                reset_at: now + self.window,
            });

        let reset_in = window.reset_at.saturating_duration_since(now);
        if window.count >= self.max_requests {
            return Err(RateLimited {
                retry_after: reset_in,
            });
        }

        window.count += 1;
        Ok(RateLimitStatus {
            remaining: self.max_requests - window.count,
            reset_in,
        })
    }

    /// Number of identities with a live window.
    pub fn tracked_identities(&self) -> usize {
        self.lock().by_identity.len()
    }

    /// Drops windows that expired before `now`.
    pub fn prune(&self, now: Instant) -> usize {
        self.lock().sweep(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn accepts_ten_then_rejects_the_eleventh() {
        let limiter = RateLimiter::new(10, HOUR);
        let start = Instant::now();

        for i in 1..=10 {
            let status = limiter
                .check_at("user-1", start + Duration::from_secs(i))
                .expect("request within limit");
            assert_eq!(status.remaining, 10 - i as u32);
        }

        let rejected = limiter
            .check_at("user-1", start + Duration::from_secs(11))
            .unwrap_err();
        assert_eq!(rejected.retry_after, HOUR - Duration::from_secs(10));
    }

    #[test]
    fn identities_are_counted_separately() {
        let limiter = RateLimiter::new(1, HOUR);
        let now = Instant::now();
        assert!(limiter.check_at("a", now).is_ok());
        assert!(limiter.check_at("b", now).is_ok());
        assert!(limiter.check_at("a", now).is_err());
        assert_eq!(limiter.tracked_identities(), 2);
    }

    #[test]
    fn window_resets_after_it_elapses() {
        let limiter = RateLimiter::new(2, HOUR);
        let start = Instant::now();
        assert!(limiter.check_at("a", start).is_ok());
        assert!(limiter.check_at("a", start).is_ok());
        assert!(limiter.check_at("a", start + Duration::from_secs(10)).is_err());

        let status = limiter.check_at("a", start + HOUR).unwrap();
        assert_eq!(status.remaining, 1);
    }

    #[test]
    fn prune_drops_expired_windows() {
        let limiter = RateLimiter::new(5, HOUR);
        let start = Instant::now();
        limiter.check_at("old", start).unwrap();
        limiter
            .check_at("new", start + Duration::from_secs(1800))
            .unwrap();

        assert_eq!(limiter.prune(start + HOUR), 1);
        assert_eq!(limiter.tracked_identities(), 1);
    }

    #[test]
    fn checking_sweeps_expired_windows_once_per_window() {
        let limiter = RateLimiter::new(5, HOUR);
        let start = Instant::now();
        for i in 0..100 {
            limiter.check_at(&format!("user-{i}"), start).unwrap();
        }
        assert_eq!(limiter.tracked_identities(), 100);

        // Still inside the first sweep interval: nothing is dropped yet.
        limiter
            .check_at("late", start + Duration::from_secs(1800))
            .unwrap();
        assert_eq!(limiter.tracked_identities(), 101);

        limiter.check_at("later", start + HOUR).unwrap();
        assert_eq!(limiter.tracked_identities(), 2);
    }
}
