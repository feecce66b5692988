use std::{
    collections::{HashMap, VecDeque},
    sync::{Mutex, MutexGuard},
};

/// Sliding-window request log per source identifier.
///
/// A request is admitted when fewer than `max` admitted requests from the
/// same source fall inside the trailing window. Rejected requests are not
/// recorded.
#[derive(Debug)]
pub struct RateLimiter {
    max: usize,
    window_ms: u64,
    windows: Mutex<HashMap<String, VecDeque<u64>>>,
}

impl RateLimiter {
    pub fn new(max: usize, window_ms: u64) -> Self {
        Self {
            max,
            window_ms,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Admits and records one request, or returns the wait in milliseconds
    /// until the oldest request leaves the window.
    pub fn check(&self, source: &str, now_ms: u64) -> Result<(), u64> {
        let mut windows = self.lock();
        let hits = windows.entry(source.to_owned()).or_default();
        evict(hits, now_ms, self.window_ms);

        if hits.len() >= self.max {
            let oldest = hits.front().copied().unwrap_or(now_ms);
            let retry = oldest.saturating_add(self.window_ms).saturating_sub(now_ms);
            return Err(retry.max(1));
        }

        hits.push_back(now_ms);
        Ok(())
    }

    /// Forgets sources with no request inside the window.
    pub fn purge_idle(&self, now_ms: u64) -> usize {
        let mut windows = self.lock();
        let before = windows.len();
        let window_ms = self.window_ms;
        windows.retain(|_, hits| {
            evict(hits, now_ms, window_ms);
            !hits.is_empty()
        });
        before - windows.len()
    }

    pub fn tracked_sources(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, VecDeque<u64>>> {
        self.windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn evict(hits: &mut VecDeque<u64>, now_ms: u64, window_ms: u64) {
    while hits
        .front()
        .is_some_and(|at| at.saturating_add(window_ms) <= now_ms)
    {
        hits.pop_front();
    }
}
