//! Termination-detection counter for the worker pool.
//!
//! Named after the traffic control workers who manage two-way traffic on
//! blind single-way roads: the count tracks jobs going "in", and blocks
//! anyone waiting on the road until the same number have come back "out".

use std::sync::{Condvar, Mutex};

/// A counting latch: held while outstanding work exists, released the
/// instant it drops back to zero.
///
/// `wait` can be called from a thread that never itself calls `acquire` or
/// `release` — it just blocks until the count is (next) zero.
pub struct Flagman {
    count: Mutex<usize>,
    idle: Condvar,
}

impl Flagman {
    pub fn new() -> Self {
        Flagman {
            count: Mutex::new(0),
            idle: Condvar::new(),
        }
    }

    /// Record one more outstanding job.
    pub fn acquire(&self) {
        let mut count = self.count.lock().unwrap();
        *count += 1;
    }

    /// Record one outstanding job as completed. A release with nothing
    /// outstanding is a silent no-op.
    pub fn release(&self) {
        let mut count = self.count.lock().unwrap();
        if *count == 0 {
            return;
        }
        *count -= 1;
        if *count == 0 {
            self.idle.notify_all();
        }
    }

    /// Block until the outstanding count is zero.
    pub fn wait(&self) {
        let mut count = self.count.lock().unwrap();
        while *count != 0 {
            count = self.idle.wait(count).unwrap();
        }
    }
}

impl Default for Flagman {
    fn default() -> Self {
        Self::new()
    }
}
