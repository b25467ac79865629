//! A thread-safe, bounded-priority FIFO with head/tail fast paths and a
//! blocking `get`. Mirrors a classic monitor: one `Mutex` guarding a sorted
//! list, one `Condvar` standing in for the "queue length" semaphore.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

struct Entry<T> {
    priority: i64,
    payload: T,
}

pub struct WorkQueue<T> {
    entries: Mutex<VecDeque<Entry<T>>>,
    nonempty: Condvar,
}

impl<T> WorkQueue<T> {
    pub fn new() -> Self {
        WorkQueue {
            entries: Mutex::new(VecDeque::new()),
            nonempty: Condvar::new(),
        }
    }

    /// Insert `payload` so the list stays sorted by descending priority,
    /// stable among equal priorities (inserted after existing entries of the
    /// same priority).
    pub fn put(&self, payload: T, priority: i64) {
        let mut entries = self.entries.lock().unwrap();
        let pos = entries
            .iter()
            .position(|e| e.priority < priority)
            .unwrap_or(entries.len());
        entries.insert(pos, Entry { payload, priority });
        drop(entries);
        self.nonempty.notify_one();
    }

    /// Insert unconditionally at the head (maximum priority, bypassing
    /// comparison).
    pub fn put_head(&self, payload: T) {
        let mut entries = self.entries.lock().unwrap();
        entries.push_front(Entry {
            payload,
            priority: i64::MAX,
        });
        drop(entries);
        self.nonempty.notify_one();
    }

    /// Insert unconditionally at the tail (minimum priority).
    pub fn put_tail(&self, payload: T) {
        let mut entries = self.entries.lock().unwrap();
        entries.push_back(Entry {
            payload,
            priority: i64::MIN,
        });
        drop(entries);
        self.nonempty.notify_one();
    }

    /// Block until the list is non-empty, then remove and return the head.
    pub fn get(&self) -> T {
        let mut entries = self.entries.lock().unwrap();
        loop {
            if let Some(entry) = entries.pop_front() {
                return entry.payload;
            }
            entries = self.nonempty.wait(entries).unwrap();
        }
    }
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
