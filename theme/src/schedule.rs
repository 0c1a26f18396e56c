//! Deferred work at the next cooperative boundary.
//!
//! The browser client defers onto the microtask queue; tests and SSR use
//! [`ManualScheduler`] and drain it explicitly.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Work item run once at the next boundary.
pub type Task = Box<dyn FnOnce() + Send>;

pub trait Scheduler: Send + Sync {
    /// Queue `task` to run after the current synchronous work completes.
    fn defer(&self, task: Task);
}

/// FIFO scheduler drained by the caller.
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<VecDeque<Task>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    /// Run the oldest queued task. Returns false when the queue was empty.
    pub fn run_next(&self) -> bool {
        let task = self.lock().pop_front();
        match task {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Run tasks, including ones queued while running, until none remain.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while self.run_next() {
            ran += 1;
        }
        ran
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Task>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Scheduler for ManualScheduler {
    fn defer(&self, task: Task) {
        self.lock().push_back(task);
    }
}
