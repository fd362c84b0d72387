//! Generation-scoped task tracking.
//!
//! A user action (picking new files, re-triggering a request) makes all work
//! started for the previous action stale. `TaskSet` wraps each piece of work
//! in an abortable future and aborts the whole batch on [`TaskSet::restart`],
//! so stale completions can never touch the DOM.

#[cfg(test)]
#[path = "task_test.rs"]
mod task_test;

use std::future::Future;

use futures::future::{AbortHandle, Abortable};

#[derive(Debug, Default)]
pub struct TaskSet {
    generation: u64,
    handles: Vec<AbortHandle>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort every tracked task and start a new generation.
    pub fn restart(&mut self) -> u64 {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        self.generation += 1;
        self.generation
    }

    /// Track `fut` under the current generation.
    ///
    /// The returned future resolves to `Err(Aborted)` if the set is restarted
    /// before it completes.
    pub fn track<F: Future>(&mut self, fut: F) -> Abortable<F> {
        let (handle, registration) = AbortHandle::new_pair();
        self.handles.retain(|h| !h.is_aborted());
        self.handles.push(handle);
        Abortable::new(fut, registration)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of tracked tasks in the current generation.
    pub fn tracked(&self) -> usize {
        self.handles.len()
    }
}
