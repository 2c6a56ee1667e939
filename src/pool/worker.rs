//! Worker logic for the thread pool

use std::sync::Arc;
use std::thread;

use log::{debug, trace, warn};

use super::task::TaskOutcome;
use super::Shared;

pub struct WorkerHandle {
    id: usize,
    thread: Option<thread::JoinHandle<()>>,
}

impl WorkerHandle {
    pub fn new(id: usize, thread: thread::JoinHandle<()>) -> Self {
        Self {
            id,
            thread: Some(thread),
        }
    }

    /// Joins the worker thread. Returns immediately when called from the worker itself,
    /// which then exits on its own once the queue is drained.
    pub fn join(&mut self) {
        let Some(handle) = self.thread.take() else {
            return;
        };
        if handle.thread().id() == thread::current().id() {
            debug!("worker {} dropped its own pool, skipping self-join", self.id);
            return;
        }
        if handle.join().is_err() {
            warn!("worker {} terminated abnormally", self.id);
        }
    }
}

/// Worker thread main loop.
///
/// Blocks on the shared queue until a task arrives, runs it without holding the queue lock,
/// and returns once the pool is shut down and the queue is empty.
pub(crate) fn worker_loop(id: usize, shared: Arc<Shared>) {
    debug!("worker {id} started");
    shared.report(|m| m.on_worker_started());

    while let Some(task) = shared.queue.pop() {
        let task_id = task.id();
        trace!("worker {id} running task {task_id}");
        shared.report(|m| m.on_task_started());

        match task.run() {
            TaskOutcome::Completed => {
                shared.report(|m| m.on_task_completed());
            }
            TaskOutcome::Panicked => {
                debug!("worker {id} recovered from panic in task {task_id}");
                shared.report(|m| m.on_task_failed());
            }
        }
    }

    shared.report(|m| m.on_worker_stopped());
    debug!("worker {id} exiting");
}
