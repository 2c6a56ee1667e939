//! Metrics collection for the thread pool.
//!
//! This module defines the `MetricsCollector` trait for collecting metrics about the
//! thread pool's activity, as well as a default implementation backed by atomic counters.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A trait for collecting metrics from the thread pool.
///
/// Implementations of this trait provide hooks to track key events in the thread pool,
/// such as task submission, execution, and worker lifecycle changes. Hooks are called
/// from worker and submitting threads and must not block. A hook that panics has its
/// event dropped and a warning logged; the pool keeps running.
pub trait MetricsCollector: Send + Sync {
    /// Called when a task is accepted into the queue.
    ///
    /// Runs while the queue lock is held, so it must not call back into the pool
    /// (`submit`, `queued_tasks`, ...) or it will deadlock.
    fn on_task_submitted(&self);
    /// Called when a worker dequeues a task and starts running it.
    fn on_task_started(&self);
    /// Called when a task returns normally.
    fn on_task_completed(&self);
    /// Called when a task panics. The panic is delivered to the task's handle.
    fn on_task_failed(&self);
    /// Called when a worker thread starts.
    fn on_worker_started(&self);
    /// Called when a worker thread stops.
    fn on_worker_stopped(&self);
    /// Called when a submission is refused because the pool is shutting down.
    fn on_task_rejected(&self) {}
}

/// Stores metrics for the thread pool using atomic counters.
#[derive(Debug, Default)]
pub struct ThreadPoolMetrics {
    /// Number of tasks currently queued for execution.
    pub queued_tasks: AtomicUsize,
    /// Number of tasks currently being executed.
    pub running_tasks: AtomicUsize,
    /// Total number of tasks that returned normally.
    pub completed_tasks: AtomicUsize,
    /// Total number of tasks that panicked.
    pub failed_tasks: AtomicUsize,
    /// Number of worker threads currently active.
    pub active_threads: AtomicUsize,
    /// Total number of submissions refused after shutdown.
    pub rejected_tasks: AtomicUsize,
}

impl ThreadPoolMetrics {
    /// Creates a new `ThreadPoolMetrics` instance with all counters initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of tasks that have finished, successfully or not.
    pub fn finished_tasks(&self) -> usize {
        self.completed_tasks.load(Ordering::SeqCst) + self.failed_tasks.load(Ordering::SeqCst)
    }
}

/// A default implementation of `MetricsCollector` using atomic counters.
///
/// Backed by an `Arc<ThreadPoolMetrics>` so the counters can be read while the pool runs.
pub struct AtomicMetricsCollector {
    /// Shared metrics storage.
    pub metrics: Arc<ThreadPoolMetrics>,
}

impl AtomicMetricsCollector {
    pub fn new(metrics: Arc<ThreadPoolMetrics>) -> Self {
        Self { metrics }
    }
}

impl MetricsCollector for AtomicMetricsCollector {
    fn on_task_submitted(&self) {
        self.metrics.queued_tasks.fetch_add(1, Ordering::SeqCst);
    }

    fn on_task_started(&self) {
        self.metrics.queued_tasks.fetch_sub(1, Ordering::SeqCst);
        self.metrics.running_tasks.fetch_add(1, Ordering::SeqCst);
    }

    fn on_task_completed(&self) {
        self.metrics.running_tasks.fetch_sub(1, Ordering::SeqCst);
        self.metrics.completed_tasks.fetch_add(1, Ordering::SeqCst);
    }

    fn on_task_failed(&self) {
        self.metrics.running_tasks.fetch_sub(1, Ordering::SeqCst);
        self.metrics.failed_tasks.fetch_add(1, Ordering::SeqCst);
    }

    fn on_worker_started(&self) {
        self.metrics.active_threads.fetch_add(1, Ordering::SeqCst);
    }

    fn on_worker_stopped(&self) {
        self.metrics.active_threads.fetch_sub(1, Ordering::SeqCst);
    }

    fn on_task_rejected(&self) {
        self.metrics.rejected_tasks.fetch_add(1, Ordering::SeqCst);
    }
}
