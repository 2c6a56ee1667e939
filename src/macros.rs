//! # Macros for `fixedpool`
//!
//! Shorthands for submitting tasks and logging metrics.

/// Submits a task to the pool, optionally with arguments bound to the callable.
///
/// # Examples
/// ```rust
/// use fixedpool::{submit, ThreadPool};
///
/// let pool = ThreadPool::new(2).unwrap();
///
/// let mut plain = submit!(pool, || 6 * 7).unwrap();
/// let mut with_args = submit!(pool, |(a, b): (u32, u32)| a + b, (40, 2)).unwrap();
///
/// assert_eq!(plain.get().unwrap(), 42);
/// assert_eq!(with_args.get().unwrap(), 42);
/// pool.shutdown();
/// ```
#[macro_export]
macro_rules! submit {
    ($pool:expr, $task:expr) => {
        $pool.submit($task)
    };
    ($pool:expr, $task:expr, $args:expr) => {
        $pool.submit_with($task, $args)
    };
}

/// Logs the current metrics of the thread pool at `info` level.
///
/// # Example
/// ```rust
/// use fixedpool::{metrics::{ThreadPoolMetrics, AtomicMetricsCollector}, ThreadPoolBuilder, log_metrics};
/// use std::sync::Arc;
///
/// let metrics = Arc::new(ThreadPoolMetrics::new());
/// let collector = Arc::new(AtomicMetricsCollector::new(metrics.clone()));
/// let pool = ThreadPoolBuilder::new().with_metrics_collector(collector).build().unwrap();
///
/// log_metrics!(metrics);
/// pool.shutdown();
/// ```
#[macro_export]
macro_rules! log_metrics {
    ($metrics:expr) => {
        $crate::__log::info!(
            "queued={} running={} completed={} failed={} rejected={} active_threads={}",
            $metrics
                .queued_tasks
                .load(std::sync::atomic::Ordering::SeqCst),
            $metrics
                .running_tasks
                .load(std::sync::atomic::Ordering::SeqCst),
            $metrics
                .completed_tasks
                .load(std::sync::atomic::Ordering::SeqCst),
            $metrics
                .failed_tasks
                .load(std::sync::atomic::Ordering::SeqCst),
            $metrics
                .rejected_tasks
                .load(std::sync::atomic::Ordering::SeqCst),
            $metrics
                .active_threads
                .load(std::sync::atomic::Ordering::SeqCst),
        )
    };
}
