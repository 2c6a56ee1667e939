pub(crate) mod task;
mod worker;

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use log::{debug, warn};

use crate::errors::{PoolError, Result};
use crate::metrics::MetricsCollector;
use crate::queue::TaskQueue;
use task::{wrap, Task, TaskHandle};
use worker::{worker_loop, WorkerHandle};

const DEFAULT_THREAD_NAME: &str = "fixedpool-worker";

/// State shared between the pool and its workers.
///
/// Workers hold an `Arc` of this rather than a reference to the pool, so the pool value
/// itself can be moved freely.
pub(crate) struct Shared {
    pub(crate) queue: TaskQueue<Task>,
    metrics_collector: Option<Arc<dyn MetricsCollector>>,
    next_task_id: AtomicU64,
}

impl Shared {
    /// Runs `hook` against the metrics collector, if any. A panicking collector is logged
    /// and otherwise ignored so it cannot take down a worker or a submitter.
    pub(crate) fn report<F>(&self, hook: F)
    where
        F: FnOnce(&dyn MetricsCollector),
    {
        if let Some(m) = self.metrics_collector.as_deref() {
            if panic::catch_unwind(AssertUnwindSafe(|| hook(m))).is_err() {
                warn!("metrics collector panicked; event dropped");
            }
        }
    }
}

/// A fixed-size thread pool backed by a single FIFO queue.
///
/// Dropping the pool performs the same drain-and-join sequence as [`ThreadPool::shutdown`].
pub struct ThreadPool {
    shared: Arc<Shared>,
    workers: Vec<WorkerHandle>,
}

impl ThreadPool {
    /// Creates a pool with `num_threads` workers and default settings.
    ///
    /// # Errors
    /// - [`PoolError::InvalidThreadCount`] if `num_threads` is zero.
    /// - [`PoolError::ThreadSpawn`] if a worker thread could not be created.
    pub fn new(num_threads: usize) -> Result<Self> {
        ThreadPoolBuilder::new().num_threads(num_threads).build()
    }

    /// Submits a task and returns a handle to its result.
    ///
    /// The call never waits for a worker; the queue is unbounded.
    ///
    /// # Errors
    /// Returns [`PoolError::InvalidState`] once shutdown has begun. The task is not queued
    /// and `f` is dropped without running.
    pub fn submit<F, T>(&self, f: F) -> Result<TaskHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let id = self.shared.next_task_id.fetch_add(1, Ordering::Relaxed);
        let (task, handle) = wrap(id, f);

        let accepted = self
            .shared
            .queue
            .push(task, || self.shared.report(|m| m.on_task_submitted()));

        match accepted {
            Ok(()) => Ok(handle),
            Err(_) => {
                debug!("rejected task {id}: pool is shut down");
                self.shared.report(|m| m.on_task_rejected());
                Err(PoolError::InvalidState)
            }
        }
    }

    /// Submits `f` to be called with `args`.
    ///
    /// The arguments are moved into the task; pass a tuple for several of them.
    pub fn submit_with<F, A, T>(&self, f: F, args: A) -> Result<TaskHandle<T>>
    where
        F: FnOnce(A) -> T + Send + 'static,
        A: Send + 'static,
        T: Send + 'static,
    {
        self.submit(move || f(args))
    }

    pub fn num_threads(&self) -> usize {
        self.workers.len()
    }

    /// Number of tasks waiting in the queue, not counting those being run.
    pub fn queued_tasks(&self) -> usize {
        self.shared.queue.len()
    }

    pub fn is_shutdown(&self) -> bool {
        self.shared.queue.is_closed()
    }

    /// Stops accepting new tasks without waiting.
    ///
    /// Tasks already queued still run; workers exit once the queue is empty. Use
    /// [`shutdown`](Self::shutdown) or drop the pool to wait for them. Calling this more than
    /// once has no further effect.
    pub fn close(&self) {
        if self.shared.queue.close() {
            debug!("closing pool with {} workers", self.workers.len());
        }
    }

    /// Stops accepting tasks, waits for every queued task to run, and joins the workers.
    pub fn shutdown(mut self) {
        self.join_workers();
    }

    fn join_workers(&mut self) {
        self.close();
        if self.workers.is_empty() {
            return;
        }
        for worker in &mut self.workers {
            worker.join();
        }
        self.workers.clear();
        debug!("pool shut down");
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.join_workers();
    }
}

/// Builder for configuring a [`ThreadPool`].
pub struct ThreadPoolBuilder {
    num_threads: usize,
    thread_name: String,
    stack_size: Option<usize>,
    metrics_collector: Option<Arc<dyn MetricsCollector>>,
}

impl Default for ThreadPoolBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadPoolBuilder {
    /// Creates a builder with one worker per logical CPU.
    pub fn new() -> Self {
        Self {
            num_threads: num_cpus::get(),
            thread_name: DEFAULT_THREAD_NAME.to_string(),
            stack_size: None,
            metrics_collector: None,
        }
    }

    pub fn num_threads(mut self, n: usize) -> Self {
        self.num_threads = n;
        self
    }

    /// Prefix for worker thread names; workers are named `<prefix>-<index>`.
    pub fn thread_name(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name = prefix.into();
        self
    }

    pub fn stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    pub fn with_metrics_collector(mut self, collector: Arc<dyn MetricsCollector>) -> Self {
        self.metrics_collector = Some(collector);
        self
    }

    /// Spawns the workers and returns the running pool.
    ///
    /// Either every requested worker is running or an error is returned; workers that
    /// were already spawned when a later spawn fails are shut down and joined first.
    pub fn build(self) -> Result<ThreadPool> {
        if self.num_threads == 0 {
            return Err(PoolError::InvalidThreadCount);
        }

        let shared = Arc::new(Shared {
            queue: TaskQueue::new(),
            metrics_collector: self.metrics_collector,
            next_task_id: AtomicU64::new(0),
        });
        let mut pool = ThreadPool {
            shared,
            workers: Vec::with_capacity(self.num_threads),
        };

        for i in 0..self.num_threads {
            let mut builder = thread::Builder::new().name(format!("{}-{}", self.thread_name, i));
            if let Some(size) = self.stack_size {
                builder = builder.stack_size(size);
            }

            let shared = Arc::clone(&pool.shared);
            match builder.spawn(move || worker_loop(i, shared)) {
                Ok(handle) => pool.workers.push(WorkerHandle::new(i, handle)),
                Err(e) => {
                    warn!("failed to spawn worker {i}: {e}");
                    // Dropping the pool joins the workers spawned so far.
                    return Err(PoolError::ThreadSpawn(e));
                }
            }
        }

        debug!(
            "started pool with {} workers named {}-*",
            pool.workers.len(),
            self.thread_name
        );
        Ok(pool)
    }
}
