//! # fixedpool
//!
//! `fixedpool` is a fixed-size thread pool. Tasks go into one shared FIFO queue and are
//! picked up by a set number of worker threads; each submission returns a handle through
//! which the task's value, or its panic, is retrieved later.
//!
//! ## Features
//! - Unbounded submission: `submit` never waits for a free worker.
//! - FIFO dequeue order.
//! - Panics are captured per task and never take down a worker.
//! - Graceful shutdown that runs every accepted task before returning.
//! - Optional metrics hooks.
//!
//! ## Usage
//!
//! ### Basic Usage
//! ```rust
//! use fixedpool::ThreadPool;
//!
//! let pool = ThreadPool::new(4).unwrap();
//!
//! let mut handle = pool.submit(|| 6 * 7).unwrap();
//! assert_eq!(handle.get().unwrap(), 42);
//!
//! pool.shutdown();
//! ```
//!
//! ### Passing Arguments
//! ```rust
//! use fixedpool::ThreadPool;
//!
//! fn count_even(limit: u64) -> u64 {
//!     (0..limit).filter(|n| n % 2 == 0).count() as u64
//! }
//!
//! let pool = ThreadPool::new(2).unwrap();
//! let handles: Vec<_> = (1..=4)
//!     .map(|i| pool.submit_with(count_even, i * 10).unwrap())
//!     .collect();
//!
//! let total: u64 = handles.into_iter().map(|mut h| h.get().unwrap()).sum();
//! assert_eq!(total, 5 + 10 + 15 + 20);
//! ```
//!
//! ### Handling Failures
//! ```rust
//! use fixedpool::{PoolError, ThreadPool};
//!
//! let pool = ThreadPool::new(1).unwrap();
//! let mut bad = pool.submit(|| -> u32 { panic!("bad input") }).unwrap();
//! let mut good = pool.submit(|| 1).unwrap();
//!
//! assert!(matches!(bad.get(), Err(PoolError::TaskFailed(_))));
//! assert_eq!(good.get().unwrap(), 1);
//! ```
//!
//! ### Configuring the Pool
//! ```rust
//! use fixedpool::{metrics::{ThreadPoolMetrics, AtomicMetricsCollector}, ThreadPoolBuilder};
//! use std::sync::{atomic::Ordering, Arc};
//!
//! let metrics = Arc::new(ThreadPoolMetrics::new());
//! let collector = Arc::new(AtomicMetricsCollector::new(metrics.clone()));
//!
//! let pool = ThreadPoolBuilder::new()
//!     .num_threads(4)
//!     .thread_name("render")
//!     .with_metrics_collector(collector)
//!     .build()
//!     .unwrap();
//!
//! for i in 0..5 {
//!     pool.submit(move || i * 2).unwrap();
//! }
//! pool.shutdown();
//!
//! assert_eq!(metrics.completed_tasks.load(Ordering::SeqCst), 5);
//! ```

mod errors;
mod macros;
pub mod metrics;
pub mod pool;
mod queue;

pub use errors::{PoolError, Result};
pub use pool::task::{TaskHandle, TaskState};
pub use pool::{ThreadPool, ThreadPoolBuilder};

#[doc(hidden)]
pub use log as __log;
