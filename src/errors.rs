//! Error types for the thread pool.
//!
//! This module defines errors that may occur during the operation of the thread pool.
//! Lifecycle errors (construction, submission after shutdown) are returned to the caller of
//! that operation; task failures are only surfaced through the task's own handle.

use std::io;
use thiserror::Error;

/// Represents errors that can occur in the thread pool.
#[derive(Error, Debug)]
pub enum PoolError {
    /// The thread pool has been shut down, and no new tasks can be accepted.
    #[error("thread pool is shut down")]
    InvalidState,

    /// A pool was requested with zero worker threads.
    #[error("thread pool needs at least one worker thread")]
    InvalidThreadCount,

    /// The operating system refused to create a worker thread.
    #[error("failed to spawn worker thread: {0}")]
    ThreadSpawn(#[from] io::Error),

    /// The task panicked while running. Carries the panic message.
    #[error("task panicked: {0}")]
    TaskFailed(String),

    /// The result of this handle was already retrieved.
    #[error("task result already consumed")]
    AlreadyConsumed,

    /// A bounded wait expired before the task finished.
    #[error("timed out waiting for task result")]
    Timeout,

    /// The task was dropped without ever producing a result.
    #[error("task was dropped before it produced a result")]
    TaskLost,
}

/// Result type alias for pool operations.
pub type Result<T> = std::result::Result<T, PoolError>;
