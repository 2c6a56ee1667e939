//! Task abstraction for the thread pool.
//!
//! [`wrap`] turns a callable into a type-erased [`Task`] for the queue and a typed
//! [`TaskHandle`] for the caller. The two are connected by a one-shot channel: the task
//! writes exactly once, the handle reads exactly once.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, TryRecvError};
use log::warn;

use crate::errors::{PoolError, Result};

pub type BoxedTask = Box<dyn FnOnce() -> TaskOutcome + Send + 'static>;

/// How a task body finished, as seen by the worker that ran it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Completed,
    Panicked,
}

/// A queued unit of work.
pub struct Task {
    id: u64,
    body: BoxedTask,
}

impl Task {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn run(self) -> TaskOutcome {
        (self.body)()
    }
}

/// Observable state of a [`TaskHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// The task has not produced a result yet.
    Pending,
    /// A value or failure is stored and has not been retrieved.
    Ready,
    /// The result was retrieved.
    Consumed,
}

/// Handle to the eventual result of a submitted task.
pub struct TaskHandle<T> {
    receiver: Receiver<thread::Result<T>>,
    slot: Option<thread::Result<T>>,
    consumed: bool,
}

impl<T> TaskHandle<T> {
    /// Polls the handle without blocking.
    pub fn state(&mut self) -> TaskState {
        if self.consumed {
            return TaskState::Consumed;
        }
        if self.slot.is_none() {
            match self.receiver.try_recv() {
                Ok(res) => self.slot = Some(res),
                Err(TryRecvError::Empty) => return TaskState::Pending,
                // Nothing will ever arrive; let `get` report it instead of blocking.
                Err(TryRecvError::Disconnected) => return TaskState::Ready,
            }
        }
        TaskState::Ready
    }

    pub fn is_ready(&mut self) -> bool {
        self.state() == TaskState::Ready
    }

    /// Blocks until the task has run and returns its value.
    ///
    /// # Errors
    /// - [`PoolError::TaskFailed`] if the task panicked.
    /// - [`PoolError::AlreadyConsumed`] if the result was already retrieved.
    /// - [`PoolError::TaskLost`] if the task was dropped without running.
    pub fn get(&mut self) -> Result<T> {
        let res = self.take(None)?;
        res.map_err(|payload| PoolError::TaskFailed(panic_message(&*payload)))
    }

    /// Like [`get`](Self::get), but gives up after `timeout`.
    ///
    /// On [`PoolError::Timeout`] the handle stays pending and may be waited on again.
    pub fn get_timeout(&mut self, timeout: Duration) -> Result<T> {
        let res = self.take(Some(timeout))?;
        res.map_err(|payload| PoolError::TaskFailed(panic_message(&*payload)))
    }

    /// Consumes the handle and returns the raw outcome.
    ///
    /// A panicking task yields its original payload, so the caller can re-raise it with
    /// [`std::panic::resume_unwind`].
    pub fn join(mut self) -> thread::Result<T> {
        match self.take(None) {
            Ok(res) => res,
            Err(err) => Err(Box::new(err.to_string()) as Box<dyn Any + Send>),
        }
    }

    fn take(&mut self, timeout: Option<Duration>) -> Result<thread::Result<T>> {
        if self.consumed {
            return Err(PoolError::AlreadyConsumed);
        }
        let res = match self.slot.take() {
            Some(res) => res,
            None => match timeout {
                None => self.receiver.recv().map_err(|_| PoolError::TaskLost)?,
                Some(timeout) => match self.receiver.recv_timeout(timeout) {
                    Ok(res) => res,
                    Err(RecvTimeoutError::Timeout) => return Err(PoolError::Timeout),
                    Err(RecvTimeoutError::Disconnected) => return Err(PoolError::TaskLost),
                },
            },
        };
        self.consumed = true;
        Ok(res)
    }
}

/// Wraps `f` into a queueable task and the handle that will receive its result.
///
/// Panics raised by `f` are caught and delivered to the handle; they never unwind into
/// the worker running the task.
pub fn wrap<F, T>(id: u64, f: F) -> (Task, TaskHandle<T>)
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = channel::bounded(1);
    let body = Box::new(move || {
        let res = panic::catch_unwind(AssertUnwindSafe(f));
        let outcome = match &res {
            Ok(_) => TaskOutcome::Completed,
            Err(payload) => {
                warn!("task {id} panicked: {}", panic_message(&**payload));
                TaskOutcome::Panicked
            }
        };
        // The caller may have dropped its handle; the result is simply discarded then.
        let _ = tx.send(res);
        outcome
    });
    let handle = TaskHandle {
        receiver: rx,
        slot: None,
        consumed: false,
    };
    (Task { id, body }, handle)
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
