//! Shared FIFO queue for tasks.
//!
//! A single `VecDeque` behind one mutex, paired with a condition variable that workers
//! park on until the queue is non-empty or the pool is shutting down.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

pub struct TaskQueue<T> {
    items: Mutex<VecDeque<T>>,
    available: Condvar,
    closed: AtomicBool,
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
            closed: AtomicBool::new(false),
        }
    }

    // Tasks never run under this lock, so a poisoned guard still holds a consistent deque.
    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `item` and wakes one waiting worker.
    ///
    /// The closed flag is tested under the lock, so an item is either accepted before
    /// [`close`](Self::close) or handed back to the caller, never lost in between.
    /// `on_accept` runs under the lock, before any worker can pop the item.
    pub fn push<F: FnOnce()>(&self, item: T, on_accept: F) -> Result<(), T> {
        let mut items = self.lock();
        // Checked under the lock on purpose: an accepted item is always seen by the drain.
        if self.closed.load(Ordering::Acquire) {
            return Err(item);
        }
        items.push_back(item);
        on_accept();
        drop(items);

        self.available.notify_one();
        Ok(())
    }

    /// Blocks until an item is available or the queue is closed and drained.
    ///
    /// Returns `None` only once the queue is closed and empty.
    pub fn pop(&self) -> Option<T> {
        let mut items = self.lock();
        loop {
            if let Some(item) = items.pop_front() {
                return Some(item);
            }
            if self.closed.load(Ordering::Acquire) {
                return None;
            }
            items = self
                .available
                .wait(items)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Marks the queue closed and wakes every waiter. Returns `false` if it was already closed.
    pub fn close(&self) -> bool {
        let items = self.lock();
        let was_closed = self.closed.swap(true, Ordering::AcqRel);
        drop(items);

        self.available.notify_all();
        !was_closed
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn pops_in_push_order() {
        let queue = TaskQueue::new();
        for i in 0..5 {
            queue.push(i, || ()).unwrap();
        }
        let drained: Vec<_> = (0..5).filter_map(|_| queue.pop()).collect();
        assert_eq!(drained, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn push_after_close_is_handed_back() {
        let queue = TaskQueue::new();
        assert!(queue.close());
        assert!(!queue.close());
        assert_eq!(queue.push(7, || ()), Err(7));
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn close_drains_before_returning_none() {
        let queue = TaskQueue::new();
        queue.push("a", || ()).unwrap();
        queue.push("b", || ()).unwrap();
        queue.close();
        assert_eq!(queue.pop(), Some("a"));
        assert_eq!(queue.pop(), Some("b"));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn close_wakes_blocked_waiter() {
        let queue = Arc::new(TaskQueue::<u32>::new());
        let waiter = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop())
        };
        thread::sleep(Duration::from_millis(50));
        queue.close();
        assert_eq!(waiter.join().unwrap(), None);
    }
}
