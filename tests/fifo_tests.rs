use fixedpool::ThreadPool;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    mpsc, Arc, Mutex,
};
use std::thread;
use std::time::Duration;

#[test]
fn test_single_worker_runs_in_submission_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let pool = ThreadPool::new(1).unwrap();

    // Hold the only worker so every later task is queued before any of them runs.
    let (started_tx, started_rx) = mpsc::channel::<()>();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let gate = pool
        .submit(move || {
            started_tx.send(()).unwrap();
            let _ = release_rx.recv();
        })
        .unwrap();
    started_rx.recv().unwrap();

    for i in 0..100 {
        let order = Arc::clone(&order);
        pool.submit(move || order.lock().unwrap().push(i)).unwrap();
    }
    assert_eq!(pool.queued_tasks(), 100);

    release_tx.send(()).unwrap();
    gate.join().unwrap();
    pool.shutdown();

    let order = order.lock().unwrap();
    assert_eq!(*order, (0..100).collect::<Vec<_>>());
}

#[test]
fn test_dequeue_order_is_fifo_across_workers() {
    // Each task records its submission tag together with a ticket drawn when it starts.
    // Ticket order follows dequeue order except where workers race between pop and ticket,
    // which only swaps a few neighbours.
    let ticket = Arc::new(AtomicUsize::new(0));
    let started = Arc::new(Mutex::new(Vec::new()));
    let pool = ThreadPool::new(4).unwrap();

    let handles: Vec<_> = (0..400usize)
        .map(|tag| {
            let ticket = Arc::clone(&ticket);
            let started = Arc::clone(&started);
            pool.submit(move || {
                let t = ticket.fetch_add(1, Ordering::SeqCst);
                started.lock().unwrap().push((t, tag));
                thread::sleep(Duration::from_micros(100));
            })
            .unwrap()
        })
        .collect();
    for mut h in handles {
        h.get().unwrap();
    }
    pool.shutdown();

    let mut started = started.lock().unwrap().clone();
    started.sort();
    let tags: Vec<_> = started.iter().map(|&(_, tag)| tag).collect();

    assert_eq!(tags.len(), 400);
    let inversions = tags.windows(2).filter(|w| w[0] > w[1]).count();
    assert!(inversions < tags.len() / 4, "too many inversions: {inversions}");
}

#[test]
fn test_completion_order_is_not_required() {
    let pool = ThreadPool::new(2).unwrap();
    let finished = Arc::new(Mutex::new(Vec::new()));

    let slow = {
        let finished = Arc::clone(&finished);
        pool.submit(move || {
            thread::sleep(Duration::from_millis(100));
            finished.lock().unwrap().push("slow");
        })
        .unwrap()
    };
    let fast = {
        let finished = Arc::clone(&finished);
        pool.submit(move || finished.lock().unwrap().push("fast")).unwrap()
    };

    fast.join().unwrap();
    slow.join().unwrap();
    assert_eq!(*finished.lock().unwrap(), vec!["fast", "slow"]);
}
