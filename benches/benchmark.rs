use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use fixedpool::ThreadPoolBuilder;
use rand::Rng;

/// A CPU-bound task: compute the sum of a range.
fn cpu_task(n: u64) -> u64 {
    (0..n).sum()
}

fn prepare_inputs(n: usize) -> Vec<u64> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen_range(10..=1_000)).collect()
}

fn benchmark_shared_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_queue");
    group.sample_size(10);

    let num_tasks = 10_000;

    for num_threads in [1, 4, 16] {
        group.bench_function(format!("{num_threads}_threads_10k_tasks"), |b| {
            b.iter_batched(
                || {
                    // Prepare a fresh pool and inputs each iteration
                    let pool = ThreadPoolBuilder::new()
                        .num_threads(num_threads)
                        .build()
                        .unwrap();
                    (pool, prepare_inputs(num_tasks))
                },
                |(pool, inputs)| {
                    let handles: Vec<_> = inputs
                        .into_iter()
                        .map(|n| pool.submit_with(cpu_task, n).unwrap())
                        .collect();

                    let total: u64 = handles.into_iter().map(|mut h| h.get().unwrap()).sum();
                    pool.shutdown();
                    total
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn benchmark_submit_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_only");
    group.sample_size(10);

    let num_tasks = 10_000;

    // Measures enqueue plus drain; results are dropped without being read.
    group.bench_function("drain_on_shutdown_10k_tasks", |b| {
        b.iter_batched(
            || ThreadPoolBuilder::new().num_threads(4).build().unwrap(),
            |pool| {
                for n in 0..num_tasks as u64 {
                    let _ = pool.submit(move || cpu_task(n % 100)).unwrap();
                }
                pool.shutdown();
            },
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

fn benchmark_thread_per_task(c: &mut Criterion) {
    let mut group = c.benchmark_group("thread_per_task");
    group.sample_size(10);

    let num_tasks = 10_000;

    group.bench_function("thread_per_task_10k_tasks", |b| {
        b.iter_batched(
            || prepare_inputs(num_tasks),
            |inputs| {
                let handles: Vec<_> = inputs
                    .into_iter()
                    .map(|n| std::thread::spawn(move || cpu_task(n)))
                    .collect();
                handles
                    .into_iter()
                    .map(|h| h.join().unwrap_or(0))
                    .sum::<u64>()
            },
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_shared_queue,
    benchmark_submit_only,
    benchmark_thread_per_task
);
criterion_main!(benches);
