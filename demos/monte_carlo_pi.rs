use fixedpool::{
    log_metrics,
    metrics::{AtomicMetricsCollector, ThreadPoolMetrics},
    Result, ThreadPoolBuilder,
};
use log::{error, info};
use rand::Rng;
use std::sync::Arc;
use std::time::Instant;

fn random_circle_sampling(n_samples: u64) -> u64 {
    let mut rng = rand::thread_rng();
    let mut points_inside = 0;
    for _ in 0..n_samples {
        let x: f64 = rng.gen();
        let y: f64 = rng.gen();
        if x * x + y * y <= 1.0 {
            points_inside += 1;
        }
    }
    points_inside
}

fn approximate_pi(total_samples: u64, pool_size: usize, n_tasks: u64) -> Result<f64> {
    let samples_per_task = total_samples / n_tasks;

    let metrics = Arc::new(ThreadPoolMetrics::new());
    let collector = Arc::new(AtomicMetricsCollector::new(metrics.clone()));
    let pool = ThreadPoolBuilder::new()
        .num_threads(pool_size)
        .thread_name("pi-sampler")
        .with_metrics_collector(collector)
        .build()?;

    let handles = (0..n_tasks)
        .map(|_| pool.submit_with(random_circle_sampling, samples_per_task))
        .collect::<Result<Vec<_>>>()?;
    log_metrics!(metrics);

    let mut points_inside = 0;
    for mut handle in handles {
        points_inside += handle.get()?;
    }
    pool.shutdown();
    log_metrics!(metrics);

    Ok(4.0 * points_inside as f64 / (samples_per_task * n_tasks) as f64)
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let total_samples = i32::MAX as u64;
    let pool_size = 16;
    let n_tasks = 1024;

    let start = Instant::now();
    match approximate_pi(total_samples, pool_size, n_tasks) {
        Ok(approx_pi) => {
            let pi = std::f64::consts::PI;
            println!("pi\t\t{pi:.32}");
            println!("approx_pi\t{approx_pi:.32}");
            println!("abs_diff\t{:.32}", (pi - approx_pi).abs());
            info!("finished in {:?}", start.elapsed());
        }
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}
