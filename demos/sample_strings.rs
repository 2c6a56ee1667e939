use fixedpool::ThreadPoolBuilder;
use log::{error, info};
use std::thread;
use std::time::Duration;

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let thread_num = 8;
    let task_num = 20;

    let pool = match ThreadPoolBuilder::new().num_threads(thread_num).build() {
        Ok(pool) => pool,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let handles: Vec<_> = (0..task_num)
        .filter_map(|i| {
            pool.submit(move || {
                info!("[task {i}] starts");
                thread::sleep(Duration::from_secs(1));
                format!(
                    "I'm task {i} in thread {}",
                    thread::current().name().unwrap_or("unnamed")
                )
            })
            .map_err(|e| error!("task {i} was not submitted: {e}"))
            .ok()
        })
        .collect();

    for mut handle in handles {
        match handle.get() {
            Ok(line) => println!("{line}"),
            Err(e) => error!("{e}"),
        }
    }

    pool.shutdown();
}
