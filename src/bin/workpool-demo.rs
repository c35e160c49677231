use std::process::exit;
use std::thread;

use clap::Parser;
use log::{error, info};

use workpool::{Result, ThreadPool};

#[derive(Parser)]
#[command(name = "workpool-demo", version, about = "Drive a worker pool with print jobs")]
struct Cli {
    /// Number of worker threads (defaults to the number of CPUs)
    #[arg(long, value_name = "N")]
    threads: Option<u32>,

    /// Number of jobs to submit
    #[arg(long, default_value_t = 40, value_name = "N")]
    jobs: u32,
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let threads = cli.threads.unwrap_or_else(|| num_cpus::get() as u32);

    info!("workpool-demo {}", env!("CARGO_PKG_VERSION"));
    info!("Starting pool with {} workers", threads);

    let pool = ThreadPool::new(threads)?;

    for i in 0..cli.jobs {
        pool.submit(move || {
            let current = thread::current();
            info!("{} working on job {}", current.name().unwrap_or("worker"), i);
        })?;
    }

    // A zero-worker pool never drains its queue, so only wait when
    // something can make progress.
    if threads > 0 {
        pool.wait_idle();
    }
    let abandoned = pool.shutdown();
    let executed = cli.jobs as usize - abandoned;

    println!(
        "{} of {} jobs executed on {} workers, {} abandoned",
        executed, cli.jobs, threads, abandoned
    );

    Ok(())
}
