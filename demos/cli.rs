// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI tool to run producer/consumer workloads on a thread pool.

use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use sluice::{
    CpuPinningPolicy, FaultPolicy, ShutdownPolicy, TaskFault, ThreadCount, ThreadPoolBuilder,
};
use std::hint::black_box;
use std::process::ExitCode;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let builder = ThreadPoolBuilder {
        num_threads: match cli.num_threads {
            Some(num_threads) => ThreadCount::Count(num_threads),
            None => ThreadCount::AvailableParallelism,
        },
        queue_capacity: cli.queue_capacity,
        shutdown_policy: match cli.shutdown_policy {
            ShutdownPolicyCli::Discard => ShutdownPolicy::Discard,
            ShutdownPolicyCli::Drain => ShutdownPolicy::Drain,
        },
        fault_policy: FaultPolicy::Isolate,
        cpu_pinning: if cli.pin_cpus {
            CpuPinningPolicy::IfSupported
        } else {
            CpuPinningPolicy::No
        },
        fault_handler: Some(Arc::new(|fault: &TaskFault| {
            eprintln!(
                "task #{} failed on worker {}: {}",
                fault.task_id, fault.worker_id, fault.message
            );
        })),
    };

    let pool = match builder.build() {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("failed to start the thread pool: {e}");
            return ExitCode::FAILURE;
        }
    };
    println!(
        "started {} worker(s), queue capacity {}",
        pool.num_threads(),
        pool.queue_capacity()
    );

    let start = Instant::now();
    let checksum = Arc::new(AtomicU64::new(0));
    std::thread::scope(|s| {
        for producer in 0..cli.producers {
            let pool = &pool;
            let checksum = checksum.clone();
            let cli = &cli;
            s.spawn(move || {
                let mut rng = ChaCha12Rng::seed_from_u64(cli.seed.wrapping_add(producer as u64));
                for _ in 0..cli.tasks_per_producer {
                    let checksum = checksum.clone();
                    let work = rng.random_range(0..=cli.max_work);
                    let fail = rng.random_bool(cli.failure_rate);
                    let submitted = pool.submit(move || {
                        if fail {
                            panic!("injected failure");
                        }
                        let mut acc = 0u64;
                        for i in 0..work {
                            acc = acc.wrapping_mul(31).wrapping_add(black_box(i));
                        }
                        checksum.fetch_add(acc, Ordering::Relaxed);
                    });
                    if submitted.is_err() {
                        break;
                    }
                }
            });
        }
    });
    pool.stop();
    let elapsed = start.elapsed();

    let stats = pool.stats();
    println!("{stats:#?}");
    println!("checksum = {}", checksum.load(Ordering::Relaxed));
    println!("elapsed = {elapsed:?}");
    ExitCode::SUCCESS
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Number of worker threads. Defaults to the available parallelism.
    #[arg(long)]
    num_threads: Option<usize>,

    /// Maximum number of queued tasks.
    #[arg(long, default_value_t = 1024)]
    queue_capacity: usize,

    /// Number of producer threads.
    #[arg(long, default_value_t = 4)]
    producers: usize,

    /// Number of tasks submitted by each producer.
    #[arg(long, default_value_t = 100_000)]
    tasks_per_producer: usize,

    /// Maximum number of loop iterations in each task.
    #[arg(long, default_value_t = 1000)]
    max_work: u64,

    /// Probability that a task panics, in [0, 1].
    #[arg(long, default_value_t = 0.0, value_parser = parse_probability)]
    failure_rate: f64,

    /// Seed of the random workload.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// What happens to queued tasks at shutdown.
    #[arg(long, value_enum, default_value_t = ShutdownPolicyCli::Drain)]
    shutdown_policy: ShutdownPolicyCli,

    /// Pin worker threads to CPUs, if supported.
    #[arg(long)]
    pin_cpus: bool,
}

fn parse_probability(arg: &str) -> Result<f64, String> {
    let p: f64 = arg.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("{p} is not in [0, 1]"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ShutdownPolicyCli {
    Discard,
    Drain,
}
