// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Submits the same kind of work as a closure, a bound function, a bound
//! method and a job.

use sluice::{Job, ShutdownPolicy, Task, ThreadCount, ThreadPoolBuilder};
use std::sync::{Arc, Mutex};

struct Journal {
    lines: Mutex<Vec<String>>,
}

impl Journal {
    fn write(&self, source: &'static str, value: u32) {
        self.lines.lock().unwrap().push(format!("{source}: {value}"));
    }
}

fn write_squared(journal: Arc<Journal>, value: u32) {
    journal.write("function", value * value);
}

struct Countdown {
    journal: Arc<Journal>,
    from: u32,
}

impl Job for Countdown {
    fn run(self) {
        for i in (0..=self.from).rev() {
            self.journal.write("job", i);
        }
    }
}

fn main() {
    env_logger::init();

    let pool = ThreadPoolBuilder {
        num_threads: ThreadCount::Count(1),
        queue_capacity: 16,
        shutdown_policy: ShutdownPolicy::Drain,
        ..Default::default()
    }
    .build()
    .unwrap();

    let journal = Arc::new(Journal {
        lines: Mutex::new(Vec::new()),
    });

    let j = journal.clone();
    pool.submit(move || j.write("closure", 1)).unwrap();
    pool.submit(Task::bind(write_squared, (journal.clone(), 3)))
        .unwrap();
    pool.submit(Task::bind_method(
        journal.clone(),
        Journal::write,
        ("method", 7),
    ))
    .unwrap();
    pool.submit(Task::from_job(Countdown {
        journal: journal.clone(),
        from: 2,
    }))
    .unwrap();

    pool.stop();

    for line in journal.lines.lock().unwrap().iter() {
        println!("{line}");
    }
}
