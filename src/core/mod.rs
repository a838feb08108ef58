// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Core engine: task queue, worker threads and lifecycle.

mod error;
mod queue;
mod state;
mod task;
mod thread_pool;
mod util;

pub use error::{ConfigError, InitError, SubmitError};
pub use state::PoolState;
pub use task::{Callable, IntoTask, Job, Method, Task};
pub use thread_pool::{
    CpuPinningPolicy, FaultHandler, FaultPolicy, PoolStats, ShutdownPolicy, TaskFault,
    ThreadCount, ThreadPool, ThreadPoolBuilder, MAX_QUEUE_SIZE, MAX_THREADS,
};
