// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types returned by the thread pool.

/// Invalid thread pool configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The requested number of worker threads is outside of
    /// `1..=MAX_THREADS`.
    #[error("invalid thread count {requested}, expected a value in 1..={max}")]
    ThreadCount {
        /// Number of threads that was requested.
        requested: usize,
        /// Maximum number of threads allowed.
        max: usize,
    },
    /// The requested queue capacity is outside of `1..=MAX_QUEUE_SIZE`.
    #[error("invalid queue capacity {requested}, expected a value in 1..={max}")]
    QueueCapacity {
        /// Capacity that was requested.
        requested: usize,
        /// Maximum capacity allowed.
        max: usize,
    },
}

/// Failure to start the worker threads of a pool.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// The configuration is invalid. No thread was spawned.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The pool's workers were already spawned.
    #[error("thread pool is already initialized")]
    AlreadyInitialized,
    /// The pool was stopped before it could be initialized.
    #[error("thread pool is shut down")]
    ShutDown,
    /// The operating system failed to spawn a worker thread. Workers spawned
    /// before the failure have been stopped.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// A task could not be submitted. The task was dropped without running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// Shutdown of the pool has begun.
    #[error("thread pool is shut down, task rejected")]
    ShutDown,
}
