// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Lifecycle state of a thread pool, readable without taking any lock.

use crossbeam_utils::CachePadded;
use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle state of a [`ThreadPool`](crate::ThreadPool).
///
/// A pool moves forward through `Created -> Running -> Stopping -> Stopped`
/// and never goes back. A pool that is stopped before being initialized goes
/// directly from `Created` to `Stopping`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum PoolState {
    /// The pool accepts tasks but no worker thread has been spawned yet.
    Created = 0,
    /// Worker threads are running and processing tasks.
    Running = 1,
    /// Shutdown has begun: new tasks are rejected and workers are exiting.
    Stopping = 2,
    /// All workers have been joined and the queue has been drained.
    Stopped = 3,
}

impl PoolState {
    /// Whether shutdown has begun, i.e. the pool is [`Stopping`](Self::Stopping)
    /// or [`Stopped`](Self::Stopped).
    pub fn is_shutting_down(self) -> bool {
        self >= PoolState::Stopping
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => PoolState::Created,
            1 => PoolState::Running,
            2 => PoolState::Stopping,
            3 => PoolState::Stopped,
            _ => unreachable!("invalid pool state {value}"),
        }
    }
}

/// Atomic cell holding a [`PoolState`].
///
/// Padded to its own cache line, as every worker polls it in its loop.
pub struct StateCell {
    state: CachePadded<AtomicU8>,
}

impl StateCell {
    /// Creates a cell in the [`PoolState::Created`] state.
    pub fn new() -> Self {
        Self {
            state: CachePadded::new(AtomicU8::new(PoolState::Created as u8)),
        }
    }

    /// Reads the current state.
    pub fn load(&self) -> PoolState {
        PoolState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Unconditionally sets the state.
    pub fn store(&self, state: PoolState) {
        self.state.store(state as u8, Ordering::SeqCst);
    }

    /// Atomically moves from `from` to `to`. On failure, returns the state
    /// that was observed instead.
    pub fn transition(&self, from: PoolState, to: PoolState) -> Result<(), PoolState> {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ())
            .map_err(PoolState::from_u8)
    }

    /// Shorthand for `self.load().is_shutting_down()`.
    pub fn is_shutting_down(&self) -> bool {
        self.load().is_shutting_down()
    }
}
