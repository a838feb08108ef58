// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Bounded FIFO queue shared between producers and worker threads.

use super::state::StateCell;
use super::thread_pool::ShutdownPolicy;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Upper bound on the memory reserved upfront for the queue.
const MAX_PREALLOCATED: usize = 1024;

/// Result of [`BoundedQueue::pop()`].
#[derive(Debug, PartialEq, Eq)]
pub enum Dequeued<T> {
    /// The front item of the queue.
    Item(T),
    /// The pool is shutting down and the worker thread must exit.
    Finished,
}

/// A capacity-limited FIFO queue.
///
/// All accesses to the items go through a single mutex, with two condition
/// variables to block producers while the queue is full and consumers while
/// it is empty. Blocked threads also wake up when the pool shuts down, which
/// they observe via the [`StateCell`] passed to each operation.
pub struct BoundedQueue<T> {
    /// Maximum number of items in the queue.
    capacity: usize,
    /// Whether consumers keep popping items after shutdown has begun.
    policy: ShutdownPolicy,
    /// Pending items, in submission order.
    items: Mutex<VecDeque<T>>,
    /// Signaled when an item is removed.
    not_full: Condvar,
    /// Signaled when an item is added.
    not_empty: Condvar,
}

impl<T> BoundedQueue<T> {
    /// Creates an empty queue holding at most `capacity` items.
    pub fn new(capacity: usize, policy: ShutdownPolicy) -> Self {
        assert!(capacity > 0, "queue capacity must be positive");
        Self {
            capacity,
            policy,
            items: Mutex::new(VecDeque::with_capacity(capacity.min(MAX_PREALLOCATED))),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        }
    }

    /// Maximum number of items in the queue.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of items in the queue.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the queue is currently empty.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Appends an item, blocking while the queue is full.
    ///
    /// If the pool is shutting down (before or while waiting), the item is
    /// handed back to the caller instead.
    pub fn push(&self, item: T, state: &StateCell) -> Result<(), T> {
        let mut items = self
            .not_full
            .wait_while(self.lock(), |items| {
                items.len() >= self.capacity && !state.is_shutting_down()
            })
            .unwrap_or_else(PoisonError::into_inner);
        if state.is_shutting_down() {
            return Err(item);
        }

        items.push_back(item);
        debug_assert!(items.len() <= self.capacity);
        drop(items);

        self.not_empty.notify_one();
        Ok(())
    }

    /// Removes the front item, blocking while the queue is empty.
    ///
    /// Returns [`Dequeued::Finished`] once the pool is shutting down: right
    /// away under [`ShutdownPolicy::Discard`], or after the queue is empty
    /// under [`ShutdownPolicy::Drain`].
    pub fn pop(&self, state: &StateCell) -> Dequeued<T> {
        // Lock-free fast path for exiting workers.
        if self.policy == ShutdownPolicy::Discard && state.is_shutting_down() {
            return Dequeued::Finished;
        }

        let mut items = self
            .not_empty
            .wait_while(self.lock(), |items| {
                items.is_empty() && !state.is_shutting_down()
            })
            .unwrap_or_else(PoisonError::into_inner);
        if self.policy == ShutdownPolicy::Discard && state.is_shutting_down() {
            return Dequeued::Finished;
        }

        match items.pop_front() {
            Some(item) => {
                drop(items);
                self.not_full.notify_one();
                Dequeued::Item(item)
            }
            None => Dequeued::Finished,
        }
    }

    /// Wakes up every thread blocked in [`push()`](Self::push) or
    /// [`pop()`](Self::pop), so that they re-check the pool state.
    pub fn wake_all(&self) {
        // Taking the lock orders this wake-up after any waiter that checked the
        // state before it changed.
        drop(self.lock());
        self.not_full.notify_all();
        self.not_empty.notify_all();
    }

    /// Removes all remaining items without processing them, and returns them
    /// in queue order, so that they're dropped outside of the lock.
    pub fn drain(&self) -> Vec<T> {
        let discarded: Vec<T> = self.lock().drain(..).collect();
        self.not_full.notify_all();
        discarded
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
