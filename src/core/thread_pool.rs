// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A fixed-size pool of worker threads consuming a bounded FIFO queue.

use super::error::{ConfigError, InitError, SubmitError};
use super::queue::{BoundedQueue, Dequeued};
use super::state::{PoolState, StateCell};
use super::task::{IntoTask, Task};
use super::util::panic_message;
use crate::macros::{log_debug, log_error, log_trace, log_warn};
use crossbeam_utils::CachePadded;
// Platforms that support `libc::sched_setaffinity()`.
#[cfg(all(
    not(miri),
    any(
        target_os = "android",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "linux"
    )
))]
use nix::{
    sched::{sched_setaffinity, CpuSet},
    unistd::Pid,
};
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::JoinHandle;

/// Maximum number of worker threads in a pool.
pub const MAX_THREADS: usize = 30;

/// Maximum capacity of the task queue of a pool.
pub const MAX_QUEUE_SIZE: usize = 100_000;

/// Prefix of the names given to worker threads.
const THREAD_NAME_PREFIX: &str = "sluice-worker";

thread_local! {
    /// Address of the [`Shared`] state of the pool that owns the current
    /// worker thread, or zero outside of worker threads.
    static WORKER_OF: Cell<usize> = const { Cell::new(0) };
}

/// Number of threads to spawn in a thread pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThreadCount {
    /// Spawn the number of threads returned by
    /// [`std::thread::available_parallelism()`], capped to [`MAX_THREADS`].
    AvailableParallelism,
    /// Spawn the given number of threads. Must be in `1..=MAX_THREADS`.
    Count(usize),
}

impl ThreadCount {
    /// Resolves the number of threads to spawn.
    pub fn count(self) -> usize {
        match self {
            ThreadCount::AvailableParallelism => std::thread::available_parallelism()
                .map_or(1, |n| n.get())
                .min(MAX_THREADS),
            ThreadCount::Count(count) => count,
        }
    }
}

impl From<usize> for ThreadCount {
    fn from(thread_count: usize) -> Self {
        ThreadCount::Count(thread_count)
    }
}

/// What happens to tasks that are still queued when the pool stops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShutdownPolicy {
    /// Worker threads exit as soon as shutdown begins. Queued tasks are
    /// dropped without running.
    #[default]
    Discard,
    /// Worker threads keep processing the queue until it is empty. Every task
    /// accepted before shutdown began runs, provided that workers were
    /// spawned.
    Drain,
}

/// How a panic inside a task is handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FaultPolicy {
    /// The panic is caught and reported, and the worker thread moves on to the
    /// next task.
    #[default]
    Isolate,
    /// The panic unwinds through the worker thread, which terminates. The pool
    /// permanently loses that worker.
    Propagate,
}

/// Policy to pin worker threads to CPUs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CpuPinningPolicy {
    /// Don't pin worker threads to CPUs.
    #[default]
    No,
    /// Pin each worker thread to a CPU, if CPU pinning is supported and
    /// implemented on this platform.
    IfSupported,
    /// Pin each worker thread to a CPU. If CPU pinning isn't supported on this
    /// platform (or not implemented), initializing a thread pool will panic.
    Always,
}

/// Report of a task that panicked under [`FaultPolicy::Isolate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskFault {
    /// Submission number of the task.
    pub task_id: u64,
    /// Index of the worker thread that ran the task.
    pub worker_id: usize,
    /// Panic message, if it was a string.
    pub message: String,
}

/// Callback invoked on a worker thread for each [`TaskFault`].
pub type FaultHandler = Arc<dyn Fn(&TaskFault) + Send + Sync>;

/// A builder for [`ThreadPool`].
#[derive(Clone)]
pub struct ThreadPoolBuilder {
    /// Number of worker threads to spawn in the pool.
    pub num_threads: ThreadCount,
    /// Maximum number of queued tasks. Must be in `1..=MAX_QUEUE_SIZE`.
    pub queue_capacity: usize,
    /// What happens to queued tasks when the pool stops.
    pub shutdown_policy: ShutdownPolicy,
    /// How panicking tasks are handled.
    pub fault_policy: FaultPolicy,
    /// Policy to pin worker threads to CPUs.
    pub cpu_pinning: CpuPinningPolicy,
    /// Optional callback notified of isolated task panics.
    pub fault_handler: Option<FaultHandler>,
}

impl Default for ThreadPoolBuilder {
    fn default() -> Self {
        Self {
            num_threads: ThreadCount::AvailableParallelism,
            queue_capacity: MAX_QUEUE_SIZE,
            shutdown_policy: ShutdownPolicy::default(),
            fault_policy: FaultPolicy::default(),
            cpu_pinning: CpuPinningPolicy::default(),
            fault_handler: None,
        }
    }
}

impl ThreadPoolBuilder {
    /// Spawns a thread pool.
    ///
    /// ```
    /// # use sluice::{ThreadCount, ThreadPoolBuilder};
    /// let pool = ThreadPoolBuilder {
    ///     num_threads: ThreadCount::Count(4),
    ///     queue_capacity: 1000,
    ///     ..Default::default()
    /// }
    /// .build()
    /// .unwrap();
    /// assert_eq!(pool.num_threads(), 4);
    /// ```
    pub fn build(&self) -> Result<ThreadPool, InitError> {
        let pool = self.build_uninit()?;
        pool.init(self.num_threads.count())?;
        Ok(pool)
    }

    /// Creates a thread pool in the [`PoolState::Created`] state, without
    /// spawning any worker thread. Tasks can already be submitted, and will run
    /// once [`ThreadPool::init()`] is called.
    pub fn build_uninit(&self) -> Result<ThreadPool, ConfigError> {
        if !(1..=MAX_QUEUE_SIZE).contains(&self.queue_capacity) {
            return Err(ConfigError::QueueCapacity {
                requested: self.queue_capacity,
                max: MAX_QUEUE_SIZE,
            });
        }
        Ok(ThreadPool::new(self))
    }
}

/// Snapshot of the task counters of a [`ThreadPool`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Tasks accepted into the queue.
    pub submitted: u64,
    /// Tasks rejected because the pool was shutting down.
    pub rejected: u64,
    /// Tasks that ran to completion.
    pub completed: u64,
    /// Tasks that panicked.
    pub panicked: u64,
    /// Tasks dropped from the queue at shutdown without running.
    pub discarded: u64,
}

/// A thread pool executing fire-and-forget tasks in FIFO order.
///
/// Tasks go through a bounded queue: [`submit()`](Self::submit) blocks while
/// the queue is full. The pool is stopped by [`stop()`](Self::stop) or when
/// dropped.
///
/// ```
/// # use sluice::{ShutdownPolicy, ThreadCount, ThreadPoolBuilder};
/// # use std::sync::atomic::{AtomicUsize, Ordering};
/// # use std::sync::Arc;
/// let pool = ThreadPoolBuilder {
///     num_threads: ThreadCount::Count(4),
///     shutdown_policy: ShutdownPolicy::Drain,
///     ..Default::default()
/// }
/// .build()
/// .unwrap();
///
/// let counter = Arc::new(AtomicUsize::new(0));
/// for _ in 0..100 {
///     let counter = counter.clone();
///     pool.submit(move || {
///         counter.fetch_add(1, Ordering::Relaxed);
///     })
///     .unwrap();
/// }
///
/// pool.stop();
/// assert_eq!(counter.load(Ordering::Relaxed), 100);
/// assert_eq!(pool.live_workers(), 0);
/// ```
///
/// With the default [`ShutdownPolicy::Discard`] instead, tasks that are still
/// queued when `stop()` begins never run.
pub struct ThreadPool {
    /// State shared with the worker threads.
    shared: Arc<Shared>,
    /// Policy to pin worker threads to CPUs.
    cpu_pinning: CpuPinningPolicy,
    /// Number of worker threads spawned by `init()`.
    num_threads: AtomicUsize,
    /// Handles to all the worker threads in the pool.
    workers: Mutex<Vec<WorkerThreadHandle>>,
    /// Ensures that the shutdown sequence runs once.
    shutdown: Shutdown,
}

/// Handle to a worker thread in a thread pool.
struct WorkerThreadHandle {
    /// Thread index.
    id: usize,
    /// Thread handle object.
    handle: JoinHandle<()>,
}

/// Context shared between the pool owner, the producers and the worker
/// threads.
struct Shared {
    /// Pending tasks.
    queue: BoundedQueue<QueuedTask>,
    /// Lifecycle state of the pool.
    state: StateCell,
    /// Number of worker threads that haven't exited yet.
    live_workers: CachePadded<AtomicUsize>,
    /// Identifier of the next submitted task.
    next_task_id: CachePadded<AtomicU64>,
    /// Task counters.
    counters: Counters,
    /// How panicking tasks are handled.
    fault_policy: FaultPolicy,
    /// Callback notified of isolated task panics.
    fault_handler: Option<FaultHandler>,
}

/// A task together with its submission number.
struct QueuedTask {
    id: u64,
    task: Task,
}

#[derive(Default)]
struct Counters {
    submitted: CachePadded<AtomicU64>,
    rejected: CachePadded<AtomicU64>,
    completed: CachePadded<AtomicU64>,
    panicked: CachePadded<AtomicU64>,
    discarded: CachePadded<AtomicU64>,
}

impl Counters {
    fn snapshot(&self) -> PoolStats {
        PoolStats {
            submitted: self.submitted.load(Ordering::SeqCst),
            rejected: self.rejected.load(Ordering::SeqCst),
            completed: self.completed.load(Ordering::SeqCst),
            panicked: self.panicked.load(Ordering::SeqCst),
            discarded: self.discarded.load(Ordering::SeqCst),
        }
    }
}

impl ThreadPool {
    /// Creates a new thread pool in the [`PoolState::Created`] state.
    fn new(builder: &ThreadPoolBuilder) -> Self {
        Self {
            shared: Arc::new(Shared {
                queue: BoundedQueue::new(builder.queue_capacity, builder.shutdown_policy),
                state: StateCell::new(),
                live_workers: CachePadded::new(AtomicUsize::new(0)),
                next_task_id: CachePadded::new(AtomicU64::new(0)),
                counters: Counters::default(),
                fault_policy: builder.fault_policy,
                fault_handler: builder.fault_handler.clone(),
            }),
            cpu_pinning: builder.cpu_pinning,
            num_threads: AtomicUsize::new(0),
            workers: Mutex::new(Vec::new()),
            shutdown: Shutdown::new(),
        }
    }

    /// Spawns `num_threads` worker threads and moves the pool to the
    /// [`PoolState::Running`] state.
    ///
    /// Fails without spawning anything if `num_threads` isn't in
    /// `1..=MAX_THREADS`, or if the pool isn't in the [`PoolState::Created`]
    /// state. If the operating system fails to spawn a thread, the pool is
    /// stopped before returning the error.
    pub fn init(&self, num_threads: usize) -> Result<(), InitError> {
        if !(1..=MAX_THREADS).contains(&num_threads) {
            return Err(ConfigError::ThreadCount {
                requested: num_threads,
                max: MAX_THREADS,
            }
            .into());
        }

        #[cfg(any(
            miri,
            not(any(
                target_os = "android",
                target_os = "dragonfly",
                target_os = "freebsd",
                target_os = "linux"
            ))
        ))]
        match self.cpu_pinning {
            CpuPinningPolicy::No => (),
            CpuPinningPolicy::IfSupported => {
                log_warn!("Pinning threads to CPUs is not implemented on this platform.")
            }
            CpuPinningPolicy::Always => {
                panic!("Pinning threads to CPUs is not implemented on this platform.")
            }
        }

        let mut workers = self.workers.lock().unwrap_or_else(PoisonError::into_inner);
        match self
            .shared
            .state
            .transition(PoolState::Created, PoolState::Running)
        {
            Ok(()) => (),
            Err(PoolState::Running) => return Err(InitError::AlreadyInitialized),
            Err(_) => return Err(InitError::ShutDown),
        }

        for id in 0..num_threads {
            let context = WorkerContext {
                id,
                shared: self.shared.clone(),
                cpu_pinning: self.cpu_pinning,
                current_task: Cell::new(None),
            };
            self.shared.live_workers.fetch_add(1, Ordering::SeqCst);
            let spawned = std::thread::Builder::new()
                .name(format!("{THREAD_NAME_PREFIX}-{id}"))
                .spawn(move || context.run());
            match spawned {
                Ok(handle) => workers.push(WorkerThreadHandle { id, handle }),
                Err(e) => {
                    self.shared.live_workers.fetch_sub(1, Ordering::SeqCst);
                    log_error!("[main thread] Failed to spawn worker thread #{id}: {e}");
                    self.num_threads.store(workers.len(), Ordering::SeqCst);
                    drop(workers);
                    self.stop();
                    return Err(InitError::Spawn(e));
                }
            }
        }
        self.num_threads.store(num_threads, Ordering::SeqCst);
        log_debug!("[main thread] Spawned {num_threads} worker threads");

        Ok(())
    }

    /// Submits a task to the pool, blocking while the queue is full.
    ///
    /// Once [`stop()`](Self::stop) has begun, the task is dropped without
    /// running and [`SubmitError::ShutDown`] is returned. This includes
    /// producers that were blocked on a full queue when shutdown began.
    pub fn submit(&self, task: impl IntoTask) -> Result<(), SubmitError> {
        let task = task.into_task();
        let id = self.shared.next_task_id.fetch_add(1, Ordering::Relaxed);
        let counters = &self.shared.counters;

        counters.submitted.fetch_add(1, Ordering::SeqCst);
        match self
            .shared
            .queue
            .push(QueuedTask { id, task }, &self.shared.state)
        {
            Ok(()) => {
                log_trace!("Submitted task #{id}");
                Ok(())
            }
            Err(_rejected) => {
                counters.submitted.fetch_sub(1, Ordering::SeqCst);
                counters.rejected.fetch_add(1, Ordering::SeqCst);
                log_debug!("Rejected task #{id}: the thread pool is shutting down");
                Err(SubmitError::ShutDown)
            }
        }
    }

    /// Stops the pool: rejects new tasks, joins all the worker threads and
    /// drops the tasks remaining in the queue.
    ///
    /// The shutdown sequence runs once. Concurrent and subsequent calls block
    /// until it has completed, and then return. When called from within a
    /// task, the calling worker thread isn't joined, and if shutdown is
    /// already in progress the call returns immediately.
    pub fn stop(&self) {
        if !self.shutdown.begin() {
            if self.is_own_worker_thread() {
                log_debug!("Stop requested from a task during shutdown, not waiting");
                return;
            }
            self.shutdown.wait();
            return;
        }

        // Marks the pool as stopped even if the sequence unwinds.
        let _completion = ShutdownCompletion { pool: self };
        self.shutdown_sequence();
    }

    /// Whether the current thread is one of this pool's workers.
    fn is_own_worker_thread(&self) -> bool {
        WORKER_OF.with(Cell::get) == Arc::as_ptr(&self.shared) as usize
    }

    fn shutdown_sequence(&self) {
        let _previous = self.shared.state.load();
        self.shared.state.store(PoolState::Stopping);
        log_debug!("[main thread] Stopping thread pool (was {_previous:?})");
        self.shared.queue.wake_all();

        let workers = std::mem::take(
            &mut *self.workers.lock().unwrap_or_else(PoisonError::into_inner),
        );
        let current = std::thread::current().id();
        log_debug!("[main thread] Joining threads in the pool...");
        for WorkerThreadHandle { id: _id, handle } in workers {
            if handle.thread().id() == current {
                log_warn!("[thread {_id}] Stop requested from a task, not joining this thread");
                continue;
            }
            match handle.join() {
                Ok(()) => log_debug!("[main thread] Thread {_id} joined"),
                Err(_) => log_error!("[main thread] Thread {_id} terminated with a panic"),
            }
        }
        log_debug!("[main thread] Joined threads.");

        let discarded = self.shared.queue.drain();
        let count = discarded.len();
        self.shared
            .counters
            .discarded
            .fetch_add(count as u64, Ordering::SeqCst);
        for QueuedTask { id: _id, task } in discarded {
            // Dropping a task drops its captures, which may panic.
            if panic::catch_unwind(AssertUnwindSafe(|| drop(task))).is_err() {
                log_error!("[main thread] Task #{_id} panicked while being discarded");
            }
        }
        if count != 0 {
            log_debug!("[main thread] Discarded {count} queued task(s)");
        }
    }

    /// Returns the current lifecycle state of the pool.
    pub fn state(&self) -> PoolState {
        self.shared.state.load()
    }

    /// Returns the number of worker threads that have been spawned in this
    /// thread pool, or zero before [`init()`](Self::init).
    pub fn num_threads(&self) -> usize {
        self.num_threads.load(Ordering::SeqCst)
    }

    /// Returns the number of worker threads that haven't exited yet.
    pub fn live_workers(&self) -> usize {
        self.shared.live_workers.load(Ordering::SeqCst)
    }

    /// Returns the number of tasks currently waiting in the queue.
    pub fn queued_tasks(&self) -> usize {
        self.shared.queue.len()
    }

    /// Returns the maximum number of tasks waiting in the queue.
    pub fn queue_capacity(&self) -> usize {
        self.shared.queue.capacity()
    }

    /// Returns a snapshot of the task counters.
    pub fn stats(&self) -> PoolStats {
        self.shared.counters.snapshot()
    }
}

impl Drop for ThreadPool {
    /// Stops the pool, joining all the threads.
    fn drop(&mut self) {
        self.stop();
    }
}

/// Elects the thread running the shutdown sequence, and lets other callers of
/// [`ThreadPool::stop()`] wait for its completion.
struct Shutdown {
    /// Whether a caller has started the sequence.
    started: AtomicBool,
    /// Whether the sequence has completed.
    done: Mutex<bool>,
    /// Signaled when the sequence completes.
    completed: Condvar,
}

impl Shutdown {
    fn new() -> Self {
        Self {
            started: AtomicBool::new(false),
            done: Mutex::new(false),
            completed: Condvar::new(),
        }
    }

    /// Returns true for the first caller only, which must run the sequence.
    fn begin(&self) -> bool {
        !self.started.swap(true, Ordering::SeqCst)
    }

    /// Blocks until [`complete()`](Self::complete) is called.
    fn wait(&self) {
        let done = self.done.lock().unwrap_or_else(PoisonError::into_inner);
        let _done = self
            .completed
            .wait_while(done, |done| !*done)
            .unwrap_or_else(PoisonError::into_inner);
    }

    fn complete(&self) {
        *self.done.lock().unwrap_or_else(PoisonError::into_inner) = true;
        self.completed.notify_all();
    }
}

/// Object whose destructor moves the pool to [`PoolState::Stopped`] and
/// releases the waiting callers of [`ThreadPool::stop()`].
struct ShutdownCompletion<'a> {
    pool: &'a ThreadPool,
}

impl Drop for ShutdownCompletion<'_> {
    fn drop(&mut self) {
        self.pool.shared.state.store(PoolState::Stopped);
        self.pool.shutdown.complete();
        log_debug!("[main thread] Thread pool stopped");
    }
}

/// Context object owned by a worker thread.
struct WorkerContext {
    /// Thread index.
    id: usize,
    /// State shared with the pool.
    shared: Arc<Shared>,
    /// Policy to pin this thread to a CPU.
    cpu_pinning: CpuPinningPolicy,
    /// Task being run under [`FaultPolicy::Propagate`].
    current_task: Cell<Option<u64>>,
}

impl WorkerContext {
    /// Main function run by this thread.
    fn run(self) {
        // Notifies the pool when this thread exits, including by unwinding.
        let _notifier = ExitNotifier { context: &self };
        WORKER_OF.with(|worker_of| worker_of.set(Arc::as_ptr(&self.shared) as usize));

        self.pin_to_cpu();
        log_debug!("[thread {}] Started", self.id);

        loop {
            match self.shared.queue.pop(&self.shared.state) {
                Dequeued::Item(task) => self.execute(task),
                Dequeued::Finished => break,
            }
        }

        log_debug!("[thread {}] Received finish signal", self.id);
    }

    /// Runs a single task, according to the pool's [`FaultPolicy`].
    fn execute(&self, QueuedTask { id, task }: QueuedTask) {
        log_trace!("[thread {}] Running task #{id}", self.id);
        let counters = &self.shared.counters;

        match self.shared.fault_policy {
            FaultPolicy::Isolate => match panic::catch_unwind(AssertUnwindSafe(|| task.run())) {
                Ok(()) => {
                    counters.completed.fetch_add(1, Ordering::SeqCst);
                }
                Err(payload) => {
                    counters.panicked.fetch_add(1, Ordering::SeqCst);
                    let fault = TaskFault {
                        task_id: id,
                        worker_id: self.id,
                        message: panic_message(payload.as_ref()),
                    };
                    log_error!(
                        "[thread {}] Task #{id} panicked: {}",
                        self.id,
                        fault.message
                    );
                    self.report(&fault);
                }
            },
            FaultPolicy::Propagate => {
                self.current_task.set(Some(id));
                task.run();
                self.current_task.set(None);
                counters.completed.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    /// Forwards a fault to the handler, if any. A panicking handler doesn't
    /// take the worker thread down.
    fn report(&self, fault: &TaskFault) {
        if let Some(handler) = &self.shared.fault_handler {
            if panic::catch_unwind(AssertUnwindSafe(|| handler(fault))).is_err() {
                log_error!("[thread {}] The fault handler panicked", self.id);
            }
        }
    }

    #[cfg(all(
        not(miri),
        any(
            target_os = "android",
            target_os = "dragonfly",
            target_os = "freebsd",
            target_os = "linux"
        )
    ))]
    fn pin_to_cpu(&self) {
        let id = self.id;
        match self.cpu_pinning {
            CpuPinningPolicy::No => (),
            CpuPinningPolicy::IfSupported => {
                let mut cpu_set = CpuSet::new();
                if let Err(_e) = cpu_set.set(id) {
                    log_warn!("Failed to set CPU affinity for thread #{id}: {_e}");
                } else if let Err(_e) = sched_setaffinity(Pid::from_raw(0), &cpu_set) {
                    log_warn!("Failed to set CPU affinity for thread #{id}: {_e}");
                } else {
                    log_debug!("Pinned thread #{id} to CPU #{id}");
                }
            }
            CpuPinningPolicy::Always => {
                let mut cpu_set = CpuSet::new();
                if let Err(e) = cpu_set.set(id) {
                    panic!("Failed to set CPU affinity for thread #{id}: {e}");
                } else if let Err(e) = sched_setaffinity(Pid::from_raw(0), &cpu_set) {
                    panic!("Failed to set CPU affinity for thread #{id}: {e}");
                } else {
                    log_debug!("Pinned thread #{id} to CPU #{id}");
                }
            }
        }
    }

    #[cfg(any(
        miri,
        not(any(
            target_os = "android",
            target_os = "dragonfly",
            target_os = "freebsd",
            target_os = "linux"
        ))
    ))]
    fn pin_to_cpu(&self) {}
}

/// Object whose destructor records that a worker thread has exited (or has
/// panicked).
struct ExitNotifier<'a> {
    context: &'a WorkerContext,
}

impl Drop for ExitNotifier<'_> {
    fn drop(&mut self) {
        let context = self.context;

        if std::thread::panicking() {
            match context.current_task.get() {
                Some(_task_id) => {
                    log_error!(
                        "[thread {}] Task #{_task_id} panicked, terminating this thread",
                        context.id
                    );
                    context
                        .shared
                        .counters
                        .panicked
                        .fetch_add(1, Ordering::SeqCst);
                }
                None => log_error!("[thread {}] Detected panic in this thread", context.id),
            }
        }

        let _remaining = context.shared.live_workers.fetch_sub(1, Ordering::SeqCst) - 1;
        log_debug!(
            "[thread {}] Exited, {_remaining} worker thread(s) remaining",
            context.id
        );
    }
}
