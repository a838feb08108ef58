// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Type-erased units of work, and adapters to build them from functions,
//! methods, jobs and closures.

use std::fmt;
use std::sync::Arc;

/// A zero-argument unit of work submitted to a [`ThreadPool`](crate::ThreadPool).
///
/// A task owns everything it touches: arguments are moved into it when it is
/// created, and receivers of methods are shared via [`Arc`]. This means a task
/// can safely outlive the scope that created it.
///
/// ```
/// # use sluice::Task;
/// # use std::sync::atomic::{AtomicU64, Ordering};
/// # use std::sync::Arc;
/// fn add(total: Arc<AtomicU64>, x: u64) {
///     total.fetch_add(x, Ordering::Relaxed);
/// }
///
/// let total = Arc::new(AtomicU64::new(0));
/// let task = Task::bind(add, (total.clone(), 42));
/// # task.run();
/// # assert_eq!(total.load(Ordering::Relaxed), 42);
/// ```
pub struct Task {
    job: Box<dyn FnOnce() + Send + 'static>,
}

impl Task {
    /// Wraps a closure.
    pub fn new(f: impl FnOnce() + Send + 'static) -> Self {
        Self { job: Box::new(f) }
    }

    /// Binds a function to a tuple of arguments, which are moved into the task.
    pub fn bind<F, Args>(f: F, args: Args) -> Self
    where
        F: Callable<Args> + Send + 'static,
        Args: Send + 'static,
    {
        Self::new(move || f.call(args))
    }

    /// Binds a method to a shared receiver and a tuple of arguments.
    ///
    /// The task holds a strong reference to the receiver until it has run (or
    /// has been discarded).
    ///
    /// ```
    /// # use sluice::Task;
    /// # use std::sync::Mutex;
    /// # use std::sync::Arc;
    /// struct Log(Mutex<Vec<String>>);
    ///
    /// impl Log {
    ///     fn record(&self, level: &'static str, msg: String) {
    ///         self.0.lock().unwrap().push(format!("[{level}] {msg}"));
    ///     }
    /// }
    ///
    /// let log = Arc::new(Log(Mutex::new(Vec::new())));
    /// let task = Task::bind_method(log.clone(), Log::record, ("info", "hello".to_owned()));
    /// # task.run();
    /// # assert_eq!(*log.0.lock().unwrap(), ["[info] hello"]);
    /// ```
    pub fn bind_method<R, M, Args>(receiver: Arc<R>, method: M, args: Args) -> Self
    where
        R: Send + Sync + 'static + ?Sized,
        M: Method<R, Args> + Send + 'static,
        Args: Send + 'static,
    {
        Self::new(move || method.call_on(&*receiver, args))
    }

    /// Wraps a [`Job`].
    pub fn from_job(job: impl Job) -> Self {
        Self::new(move || job.run())
    }

    /// Runs the task on the current thread.
    pub fn run(self) {
        (self.job)()
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").finish_non_exhaustive()
    }
}

/// A callable object carrying its own state.
///
/// ```
/// # use sluice::{Job, Task};
/// # use std::sync::mpsc::{channel, Sender};
/// struct Checksum {
///     data: Vec<u8>,
///     output: Sender<u32>,
/// }
///
/// impl Job for Checksum {
///     fn run(self) {
///         let sum = self.data.iter().map(|&b| b as u32).sum();
///         self.output.send(sum).unwrap();
///     }
/// }
///
/// let (tx, rx) = channel();
/// let task = Task::from_job(Checksum { data: vec![1, 2, 3], output: tx });
/// # task.run();
/// # assert_eq!(rx.recv().unwrap(), 6);
/// ```
pub trait Job: Send + 'static {
    /// Consumes the job and performs its work.
    fn run(self);
}

/// Conversion into a [`Task`], accepted by
/// [`ThreadPool::submit()`](crate::ThreadPool::submit).
pub trait IntoTask {
    /// Performs the conversion.
    fn into_task(self) -> Task;
}

impl IntoTask for Task {
    fn into_task(self) -> Task {
        self
    }
}

impl<F> IntoTask for F
where
    F: FnOnce() + Send + 'static,
{
    fn into_task(self) -> Task {
        Task::new(self)
    }
}

/// A function that can be called with a tuple of arguments `Args`.
///
/// Implemented for every [`FnOnce`] taking up to 6 arguments.
pub trait Callable<Args> {
    /// Calls the function, spreading the tuple into its arguments.
    fn call(self, args: Args);
}

/// A method of `R` that can be called with a tuple of arguments `Args`.
///
/// Implemented for every [`FnOnce`] taking `&R` followed by up to 6
/// arguments, which includes `R::method` paths for `&self` methods.
pub trait Method<R: ?Sized, Args> {
    /// Calls the method on the receiver, spreading the tuple into its
    /// arguments.
    fn call_on(self, receiver: &R, args: Args);
}

macro_rules! impl_callable {
    ( $( $arg:ident ),* ) => {
        impl<Func, $( $arg, )*> Callable<( $( $arg, )* )> for Func
        where
            Func: FnOnce( $( $arg ),* ),
        {
            #[allow(non_snake_case)]
            fn call(self, ( $( $arg, )* ): ( $( $arg, )* )) {
                self( $( $arg ),* )
            }
        }

        impl<Func, Recv: ?Sized, $( $arg, )*> Method<Recv, ( $( $arg, )* )> for Func
        where
            Func: FnOnce(&Recv, $( $arg ),* ),
        {
            #[allow(non_snake_case)]
            fn call_on(self, receiver: &Recv, ( $( $arg, )* ): ( $( $arg, )* )) {
                self(receiver, $( $arg ),* )
            }
        }
    };
}

impl_callable!();
impl_callable!(A);
impl_callable!(A, B);
impl_callable!(A, B, C);
impl_callable!(A, B, C, D);
impl_callable!(A, B, C, D, E);
impl_callable!(A, B, C, D, E, G);

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn record(out: Arc<Mutex<Vec<String>>>, a: u32, b: &'static str, c: char) {
        out.lock().unwrap().push(format!("{a}-{b}-{c}"));
    }

    #[test]
    fn test_closure() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();
        Task::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
        .run();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_bind_free_function() {
        let out = Arc::new(Mutex::new(Vec::new()));
        Task::bind(record, (out.clone(), 7u32, "x", 'y')).run();
        assert_eq!(*out.lock().unwrap(), ["7-x-y"]);
    }

    #[test]
    fn test_bind_zero_arguments() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        fn tick() {
            CALLS.fetch_add(1, Ordering::SeqCst);
        }

        Task::bind(tick, ()).run();
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_bind_captures_arguments_by_value() {
        let out = Arc::new(Mutex::new(Vec::new()));
        let mut value: u32 = 1;
        let task = Task::bind(record, (out.clone(), value, "a", 'b'));
        value += 1;
        task.run();
        assert_eq!(value, 2);
        assert_eq!(*out.lock().unwrap(), ["1-a-b"]);
    }

    struct Accumulator {
        total: AtomicUsize,
    }

    impl Accumulator {
        fn add(&self, x: usize, times: usize) {
            self.total.fetch_add(x * times, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_bind_method_shares_receiver() {
        let acc = Arc::new(Accumulator {
            total: AtomicUsize::new(0),
        });
        let task = Task::bind_method(acc.clone(), Accumulator::add, (3usize, 4usize));
        assert_eq!(Arc::strong_count(&acc), 2);
        task.run();
        assert_eq!(Arc::strong_count(&acc), 1);
        assert_eq!(acc.total.load(Ordering::SeqCst), 12);
    }

    #[test]
    fn test_bind_method_outlives_caller_handle() {
        let acc = Arc::new(Accumulator {
            total: AtomicUsize::new(0),
        });
        let weak = Arc::downgrade(&acc);
        let task = Task::bind_method(acc, Accumulator::add, (5usize, 1usize));
        // The task keeps the receiver alive.
        assert!(weak.upgrade().is_some());
        task.run();
        assert!(weak.upgrade().is_none());
    }

    struct Push {
        out: Arc<Mutex<Vec<u32>>>,
        values: Vec<u32>,
    }

    impl Job for Push {
        fn run(self) {
            self.out.lock().unwrap().extend(self.values);
        }
    }

    #[test]
    fn test_job() {
        let out = Arc::new(Mutex::new(Vec::new()));
        Task::from_job(Push {
            out: out.clone(),
            values: vec![1, 2, 3],
        })
        .run();
        assert_eq!(*out.lock().unwrap(), [1, 2, 3]);
    }

    #[test]
    fn test_into_task() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();
        let task = (move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
        .into_task()
        .into_task();
        task.run();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dropped_task_releases_captures() {
        let value = Arc::new(());
        let v = value.clone();
        let task = Task::new(move || drop(v));
        assert_eq!(Arc::strong_count(&value), 2);
        drop(task);
        assert_eq!(Arc::strong_count(&value), 1);
    }
}
