use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};

use log::{debug, warn};

use crate::queue::JobQueue;
use crate::worker::Worker;
use crate::{PoolError, Result};

/// Pool counters, guarded by the pool lock.
///
/// Invariant: `0 <= working <= alive <= requested thread count`.
pub(crate) struct Counters {
    /// Workers that have registered and not yet terminated.
    pub(crate) alive: usize,
    /// Workers currently between claiming a job and finishing it.
    pub(crate) working: usize,
}

/// State shared between the pool handle and its workers.
///
/// The queue lock and the pool (counter) lock protect disjoint data and
/// are never held together: the queue exposes its length through an atomic
/// precisely so the idle-barrier check can read it under the pool lock.
pub(crate) struct PoolShared {
    pub(crate) queue: JobQueue,
    pub(crate) keep_alive: AtomicBool,
    pub(crate) counters: Mutex<Counters>,
    /// Signalled when `working` drops to zero.
    pub(crate) idle_cond: Condvar,
    /// Signalled on every change to `alive` (startup and shutdown barriers).
    pub(crate) alive_cond: Condvar,
}

/// A fixed-size worker thread pool with a shared FIFO job queue.
///
/// Workers are spawned once at construction and live until [`shutdown`].
/// Jobs are executed in queue order; there is no work-stealing, no
/// priority, and no result channel — a job is a fire-and-forget closure.
///
/// [`shutdown`]: ThreadPool::shutdown
pub struct ThreadPool {
    shared: Arc<PoolShared>,
    workers: Mutex<Vec<Worker>>,
    requested: u32,
}

impl ThreadPool {
    /// Creates a pool with `threads` workers and blocks until every one of
    /// them has registered itself alive.
    ///
    /// `new(0)` is a valid degenerate pool: construction succeeds, submits
    /// queue jobs, and nothing ever executes them.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::WorkerSpawn`] if the OS refuses to create a
    /// worker thread. Any workers spawned before the failure are torn down
    /// first — a half-initialized pool never escapes.
    pub fn new(threads: u32) -> Result<ThreadPool> {
        let shared = Arc::new(PoolShared {
            queue: JobQueue::new(),
            keep_alive: AtomicBool::new(true),
            counters: Mutex::new(Counters {
                alive: 0,
                working: 0,
            }),
            idle_cond: Condvar::new(),
            alive_cond: Condvar::new(),
        });

        let mut workers = Vec::with_capacity(threads as usize);
        for id in 0..threads {
            match Worker::spawn(id, shared.clone()) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    shared.keep_alive.store(false, Ordering::Release);
                    shared.queue.wake_all();
                    for worker in workers {
                        worker.join();
                    }
                    return Err(e);
                }
            }
        }

        // Startup barrier: do not hand the pool to the caller until every
        // worker has incremented `alive`.
        {
            let mut counters = shared.counters.lock().unwrap();
            while counters.alive < workers.len() {
                counters = shared.alive_cond.wait(counters).unwrap();
            }
        }
        debug!("Pool started with {threads} workers");

        Ok(ThreadPool {
            shared,
            workers: Mutex::new(workers),
            requested: threads,
        })
    }

    /// Submits a job for execution and returns immediately.
    ///
    /// Jobs begin execution in submission order, though jobs submitted
    /// concurrently from different threads may be queued in either
    /// relative order.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::ShutDown`] if the pool has been shut down.
    pub fn submit<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        if !self.shared.keep_alive.load(Ordering::Acquire) {
            return Err(PoolError::ShutDown);
        }
        self.shared.queue.push(Box::new(job));
        Ok(())
    }

    /// Blocks until the queue is empty and no worker is executing a job.
    ///
    /// Both conditions are checked together under the pool lock, in a loop,
    /// so spurious wakes are harmless. On a zero-worker pool this returns
    /// only if the queue is already empty — queued jobs never drain.
    pub fn wait_idle(&self) {
        let mut counters = self.shared.counters.lock().unwrap();
        while counters.working > 0 || !self.shared.queue.is_empty() {
            counters = self.shared.idle_cond.wait(counters).unwrap();
        }
    }

    /// Stops all workers, waits for them to terminate, and discards any
    /// jobs still queued, returning how many were abandoned.
    ///
    /// Workers finish the job they are executing before they observe the
    /// stop request; queued jobs that no worker had claimed are dropped
    /// and counted. Idempotent: only the first call tears down and reports,
    /// later calls return 0. After shutdown, [`submit`] is rejected.
    ///
    /// [`submit`]: ThreadPool::submit
    pub fn shutdown(&self) -> usize {
        if !self.shared.keep_alive.swap(false, Ordering::AcqRel) {
            return 0;
        }
        debug!("Pool shutting down");
        self.shared.queue.wake_all();

        {
            let mut counters = self.shared.counters.lock().unwrap();
            while counters.alive > 0 {
                counters = self.shared.alive_cond.wait(counters).unwrap();
            }
        }

        let workers = mem::take(&mut *self.workers.lock().unwrap());
        for worker in workers {
            worker.join();
        }

        let abandoned = self.shared.queue.drain();
        if abandoned > 0 {
            warn!("Shutdown discarded {abandoned} queued jobs");
        }
        abandoned
    }

    /// Number of workers this pool was created with.
    pub fn worker_count(&self) -> u32 {
        self.requested
    }

    /// Number of workers currently registered alive.
    pub fn alive_workers(&self) -> usize {
        self.shared.counters.lock().unwrap().alive
    }

    /// Number of queued, unclaimed jobs.
    pub fn queued_jobs(&self) -> usize {
        self.shared.queue.len()
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        // Same teardown as an explicit shutdown; no-op if already done.
        self.shutdown();
    }
}
