use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::signal::Signal;

/// A unit of submitted work.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// A thread-safe FIFO of pending jobs.
///
/// Pushes and pulls are serialized by one lock held only for the duration
/// of the call. The queue length is mirrored into an atomic so callers can
/// read it without touching the queue lock — the pool's idle-barrier check
/// runs under the pool lock, and the two locks are never held together.
pub struct JobQueue {
    jobs: Mutex<VecDeque<Job>>,
    len: AtomicUsize,
    has_jobs: Signal,
}

impl JobQueue {
    pub fn new() -> Self {
        JobQueue {
            jobs: Mutex::new(VecDeque::new()),
            len: AtomicUsize::new(0),
            has_jobs: Signal::new(false),
        }
    }

    /// Appends a job at the tail and wakes one idle worker.
    pub fn push(&self, job: Job) {
        let mut jobs = self.jobs.lock().unwrap();
        jobs.push_back(job);
        self.len.store(jobs.len(), Ordering::Release);
        drop(jobs);

        self.has_jobs.post();
    }

    /// Removes and returns the job at the head, if any.
    ///
    /// If jobs remain after the pull, the wake signal is re-raised: posts
    /// are not additive, so without the re-arm a second idle worker would
    /// sleep through work that is already queued.
    pub fn pull(&self) -> Option<Job> {
        let mut jobs = self.jobs.lock().unwrap();
        let job = jobs.pop_front();
        let remaining = jobs.len();
        self.len.store(remaining, Ordering::Release);
        drop(jobs);

        if remaining > 0 {
            self.has_jobs.post();
        }
        job
    }

    /// Number of queued, unclaimed jobs. Lock-free read.
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discards every queued job, returning how many were abandoned.
    pub fn drain(&self) -> usize {
        let mut jobs = self.jobs.lock().unwrap();
        let abandoned = jobs.len();
        jobs.clear();
        self.len.store(0, Ordering::Release);
        abandoned
    }

    /// Blocks until the wake signal is raised, consuming it.
    pub fn wait_for_job(&self) {
        self.has_jobs.wait();
    }

    /// Raises the wake signal for every waiting worker (shutdown path).
    pub fn wake_all(&self) {
        self.has_jobs.post_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn jobs_come_out_in_push_order() {
        let queue = JobQueue::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..5 {
            let order = order.clone();
            queue.push(Box::new(move || order.lock().unwrap().push(i)));
        }
        assert_eq!(queue.len(), 5);

        while let Some(job) = queue.pull() {
            job();
        }
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
        assert!(queue.is_empty());
    }

    #[test]
    fn pull_on_empty_queue_returns_none() {
        let queue = JobQueue::new();
        assert!(queue.pull().is_none());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn push_arms_the_wake_signal() {
        let queue = JobQueue::new();
        queue.push(Box::new(|| {}));
        // Must not block: the push posted the signal.
        queue.wait_for_job();
    }

    #[test]
    fn pull_rearms_signal_while_jobs_remain() {
        let queue = JobQueue::new();
        queue.push(Box::new(|| {}));
        queue.push(Box::new(|| {}));

        queue.wait_for_job();
        assert!(queue.pull().is_some());
        // One job left: the pull must have re-posted, so this cannot block.
        queue.wait_for_job();
        assert!(queue.pull().is_some());
    }

    #[test]
    fn drain_reports_abandoned_jobs_and_runs_none() {
        let queue = JobQueue::new();
        let ran = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let ran = ran.clone();
            queue.push(Box::new(move || {
                ran.fetch_add(1, Ordering::SeqCst);
            }));
        }

        assert_eq!(queue.drain(), 3);
        assert_eq!(queue.len(), 0);
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }
}
