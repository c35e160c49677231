use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;

use log::{debug, error};

use crate::pool::PoolShared;
use crate::Result;

/// One worker thread bound to a pool.
///
/// Spawned at pool construction, lives for the lifetime of the pool, and
/// exits only when the pool's keep-alive flag is cleared.
pub(crate) struct Worker {
    id: u32,
    handle: thread::JoinHandle<()>,
}

impl Worker {
    pub(crate) fn spawn(id: u32, shared: Arc<PoolShared>) -> Result<Worker> {
        let handle = thread::Builder::new()
            .name(format!("pool-worker-{id}"))
            .spawn(move || run(id, &shared))?;
        Ok(Worker { id, handle })
    }

    pub(crate) fn join(self) {
        if self.handle.join().is_err() {
            error!("Worker {} thread terminated by panic", self.id);
        }
    }
}

/// The worker loop: wait for the wake signal, claim at most one job per
/// wake, execute it, keep the pool counters current.
fn run(id: u32, shared: &PoolShared) {
    {
        let mut counters = shared.counters.lock().unwrap();
        counters.alive += 1;
        shared.alive_cond.notify_all();
    }
    debug!("Worker {id} registered");

    while shared.keep_alive.load(Ordering::Acquire) {
        shared.queue.wait_for_job();

        // The wake may have come from shutdown rather than a push.
        if !shared.keep_alive.load(Ordering::Acquire) {
            break;
        }

        shared.counters.lock().unwrap().working += 1;

        // The signal is a stale hint, not a claim: another worker may have
        // taken the job already, in which case the pull comes back empty.
        if let Some(job) = shared.queue.pull() {
            debug!("Worker {id} executing job");
            // Catch panics so a failing job cannot leak the working count
            if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                error!("Worker {id}: job panicked, continuing");
            }
        }

        let mut counters = shared.counters.lock().unwrap();
        counters.working -= 1;
        if counters.working == 0 {
            shared.idle_cond.notify_all();
        }
    }

    {
        let mut counters = shared.counters.lock().unwrap();
        counters.alive -= 1;
        shared.alive_cond.notify_all();
    }

    // Shutdown wakes are consumed one at a time; pass the wake along so
    // the next sleeping sibling observes the stop request too.
    shared.queue.wake_all();
    debug!("Worker {id} exiting");
}
