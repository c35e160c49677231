use std::sync::{Condvar, Mutex};

/// A binary, sticky wake flag.
///
/// `post` raises the flag and wakes at most one waiter; `wait` blocks until
/// the flag is raised, then lowers it and returns. The flag is a `bool`,
/// not a counter: any number of posts before a wait collapse into a single
/// raised flag, so one `wait` consumes them all. Waiters that need to know
/// how much work exists must re-check their own state after waking rather
/// than counting wakes.
pub struct Signal {
    raised: Mutex<bool>,
    cond: Condvar,
}

impl Signal {
    /// Creates a signal with the given initial state.
    pub fn new(raised: bool) -> Self {
        Signal {
            raised: Mutex::new(raised),
            cond: Condvar::new(),
        }
    }

    /// Raises the flag and wakes at most one waiter.
    pub fn post(&self) {
        let mut raised = self.raised.lock().unwrap();
        *raised = true;
        self.cond.notify_one();
    }

    /// Raises the flag and wakes every waiter.
    ///
    /// Only one of the woken waiters will consume the flag; the rest go
    /// back to sleep unless it is raised again. Used at shutdown, where
    /// each exiting worker re-posts for its siblings.
    pub fn post_all(&self) {
        let mut raised = self.raised.lock().unwrap();
        *raised = true;
        self.cond.notify_all();
    }

    /// Blocks until the flag is raised, then lowers it and returns.
    pub fn wait(&self) {
        let mut raised = self.raised.lock().unwrap();
        while !*raised {
            raised = self.cond.wait(raised).unwrap();
        }
        *raised = false;
    }
}
