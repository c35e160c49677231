#![deny(missing_docs)]

//! A fixed-size worker thread pool with a shared job queue.
//!
//! A bounded set of long-lived worker threads pull jobs from a single
//! unbounded FIFO queue and execute them to completion. Callers can
//! block until all submitted work has drained, and shut the pool down
//! explicitly; abandoned jobs are counted rather than silently dropped.

mod error;
mod pool;
mod queue;
mod signal;
mod worker;

pub use error::{PoolError, Result};
pub use pool::ThreadPool;
