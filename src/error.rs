use std::io;
use thiserror::Error;

/// Error type for pool operations.
#[derive(Error, Debug)]
pub enum PoolError {
    /// A worker thread could not be spawned.
    ///
    /// Raised during pool construction when the OS refuses to create a
    /// thread (resource exhaustion). The pool tears down any workers it
    /// already started before returning this.
    #[error("failed to spawn worker thread: {0}")]
    WorkerSpawn(#[from] io::Error),

    /// The pool has been shut down and no longer accepts jobs.
    #[error("thread pool is shut down")]
    ShutDown,
}

/// Result type alias for pool operations.
pub type Result<T> = std::result::Result<T, PoolError>;
