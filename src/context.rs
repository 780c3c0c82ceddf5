//! Execution context for index builds
//!
//! Owns the rayon thread pool that every row-parallel operation runs on and a
//! cancellation token that builders poll between layers. Created once by the
//! caller (the binary creates one at startup) and passed to builders
//! explicitly; the library never touches a global pool of its own.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};

/// Shared flag a caller can flip to abandon an in-flight build
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// `Err(Cancelled)` once `cancel` has been called
    pub fn checkpoint(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Thread pool + cancellation token
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pool: Arc<rayon::ThreadPool>,
    cancel: CancellationToken,
}

impl ExecutionContext {
    /// Context with `threads` workers; `0` means one per logical CPU
    pub fn new(threads: usize) -> Result<Self> {
        let threads = if threads == 0 { num_cpus::get() } else { threads };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("boundreach-{i}"))
            .build()
            .map_err(|e| Error::config(format!("failed to start thread pool: {e}")))?;

        Ok(Self {
            pool: Arc::new(pool),
            cancel: CancellationToken::new(),
        })
    }

    /// Single worker; useful for deterministic profiling and small tests
    pub fn sequential() -> Result<Self> {
        Self::new(1)
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Run `op` on this context's pool; nested rayon calls use the same pool
    pub fn install<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    /// Cancellation checkpoint
    pub fn checkpoint(&self) -> Result<()> {
        self.cancel.checkpoint()
    }
}
