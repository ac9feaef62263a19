//! Shared thread pool for running independent benchmark trials.
//!
//! Trials call into host engines whose collision and kinematics code can use
//! deep recursion, so worker threads get larger stacks than rayon's default.

#[cfg(feature = "parallel")]
use rayon::ThreadPool;

#[cfg(feature = "parallel")]
use std::sync::OnceLock;

#[cfg(feature = "parallel")]
static THREAD_POOL: OnceLock<Option<ThreadPool>> = OnceLock::new();

/// Stack size of each worker thread.
pub const WORKER_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Get or initialize the shared thread pool.
///
/// The pool uses one thread per logical CPU with [`WORKER_STACK_SIZE`]
/// stacks. Returns `None` if the pool could not be built, in which case
/// callers fall back to rayon's global pool.
#[cfg(feature = "parallel")]
pub fn get_thread_pool() -> Option<&'static ThreadPool> {
    THREAD_POOL
        .get_or_init(|| {
            rayon::ThreadPoolBuilder::new()
                .stack_size(WORKER_STACK_SIZE)
                .thread_name(|i| format!("motion-bench-{i}"))
                .build()
                .map_err(|e| tracing::warn!(error = %e, "falling back to global rayon pool"))
                .ok()
        })
        .as_ref()
}

/// Execute a parallel operation on the shared pool.
#[cfg(feature = "parallel")]
pub fn install<OP, R>(op: OP) -> R
where
    OP: FnOnce() -> R + Send,
    R: Send,
{
    match get_thread_pool() {
        Some(pool) => pool.install(op),
        None => op(),
    }
}

/// Execute `op` on the current thread.
#[cfg(not(feature = "parallel"))]
pub fn install<OP, R>(op: OP) -> R
where
    OP: FnOnce() -> R,
{
    op()
}
