//! Independent repetitions of a benchmark with distinct seeds.
//!
//! Trial `i` draws its inputs from `RandomSampler::with_seed(base_seed + i)`,
//! so every trial is reproducible on its own and no two trials share a
//! generator. With the `parallel` feature trials run on the shared pool;
//! results always come back in trial order.

use crate::sampling::RandomSampler;
use crate::thread_pool;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Seed used by trial `index`.
pub fn trial_seed(base_seed: u64, index: usize) -> u64 {
    base_seed.wrapping_add(index as u64)
}

/// Run `body` once per trial with that trial's sampler.
///
/// The host engine is not shared between trials by this function; `body`
/// must create or borrow whatever engine state it needs.
#[cfg(feature = "parallel")]
pub fn run_trials<T, F>(trials: usize, base_seed: u64, body: F) -> Vec<T>
where
    F: Fn(usize, RandomSampler) -> T + Sync + Send,
    T: Send,
{
    thread_pool::install(|| {
        (0..trials)
            .into_par_iter()
            .map(|i| body(i, RandomSampler::with_seed(trial_seed(base_seed, i))))
            .collect()
    })
}

/// Run `body` once per trial with that trial's sampler.
#[cfg(not(feature = "parallel"))]
pub fn run_trials<T, F>(trials: usize, base_seed: u64, body: F) -> Vec<T>
where
    F: Fn(usize, RandomSampler) -> T,
{
    thread_pool::install(|| {
        (0..trials)
            .map(|i| body(i, RandomSampler::with_seed(trial_seed(base_seed, i))))
            .collect()
    })
}
