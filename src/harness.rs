/*!
 * Contention Harness
 *
 * Spawns a fixed count of workers bound to one primitive instance, runs a
 * caller-supplied unit of protected work on each, joins them all, and
 * reports wall-clock duration for the phase.
 *
 * Phases are re-runnable back-to-back with the same config and payload
 * shape, so different primitives produce comparable timings. The harness
 * never inspects the payload; whichever primitive guards the work is
 * captured inside the closure.
 */

use crate::limits::{DEFAULT_ITERATIONS, DEFAULT_WORKERS};
use log::{debug, info};
use std::fmt;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Worker-count and iteration shape of one phase
#[derive(Debug, Clone, Copy)]
pub struct PhaseConfig {
    /// Concurrent workers to spawn
    pub workers: usize,
    /// Protected operations each worker performs
    pub iterations: usize,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl PhaseConfig {
    pub const fn new(workers: usize, iterations: usize) -> Self {
        Self { workers, iterations }
    }

    /// Shape for throughput comparisons: enough iterations that phase
    /// duration dominates spawn/join overhead
    pub const fn throughput(workers: usize) -> Self {
        Self {
            workers,
            iterations: 1_000,
        }
    }
}

/// Phase errors
#[derive(Error, Debug)]
pub enum PhaseError {
    #[error("worker {index} panicked during phase")]
    WorkerPanicked { index: usize },
}

/// Outcome of one timed phase
#[derive(Debug, Clone)]
pub struct PhaseReport {
    pub name: String,
    pub workers: usize,
    pub iterations: usize,
    pub elapsed: Duration,
}

impl fmt::Display for PhaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time taken by {} workers: {:?} ({} x {})",
            self.name, self.elapsed, self.workers, self.iterations
        )
    }
}

/// Run one phase: spawn workers, run the payload, join, time the whole.
///
/// `work` receives the worker index and is called `config.iterations`
/// times per worker. The clock starts immediately before the first spawn
/// and stops immediately after the last join. A panicking worker fails
/// the phase after all workers have been joined.
pub fn run_phase<F>(name: &str, config: &PhaseConfig, work: F) -> Result<PhaseReport, PhaseError>
where
    F: Fn(usize) + Sync,
{
    debug!(
        "phase {}: spawning {} workers x {} iterations",
        name, config.workers, config.iterations
    );

    let start = Instant::now();
    let panicked = thread::scope(|scope| {
        let handles: Vec<_> = (0..config.workers)
            .map(|index| {
                let work = &work;
                let iterations = config.iterations;
                scope.spawn(move || {
                    for _ in 0..iterations {
                        work(index);
                    }
                })
            })
            .collect();

        // Join every worker before reporting, so a second panic cannot
        // escape the scope
        let results: Vec<_> = handles.into_iter().map(|handle| handle.join()).collect();
        results.into_iter().position(|result| result.is_err())
    });
    let elapsed = start.elapsed();

    if let Some(index) = panicked {
        return Err(PhaseError::WorkerPanicked { index });
    }

    let report = PhaseReport {
        name: name.to_string(),
        workers: config.workers,
        iterations: config.iterations,
        elapsed,
    };
    info!("{report}");
    Ok(report)
}
