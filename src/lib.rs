/*!
 * Synchronization Primitive Toolkit
 *
 * Hand-built blocking primitives - counting and slim semaphores, spin
 * locks, a Hoare-style monitor, and a reader-writer lock with a runtime
 * switchable fairness policy - plus a harness that times each one under
 * identical worker contention.
 */

pub mod harness;
pub mod limits;
pub mod sync;

// Re-exports
pub use harness::{run_phase, PhaseConfig, PhaseError, PhaseReport};
pub use sync::{
    CountingSemaphore, Monitor, PolicyRwLock, RwPolicy, SlimSemaphore, SpinLock, SpinWaitLock,
};
