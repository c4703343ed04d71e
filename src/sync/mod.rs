/*!
 * Synchronization Primitives
 *
 * Hand-built blocking primitives layered on two substrates:
 * - parking_lot Mutex/Condvar pairs for the lock-and-signal primitives
 * - parking_lot_core thread parking for the futex-style primitives
 *
 * # Architecture
 *
 * Every primitive owns its own state; nothing is shared between instances.
 * The only suspension points are semaphore acquire, monitor wait, and the
 * blocking arms of the reader-writer lock. Spinlocks busy-wait instead.
 *
 * None of the primitives guarantee FIFO order among waiters, only progress:
 * once a guarded condition becomes and stays true, some waiter proceeds.
 */

mod monitor;
mod rwlock;
mod semaphore;
mod slim;
mod spin;

// Re-export public API
pub use monitor::Monitor;
pub use rwlock::{PolicyRwLock, RwPolicy, RwReadGuard, RwWriteGuard};
pub use semaphore::CountingSemaphore;
pub use slim::SlimSemaphore;
pub use spin::{SpinLock, SpinLockGuard, SpinWaitLock, SpinWaitLockGuard};
