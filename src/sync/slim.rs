/*!
 * Slim Semaphore
 *
 * The counting-semaphore contract rebuilt from a lock and a condition
 * signal alone - no atomics, no thread parking, no kernel semaphore.
 *
 * # Design
 *
 * The defining correctness property is the wait loop: `acquire` re-checks
 * `permits == 0` after every wake. A woken thread may find its permit
 * already stolen by a spinning acquirer, and condvars may wake spuriously;
 * both cases fall through to another wait instead of going negative.
 */

use parking_lot::{Condvar, Mutex};

/// Counting semaphore built from a `Mutex<usize>` + `Condvar` pair.
///
/// Same external contract as [`CountingSemaphore`](super::CountingSemaphore):
/// every `acquire` pairs with exactly one later `release`, waiters are woken
/// in no particular order.
pub struct SlimSemaphore {
    permits: Mutex<usize>,
    available: Condvar,
}

impl SlimSemaphore {
    /// Create a semaphore with the given initial permit count
    pub fn new(permits: usize) -> Self {
        Self {
            permits: Mutex::new(permits),
            available: Condvar::new(),
        }
    }

    /// Block until a permit is available, then take it
    pub fn acquire(&self) {
        let mut permits = self.permits.lock();
        while *permits == 0 {
            // Releases the lock while blocked, reacquires before returning
            self.available.wait(&mut permits);
        }
        *permits -= 1;
    }

    /// Take a permit without blocking; returns false if none are available
    pub fn try_acquire(&self) -> bool {
        let mut permits = self.permits.lock();
        if *permits > 0 {
            *permits -= 1;
            true
        } else {
            false
        }
    }

    /// Return a permit and signal one waiter
    pub fn release(&self) {
        let mut permits = self.permits.lock();
        *permits += 1;
        self.available.notify_one();
    }

    /// Current permit count (diagnostic)
    pub fn permits(&self) -> usize {
        *self.permits.lock()
    }
}
