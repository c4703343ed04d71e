/*!
 * Monitor
 *
 * Hoare/Java-style monitor: one entry lock plus one condition signal,
 * built from primitives that do not natively bundle a lock with its
 * wait-set.
 *
 * # Design
 *
 * The entry lock is an atomic flag whose contended path parks on the
 * flag's address; `exit` clears the flag and unparks one entry-waiter.
 * The wait-set is a second park address paired with a signal epoch:
 * `wait` records the epoch while still holding the lock, releases the
 * lock, and parks only if the epoch is unchanged - the check runs under
 * the parking queue lock, so a signal landing between the release and
 * the park is seen there and consumed instead of lost. `signal` bumps
 * the epoch and unparks at most one waiter.
 *
 * Misuse (wait without holding the lock, exit without a matching enter)
 * is a caller programming error. It is not detected, but the worst it
 * can do is clear a flag or miss a wake - monitor state is never
 * corrupted.
 */

use parking_lot_core::{park, unpark_one, ParkToken, UnparkToken};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Monitor with enter/exit/wait/signal semantics.
///
/// `wait` may only be called while holding the lock; it atomically
/// releases the lock, blocks until another thread calls `signal`, then
/// reacquires the lock before returning. `signal` wakes at most one
/// waiter, with no guarantee which one.
pub struct Monitor {
    /// Entry lock flag; contended enters park on this field's address
    locked: AtomicBool,
    /// Signal epoch; waiters park on this field's address
    epoch: AtomicUsize,
    /// Blocked-in-wait count (diagnostic)
    waiters: AtomicUsize,
}

impl Monitor {
    pub fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
            epoch: AtomicUsize::new(0),
            waiters: AtomicUsize::new(0),
        }
    }

    /// Block until the caller holds the monitor's lock
    pub fn enter(&self) {
        while self.locked.swap(true, Ordering::Acquire) {
            // Park until the holder exits; re-check the flag if the queue
            // finds it already clear
            unsafe {
                park(
                    self.lock_addr(),
                    || self.locked.load(Ordering::Relaxed),
                    || {},
                    |_, _| {},
                    ParkToken(0),
                    None,
                );
            }
        }
    }

    /// Release the monitor's lock and wake one blocked enterer
    pub fn exit(&self) {
        self.locked.store(false, Ordering::Release);
        unsafe {
            unpark_one(self.lock_addr(), |_| UnparkToken(0));
        }
    }

    /// Release the lock, block until signalled, reacquire the lock.
    ///
    /// Caller must hold the lock. A signal issued at any point after this
    /// call begins is never lost.
    pub fn wait(&self) {
        self.waiters.fetch_add(1, Ordering::Relaxed);
        let observed = self.epoch.load(Ordering::Acquire);

        self.exit();
        unsafe {
            park(
                self.wait_addr(),
                || self.epoch.load(Ordering::Relaxed) == observed,
                || {},
                |_, _| {},
                ParkToken(0),
                None,
            );
        }
        self.waiters.fetch_sub(1, Ordering::Relaxed);

        self.enter();
    }

    /// Wake at most one waiter blocked in `wait`
    pub fn signal(&self) {
        self.epoch.fetch_add(1, Ordering::Release);
        unsafe {
            unpark_one(self.wait_addr(), |_| UnparkToken(0));
        }
    }

    /// Approximate count of threads blocked in `wait` (diagnostic)
    pub fn waiter_count(&self) -> usize {
        self.waiters.load(Ordering::Relaxed)
    }

    /// Stable park address for the entry lock
    #[inline]
    fn lock_addr(&self) -> usize {
        &self.locked as *const AtomicBool as usize
    }

    /// Stable park address for the wait-set
    #[inline]
    fn wait_addr(&self) -> usize {
        &self.epoch as *const AtomicUsize as usize
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}
