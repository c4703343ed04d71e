/*!
 * Spin Locks
 *
 * Busy-wait mutual exclusion on an atomic test-and-set flag.
 *
 * Two variants with identical ownership semantics:
 * - `SpinLock` retries immediately with only a hardware spin hint
 * - `SpinWaitLock` yields the processor between retries
 *
 * Acquire/release memory ordering on the flag makes critical-section
 * writes by the previous owner visible to the next. Busy-waiting is
 * unbounded; starvation under heavy contention is an accepted tradeoff
 * of the design, not a bug.
 */

use std::sync::atomic::{AtomicBool, Ordering};

/// Busy-wait spinlock: retries the test-and-set in a tight loop.
///
/// The calling thread stays runnable (consuming CPU) for the entire wait.
pub struct SpinLock {
    locked: AtomicBool,
}

impl SpinLock {
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    /// Spin until exclusive ownership is obtained
    pub fn lock(&self) -> SpinLockGuard<'_> {
        while self.locked.swap(true, Ordering::Acquire) {
            std::hint::spin_loop();
        }
        SpinLockGuard { flag: &self.locked }
    }

    /// Single test-and-set attempt
    pub fn try_lock(&self) -> Option<SpinLockGuard<'_>> {
        if self.locked.swap(true, Ordering::Acquire) {
            None
        } else {
            Some(SpinLockGuard { flag: &self.locked })
        }
    }

    /// Whether the flag is currently set (diagnostic; racy by nature)
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

impl Default for SpinLock {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases the flag on drop
pub struct SpinLockGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SpinLockGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Spinlock that yields to the scheduler between failed attempts.
///
/// Trades a little wake latency for far less wasted CPU when the holder
/// is descheduled.
pub struct SpinWaitLock {
    locked: AtomicBool,
}

impl SpinWaitLock {
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    /// Spin until exclusive ownership is obtained, yielding between retries
    pub fn lock(&self) -> SpinWaitLockGuard<'_> {
        while self.locked.swap(true, Ordering::Acquire) {
            std::thread::yield_now();
        }
        SpinWaitLockGuard { flag: &self.locked }
    }

    /// Single test-and-set attempt
    pub fn try_lock(&self) -> Option<SpinWaitLockGuard<'_>> {
        if self.locked.swap(true, Ordering::Acquire) {
            None
        } else {
            Some(SpinWaitLockGuard { flag: &self.locked })
        }
    }

    /// Whether the flag is currently set (diagnostic; racy by nature)
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

impl Default for SpinWaitLock {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases the flag on drop
pub struct SpinWaitLockGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SpinWaitLockGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_lock_unlock() {
        let lock = SpinLock::new();
        assert!(!lock.is_locked());

        let guard = lock.lock();
        assert!(lock.is_locked());
        assert!(lock.try_lock().is_none());

        drop(guard);
        assert!(!lock.is_locked());
        assert!(lock.try_lock().is_some());
    }

    #[test]
    fn test_concurrent_increments() {
        let lock = Arc::new(SpinLock::new());
        let counter = Arc::new(std::cell::UnsafeCell::new(0u64));

        // UnsafeCell shared across threads; the lock is the only protection
        struct Shared(Arc<std::cell::UnsafeCell<u64>>);
        unsafe impl Send for Shared {}

        let mut handles = vec![];
        for _ in 0..4 {
            let lock = lock.clone();
            let shared = Shared(counter.clone());
            handles.push(thread::spawn(move || {
                // Capture the whole `Shared` wrapper (whose `Send` is asserted
                // above), not just its inner field under 2021 disjoint capture
                let shared = shared;
                for _ in 0..1000 {
                    let _guard = lock.lock();
                    unsafe { *shared.0.get() += 1 };
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(unsafe { *counter.get() }, 4_000);
    }

    #[test]
    fn test_spinwait_lock_unlock() {
        let lock = SpinWaitLock::new();

        let guard = lock.lock();
        assert!(lock.try_lock().is_none());
        drop(guard);

        let guard = lock.try_lock();
        assert!(guard.is_some());
    }
}
