/*!
 * Counting Semaphore
 *
 * Classic acquire/release permit counting with a lock-free fast path.
 *
 * # Design
 *
 * The permit count lives in a single atomic. `acquire` first races a CAS
 * loop against other acquirers; only when the count is exhausted does the
 * thread park on the semaphore's address. `release` bumps the count and
 * unparks at most one waiter. The park validate callback runs under the
 * parking queue lock, so a release that lands between a failed CAS and the
 * park is observed there and the thread retries instead of sleeping.
 *
 * No FIFO guarantee: a spinning acquirer may take a permit ahead of a
 * parked one, which then re-checks and parks again.
 */

use parking_lot_core::{park, unpark_one, ParkToken, UnparkToken};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counting semaphore with an optional upper bound on permits.
///
/// Every successful `acquire` must be paired with exactly one later
/// `release`; releasing past the configured maximum is a caller contract
/// violation (checked only in debug builds).
pub struct CountingSemaphore {
    /// Available permits; never observed negative (unsigned, CAS-guarded)
    permits: AtomicUsize,
    /// Configured maximum, if bounded
    max: Option<usize>,
}

impl CountingSemaphore {
    /// Create an unbounded semaphore with the given initial permit count
    pub fn new(permits: usize) -> Self {
        Self {
            permits: AtomicUsize::new(permits),
            max: None,
        }
    }

    /// Create a bounded semaphore; `permits` must not exceed `max`
    pub fn bounded(permits: usize, max: usize) -> Self {
        assert!(permits <= max, "initial permits exceed maximum");
        Self {
            permits: AtomicUsize::new(permits),
            max: Some(max),
        }
    }

    /// Block until a permit is available, then take it
    pub fn acquire(&self) {
        loop {
            if self.try_acquire() {
                return;
            }

            // Park on the semaphore's address. The validate callback runs
            // with the queue lock held: if a release has already restored a
            // permit, don't sleep - loop and race for it instead.
            unsafe {
                park(
                    self.park_addr(),
                    || self.permits.load(Ordering::Relaxed) == 0,
                    || {},
                    |_, _| {},
                    ParkToken(0),
                    None,
                );
            }
        }
    }

    /// Take a permit without blocking; returns false if none are available
    pub fn try_acquire(&self) -> bool {
        let mut current = self.permits.load(Ordering::Relaxed);
        while current > 0 {
            match self.permits.compare_exchange_weak(
                current,
                current - 1,
                Ordering::Acquire,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
        false
    }

    /// Return a permit and wake at most one blocked acquirer
    pub fn release(&self) {
        let prev = self.permits.fetch_add(1, Ordering::Release);
        if let Some(max) = self.max {
            debug_assert!(prev < max, "semaphore released past its maximum");
        }

        unsafe {
            unpark_one(self.park_addr(), |_| UnparkToken(0));
        }
    }

    /// Current permit count (diagnostic; racy by nature)
    pub fn permits(&self) -> usize {
        self.permits.load(Ordering::Relaxed)
    }

    /// Stable parking address for this instance
    #[inline]
    fn park_addr(&self) -> usize {
        &self.permits as *const AtomicUsize as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_uncontended_acquire_release() {
        let sem = CountingSemaphore::new(2);

        sem.acquire();
        assert_eq!(sem.permits(), 1);
        sem.acquire();
        assert_eq!(sem.permits(), 0);
        assert!(!sem.try_acquire());

        sem.release();
        sem.release();
        assert_eq!(sem.permits(), 2);
    }

    #[test]
    fn test_acquire_blocks_until_release() {
        let sem = Arc::new(CountingSemaphore::new(0));
        let entered = Arc::new(AtomicBool::new(false));

        let sem_clone = sem.clone();
        let entered_clone = entered.clone();
        let handle = thread::spawn(move || {
            sem_clone.acquire();
            entered_clone.store(true, Ordering::SeqCst);
        });

        // Give the thread time to park
        thread::sleep(Duration::from_millis(50));
        assert!(!entered.load(Ordering::SeqCst));

        sem.release();
        handle.join().unwrap();
        assert!(entered.load(Ordering::SeqCst));
        assert_eq!(sem.permits(), 0);
    }

    #[test]
    fn test_release_wakes_one_of_many() {
        let sem = Arc::new(CountingSemaphore::new(0));

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let sem_clone = sem.clone();
                thread::spawn(move || {
                    sem_clone.acquire();
                    sem_clone.release();
                })
            })
            .collect();

        // Give threads time to park, then let them drain one at a time
        thread::sleep(Duration::from_millis(50));
        sem.release();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(sem.permits(), 1);
    }

    #[test]
    fn test_bounded_constructor() {
        let sem = CountingSemaphore::bounded(1, 1);
        sem.acquire();
        sem.release();
        assert_eq!(sem.permits(), 1);
    }
}
