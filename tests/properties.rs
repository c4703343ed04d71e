/*!
 * Permit Conservation Properties
 *
 * Property tests over worker/permit/iteration shapes: paired
 * acquire/release sequences must conserve the permit count, and the
 * number of simultaneous holders must never exceed the permit count.
 */

use proptest::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use synckit::{CountingSemaphore, SlimSemaphore};

/// Run paired acquire/release cycles across workers; returns true if the
/// holder count ever exceeded the permit count
fn hammer<A, R>(permits: usize, workers: usize, iterations: usize, acquire: A, release: R) -> bool
where
    A: Fn() + Send + Sync,
    R: Fn() + Send + Sync,
{
    let active = Arc::new(AtomicUsize::new(0));
    let violated = Arc::new(AtomicBool::new(false));

    thread::scope(|scope| {
        for _ in 0..workers {
            let acquire = &acquire;
            let release = &release;
            let active = active.clone();
            let violated = violated.clone();
            scope.spawn(move || {
                for _ in 0..iterations {
                    acquire();
                    if active.fetch_add(1, Ordering::SeqCst) + 1 > permits {
                        violated.store(true, Ordering::SeqCst);
                    }
                    active.fetch_sub(1, Ordering::SeqCst);
                    release();
                }
            });
        }
    });

    violated.load(Ordering::SeqCst)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn counting_semaphore_conserves_permits(
        permits in 1usize..4,
        workers in 1usize..6,
        iterations in 1usize..25,
    ) {
        let sem = CountingSemaphore::new(permits);
        let violated = hammer(
            permits,
            workers,
            iterations,
            || sem.acquire(),
            || sem.release(),
        );

        prop_assert!(!violated, "more holders than permits");
        prop_assert_eq!(sem.permits(), permits);
    }

    #[test]
    fn slim_semaphore_conserves_permits(
        permits in 1usize..4,
        workers in 1usize..6,
        iterations in 1usize..25,
    ) {
        let sem = SlimSemaphore::new(permits);
        let violated = hammer(
            permits,
            workers,
            iterations,
            || sem.acquire(),
            || sem.release(),
        );

        prop_assert!(!violated, "more holders than permits");
        prop_assert_eq!(sem.permits(), permits);
    }
}
