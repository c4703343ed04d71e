/*!
 * Contention Demo
 *
 * Runs every primitive phase back-to-back with the same worker count and
 * payload (each worker prints one random printable character per
 * protected operation), then demonstrates the reader-writer lock under
 * both fairness policies on a single live instance.
 */

use std::error::Error;
use std::thread;
use std::time::Instant;

use parking_lot::Mutex;
use rand::Rng;

use synckit::limits::{DEMO_HOLD, DEMO_READERS, DEMO_WRITERS};
use synckit::{
    run_phase, CountingSemaphore, Monitor, PhaseConfig, PolicyRwLock, RwPolicy, SlimSemaphore,
    SpinLock, SpinWaitLock,
};

/// One unit of payload: a random printable ASCII character
fn random_char() -> char {
    rand::thread_rng().gen_range(32u8..=126) as char
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = PhaseConfig::default();

    let mutex = Mutex::new(());
    let report = run_phase("Mutex", &config, |worker| {
        let _guard = mutex.lock();
        println!("Mutex worker {}: {}", worker, random_char());
    })?;
    println!("{report}");

    let sem = CountingSemaphore::new(1);
    let report = run_phase("Semaphore", &config, |worker| {
        sem.acquire();
        println!("Semaphore worker {}: {}", worker, random_char());
        sem.release();
    })?;
    println!("{report}");

    let slim = SlimSemaphore::new(1);
    let report = run_phase("SemaphoreSlim", &config, |worker| {
        slim.acquire();
        println!("SemaphoreSlim worker {}: {}", worker, random_char());
        slim.release();
    })?;
    println!("{report}");

    let spin = SpinLock::new();
    let report = run_phase("SpinLock", &config, |worker| {
        let _guard = spin.lock();
        println!("SpinLock worker {}: {}", worker, random_char());
    })?;
    println!("{report}");

    let spin_wait = SpinWaitLock::new();
    let report = run_phase("SpinWait", &config, |worker| {
        let _guard = spin_wait.lock();
        println!("SpinWait worker {}: {}", worker, random_char());
    })?;
    println!("{report}");

    let monitor = Monitor::new();
    let report = run_phase("Monitor", &config, |worker| {
        monitor.enter();
        println!("Monitor worker {}: {}", worker, random_char());
        monitor.exit();
    })?;
    println!("{report}");

    reader_writer_demo();

    Ok(())
}

/// The 6-writer/2-reader scenario, run twice on one instance: first under
/// writer priority, then again after switching to reader priority.
fn reader_writer_demo() {
    let lock = PolicyRwLock::new(RwPolicy::WriterFirst);

    println!("\nWriter priority:");
    let elapsed = reader_writer_round(&lock);
    println!("Round finished in {elapsed:?}");

    lock.set_policy(RwPolicy::ReaderFirst);

    println!("\nReader priority:");
    let elapsed = reader_writer_round(&lock);
    println!("Round finished in {elapsed:?}");
}

fn reader_writer_round(lock: &PolicyRwLock) -> std::time::Duration {
    let start = Instant::now();
    thread::scope(|scope| {
        for id in 1..=DEMO_WRITERS {
            scope.spawn(move || {
                lock.start_write();
                println!("Writer {id} writing");
                thread::sleep(DEMO_HOLD);
                lock.stop_write();
            });
        }
        for id in 1..=DEMO_READERS {
            scope.spawn(move || {
                lock.start_read();
                println!("Reader {id} reading");
                thread::sleep(DEMO_HOLD);
                lock.stop_read();
            });
        }
    });
    start.elapsed()
}
