/*!
 * Policy-Switchable Reader-Writer Lock
 *
 * Reader/writer admission with a fairness policy that can be changed at
 * runtime on a live instance, instead of two separate lock types.
 *
 * # Fairness Characteristics
 *
 * | Policy        | Readers                            | Writers                         |
 * |---------------|------------------------------------|---------------------------------|
 * | `WriterFirst` | admitted only while no writer runs | fenced only against each other  |
 * | `ReaderFirst` | admitted unconditionally           | wait for full idleness          |
 *
 * # Starvation Analysis
 *
 * - `ReaderFirst` can starve writers indefinitely under a continuous
 *   stream of readers.
 * - `WriterFirst` can starve late-arriving readers while writers keep
 *   arriving.
 *
 * Both are accepted consequences of the chosen policy, not defects.
 *
 * Both stop operations wake **all** waiters; each woken thread re-checks
 * its own admission predicate. Waking a single thread instead would have
 * to decide whether a reader or a writer is eligible next, which the
 * state change alone cannot know.
 */

use log::debug;
use parking_lot::{Condvar, Mutex};

/// Admission policy, switchable at runtime via [`PolicyRwLock::set_policy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RwPolicy {
    /// Favor writers: arriving readers are blocked out while a writer runs
    WriterFirst,
    /// Favor readers: readers are admitted even while writers wait
    ReaderFirst,
}

#[derive(Debug)]
struct RwState {
    readers: usize,
    writers: usize,
    policy: RwPolicy,
}

/// Reader-writer lock whose fairness policy is a runtime-mutable field.
///
/// The policy is guarded by the same lock as the counters, so a
/// `set_policy` call can never race with a counter update. A policy
/// change is advisory for future admission decisions only: it never
/// evicts current holders, and a thread already blocked keeps the
/// admission rule it arrived under.
pub struct PolicyRwLock {
    state: Mutex<RwState>,
    cond: Condvar,
}

impl PolicyRwLock {
    pub fn new(policy: RwPolicy) -> Self {
        Self {
            state: Mutex::new(RwState {
                readers: 0,
                writers: 0,
                policy,
            }),
            cond: Condvar::new(),
        }
    }

    /// Block until write admission, then become the active writer
    pub fn start_write(&self) {
        let mut state = self.state.lock();
        match state.policy {
            // Writers only fence each other; arriving readers are kept out
            // by their own entry check
            RwPolicy::WriterFirst => {
                while state.writers != 0 {
                    self.cond.wait(&mut state);
                }
            }
            RwPolicy::ReaderFirst => {
                while state.readers != 0 || state.writers != 0 {
                    self.cond.wait(&mut state);
                }
            }
        }
        state.writers += 1;
    }

    /// End the write; when the last writer leaves, wake all waiters so
    /// both readers and writers re-evaluate eligibility
    pub fn stop_write(&self) {
        let mut state = self.state.lock();
        debug_assert!(state.writers > 0, "stop_write without matching start_write");
        state.writers -= 1;
        if state.writers == 0 {
            self.cond.notify_all();
        }
    }

    /// Block until read admission, then join the active readers
    pub fn start_read(&self) {
        let mut state = self.state.lock();
        match state.policy {
            RwPolicy::WriterFirst => {
                while state.writers != 0 {
                    self.cond.wait(&mut state);
                }
            }
            // Readers never block each other and are admitted even while
            // writers wait; this is what produces reader priority
            RwPolicy::ReaderFirst => {}
        }
        state.readers += 1;
    }

    /// End the read and wake all waiters
    pub fn stop_read(&self) {
        let mut state = self.state.lock();
        debug_assert!(state.readers > 0, "stop_read without matching start_read");
        state.readers -= 1;
        self.cond.notify_all();
    }

    /// Change the admission policy for future arrivals.
    ///
    /// Current holders and already-blocked threads are unaffected.
    pub fn set_policy(&self, policy: RwPolicy) {
        let mut state = self.state.lock();
        debug!("rwlock policy change: {:?} -> {:?}", state.policy, policy);
        state.policy = policy;
    }

    /// Current admission policy
    pub fn policy(&self) -> RwPolicy {
        self.state.lock().policy
    }

    /// Active reader count (diagnostic)
    pub fn readers(&self) -> usize {
        self.state.lock().readers
    }

    /// Active writer count (diagnostic)
    pub fn writers(&self) -> usize {
        self.state.lock().writers
    }

    /// RAII form of `start_read`/`stop_read`
    pub fn read(&self) -> RwReadGuard<'_> {
        self.start_read();
        RwReadGuard { lock: self }
    }

    /// RAII form of `start_write`/`stop_write`
    pub fn write(&self) -> RwWriteGuard<'_> {
        self.start_write();
        RwWriteGuard { lock: self }
    }
}

/// Calls `stop_read` on drop
pub struct RwReadGuard<'a> {
    lock: &'a PolicyRwLock,
}

impl Drop for RwReadGuard<'_> {
    fn drop(&mut self) {
        self.lock.stop_read();
    }
}

/// Calls `stop_write` on drop
pub struct RwWriteGuard<'a> {
    lock: &'a PolicyRwLock,
}

impl Drop for RwWriteGuard<'_> {
    fn drop(&mut self) {
        self.lock.stop_write();
    }
}
