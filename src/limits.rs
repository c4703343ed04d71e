/*!
 * Tuning Constants
 *
 * Centralized location for harness defaults and demo scenario sizes.
 * Values include rationale comments explaining why they exist.
 */

use std::time::Duration;

// =============================================================================
// HARNESS DEFAULTS
// =============================================================================

/// Default workers per phase (5)
/// Small enough that a phase finishes instantly, large enough that every
/// primitive sees real contention on a typical 4-8 core machine
pub const DEFAULT_WORKERS: usize = 5;

/// Default protected operations per worker (1)
/// One unit of work per worker keeps phase timings dominated by
/// acquisition cost rather than payload cost
pub const DEFAULT_ITERATIONS: usize = 1;

// =============================================================================
// READER/WRITER DEMO SCENARIO
// =============================================================================

/// Writers in the reader/writer demo round (6)
/// Enough writers that the writer-priority round shows a visible drain
pub const DEMO_WRITERS: usize = 6;

/// Readers in the reader/writer demo round (2)
/// Few enough that reader-priority admission is obviously concurrent
pub const DEMO_READERS: usize = 2;

/// How long each demo reader/writer holds the lock (200ms)
/// Long enough to observe interleavings in console output, short enough
/// that both rounds complete in a few seconds
pub const DEMO_HOLD: Duration = Duration::from_millis(200);
