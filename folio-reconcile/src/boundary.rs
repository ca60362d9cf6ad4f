//! Transaction boundary with per-phase deadlines.
//!
//! A reconciliation runs in two phases: an optional read of the current
//! state, then one write transaction. Each phase has its own deadline. The
//! deadline bounds both the wait for the database lock (busy timeout) and the
//! statements themselves (a progress handler interrupts SQLite once the
//! deadline passes), so an expired phase never leaves a lock held.

use std::fmt;
use std::time::{Duration, Instant};

use rusqlite::Connection;

use crate::error::ReconcileError;

/// VM instructions between deadline checks.
const PROGRESS_INTERVAL: i32 = 1000;

/// Busy timeout restored once a phase is over (rusqlite's default).
const IDLE_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Read,
    Write,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Read => f.write_str("read"),
            Phase::Write => f.write_str("write"),
        }
    }
}

/// Deadlines for the two phases of a reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDeadlines {
    pub read: Duration,
    pub write: Duration,
}

impl Default for PhaseDeadlines {
    fn default() -> Self {
        Self {
            read: Duration::from_millis(1200),
            write: Duration::from_millis(4000),
        }
    }
}

impl PhaseDeadlines {
    pub fn from_millis(read_ms: u64, write_ms: u64) -> Self {
        Self {
            read: Duration::from_millis(read_ms),
            write: Duration::from_millis(write_ms),
        }
    }

    pub fn for_phase(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Read => self.read,
            Phase::Write => self.write,
        }
    }
}

// ── Deadline Guard ──────────────────────────────────────────────────────────

/// Interrupts statements on `conn` once the deadline passes. Disarmed on drop.
pub struct DeadlineGuard<'c> {
    conn: &'c Connection,
    expires: Instant,
}

impl<'c> DeadlineGuard<'c> {
    pub fn arm(conn: &'c Connection, budget: Duration) -> Result<Self, rusqlite::Error> {
        let expires = Instant::now() + budget;
        conn.busy_timeout(budget)?;
        conn.progress_handler(PROGRESS_INTERVAL, Some(move || Instant::now() >= expires));
        Ok(Self { conn, expires })
    }

    pub fn expired(&self) -> bool {
        Instant::now() >= self.expires
    }
}

impl Drop for DeadlineGuard<'_> {
    fn drop(&mut self) {
        self.conn.progress_handler(0, None::<fn() -> bool>);
        if let Err(e) = self.conn.busy_timeout(IDLE_BUSY_TIMEOUT) {
            log::warn!("failed to reset busy timeout: {e}");
        }
    }
}

// ── Write Transaction ───────────────────────────────────────────────────────

/// An immediate (write-locking) transaction bounded by a deadline.
///
/// `rollback` is idempotent and a no-op after `commit`. Dropping an
/// unfinished transaction rolls it back.
pub struct WriteTransaction<'c> {
    conn: &'c Connection,
    guard: Option<DeadlineGuard<'c>>,
    finished: bool,
}

impl<'c> WriteTransaction<'c> {
    pub fn begin(conn: &'c Connection, budget: Duration) -> Result<Self, ReconcileError> {
        let guard = DeadlineGuard::arm(conn, budget)?;
        conn.execute_batch("BEGIN IMMEDIATE")?;
        Ok(Self {
            conn,
            guard: Some(guard),
            finished: false,
        })
    }

    pub fn commit(&mut self) -> Result<(), ReconcileError> {
        if self.finished {
            return Ok(());
        }
        // Short statements never trip the progress handler, so a phase can
        // overrun its budget between them.
        if self.guard.as_ref().is_some_and(DeadlineGuard::expired) {
            self.rollback();
            return Err(ReconcileError::Timeout {
                phase: Phase::Write,
            });
        }
        match self.conn.execute_batch("COMMIT") {
            Ok(()) => {
                self.finished = true;
                self.guard = None;
                Ok(())
            }
            Err(e) => {
                self.rollback();
                Err(e.into())
            }
        }
    }

    pub fn rollback(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        // ROLLBACK must not itself be interrupted.
        self.guard = None;
        // SQLite may already have rolled back after an interrupt.
        if !self.conn.is_autocommit() {
            if let Err(e) = self.conn.execute_batch("ROLLBACK") {
                log::error!("rollback failed: {e}");
            }
        }
    }
}

impl Drop for WriteTransaction<'_> {
    fn drop(&mut self) {
        self.rollback();
    }
}

// ── Phase Runners ───────────────────────────────────────────────────────────

/// Run `f` inside one write transaction, committing on `Ok` and rolling back
/// on `Err`. Deadline expiry and lock timeouts surface as
/// `ReconcileError::Timeout { phase: Write }`.
pub fn run_write<T>(
    conn: &Connection,
    budget: Duration,
    f: impl FnOnce(&Connection) -> Result<T, ReconcileError>,
) -> Result<T, ReconcileError> {
    let mut tx = WriteTransaction::begin(conn, budget).map_err(|e| e.in_phase(Phase::Write))?;
    match f(conn) {
        Ok(value) => {
            tx.commit().map_err(|e| e.in_phase(Phase::Write))?;
            Ok(value)
        }
        Err(e) => {
            tx.rollback();
            Err(e.in_phase(Phase::Write))
        }
    }
}

/// Run `f` against a consistent snapshot, bounded by the read deadline.
pub fn run_read<T>(
    conn: &Connection,
    budget: Duration,
    f: impl FnOnce(&Connection) -> Result<T, ReconcileError>,
) -> Result<T, ReconcileError> {
    let snapshot = conn.unchecked_transaction()?;
    let guard = DeadlineGuard::arm(conn, budget)?;
    let mut result = f(&snapshot);
    if result.is_ok() && guard.expired() {
        result = Err(ReconcileError::Timeout { phase: Phase::Read });
    }
    drop(guard);
    let finished = snapshot.finish();
    let value = result.map_err(|e| e.in_phase(Phase::Read))?;
    finished?;
    Ok(value)
}
