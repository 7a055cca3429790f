//! # Diagnostics
//!
//! Error handling for the parse session: the structural protocol-violation
//! taxonomy, the append-only error log, and the external `Check` sink the
//! log drains into. Violations are values rendered into the log, never
//! panics; a malformed entity never aborts parsing of the rest of the
//! stream.
//!
//! The log owns its pages independently of the text arena, so diagnostics
//! remain readable after the structural graph and its interned text have
//! been released.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::arena::Pool;

// =============================================================================
// PROTOCOL VIOLATIONS
// =============================================================================

/// Structural protocol violations: the driving grammar called operations
/// out of the required order. The session recovers to the nearest safe
/// state after logging one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolViolation {
    /// A record began while the previous one was never finalized.
    #[error("record '{0}' begun while another record is still open")]
    RecordAlreadyOpen(String),

    /// A type name arrived with no record to attach it to.
    #[error("type name '{0}' set with no open record")]
    TypeWithoutRecord(String),

    /// An argument arrived with no record to attach it to.
    #[error("argument pushed with no open record")]
    ArgumentWithoutRecord,

    /// An argument list opened with no record pending.
    #[error("argument list opened with no open record")]
    ListWithoutRecord,

    /// An argument list opened twice for the same record.
    #[error("argument list opened twice for record '{0}'")]
    ListReopened(String),

    /// A nested entity began with no spawning record pending.
    #[error("nested entity begun with no open record")]
    SubRecordWithoutRecord,

    /// Finalize arrived with no record pending.
    #[error("record finalized with no open record")]
    FinalizeWithoutRecord,

    /// A record finalized without a type name (only diagnosed when the
    /// session is configured to require one).
    #[error("record '{0}' finalized without a type name")]
    MissingType(String),

    /// Scope close arrived with no scope open.
    #[error("scope closed with no open scope")]
    CloseWithoutOpen,
}

// =============================================================================
// CHECK SINK
// =============================================================================

/// External diagnostic collector the error log drains into.
///
/// Downstream layers supply their own implementation; the crate ships
/// [`CheckList`] for tests and simple consumers.
pub trait Check {
    /// Receive one failure message.
    fn add_fail(&mut self, message: &str);
}

/// Vec-backed [`Check`] implementation.
///
/// ## Example
///
/// ```rust
/// use step_tree::error::{Check, CheckList};
///
/// let mut check = CheckList::new();
/// check.add_fail("unterminated string");
/// assert_eq!(check.fails(), ["unterminated string"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckList {
    fails: Vec<String>,
}

impl CheckList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected failure messages, in arrival order.
    pub fn fails(&self) -> &[String] {
        &self.fails
    }

    pub fn is_empty(&self) -> bool {
        self.fails.is_empty()
    }
}

impl Check for CheckList {
    fn add_fail(&mut self, message: &str) {
        self.fails.push(message.to_string());
    }
}

// =============================================================================
// ERROR LOG
// =============================================================================

/// Append-only log of diagnostic messages backed by its own page pool.
///
/// ## Example
///
/// ```rust
/// use step_tree::error::{CheckList, ErrorLog};
///
/// let mut log = ErrorLog::new(16);
/// log.record("scope closed with no open scope");
/// assert_eq!(log.last_error(), Some("scope closed with no open scope"));
///
/// let mut check = CheckList::new();
/// log.drain_into(&mut check);
/// assert_eq!(check.fails().len(), 1);
/// ```
pub struct ErrorLog {
    entries: Pool<String>,
}

impl ErrorLog {
    /// Create an empty log with the given entries-per-page capacity.
    pub fn new(page_capacity: usize) -> Self {
        Self {
            entries: Pool::new(page_capacity),
        }
    }

    /// Append one entry.
    pub fn record(&mut self, message: impl Into<String>) {
        self.entries.alloc(message.into());
    }

    /// The most recently recorded message, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// Copy every entry, in original order, into `check`.
    ///
    /// The log is not cleared: a second drain by a different sink repeats
    /// the same entries.
    pub fn drain_into(&self, check: &mut dyn Check) {
        for entry in self.entries.iter() {
            check.add_fail(entry);
        }
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() == 0
    }

    /// Drop every entry. Part of the full session teardown only.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================
