//! # Read-Back Cursors
//!
//! Traversal of the finished parse tree, consumed by downstream schema
//! binding after parsing completes. Cursors borrow the session immutably:
//! the flat list is stable during traversal, and any number of independent
//! cursors may walk it at once (a resolution pass and a construction pass
//! commonly run back to back).
//!
//! ## Example
//!
//! ```rust
//! use step_tree::{ArgKind, ParseSession};
//!
//! let mut session = ParseSession::new();
//! let ident = session.intern("#10");
//! session.begin_record_with_identifier(ident);
//! let type_name = session.intern("CARTESIAN_POINT");
//! session.set_type(type_name);
//! let value = session.intern("0.0");
//! session.push_argument(ArgKind::Real, value);
//! session.finalize_record();
//!
//! for record in session.records() {
//!     assert_eq!(record.type_name(), Some("CARTESIAN_POINT"));
//!     for argument in record.arguments() {
//!         assert_eq!(argument.kind(), ArgKind::Real);
//!     }
//! }
//! ```

use crate::record::{ArgHandle, ArgKind, RecordHandle};
use crate::session::ParseSession;

// =============================================================================
// RECORD CURSOR
// =============================================================================

/// Iterator over the flat sequential record list, first to last.
pub struct RecordCursor<'a> {
    session: &'a ParseSession,
    next: Option<RecordHandle>,
}

impl<'a> RecordCursor<'a> {
    pub(crate) fn new(session: &'a ParseSession, first: Option<RecordHandle>) -> Self {
        Self {
            session,
            next: first,
        }
    }
}

impl<'a> Iterator for RecordCursor<'a> {
    type Item = RecordView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.next?;
        self.next = self.session.records.get(handle.0).next;
        Some(RecordView {
            session: self.session,
            handle,
        })
    }
}

// =============================================================================
// RECORD VIEW
// =============================================================================

/// Read access to one record of the flat list.
#[derive(Clone, Copy)]
pub struct RecordView<'a> {
    session: &'a ParseSession,
    handle: RecordHandle,
}

impl<'a> RecordView<'a> {
    /// Handle of this record in the record arena.
    pub fn handle(&self) -> RecordHandle {
        self.handle
    }

    /// Position in the flat list (1-based, monotonically assigned).
    pub fn ordinal(&self) -> u32 {
        self.session.records.get(self.handle.0).ordinal
    }

    /// Entity identifier like `#123`, or a synthetic `$n` for sub-records.
    pub fn ident(&self) -> Option<&'a str> {
        self.session
            .records
            .get(self.handle.0)
            .ident
            .map(|slice| self.session.text.resolve(slice))
    }

    /// Entity type name, absent when the grammar never reached `set_type`.
    pub fn type_name(&self) -> Option<&'a str> {
        self.session
            .records
            .get(self.handle.0)
            .type_name
            .map(|slice| self.session.text.resolve(slice))
    }

    /// Number of arguments on this record.
    pub fn argument_count(&self) -> u32 {
        self.session.records.get(self.handle.0).arg_count
    }

    /// Walk this record's arguments in file order.
    pub fn arguments(&self) -> ArgumentCursor<'a> {
        ArgumentCursor {
            session: self.session,
            next: self.session.records.get(self.handle.0).arg_head,
        }
    }

    /// The most recent sub-record spawned from this record's arguments.
    pub fn sub_record(&self) -> Option<RecordView<'a>> {
        self.session
            .records
            .get(self.handle.0)
            .sub_record
            .map(|handle| RecordView {
                session: self.session,
                handle,
            })
    }
}

// =============================================================================
// ARGUMENT CURSOR
// =============================================================================

/// Iterator over one record's argument chain, in insertion order.
pub struct ArgumentCursor<'a> {
    session: &'a ParseSession,
    next: Option<ArgHandle>,
}

impl<'a> Iterator for ArgumentCursor<'a> {
    type Item = ArgumentView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.next?;
        self.next = self.session.arguments.get(handle.0).next;
        Some(ArgumentView {
            session: self.session,
            handle,
        })
    }
}

// =============================================================================
// ARGUMENT VIEW
// =============================================================================

/// Read access to one argument.
#[derive(Clone, Copy)]
pub struct ArgumentView<'a> {
    session: &'a ParseSession,
    handle: ArgHandle,
}

impl<'a> ArgumentView<'a> {
    /// Structural kind tag.
    pub fn kind(&self) -> ArgKind {
        self.session.arguments.get(self.handle.0).kind
    }

    /// Interned text of the value.
    pub fn text(&self) -> &'a str {
        self.session
            .text
            .resolve(self.session.arguments.get(self.handle.0).value)
    }
}

// =============================================================================
// TESTS
// =============================================================================
