//! # STEP Parse Tree (Pure Rust)
//!
//! Incremental, arena-backed parse-tree builder for STEP (ISO 10303-21)
//! entity data. Driven synchronously by an external lexer/grammar pair:
//! the lexer interns raw lexemes, the grammar maps structural reductions
//! onto the record protocol, and downstream schema binding walks the
//! finished flat record list.
//!
//! ## Architecture
//!
//! ```text
//! Source Text → Lexer → interned text → Grammar → ParseSession → flat record list
//! ```
//!
//! ## Example
//!
//! ```rust
//! use step_tree::{ArgKind, ParseSession};
//!
//! // "#123 = ADVANCED_FACE(#125);" driven one event at a time.
//! let mut session = ParseSession::new();
//! let ident = session.intern("#123");
//! session.begin_record_with_identifier(ident);
//! let type_name = session.intern("ADVANCED_FACE");
//! session.set_type(type_name);
//! session.begin_argument_list();
//! let value = session.intern("#125");
//! session.push_argument(ArgKind::Ident, value);
//! session.finalize_record();
//!
//! let record = session.records().next().unwrap();
//! assert_eq!(record.ident(), Some("#123"));
//! assert_eq!(record.type_name(), Some("ADVANCED_FACE"));
//! ```
//!
//! ## Error Handling
//!
//! Malformed input never aborts the parse. Lexical errors surface as
//! coalesced error-placeholder arguments; protocol violations land in the
//! session's error log and the builder recovers to the nearest safe state.
//! Check `session.error_log()` after parsing.
//!
//! ## Pipeline Integration
//!
//! This crate is the tree-building layer of the STEP pipeline: the lexer
//! and grammar drive it from above, schema binding consumes the flat list
//! from below. It performs no I/O and no schema validation.

mod arena;
pub mod cursor;
pub mod error;
pub mod record;
mod scope;
pub mod session;
pub mod text;

// Re-export public API
pub use cursor::{ArgumentCursor, ArgumentView, RecordCursor, RecordView};
pub use error::{Check, CheckList, ErrorLog, ProtocolViolation};
pub use record::{ArgHandle, ArgKind, RecordHandle};
pub use session::{ClearMode, ParseSession, SessionConfig, SessionStats, TraceLevel};
pub use text::{TextArena, TextSlice};

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// The canonical drive sequence for
    /// `#123 = ADVANCED_FACE('', (#124), #125, #125)` with the inner list
    /// expanding into an anonymous sub-record.
    #[test]
    fn test_advanced_face_with_sub_record() {
        let mut session = ParseSession::new();

        let ident = session.intern("#123");
        session.begin_record_with_identifier(ident);
        let type_name = session.intern("ADVANCED_FACE");
        session.set_type(type_name);
        session.begin_argument_list();

        session.begin_sub_record();
        let value = session.intern("#124");
        session.push_argument(ArgKind::Ident, value);
        session.finalize_record();

        let value = session.intern("#125");
        session.push_argument(ArgKind::Ident, value);
        let value = session.intern("#125");
        session.push_argument(ArgKind::Ident, value);
        session.finalize_record();

        assert_eq!(session.record_count(), 2);
        let mut records = session.records();

        // The synthetic sub-record precedes its spawner in the flat list.
        let sub = records.next().unwrap();
        assert_eq!(sub.ident(), Some("$1"));
        assert!(sub.type_name().is_none());
        assert_eq!(sub.argument_count(), 1);
        let argument = sub.arguments().next().unwrap();
        assert_eq!(argument.kind(), ArgKind::Ident);
        assert_eq!(argument.text(), "#124");

        let outer = records.next().unwrap();
        assert_eq!(outer.ident(), Some("#123"));
        assert_eq!(outer.type_name(), Some("ADVANCED_FACE"));
        let arguments: Vec<(ArgKind, &str)> =
            outer.arguments().map(|a| (a.kind(), a.text())).collect();
        assert_eq!(
            arguments,
            [
                (ArgKind::Sub, "$1"),
                (ArgKind::Ident, "#125"),
                (ArgKind::Ident, "#125"),
            ]
        );
        assert!(records.next().is_none());
    }

    #[test]
    fn test_close_scope_without_open_logs_one_diagnostic() {
        let mut session = ParseSession::new();
        session.close_scope();
        assert_eq!(session.error_log().len(), 1);
        assert_eq!(
            session.last_error(),
            Some("scope closed with no open scope")
        );
        // Still usable at top level afterwards.
        let ident = session.intern("#1");
        session.begin_record_with_identifier(ident);
        session.finalize_record();
        assert_eq!(session.record_count(), 1);
    }
}
