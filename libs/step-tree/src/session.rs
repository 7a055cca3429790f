//! # Parse Session
//!
//! Orchestrates the arenas, the record/argument graph, the scope stack and
//! the error log behind the incremental protocol the external lexer/grammar
//! drives. One session serves one input stream; independent streams parse
//! in parallel only by using one session each.
//!
//! ## Example
//!
//! ```rust
//! use step_tree::{ArgKind, ParseSession};
//!
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
//! assert_eq!(session.record_count(), 1);
//! ```

pub use config::constants::PageCapacities;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::arena::Pool;
use crate::cursor::RecordCursor;
use crate::error::{Check, ErrorLog, ProtocolViolation};
use crate::record::{ArgHandle, ArgKind, Argument, Record, RecordHandle};
use crate::scope::ScopeStack;
use crate::text::{TextArena, TextSlice};

// =============================================================================
// TRACE LEVEL
// =============================================================================

/// Verbosity of the diagnostic dump emitted while the tree is built.
///
/// A debugging aid, not required for correctness; output goes through
/// `tracing` at debug/trace level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceLevel {
    /// No dump.
    Silent,
    /// One line per finalized record.
    Records,
    /// One line per finalized record plus one per argument.
    Arguments,
}

// =============================================================================
// CLEAR MODE
// =============================================================================

/// Which arenas a [`ParseSession::clear`] releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearMode {
    /// Release record and argument pages only. Interned text and the error
    /// log survive, so messages referencing extracted text stay readable.
    Graph,
    /// Release text pages only.
    Text,
    /// Release everything; the session returns to its initial empty state
    /// and may be reused for another stream.
    All,
}

// =============================================================================
// SESSION CONFIG
// =============================================================================

/// Construction-time tunables. Page capacities are fixed once the session
/// is built; only the trace level may change afterwards.
///
/// ## Example
///
/// ```rust
/// use config::constants::PageCapacities;
/// use step_tree::session::{ParseSession, SessionConfig, TraceLevel};
///
/// let config = SessionConfig {
///     pages: PageCapacities::new(4096, 256, 512, 16).unwrap(),
///     trace: TraceLevel::Silent,
///     require_type: false,
/// };
/// let session = ParseSession::with_config(config);
/// assert_eq!(session.record_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Page capacities for the four arenas.
    pub pages: PageCapacities,
    /// Initial trace verbosity.
    pub trace: TraceLevel,
    /// Diagnose records finalized without a type name. Off by default:
    /// downstream schema binding treats an absent type as malformed, so the
    /// builder stays silent unless asked.
    pub require_type: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pages: PageCapacities::default(),
            trace: TraceLevel::Silent,
            require_type: false,
        }
    }
}

// =============================================================================
// SESSION STATS
// =============================================================================

/// Snapshot of the session counters. Page counts are diagnostics/tuning
/// data only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Records appended to the flat list, header and body combined.
    pub total_records: u32,
    /// Records finalized before `end_header_section`.
    pub header_records: u32,
    /// Records finalized after `end_header_section`.
    pub body_records: u32,
    /// Arguments created across all records.
    pub total_arguments: u32,
    /// Text pages allocated.
    pub text_pages: usize,
    /// Record pages allocated.
    pub record_pages: usize,
    /// Argument pages allocated.
    pub argument_pages: usize,
}

// =============================================================================
// PARSE SESSION
// =============================================================================

/// Incremental parse-tree builder for STEP entity data.
///
/// The external lexer interns text; the external grammar maps structural
/// events onto the record protocol. Protocol violations are logged and
/// recovered from, never propagated: the session stays usable after every
/// error, and a malformed record never corrupts records already finalized.
pub struct ParseSession {
    config: SessionConfig,
    /// Interned character data.
    pub(crate) text: TextArena,
    /// Record nodes.
    pub(crate) records: Pool<Record>,
    /// Argument nodes.
    pub(crate) arguments: Pool<Argument>,
    /// Diagnostics, independent of the text arena.
    errors: ErrorLog,
    /// Head of the flat sequential record list.
    first: Option<RecordHandle>,
    /// Tail of the flat list, for O(1) append.
    last: Option<RecordHandle>,
    /// Record currently under construction.
    current: Option<RecordHandle>,
    /// Nesting frames for sub-records and explicit scopes.
    scopes: ScopeStack,
    total_records: u32,
    header_records: u32,
    total_arguments: u32,
    /// An error-placeholder argument is absorbing the current token run.
    error_arg_active: bool,
    /// The current record's argument list bracket has been seen.
    list_open: bool,
    /// Source of synthetic `$n` identifiers.
    sub_counter: u32,
}

impl ParseSession {
    /// Create a session with default page capacities.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Create a session with explicit tunables.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            text: TextArena::new(config.pages.chars),
            records: Pool::new(config.pages.records),
            arguments: Pool::new(config.pages.arguments),
            errors: ErrorLog::new(config.pages.errors),
            first: None,
            last: None,
            current: None,
            scopes: ScopeStack::new(),
            total_records: 0,
            header_records: 0,
            total_arguments: 0,
            error_arg_active: false,
            list_open: false,
            sub_counter: 0,
            config,
        }
    }

    // =========================================================================
    // TEXT INTERNING
    // =========================================================================

    /// Intern one lexeme and return a slice referring to it.
    pub fn intern(&mut self, text: &str) -> TextSlice {
        self.text.intern(text)
    }

    /// Overwrite the most recently interned lexeme, e.g. after the lexer
    /// normalizes an escape sequence. Falls back to a fresh intern when the
    /// revision no longer fits in place.
    pub fn replace_last(&mut self, text: &str) -> TextSlice {
        self.text.replace_last(text)
    }

    /// Read an interned slice back.
    pub fn resolve(&self, slice: TextSlice) -> &str {
        self.text.resolve(slice)
    }

    // =========================================================================
    // RECORD PROTOCOL
    // =========================================================================

    /// Start a new record with the given identifier and make it current.
    ///
    /// Starting a record while another is still pending is a protocol
    /// violation: the pending record is abandoned and the new one starts
    /// cleanly, so one malformed entity never poisons the next.
    pub fn begin_record_with_identifier(&mut self, ident: TextSlice) {
        if self.current.is_some() {
            let name = self.resolve(ident).to_string();
            self.violation(ProtocolViolation::RecordAlreadyOpen(name));
            self.abandon_current();
        }
        let handle = RecordHandle(self.records.alloc(Record::new(Some(ident), None)));
        self.current = Some(handle);
        self.list_open = false;
        self.error_arg_active = false;
    }

    /// Attach a type name to the current record.
    pub fn set_type(&mut self, type_name: TextSlice) {
        match self.current {
            Some(handle) => self.records.get_mut(handle.0).type_name = Some(type_name),
            None => {
                let name = self.resolve(type_name).to_string();
                self.violation(ProtocolViolation::TypeWithoutRecord(name));
            }
        }
    }

    /// Note the opening bracket of the current record's argument list.
    ///
    /// Purely a marker for bracket-matching diagnostics; the graph does not
    /// change.
    pub fn begin_argument_list(&mut self) {
        match self.current {
            Some(handle) => {
                if self.list_open {
                    let name = self.record_label(handle);
                    self.violation(ProtocolViolation::ListReopened(name));
                } else {
                    self.list_open = true;
                }
            }
            None => self.violation(ProtocolViolation::ListWithoutRecord),
        }
    }

    /// Append one argument to the current record, preserving file order.
    ///
    /// This is the only path that grows the argument count; the caller
    /// pushes explicit [`ArgKind::Omitted`] placeholders for elided
    /// parameters so positions stay meaningful. Consecutive
    /// [`ArgKind::Error`] pushes coalesce into a single placeholder
    /// argument spanning the whole malformed run.
    pub fn push_argument(&mut self, kind: ArgKind, value: TextSlice) {
        let Some(current) = self.current else {
            self.violation(ProtocolViolation::ArgumentWithoutRecord);
            return;
        };
        if kind == ArgKind::Error && self.error_arg_active {
            if let Some(tail) = self.records.get(current.0).arg_tail {
                if self.arguments.get(tail.0).kind == ArgKind::Error {
                    let merged = {
                        let old = self.text.resolve(self.arguments.get(tail.0).value);
                        let new = self.text.resolve(value);
                        let mut merged = String::with_capacity(old.len() + new.len());
                        merged.push_str(old);
                        merged.push_str(new);
                        merged
                    };
                    let slice = self.text.intern(&merged);
                    self.arguments.get_mut(tail.0).value = slice;
                    return;
                }
            }
        }
        self.error_arg_active = kind == ArgKind::Error;
        self.append_argument(current, kind, value);
    }

    /// Argument-separator hook: ends an error-coalescing run so the next
    /// error token starts a fresh placeholder argument.
    pub fn prepare_next_argument(&mut self) {
        self.error_arg_active = false;
    }

    /// Start an anonymous nested entity inside the current argument list.
    ///
    /// Allocates a synthetic record (generated `$n` identifier, type
    /// absent), pushes a scope anchored on the spawning record and makes
    /// the new record current. When the sub-record finalizes it is spliced
    /// into the flat list ahead of its spawner, and the spawner receives a
    /// [`ArgKind::Sub`] argument referencing it.
    pub fn begin_sub_record(&mut self) {
        self.spawn_sub_record(None);
    }

    /// Start a typed nested entity, e.g. `LENGTH_MEASURE(25.4)` appearing
    /// inline in an argument list.
    pub fn begin_sub_record_with_type(&mut self, type_name: TextSlice) {
        self.spawn_sub_record(Some(type_name));
    }

    fn spawn_sub_record(&mut self, type_name: Option<TextSlice>) {
        let Some(current) = self.current else {
            self.violation(ProtocolViolation::SubRecordWithoutRecord);
            return;
        };
        self.sub_counter += 1;
        let ident = self.text.intern(&format!("${}", self.sub_counter));
        let handle = RecordHandle(self.records.alloc(Record::new(Some(ident), type_name)));
        self.scopes.open(Some(current), true);
        self.current = Some(handle);
        self.error_arg_active = false;
    }

    /// Append the current record to the flat list and close its scope.
    ///
    /// Assigns the record's ordinal, bumps the counters, pops the active
    /// scope frame if any and restores its anchor as current. For synthetic
    /// frames the anchor also receives a sub-list argument carrying the
    /// finalized sub-record's identifier.
    pub fn finalize_record(&mut self) {
        let Some(current) = self.current else {
            self.violation(ProtocolViolation::FinalizeWithoutRecord);
            return;
        };
        if self.config.require_type && self.records.get(current.0).type_name.is_none() {
            let name = self.record_label(current);
            self.violation(ProtocolViolation::MissingType(name));
        }
        self.append_to_flat_list(current);
        self.trace_record(current);
        self.error_arg_active = false;
        match self.scopes.close() {
            Some(frame) => {
                if frame.synthetic {
                    if let Some(anchor) = frame.anchor {
                        self.records.get_mut(anchor.0).sub_record = Some(current);
                        let sub_ident = self.records.get(current.0).ident;
                        if let Some(ident) = sub_ident {
                            self.append_argument(anchor, ArgKind::Sub, ident);
                        }
                    }
                }
                self.current = frame.anchor;
                self.list_open = frame.anchor.is_some();
            }
            None => {
                self.current = None;
                self.list_open = false;
            }
        }
    }

    /// Abandon the current, possibly partially built record after an
    /// unrecoverable local syntax error. Cursors reset to a clean state
    /// ready for the next [`ParseSession::begin_record_with_identifier`];
    /// records already finalized are untouched.
    pub fn skip_to_next_record(&mut self) {
        self.abandon_current();
    }

    /// Mark the end of the header section: every record finalized so far
    /// counts as a header record, everything after as a body record.
    pub fn end_header_section(&mut self) {
        self.header_records = self.total_records;
    }

    // =========================================================================
    // SCOPE PROTOCOL
    // =========================================================================

    /// Open an explicit scope anchored on the current record.
    pub fn open_scope(&mut self) {
        self.scopes.open(self.current, false);
    }

    /// Close the innermost scope, restoring its anchor as current.
    ///
    /// Closing with no scope open logs one structural diagnostic and is
    /// otherwise a no-op: the builder continues at top level.
    pub fn close_scope(&mut self) {
        match self.scopes.close() {
            Some(frame) => self.current = frame.anchor,
            None => self.violation(ProtocolViolation::CloseWithoutOpen),
        }
    }

    /// Current nesting depth of sub-record/scope constructs.
    pub fn scope_depth(&self) -> usize {
        self.scopes.depth()
    }

    // =========================================================================
    // DIAGNOSTICS
    // =========================================================================

    /// Append one message to the error log.
    pub fn add_error(&mut self, message: &str) {
        self.errors.record(message);
    }

    /// The most recently logged message, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.errors.last_error()
    }

    /// Copy every logged message, in order, into `check`. The log is not
    /// cleared; a second drain repeats the entries.
    pub fn drain_errors_into(&self, check: &mut dyn Check) {
        self.errors.drain_into(check);
    }

    /// Read access to the error log.
    pub fn error_log(&self) -> &ErrorLog {
        &self.errors
    }

    fn violation(&mut self, violation: ProtocolViolation) {
        debug!(%violation, "protocol violation");
        self.errors.record(violation.to_string());
    }

    // =========================================================================
    // READ-BACK
    // =========================================================================

    /// Traverse the flat record list from first to last.
    ///
    /// Cursors borrow the session immutably, so any number may run at once;
    /// schema binding commonly walks the list twice (resolution pass, then
    /// construction pass).
    pub fn records(&self) -> RecordCursor<'_> {
        RecordCursor::new(self, self.first)
    }

    /// Number of records in the flat list.
    pub fn record_count(&self) -> u32 {
        self.total_records
    }

    /// Snapshot of all counters.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            total_records: self.total_records,
            header_records: self.header_records,
            body_records: self.total_records - self.header_records,
            total_arguments: self.total_arguments,
            text_pages: self.text.page_count(),
            record_pages: self.records.page_count(),
            argument_pages: self.arguments.page_count(),
        }
    }

    // =========================================================================
    // TRACE MODE
    // =========================================================================

    /// Change the trace verbosity.
    pub fn set_trace(&mut self, level: TraceLevel) {
        self.config.trace = level;
    }

    /// Current trace verbosity.
    pub fn trace_level(&self) -> TraceLevel {
        self.config.trace
    }

    fn trace_record(&self, handle: RecordHandle) {
        if self.config.trace == TraceLevel::Silent {
            return;
        }
        let record = self.records.get(handle.0);
        let ident = record.ident.map(|s| self.text.resolve(s)).unwrap_or("");
        let type_name = record.type_name.map(|s| self.text.resolve(s)).unwrap_or("");
        debug!(
            ordinal = record.ordinal,
            ident,
            type_name,
            arguments = record.arg_count,
            "record finalized"
        );
        if self.config.trace == TraceLevel::Arguments {
            let mut next = record.arg_head;
            while let Some(arg) = next {
                let argument = self.arguments.get(arg.0);
                trace!(
                    kind = ?argument.kind,
                    text = self.text.resolve(argument.value),
                    "argument"
                );
                next = argument.next;
            }
        }
    }

    // =========================================================================
    // TEARDOWN
    // =========================================================================

    /// Release memory. See [`ClearMode`] for the three levels. A full clear
    /// returns the session to its initial empty state for reuse.
    pub fn clear(&mut self, mode: ClearMode) {
        match mode {
            ClearMode::Graph => self.clear_graph(),
            ClearMode::Text => self.text.clear(),
            ClearMode::All => {
                self.clear_graph();
                self.text.clear();
                self.errors.clear();
                self.total_records = 0;
                self.header_records = 0;
                self.total_arguments = 0;
                self.sub_counter = 0;
            }
        }
    }

    fn clear_graph(&mut self) {
        self.records.clear();
        self.arguments.clear();
        self.first = None;
        self.last = None;
        self.current = None;
        self.scopes.clear();
        self.error_arg_active = false;
        self.list_open = false;
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    /// Abandon the pending record and reset to top level.
    fn abandon_current(&mut self) {
        self.current = None;
        self.scopes.clear();
        self.error_arg_active = false;
        self.list_open = false;
    }

    /// Splice a finalized record onto the tail of the flat list. Sub-records
    /// finalize before their spawner, so they always precede it here and a
    /// reference never points forward past the walk.
    fn append_to_flat_list(&mut self, handle: RecordHandle) {
        self.total_records += 1;
        self.records.get_mut(handle.0).ordinal = self.total_records;
        match self.last {
            Some(last) => self.records.get_mut(last.0).next = Some(handle),
            None => self.first = Some(handle),
        }
        self.last = Some(handle);
    }

    /// Tail-append one argument to `record`.
    fn append_argument(&mut self, record: RecordHandle, kind: ArgKind, value: TextSlice) {
        let handle = ArgHandle(self.arguments.alloc(Argument {
            kind,
            value,
            next: None,
        }));
        let prev_tail = {
            let rec = self.records.get_mut(record.0);
            let prev = rec.arg_tail;
            rec.arg_tail = Some(handle);
            if rec.arg_head.is_none() {
                rec.arg_head = Some(handle);
            }
            rec.arg_count += 1;
            prev
        };
        if let Some(tail) = prev_tail {
            self.arguments.get_mut(tail.0).next = Some(handle);
        }
        self.total_arguments += 1;
    }

    /// Identifier text of a record, for diagnostics.
    fn record_label(&self, handle: RecordHandle) -> String {
        self.records
            .get(handle.0)
            .ident
            .map(|s| self.text.resolve(s).to_string())
            .unwrap_or_default()
    }
}

impl Default for ParseSession {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckList;

    fn begin(session: &mut ParseSession, ident: &str, type_name: &str) {
        let slice = session.intern(ident);
        session.begin_record_with_identifier(slice);
        let slice = session.intern(type_name);
        session.set_type(slice);
        session.begin_argument_list();
    }

    #[test]
    fn test_record_count_equals_finalize_calls() {
        let mut session = ParseSession::new();
        for i in 0..3 {
            begin(&mut session, &format!("#{i}"), "CARTESIAN_POINT");
            session.finalize_record();
        }
        assert_eq!(session.record_count(), 3);
        assert_eq!(session.records().count(), 3);
    }

    #[test]
    fn test_arguments_preserve_push_order() {
        let mut session = ParseSession::new();
        begin(&mut session, "#1", "DIRECTION");
        for text in ["1.0", "0.0", "0.0"] {
            let value = session.intern(text);
            session.push_argument(ArgKind::Real, value);
            session.prepare_next_argument();
        }
        session.finalize_record();

        let record = session.records().next().unwrap();
        let texts: Vec<&str> = record.arguments().map(|a| a.text()).collect();
        assert_eq!(texts, ["1.0", "0.0", "0.0"]);
    }

    #[test]
    fn test_omitted_values_keep_positions() {
        let mut session = ParseSession::new();
        begin(&mut session, "#1", "PLANE");
        let value = session.intern("$");
        session.push_argument(ArgKind::Omitted, value);
        let value = session.intern("#2");
        session.push_argument(ArgKind::Ident, value);
        session.finalize_record();

        let record = session.records().next().unwrap();
        let kinds: Vec<ArgKind> = record.arguments().map(|a| a.kind()).collect();
        assert_eq!(kinds, [ArgKind::Omitted, ArgKind::Ident]);
    }

    #[test]
    fn test_error_run_coalesces_into_one_argument() {
        let mut session = ParseSession::new();
        begin(&mut session, "#1", "SURFACE");
        for text in ["@", "!", "~"] {
            let value = session.intern(text);
            session.push_argument(ArgKind::Error, value);
        }
        session.finalize_record();

        let record = session.records().next().unwrap();
        assert_eq!(record.argument_count(), 1);
        let argument = record.arguments().next().unwrap();
        assert_eq!(argument.kind(), ArgKind::Error);
        assert_eq!(argument.text(), "@!~");
    }

    #[test]
    fn test_separator_breaks_error_coalescing() {
        let mut session = ParseSession::new();
        begin(&mut session, "#1", "SURFACE");
        let value = session.intern("@");
        session.push_argument(ArgKind::Error, value);
        session.prepare_next_argument();
        let value = session.intern("!");
        session.push_argument(ArgKind::Error, value);
        session.finalize_record();

        let record = session.records().next().unwrap();
        assert_eq!(record.argument_count(), 2);
    }

    #[test]
    fn test_header_records_counted_separately() {
        let mut session = ParseSession::new();
        begin(&mut session, "#h1", "FILE_NAME");
        session.finalize_record();
        begin(&mut session, "#h2", "FILE_SCHEMA");
        session.finalize_record();
        session.end_header_section();
        begin(&mut session, "#1", "PRODUCT");
        session.finalize_record();

        let stats = session.stats();
        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.header_records, 2);
        assert_eq!(stats.body_records, 1);
    }

    #[test]
    fn test_begin_while_pending_logs_and_recovers() {
        let mut session = ParseSession::new();
        begin(&mut session, "#1", "PRODUCT");
        // Never finalized; the next begin must diagnose and start clean.
        let slice = session.intern("#2");
        session.begin_record_with_identifier(slice);
        let slice = session.intern("SHAPE");
        session.set_type(slice);
        session.finalize_record();

        assert_eq!(session.record_count(), 1);
        let record = session.records().next().unwrap();
        assert_eq!(record.ident(), Some("#2"));
        assert!(session.last_error().unwrap().contains("#2"));
    }

    #[test]
    fn test_finalize_without_record_is_diagnosed() {
        let mut session = ParseSession::new();
        session.finalize_record();
        assert_eq!(session.record_count(), 0);
        assert_eq!(
            session.last_error(),
            Some("record finalized with no open record")
        );
    }

    #[test]
    fn test_set_type_without_record_is_diagnosed() {
        let mut session = ParseSession::new();
        let slice = session.intern("PRODUCT");
        session.set_type(slice);
        assert!(session.last_error().unwrap().contains("PRODUCT"));
    }

    #[test]
    fn test_missing_type_policy_is_configurable() {
        let mut session = ParseSession::with_config(SessionConfig {
            require_type: true,
            ..SessionConfig::default()
        });
        let slice = session.intern("#9");
        session.begin_record_with_identifier(slice);
        session.finalize_record();
        // The record still lands in the flat list; the policy only logs.
        assert_eq!(session.record_count(), 1);
        assert!(session.last_error().unwrap().contains("#9"));

        let mut lenient = ParseSession::new();
        let slice = lenient.intern("#9");
        lenient.begin_record_with_identifier(slice);
        lenient.finalize_record();
        assert!(lenient.last_error().is_none());
    }

    #[test]
    fn test_skip_to_next_record_resets_cleanly() {
        let mut session = ParseSession::new();
        begin(&mut session, "#1", "BROKEN");
        session.begin_sub_record();
        session.skip_to_next_record();
        assert_eq!(session.scope_depth(), 0);

        begin(&mut session, "#2", "PRODUCT");
        session.finalize_record();
        assert_eq!(session.record_count(), 1);
        assert_eq!(session.records().next().unwrap().ident(), Some("#2"));
    }

    #[test]
    fn test_typed_sub_record_carries_type() {
        let mut session = ParseSession::new();
        begin(&mut session, "#1", "MEASURE_WITH_UNIT");
        let type_name = session.intern("LENGTH_MEASURE");
        session.begin_sub_record_with_type(type_name);
        let value = session.intern("25.4");
        session.push_argument(ArgKind::Real, value);
        session.finalize_record();
        session.finalize_record();

        let mut records = session.records();
        let sub = records.next().unwrap();
        assert_eq!(sub.type_name(), Some("LENGTH_MEASURE"));
        let outer = records.next().unwrap();
        assert_eq!(outer.ident(), Some("#1"));
    }

    #[test]
    fn test_drain_errors_round_trip() {
        let mut session = ParseSession::new();
        session.close_scope();
        session.add_error("lexer: unterminated string");

        let mut check = CheckList::new();
        session.drain_errors_into(&mut check);
        assert_eq!(
            check.fails(),
            [
                "scope closed with no open scope",
                "lexer: unterminated string"
            ]
        );

        let mut again = CheckList::new();
        session.drain_errors_into(&mut again);
        assert_eq!(check, again);
    }

    #[test]
    fn test_stats_report_page_counts() {
        let mut session = ParseSession::with_config(SessionConfig {
            pages: PageCapacities::new(8192, 2, 2048, 16).unwrap(),
            ..SessionConfig::default()
        });
        for i in 0..3 {
            begin(&mut session, &format!("#{i}"), "POINT");
            session.finalize_record();
        }
        assert_eq!(session.stats().record_pages, 2);
    }

    #[test]
    fn test_trace_level_is_adjustable() {
        let mut session = ParseSession::new();
        assert_eq!(session.trace_level(), TraceLevel::Silent);
        session.set_trace(TraceLevel::Arguments);
        assert_eq!(session.trace_level(), TraceLevel::Arguments);
        // Finalizing with tracing on must not disturb the graph.
        begin(&mut session, "#1", "POINT");
        session.finalize_record();
        assert_eq!(session.record_count(), 1);
    }
}
