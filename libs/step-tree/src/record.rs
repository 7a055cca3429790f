//! # Records and Arguments
//!
//! Node types for the parse tree: a record is one parsed entity instance
//! (identifier, type name, ordered arguments); an argument is one parsed
//! parameter value with a structural kind tag. Both live in page pools and
//! link to their successors by handle, forming singly linked chains with
//! O(1) tail append.

use serde::{Deserialize, Serialize};

use crate::arena::Handle;
use crate::text::TextSlice;

// =============================================================================
// HANDLES
// =============================================================================

/// Opaque handle to a record in the record arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordHandle(pub(crate) Handle);

/// Opaque handle to an argument in the argument arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArgHandle(pub(crate) Handle);

// =============================================================================
// ARGUMENT KIND
// =============================================================================

/// Structural kind of one parsed parameter value.
///
/// Kinds are purely lexical/structural; nothing here is validated against
/// an entity schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgKind {
    /// Quoted free text like `'steel'`.
    Text,
    /// Reference to another entity like `#125`.
    Ident,
    /// Enumeration token like `.F.`.
    Enum,
    /// Integer literal like `42`.
    Integer,
    /// Real literal like `1.5E-2`.
    Real,
    /// Marker for a nested sub-record spawned from this parameter slot;
    /// its text is the sub-record's synthetic identifier.
    Sub,
    /// Explicitly omitted value (`$`). Kept so positions stay meaningful.
    Omitted,
    /// Placeholder spanning a run of malformed tokens.
    Error,
}

impl ArgKind {
    /// Check if this kind is a numeric literal.
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Real)
    }

    /// Check if this kind stands in for a missing or unusable value.
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Omitted | Self::Error)
    }

    /// Check if this kind references another record.
    pub const fn is_reference(&self) -> bool {
        matches!(self, Self::Ident | Self::Sub)
    }
}

// =============================================================================
// RECORD
// =============================================================================

/// One parsed entity instance.
///
/// Records chain into the flat sequential list through `next`; their
/// arguments chain from `arg_head` to `arg_tail` in file order.
pub(crate) struct Record {
    /// Entity identifier like `#123`, or a synthetic `$n` for sub-records.
    pub ident: Option<TextSlice>,
    /// Entity type name like `ADVANCED_FACE`. Absent until `set_type`.
    pub type_name: Option<TextSlice>,
    /// First argument in file order.
    pub arg_head: Option<ArgHandle>,
    /// Last argument, for O(1) tail append.
    pub arg_tail: Option<ArgHandle>,
    /// Successor in the flat sequential list.
    pub next: Option<RecordHandle>,
    /// Most recent nested sub-record spawned from this record's arguments.
    pub sub_record: Option<RecordHandle>,
    /// Position in the flat list, assigned at finalization (1-based).
    pub ordinal: u32,
    /// Number of arguments appended so far.
    pub arg_count: u32,
}

impl Record {
    /// Create a fresh record with no arguments and no flat-list links.
    pub fn new(ident: Option<TextSlice>, type_name: Option<TextSlice>) -> Self {
        Self {
            ident,
            type_name,
            arg_head: None,
            arg_tail: None,
            next: None,
            sub_record: None,
            ordinal: 0,
            arg_count: 0,
        }
    }
}

// =============================================================================
// ARGUMENT
// =============================================================================

/// One parsed parameter value, chained to its successor within one record.
pub(crate) struct Argument {
    /// Structural kind tag.
    pub kind: ArgKind,
    /// Interned text of the value.
    pub value: TextSlice,
    /// Next argument of the same record, in insertion order.
    pub next: Option<ArgHandle>,
}

// =============================================================================
// TESTS
// =============================================================================
