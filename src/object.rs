//! Tagged heap values.
//!
//! Every value the VM manipulates is a heap-allocated [`Object`] owned by the
//! collector's registry (see [`gc`](crate::gc)). Objects are immutable
//! between creation and reclamation: arithmetic produces new objects rather
//! than mutating operands.

use std::fmt::{self, Display};

/// Heap value variants.
#[derive(Clone, Debug, PartialEq)]
pub enum Object {
    /// Double-precision number.
    Number(f64),
    /// Text string.
    Str(String),
    /// Boolean.
    Boolean(bool),
    /// The null value.
    Null,
}

impl Object {
    /// Returns the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Number(_) => "Number",
            Object::Str(_) => "String",
            Object::Boolean(_) => "Boolean",
            Object::Null => "Null",
        }
    }

    /// Returns whether JUMP_IF_FALSE treats this value as false.
    ///
    /// Policy: only `Boolean(false)` and `Null` are falsy. Every number
    /// (including `0.0`), every string (including the empty string), and
    /// `Boolean(true)` are truthy.
    pub fn is_falsy(&self) -> bool {
        matches!(self, Object::Boolean(false) | Object::Null)
    }
}

/// Textual representation used by PRINT.
///
/// Numbers render as their native decimal representation, strings render
/// double-quoted, booleans as `true`/`false`, null as `null`.
impl Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Number(n) => write!(f, "{n}"),
            Object::Str(s) => write!(f, "\"{s}\""),
            Object::Boolean(b) => write!(f, "{b}"),
            Object::Null => write!(f, "null"),
        }
    }
}
