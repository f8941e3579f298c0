//! Error types for the value protocol.
//!
//! Every protocol operation returns `RtResult`. The error carries a closed
//! `ExcKind` (which exception class the surrounding engine should raise) and
//! the exact message text, which is part of the external contract.
//!
//! # Factory Functions
//!
//! Message families are built through the `#[cold]` factories below so the
//! wording lives in exactly one place. Containers never format error text
//! inline.

use std::fmt;

use crate::config::CompatVersion;
use crate::ops::{BinaryOp, CompareOp, UnaryOp};
use crate::value::Value;

/// Result of a protocol operation.
pub type RtResult<T = Value> = Result<T, RtError>;

/// Exception class an error maps to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExcKind {
    /// Wrong operand kind, wrong arity, unexpected keywords, unsupported operator.
    TypeError,
    /// Valid kind but semantically invalid value (e.g. zero slice step).
    ValueError,
    /// Index outside the addressable range.
    IndexError,
    /// Missing key in the backing map.
    KeyError,
    /// Result too large to allocate.
    MemoryError,
    /// Unknown method name on a kind.
    AttributeError,
    /// Documented contract that is intentionally not implemented.
    ///
    /// Callers must not retry; this is distinct from a defect.
    NotImplementedError,
    /// End-of-sequence signal. Only iteration drivers may consume it.
    StopIteration,
    /// The prompt facility reached end of input.
    EOFError,
    /// The engine invoked a builtin with a malformed argument frame.
    ///
    /// Indicates an integration defect, not a user mistake.
    CallingConvention,
}

impl ExcKind {
    /// Class name as the surrounding engine reports it.
    pub fn name(self) -> &'static str {
        match self {
            Self::TypeError => "TypeError",
            Self::ValueError => "ValueError",
            Self::IndexError => "IndexError",
            Self::KeyError => "KeyError",
            Self::MemoryError => "MemoryError",
            Self::AttributeError => "AttributeError",
            Self::NotImplementedError => "NotImplementedError",
            Self::StopIteration => "StopIteration",
            Self::EOFError => "EOFError",
            Self::CallingConvention => "CallingConventionError",
        }
    }
}

impl fmt::Display for ExcKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Protocol error.
#[derive(Clone, Debug, PartialEq)]
pub struct RtError {
    /// Exception class.
    pub kind: ExcKind,
    /// Exact message text (may be empty, e.g. for `StopIteration`).
    pub message: String,
}

impl RtError {
    /// Create an error of the given kind.
    pub fn new(kind: ExcKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for a `TypeError`.
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ExcKind::TypeError, message)
    }

    /// The end-of-sequence signal.
    pub fn stop_iteration() -> Self {
        Self::new(ExcKind::StopIteration, String::new())
    }

    /// Check if this error is the end-of-sequence signal.
    #[inline]
    pub fn is_stop_iteration(&self) -> bool {
        self.kind == ExcKind::StopIteration
    }

    /// Check the exception class.
    #[inline]
    pub fn is(&self, kind: ExcKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for RtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for RtError {}

// Operator Errors

/// Binary operator not supported for a kind pair.
///
/// `op` decides the spelling: `**` is reported as `** or pow()`, in-place
/// operators carry their trailing `=`.
#[cold]
pub fn unsupported_operand(op: BinaryOp, inplace: bool, left: &str, right: &str) -> RtError {
    RtError::type_error(format!(
        "unsupported operand type(s) for {}: '{left}' and '{right}'",
        op.error_symbol(inplace)
    ))
}

/// Unary operator not supported for a kind.
#[cold]
pub fn bad_unary_operand(op: UnaryOp, type_name: &str) -> RtError {
    RtError::type_error(format!(
        "bad operand type for unary {}: '{type_name}'",
        op.symbol()
    ))
}

/// Ordering comparison between kinds that have no order.
#[cold]
pub fn unorderable(op: CompareOp, left: &str, right: &str) -> RtError {
    RtError::type_error(format!(
        "unorderable types: {left}() {} {right}()",
        op.symbol()
    ))
}

/// Sequence repetition by something other than an integer.
#[cold]
pub fn cant_multiply_sequence(type_name: &str) -> RtError {
    RtError::type_error(format!(
        "can't multiply sequence by non-int of type '{type_name}'"
    ))
}

/// Sequence concatenation with a different kind.
#[cold]
pub fn can_only_concatenate(kind: &str, other: &Value) -> RtError {
    RtError::type_error(format!(
        "can only concatenate {kind} (not \"{}\") to {kind}",
        other.type_name()
    ))
}

/// Repetition whose result could not be allocated.
#[cold]
pub fn sequence_too_large() -> RtError {
    RtError::new(ExcKind::MemoryError, "")
}

/// Floor division involving a complex operand.
#[cold]
pub fn complex_floor() -> RtError {
    RtError::type_error("can't take floor of complex number.")
}

/// Modulo involving a complex operand.
#[cold]
pub fn complex_mod() -> RtError {
    RtError::type_error("can't mod complex numbers.")
}

// Iteration and Call Errors

/// Value cannot be iterated.
#[cold]
pub fn not_iterable(value: &Value) -> RtError {
    RtError::type_error(format!("'{}' object is not iterable", value.type_name()))
}

/// Membership test against a kind that cannot be searched.
#[cold]
pub fn argument_not_iterable(value: &Value) -> RtError {
    RtError::type_error(format!(
        "argument of type '{}' is not iterable",
        value.type_name()
    ))
}

/// Substring test with a non-string needle.
#[cold]
pub fn requires_string_operand(item: &Value) -> RtError {
    RtError::type_error(format!(
        "'in <string>' requires string as left operand, not {}",
        item.type_name()
    ))
}

/// Value has no `__next__`.
#[cold]
pub fn not_an_iterator(value: &Value) -> RtError {
    RtError::type_error(format!("'{}' object is not an iterator", value.type_name()))
}

/// Value cannot be called.
#[cold]
pub fn not_callable(value: &Value) -> RtError {
    RtError::type_error(format!("'{}' object is not callable", value.type_name()))
}

/// Value is not hashable, so it cannot key the backing map.
#[cold]
pub fn unhashable(value: &Value) -> RtError {
    RtError::type_error(format!("unhashable type: '{}'", value.type_name()))
}

/// Unknown method on a kind.
#[cold]
pub fn no_such_attribute(type_name: &str, name: &str) -> RtError {
    RtError::new(
        ExcKind::AttributeError,
        format!("'{type_name}' object has no attribute '{name}'"),
    )
}

/// Method called with the wrong number of positional arguments.
#[cold]
pub fn takes_exactly_one(name: &str, given: usize) -> RtError {
    RtError::type_error(format!(
        "{name}() takes exactly one argument ({given} given)"
    ))
}

/// Method that takes no arguments called with some.
#[cold]
pub fn takes_no_arguments(name: &str, given: usize) -> RtError {
    RtError::type_error(format!(
        "{name}() takes no arguments ({given} given)"
    ))
}

/// Callable that accepts zero or one positional argument.
#[cold]
pub fn takes_at_most_one(name: &str, given: usize) -> RtError {
    RtError::type_error(format!(
        "{name}() takes at most 1 argument ({given} given)"
    ))
}

/// Too many positional arguments, spelled `<label> expected at most N arguments`.
#[cold]
pub fn expected_at_most(label: &str, max: usize, given: usize) -> RtError {
    RtError::type_error(format!(
        "{label} expected at most {max} arguments, got {given}"
    ))
}

/// Too few positional arguments.
#[cold]
pub fn expected_at_least(label: &str, min: usize, given: usize) -> RtError {
    RtError::type_error(format!(
        "{label} expected at least {min} arguments, got {given}"
    ))
}

/// Positional argument count other than the required one.
#[cold]
pub fn expected_exactly(label: &str, count: usize, given: usize) -> RtError {
    RtError::type_error(format!(
        "{label} expected {count} arguments, got {given}"
    ))
}

/// Kind with no raw length.
#[cold]
pub fn no_len(value: &Value) -> RtError {
    RtError::type_error(format!(
        "object of type '{}' has no len()",
        value.type_name()
    ))
}

/// Builtin that rejects keyword arguments.
#[cold]
pub fn no_keyword_arguments(name: &str) -> RtError {
    RtError::type_error(format!("{name}() doesn't accept keyword arguments"))
}

/// The engine did not pass a positional argument frame.
#[cold]
pub fn calling_convention_not_used() -> RtError {
    RtError::new(ExcKind::CallingConvention, "calling convention not used.")
}

/// Documented overload that is intentionally unimplemented.
#[cold]
pub fn not_implemented(message: impl Into<String>) -> RtError {
    RtError::new(ExcKind::NotImplementedError, message)
}

// Index Errors

/// Integer index outside a sequence (`what` is `list`, `tuple`, `string`, ...).
#[cold]
pub fn index_out_of_range(what: &str) -> RtError {
    RtError::new(ExcKind::IndexError, format!("{what} index out of range"))
}

/// Integer that does not fit the platform index size.
#[cold]
pub fn index_too_large() -> RtError {
    RtError::new(
        ExcKind::IndexError,
        "cannot fit 'int' into an index-sized integer",
    )
}

/// Sequence subscripted by something that is neither an integer nor a slice.
///
/// `Py34` selects the narrower wording that does not mention slices.
#[cold]
pub fn indices_must_be(what: &str, compat: CompatVersion, index: &Value) -> RtError {
    let expected = match compat {
        CompatVersion::Py34 => "integers",
        CompatVersion::Py35 => "integers or slices",
    };
    RtError::type_error(format!(
        "{what} indices must be {expected}, not {}",
        index.type_name()
    ))
}

/// `pop()` on an empty list.
#[cold]
pub fn pop_from_empty_list() -> RtError {
    RtError::new(ExcKind::IndexError, "pop from empty list")
}

/// `remove()` of a value the list does not hold.
#[cold]
pub fn not_in_list() -> RtError {
    RtError::new(ExcKind::ValueError, "list.remove(x): x not in list")
}

/// Zero step in a slice.
#[cold]
pub fn zero_slice_step() -> RtError {
    RtError::new(ExcKind::ValueError, "slice step cannot be zero")
}

/// Key missing from the backing map. The message is the key's repr.
#[cold]
pub fn key_error(key: &Value) -> RtError {
    RtError::new(ExcKind::KeyError, key.repr())
}

/// Kind that never supports subscripting.
#[cold]
pub fn not_subscriptable(type_name: &str) -> RtError {
    RtError::type_error(format!("'{type_name}' object is not subscriptable"))
}

/// Kind that rejects integer indexing.
#[cold]
pub fn does_not_support_indexing(type_name: &str) -> RtError {
    RtError::type_error(format!("'{type_name}' object does not support indexing"))
}

// Byte Errors

/// Non-integer where a byte value is expected.
#[cold]
pub fn integer_required(value: &Value) -> RtError {
    RtError::type_error(format!(
        "an integer is required (got type {})",
        value.type_name()
    ))
}

/// Non-bytes operand of a byte-string containment test.
#[cold]
pub fn bytes_like_required(value: &Value) -> RtError {
    RtError::type_error(format!(
        "a bytes-like object is required, not '{}'",
        value.type_name()
    ))
}

/// Integer outside `0..=255` where a byte value is expected.
#[cold]
pub fn byte_out_of_range() -> RtError {
    RtError::new(ExcKind::ValueError, "byte must be in range(0, 256)")
}

#[cfg(test)]
mod tests;
