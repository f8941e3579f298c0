//! The value protocol: the fixed operation set every kind answers.
//!
//! Each operation dispatches on the receiver's kind. Containers with their
//! own rules (list, set, frozenset, dict) get their own implementation;
//! scalars and immutable sequences share `scalar`. An operation a kind does
//! not support fails with a `TypeError` naming the kind.

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use super::function::CallArgs;
use super::iterator::SeqIterator;
use super::scalar::{self, repeat_count, repeat_items};
use super::slice::normalize_index;
use super::Value;
use crate::config::CompatVersion;
use crate::context::Context;
use crate::errors::{
    argument_not_iterable, byte_out_of_range, bytes_like_required, indices_must_be,
    integer_required, key_error, no_such_attribute, not_an_iterator, not_callable, not_iterable,
    not_subscriptable, requires_string_operand, takes_exactly_one, RtResult,
};
use crate::kind::{Kind, KindSet};
use crate::ops::{BinaryOp, CompareOp, UnaryOp};

impl Value {
    // Comparison

    /// `self <op> other`.
    pub fn compare(&self, op: CompareOp, other: &Value) -> RtResult<bool> {
        match self {
            Value::List(list) => list.compare(op, other),
            Value::Set(set) => set.compare(Kind::Set, op, other),
            Value::FrozenSet(set) => set.compare(Kind::FrozenSet, op, other),
            _ => scalar::compare(self, op, other),
        }
    }

    // Operators

    /// `self <op> other`, producing a new value.
    pub fn binary_op(&self, op: BinaryOp, other: &Value) -> RtResult {
        match self {
            Value::List(list) => list.binary_op(op, other),
            Value::Set(set) => set.binary_op(Kind::Set, op, other),
            Value::FrozenSet(set) => set.binary_op(Kind::FrozenSet, op, other),
            _ => scalar::binary_op(op, false, self, other),
        }
    }

    /// `self <op>= other`.
    ///
    /// Mutable containers update themselves and usually return the receiver;
    /// immutable kinds fall back to the plain operator.
    pub fn inplace_op(&self, op: BinaryOp, other: &Value) -> RtResult {
        match self {
            Value::List(list) => list.inplace_op(op, other),
            Value::Set(set) => set.inplace_op(Kind::Set, op, other),
            Value::FrozenSet(set) => set.inplace_op(Kind::FrozenSet, op, other),
            Value::Bytearray(bytes) => match (op, other.to_byte_vec()) {
                (BinaryOp::Add, Some(tail)) => {
                    bytes.borrow_mut().extend(tail);
                    Ok(self.clone())
                }
                (BinaryOp::Mul, _) if !other.is_instance(KindSet::SEQUENCES) => {
                    let count = repeat_count(other)?;
                    let repeated = repeat_items(&bytes.borrow()[..], count)?;
                    *bytes.borrow_mut() = repeated;
                    Ok(self.clone())
                }
                _ => scalar::binary_op(op, true, self, other),
            },
            _ => scalar::binary_op(op, true, self, other),
        }
    }

    /// `<op> self`.
    pub fn unary_op(&self, op: UnaryOp) -> RtResult {
        scalar::unary_op(op, self)
    }

    // Containment

    /// `item in self`.
    pub fn contains(&self, item: &Value) -> RtResult<bool> {
        match self {
            Value::List(list) => Ok(list.contains(item)),
            Value::Set(set) | Value::FrozenSet(set) => set.contains(item),
            Value::Dict(dict) => dict.contains(item),
            Value::Tuple(items) => Ok(items.iter().any(|x| x.equals(item))),
            Value::Str(s) => match item {
                Value::Str(needle) => Ok(s.contains(&**needle)),
                _ => Err(requires_string_operand(item)),
            },
            Value::Bytes(_) | Value::Bytearray(_) => {
                let haystack = self.to_byte_vec().unwrap_or_default();
                bytes_contain(&haystack, item)
            }
            Value::HostObject(entries) => {
                Ok(item
                    .as_str()
                    .is_some_and(|name| entries.iter().any(|(k, _)| k == name)))
            }
            _ => Err(argument_not_iterable(self)),
        }
    }

    // Subscripting

    /// `self[index]`.
    pub fn get_item(&self, cx: &Context, index: &Value) -> RtResult {
        match self {
            Value::List(list) => list.get_item(cx, index),
            Value::Set(set) => set.get_item(Kind::Set, index),
            Value::FrozenSet(set) => set.get_item(Kind::FrozenSet, index),
            Value::Dict(dict) => dict.get_item(index),
            Value::Tuple(items) => match index {
                Value::Slice(slice) => Ok(Value::tuple(slice.apply(items)?)),
                _ => {
                    let pos = sequence_index(index, items.len(), "tuple", cx.config().compat)?;
                    Ok(items[pos].clone())
                }
            },
            Value::Str(s) => {
                let chars: Vec<char> = s.chars().collect();
                match index {
                    Value::Slice(slice) => {
                        Ok(Value::string(slice.apply(&chars)?.into_iter().collect::<String>()))
                    }
                    // Strings keep the narrower wording in every mode.
                    _ => {
                        let pos =
                            sequence_index(index, chars.len(), "string", CompatVersion::Py34)?;
                        Ok(Value::string(chars[pos]))
                    }
                }
            }
            Value::Bytes(b) => match index {
                Value::Slice(slice) => Ok(Value::bytes(slice.apply(b)?)),
                _ => {
                    let pos = sequence_index(index, b.len(), "bytes", cx.config().compat)?;
                    Ok(Value::int(i64::from(b[pos])))
                }
            },
            Value::Bytearray(b) => {
                let bytes = b.borrow();
                match index {
                    Value::Slice(slice) => Ok(Value::bytearray(slice.apply(&bytes)?)),
                    _ => {
                        let pos =
                            sequence_index(index, bytes.len(), "bytearray", cx.config().compat)?;
                        Ok(Value::int(i64::from(bytes[pos])))
                    }
                }
            }
            Value::HostObject(entries) => {
                let name = index.as_str();
                entries
                    .iter()
                    .find(|(k, _)| Some(k.as_str()) == name)
                    .map(|(_, v)| v.clone())
                    .ok_or_else(|| key_error(index))
            }
            _ => Err(not_subscriptable(self.type_name())),
        }
    }

    // Iteration

    /// `iter(self)`.
    ///
    /// Lists, sets and dicts yield live cursors; tuples, strings and byte
    /// strings yield cursors over a snapshot. An iterator is its own
    /// iterator.
    pub fn iterate(&self) -> RtResult {
        match self {
            Value::List(list) => Ok(Value::ListIterator(list.cursor())),
            Value::Set(set) | Value::FrozenSet(set) => Ok(Value::SetIterator(set.cursor())),
            Value::Dict(dict) => Ok(Value::DictKeyIterator(dict.cursor())),
            Value::Tuple(items) => Ok(Value::SeqIterator(SeqIterator::new(items.to_vec()))),
            Value::Str(s) => Ok(Value::SeqIterator(SeqIterator::new(
                s.chars().map(Value::string).collect(),
            ))),
            Value::Bytes(_) | Value::Bytearray(_) => {
                let bytes = self.to_byte_vec().unwrap_or_default();
                Ok(Value::SeqIterator(SeqIterator::new(
                    bytes.into_iter().map(|b| Value::int(i64::from(b))).collect(),
                )))
            }
            _ if self.is_instance(KindSet::ITERATORS) => Ok(self.clone()),
            _ => Err(not_iterable(self)),
        }
    }

    /// `next(self)`: the next element, or a `StopIteration` error.
    pub fn next(&self, cx: &Context) -> RtResult {
        match self {
            Value::ListIterator(it) => it.next(),
            Value::SetIterator(it) | Value::DictKeyIterator(it) => it.next(),
            Value::SeqIterator(it) => it.next(),
            Value::Map(it) => it.next(cx),
            _ => Err(not_an_iterator(self)),
        }
    }

    /// `next` with the end-of-sequence signal turned into `None`.
    ///
    /// Only iteration drivers should call this; every other error passes
    /// through.
    pub fn next_item(&self, cx: &Context) -> RtResult<Option<Value>> {
        match self.next(cx) {
            Ok(item) => Ok(Some(item)),
            Err(err) if err.is_stop_iteration() => Ok(None),
            Err(err) => Err(err),
        }
    }

    // Calls

    /// Whether `call` can succeed on this value.
    #[inline]
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Builtin(_))
    }

    /// `self(*args, **kwargs)`.
    pub fn call(&self, cx: &Context, args: CallArgs<'_>) -> RtResult {
        match self {
            Value::Builtin(f) => f.call(cx, args),
            _ => Err(not_callable(self)),
        }
    }

    /// `self.name(*args)`.
    pub fn call_method(&self, cx: &Context, name: &str, args: &[Value]) -> RtResult {
        match self {
            Value::List(list) => list.call_method(cx, name, args),
            Value::Set(set) => set.call_method(Kind::Set, name, args),
            Value::FrozenSet(set) => set.call_method(Kind::FrozenSet, name, args),
            Value::Dict(dict) => dict.call_method(name, args),
            Value::Bytearray(bytes) if name == "append" => {
                let [item] = args else {
                    return Err(takes_exactly_one("append", args.len()));
                };
                bytes.borrow_mut().push(byte_value(item)?);
                Ok(Value::None)
            }
            _ => Err(no_such_attribute(self.type_name(), name)),
        }
    }
}

/// Resolve an integer (or bool) subscript of an immutable sequence.
fn sequence_index(
    index: &Value,
    len: usize,
    what: &str,
    compat: CompatVersion,
) -> RtResult<usize> {
    match index {
        Value::Int(n) => normalize_index(n, len, what),
        Value::Bool(b) => normalize_index(&BigInt::from(u8::from(*b)), len, what),
        _ => Err(indices_must_be(what, compat, index)),
    }
}

/// An integer usable as a single byte.
fn byte_value(item: &Value) -> RtResult<u8> {
    match item {
        Value::Int(n) => n.to_u8().ok_or_else(byte_out_of_range),
        Value::Bool(b) => Ok(u8::from(*b)),
        _ => Err(integer_required(item)),
    }
}

/// `item in <bytes>`: a single byte value or a contiguous subsequence.
fn bytes_contain(haystack: &[u8], item: &Value) -> RtResult<bool> {
    if matches!(item, Value::Int(_) | Value::Bool(_)) {
        let byte = byte_value(item)?;
        return Ok(haystack.contains(&byte));
    }
    let Some(needle) = item.to_byte_vec() else {
        return Err(bytes_like_required(item));
    };
    if needle.is_empty() {
        return Ok(true);
    }
    Ok(haystack.windows(needle.len()).any(|w| w == needle.as_slice()))
}
