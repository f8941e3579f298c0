//! The `set` and `frozenset` kinds.
//!
//! Both wrap a backing `Dict` whose keys and values are the stored element,
//! so uniqueness and membership come from the map's key matching. The kind
//! (`Kind::Set` or `Kind::FrozenSet`) is passed in by the caller and only
//! changes type names, mutability and the kind of algebra results.
//!
//! Ordering compares cardinality only, and the in-place algebra operators
//! both update the receiver and return a new set.

use num_traits::ToPrimitive;
use tracing::trace;

use super::dict::Dict;
use super::heap::Shared;
use super::iterator::{collect, KeyIterator};
use super::{join_repr, Value};
use crate::context::Context;
use crate::errors::{
    cant_multiply_sequence, complex_floor, complex_mod, does_not_support_indexing,
    expected_at_most, index_too_large, no_such_attribute, not_iterable, not_subscriptable,
    takes_exactly_one, takes_no_arguments, unorderable, unsupported_operand, RtError, RtResult,
};
use crate::kind::{Kind, KindSet};
use crate::ops::{BinaryOp, CompareOp};

/// Storage shared by `set` and `frozenset` values.
#[derive(Clone)]
pub struct SetValue(Shared<Dict>);

impl SetValue {
    pub(super) fn new() -> Self {
        SetValue(Shared::new(Dict::new()))
    }

    /// Build from elements, collapsing duplicates. Fails on an unhashable element.
    pub(super) fn from_elements(items: Vec<Value>) -> RtResult<Self> {
        let set = SetValue::new();
        set.update_from(items)?;
        Ok(set)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Copy of the current elements in backing-map order.
    pub fn elements(&self) -> Vec<Value> {
        self.0.borrow().keys().cloned().collect()
    }

    /// `item in s`. Fails only if `item` is unhashable.
    pub fn contains(&self, item: &Value) -> RtResult<bool> {
        self.0.borrow().contains_key(item)
    }

    /// `s.add(item)`.
    pub fn add(&self, item: Value) -> RtResult<()> {
        let hash = item.hash_key()?;
        self.0.borrow_mut().insert_hashed(hash, item.clone(), item);
        Ok(())
    }

    /// `s.remove(item)`; a missing element is the backing map's `KeyError`.
    pub fn remove(&self, item: &Value) -> RtResult<()> {
        self.0.borrow_mut().remove(item).map(drop)
    }

    /// Insert every element of `items`.
    pub fn update_from(&self, items: Vec<Value>) -> RtResult<()> {
        for item in items {
            self.add(item)?;
        }
        Ok(())
    }

    /// `s.update(source)`.
    ///
    /// Only sets, frozensets, lists, strings and tuples are accepted; the
    /// source is snapshotted first so `s.update(s)` is well defined.
    pub fn update(&self, source: &Value) -> RtResult<()> {
        let items = match source {
            Value::Set(s) | Value::FrozenSet(s) => s.elements(),
            Value::List(list) => list.snapshot(),
            Value::Tuple(items) => items.to_vec(),
            Value::Str(s) => s.chars().map(Value::string).collect(),
            _ => return Err(not_iterable(source)),
        };
        self.update_from(items)
    }

    /// `s.copy()`.
    pub fn copy(&self) -> SetValue {
        SetValue(Shared::new(self.0.borrow().clone()))
    }

    pub fn ptr_eq(&self, other: &SetValue) -> bool {
        self.0.ptr_eq(&other.0)
    }

    pub(super) fn cursor(&self) -> KeyIterator {
        KeyIterator::new(self.0.clone())
    }

    pub(super) fn hash_xor(&self) -> u64 {
        self.0.borrow().hash_xor()
    }

    /// Same cardinality and every element of `self` is in `other`.
    pub(super) fn set_equals(&self, other: &SetValue) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        self.len() == other.len()
            && self
                .elements()
                .iter()
                .all(|item| matches!(other.contains(item), Ok(true)))
    }

    pub(super) fn repr(&self, kind: Kind) -> String {
        let body = join_repr(self.0.borrow().keys());
        match (kind, self.is_empty()) {
            (Kind::FrozenSet, true) => "frozenset()".to_string(),
            (Kind::FrozenSet, false) => format!("frozenset({{{body}}})"),
            (_, true) => "set()".to_string(),
            (_, false) => format!("{{{body}}}"),
        }
    }

    // Comparison

    pub(super) fn compare(&self, kind: Kind, op: CompareOp, other: &Value) -> RtResult<bool> {
        let other_set = as_any_set(other);
        match op {
            CompareOp::Eq => Ok(other_set.is_some_and(|o| self.set_equals(o))),
            CompareOp::Ne => Ok(!other_set.is_some_and(|o| self.set_equals(o))),
            _ => match other_set {
                Some(o) => Ok(op.test(self.len().cmp(&o.len()))),
                None => Err(unorderable(op, kind.name(), other.type_name())),
            },
        }
    }

    // Algebra

    /// Elements of `self` not in `other`.
    fn difference(&self, other: &SetValue) -> RtResult<Vec<Value>> {
        let mut out = Vec::new();
        for item in self.elements() {
            if !other.contains(&item)? {
                out.push(item);
            }
        }
        Ok(out)
    }

    /// Elements of `self` also in `other`.
    fn intersection(&self, other: &SetValue) -> RtResult<Vec<Value>> {
        let mut out = Vec::new();
        for item in self.elements() {
            if other.contains(&item)? {
                out.push(item);
            }
        }
        Ok(out)
    }

    /// Elements in exactly one of `self` and `other`.
    fn symmetric_difference(&self, other: &SetValue) -> RtResult<Vec<Value>> {
        let mut out = self.difference(other)?;
        out.extend(other.difference(self)?);
        Ok(out)
    }

    /// Elements of `self` followed by elements of `other`.
    fn union(&self, other: &SetValue) -> Vec<Value> {
        let mut out = self.elements();
        out.extend(other.elements());
        out
    }

    fn algebra(&self, op: BinaryOp, other: &SetValue) -> Option<RtResult<Vec<Value>>> {
        match op {
            BinaryOp::Sub => Some(self.difference(other)),
            BinaryOp::And => Some(self.intersection(other)),
            BinaryOp::Xor => Some(self.symmetric_difference(other)),
            BinaryOp::Or => Some(Ok(self.union(other))),
            _ => None,
        }
    }

    pub(super) fn binary_op(&self, kind: Kind, op: BinaryOp, other: &Value) -> RtResult {
        if let Some(o) = as_any_set(other) {
            if let Some(result) = self.algebra(op, o) {
                return wrap(kind, result?);
            }
        }
        Err(reject(kind, op, false, other))
    }

    /// In-place algebra on a `set`.
    ///
    /// `-=`, `^=` and `|=` add the computed elements to the receiver and
    /// return a new set of those elements. `&=` returns a new intersection
    /// without touching the receiver. A `frozenset` receiver is never
    /// mutated.
    pub(super) fn inplace_op(&self, kind: Kind, op: BinaryOp, other: &Value) -> RtResult {
        let Some(o) = as_any_set(other) else {
            return Err(reject(kind, op, true, other));
        };
        let Some(result) = self.algebra(op, o) else {
            return Err(reject(kind, op, true, other));
        };
        let elements = result?;
        if kind == Kind::Set && op != BinaryOp::And {
            trace!(op = op.symbol(), count = elements.len(), "set in-place update");
            self.update_from(elements.clone())?;
        }
        wrap(kind, elements)
    }

    // Subscripting

    /// Sets are never subscriptable; the message depends on the index.
    pub(super) fn get_item(&self, kind: Kind, index: &Value) -> RtResult {
        Err(match index {
            Value::Bool(_) => does_not_support_indexing(kind.name()),
            Value::Int(n) if n.to_i64().is_none() => index_too_large(),
            Value::Int(_) => does_not_support_indexing(kind.name()),
            _ => not_subscriptable(kind.name()),
        })
    }

    // Methods

    pub(super) fn call_method(&self, kind: Kind, name: &str, args: &[Value]) -> RtResult {
        match (kind, name) {
            (Kind::Set, "add") => {
                let [item] = args else {
                    return Err(takes_exactly_one("add", args.len()));
                };
                self.add(item.clone())?;
                Ok(Value::None)
            }
            (Kind::Set, "remove") => {
                let [item] = args else {
                    return Err(takes_exactly_one("remove", args.len()));
                };
                self.remove(item)?;
                Ok(Value::None)
            }
            (Kind::Set, "update") => {
                let [source] = args else {
                    return Err(takes_exactly_one("update", args.len()));
                };
                self.update(source)?;
                Ok(Value::None)
            }
            (_, "copy") => {
                if !args.is_empty() {
                    return Err(takes_no_arguments("copy", args.len()));
                }
                Ok(with_kind(kind, self.copy()))
            }
            _ => Err(no_such_attribute(kind.name(), name)),
        }
    }
}

fn as_any_set(value: &Value) -> Option<&SetValue> {
    match value {
        Value::Set(s) | Value::FrozenSet(s) => Some(s),
        _ => None,
    }
}

fn with_kind(kind: Kind, set: SetValue) -> Value {
    match kind {
        Kind::FrozenSet => Value::FrozenSet(set),
        _ => Value::Set(set),
    }
}

fn wrap(kind: Kind, elements: Vec<Value>) -> RtResult {
    Ok(with_kind(kind, SetValue::from_elements(elements)?))
}

/// Rejection message for an operator a set does not support against `other`.
fn reject(kind: Kind, op: BinaryOp, inplace: bool, other: &Value) -> RtError {
    match op {
        BinaryOp::FloorDiv if matches!(other, Value::Complex { .. }) => complex_floor(),
        BinaryOp::Mod if matches!(other, Value::Complex { .. }) => complex_mod(),
        BinaryOp::Mul if !inplace && other.is_instance(KindSet::SEQUENCES) => {
            cant_multiply_sequence(kind.name())
        }
        _ => unsupported_operand(op, inplace, kind.name(), other.type_name()),
    }
}

/// `set(...)` / `frozenset(...)`: empty, or the elements of one iterable.
pub(super) fn construct(cx: &Context, kind: Kind, args: &[Value]) -> RtResult {
    let set = SetValue::new();
    match args {
        [] => {}
        [source] if source.is_instance(KindSet::SET_UPDATABLE) => set.update(source)?,
        [source] => {
            let items = collect(cx, source)?;
            trace!(count = items.len(), kind = source.type_name(), "set from iterable");
            set.update_from(items)?;
        }
        _ => return Err(expected_at_most(kind.name(), 1, args.len())),
    }
    Ok(with_kind(kind, set))
}

#[cfg(test)]
mod tests;
