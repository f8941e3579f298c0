//! The `list` kind and its live iterator.
//!
//! A list is a shared, growable array. Every holder of a `ListValue`
//! (including `ListIterator`s) sees mutation immediately. Only the
//! protocol-sanctioned operations are exposed; the backing `Vec` never
//! leaves this module.

use tracing::trace;

use super::heap::Shared;
use super::iterator::collect;
use super::scalar::{repeat_count, repeat_items};
use super::slice::normalize_index;
use super::{join_repr, Value};
use crate::context::Context;
use crate::errors::{
    can_only_concatenate, index_out_of_range, indices_must_be, no_such_attribute, not_in_list,
    not_iterable, pop_from_empty_list, takes_at_most_one, takes_exactly_one, takes_no_arguments,
    unorderable, unsupported_operand, RtError, RtResult,
};
use crate::ops::{BinaryOp, CompareOp};

/// A `list` value.
#[derive(Clone)]
pub struct ListValue(Shared<Vec<Value>>);

impl ListValue {
    pub(super) fn new(items: Vec<Value>) -> Self {
        ListValue(Shared::new(items))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Element at `index`, if present.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Copy of the current elements.
    pub fn snapshot(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &ListValue) -> bool {
        self.0.ptr_eq(&other.0)
    }

    /// `list.append(value)`.
    pub fn append(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    /// `list.extend(values)`; a no-op for an empty batch.
    pub fn extend(&self, values: Vec<Value>) {
        if !values.is_empty() {
            self.0.borrow_mut().extend(values);
        }
    }

    /// `list.copy()`: a shallow copy.
    pub fn copy(&self) -> ListValue {
        ListValue::new(self.snapshot())
    }

    /// `list.pop()`.
    pub fn pop(&self) -> RtResult {
        self.0.borrow_mut().pop().ok_or_else(pop_from_empty_list)
    }

    /// `list.remove(value)`: drop the first element equal to `value`.
    pub fn remove(&self, value: &Value) -> RtResult<()> {
        let pos = self
            .0
            .borrow()
            .iter()
            .position(|item| item == value)
            .ok_or_else(not_in_list)?;
        self.0.borrow_mut().remove(pos);
        Ok(())
    }

    /// Live cursor starting at the first element.
    pub fn cursor(&self) -> ListIterator {
        ListIterator(Shared::new(ListCursor {
            list: self.clone(),
            index: 0,
        }))
    }

    /// Host-level membership.
    pub(super) fn contains(&self, item: &Value) -> bool {
        self.0.borrow().iter().any(|x| x == item)
    }

    pub(super) fn repr(&self) -> String {
        format!("[{}]", join_repr(self.0.borrow().iter()))
    }

    // Comparison

    pub(super) fn compare(&self, op: CompareOp, other: &Value) -> RtResult<bool> {
        let same = || matches!(other, Value::List(o) if o == self);
        match op {
            CompareOp::Eq => return Ok(same()),
            CompareOp::Ne => return Ok(!same()),
            _ => {}
        }
        let Value::List(other) = other else {
            return Err(unorderable(op, "list", other.type_name()));
        };

        let left = self.snapshot();
        let right = other.snapshot();
        if left.is_empty() && !right.is_empty() {
            return Ok(matches!(op, CompareOp::Lt | CompareOp::Le));
        }
        for (i, a) in left.iter().enumerate() {
            let Some(b) = right.get(i) else {
                // Right side ran out first.
                return Ok(matches!(op, CompareOp::Gt | CompareOp::Ge));
            };
            if a.compare(CompareOp::Ne, b)? {
                return a.compare(op, b);
            }
        }
        Ok(op.test(left.len().cmp(&right.len())))
    }

    // Binary Operators

    pub(super) fn binary_op(&self, op: BinaryOp, other: &Value) -> RtResult {
        match op {
            BinaryOp::Add => match other {
                Value::List(o) => {
                    let mut items = self.snapshot();
                    items.extend(o.snapshot());
                    Ok(Value::list(items))
                }
                _ => Err(can_only_concatenate("list", other)),
            },
            BinaryOp::Mul => {
                let count = repeat_count(other)?;
                Ok(Value::list(repeat_items(&self.snapshot()[..], count)?))
            }
            _ => Err(unsupported_operand(op, false, "list", other.type_name())),
        }
    }

    /// In-place operators. `+=` and `*=` (for positive counts and `True`)
    /// mutate and return the receiver itself.
    pub(super) fn inplace_op(&self, op: BinaryOp, other: &Value) -> RtResult {
        match op {
            BinaryOp::Add => {
                let items = match other {
                    Value::List(o) => o.snapshot(),
                    Value::Tuple(items) => items.to_vec(),
                    Value::Str(s) => s.chars().map(Value::string).collect(),
                    _ => return Err(not_iterable(other)),
                };
                self.extend(items);
                Ok(Value::List(self.clone()))
            }
            BinaryOp::Mul => match other {
                Value::Bool(true) => Ok(Value::List(self.clone())),
                Value::Bool(false) => Ok(Value::list(Vec::new())),
                _ => {
                    let count = repeat_count(other)?;
                    if count == 0 {
                        return Ok(Value::list(Vec::new()));
                    }
                    // The pre-mutation elements, replayed `count` times in total.
                    let repeated = repeat_items(&self.snapshot()[..], count)?;
                    *self.0.borrow_mut() = repeated;
                    Ok(Value::List(self.clone()))
                }
            },
            _ => Err(unsupported_operand(op, true, "list", other.type_name())),
        }
    }

    // Subscripting

    pub(super) fn get_item(&self, cx: &Context, index: &Value) -> RtResult {
        match index {
            Value::Int(n) => {
                let items = self.0.borrow();
                let pos = normalize_index(n, items.len(), "list")?;
                Ok(items[pos].clone())
            }
            Value::Bool(b) => {
                let pos = usize::from(*b);
                self.get(pos).ok_or_else(|| index_out_of_range("list"))
            }
            Value::Slice(slice) => Ok(Value::list(slice.apply(&self.snapshot())?)),
            _ => Err(indices_must_be("list", cx.config().compat, index)),
        }
    }

    // Methods

    pub(super) fn call_method(&self, cx: &Context, name: &str, args: &[Value]) -> RtResult {
        match name {
            "append" => {
                let [value] = args else {
                    return Err(takes_exactly_one("append", args.len()));
                };
                self.append(value.clone());
                Ok(Value::None)
            }
            "extend" => {
                let [source] = args else {
                    return Err(takes_exactly_one("extend", args.len()));
                };
                // Collect first so that `x.extend(x)` terminates.
                let items = match source {
                    Value::List(o) => o.snapshot(),
                    _ => collect(cx, source)?,
                };
                trace!(count = items.len(), "list.extend");
                self.extend(items);
                Ok(Value::None)
            }
            "copy" => {
                if !args.is_empty() {
                    return Err(takes_no_arguments("copy", args.len()));
                }
                Ok(Value::List(self.copy()))
            }
            "pop" => {
                if !args.is_empty() {
                    return Err(takes_no_arguments("pop", args.len()));
                }
                self.pop()
            }
            "remove" => {
                let [value] = args else {
                    return Err(takes_exactly_one("remove", args.len()));
                };
                self.remove(value)?;
                Ok(Value::None)
            }
            _ => Err(no_such_attribute("list", name)),
        }
    }
}

impl PartialEq for ListValue {
    /// Host-level equality: same length, slot-by-slot host equality.
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0.borrow() == *other.0.borrow()
    }
}

/// `list(...)`: empty, or a copy of one iterable's elements.
pub(super) fn construct(cx: &Context, args: &[Value]) -> RtResult {
    match args {
        [] => Ok(Value::list(Vec::new())),
        // Contiguous sources skip the iterator protocol.
        [Value::List(source)] => Ok(Value::list(source.snapshot())),
        [Value::Tuple(items)] => Ok(Value::list(items.to_vec())),
        [source] => {
            let items = collect(cx, source)?;
            trace!(count = items.len(), kind = source.type_name(), "list from iterable");
            Ok(Value::list(items))
        }
        _ => Err(takes_at_most_one("list", args.len())),
    }
}

struct ListCursor {
    list: ListValue,
    index: usize,
}

/// Live cursor over a list.
///
/// Reads the list at each step: elements appended during iteration are
/// observed, elements removed ahead of the cursor are skipped.
#[derive(Clone)]
pub struct ListIterator(Shared<ListCursor>);

impl ListIterator {
    /// Next element, or the end-of-sequence signal.
    pub fn next(&self) -> RtResult {
        let mut cursor = self.0.borrow_mut();
        let item = cursor
            .list
            .get(cursor.index)
            .ok_or_else(RtError::stop_iteration)?;
        cursor.index += 1;
        Ok(item)
    }

    pub fn ptr_eq(&self, other: &ListIterator) -> bool {
        self.0.ptr_eq(&other.0)
    }

    pub(super) fn addr(&self) -> usize {
        self.0.addr()
    }
}
