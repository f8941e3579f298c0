//! Cursors over the backing map and immutable sequences, the lazy `map`
//! iterator, and the iteration drivers used by builtins.
//!
//! Drivers are the only code that consumes the end-of-sequence signal:
//! `next_item` turns `StopIteration` into `None`, and every other error
//! propagates unchanged.

use std::slice;

use tracing::trace;

use super::dict::Dict;
use super::function::CallArgs;
use super::heap::Shared;
use super::Value;
use crate::context::Context;
use crate::errors::{not_callable, RtError, RtResult};

struct KeyCursor {
    dict: Shared<Dict>,
    index: usize,
}

/// Live cursor over a backing map's key sequence.
///
/// Used for both set elements and dict keys. Position is a slot in the
/// map's entry vector, so keys added during iteration are observed and
/// removed keys are skipped.
#[derive(Clone)]
pub struct KeyIterator(Shared<KeyCursor>);

impl KeyIterator {
    pub(super) fn new(dict: Shared<Dict>) -> Self {
        KeyIterator(Shared::new(KeyCursor { dict, index: 0 }))
    }

    /// Next key, or the end-of-sequence signal.
    pub fn next(&self) -> RtResult {
        let mut cursor = self.0.borrow_mut();
        let (slot, key) = cursor
            .dict
            .borrow()
            .next_key(cursor.index)
            .map(|(slot, key)| (slot, key.clone()))
            .ok_or_else(RtError::stop_iteration)?;
        cursor.index = slot + 1;
        Ok(key)
    }

    pub fn ptr_eq(&self, other: &KeyIterator) -> bool {
        self.0.ptr_eq(&other.0)
    }

    pub(super) fn addr(&self) -> usize {
        self.0.addr()
    }
}

struct SeqCursor {
    items: Vec<Value>,
    index: usize,
}

/// Cursor over a snapshot of a tuple, string or byte string.
#[derive(Clone)]
pub struct SeqIterator(Shared<SeqCursor>);

impl SeqIterator {
    pub(super) fn new(items: Vec<Value>) -> Self {
        SeqIterator(Shared::new(SeqCursor { items, index: 0 }))
    }

    pub fn next(&self) -> RtResult {
        let mut cursor = self.0.borrow_mut();
        let item = cursor
            .items
            .get(cursor.index)
            .cloned()
            .ok_or_else(RtError::stop_iteration)?;
        cursor.index += 1;
        Ok(item)
    }

    pub fn ptr_eq(&self, other: &SeqIterator) -> bool {
        self.0.ptr_eq(&other.0)
    }

    pub(super) fn addr(&self) -> usize {
        self.0.addr()
    }
}

struct MapState {
    func: Value,
    source: Value,
    // Resolved on the first `next`.
    iter: Option<Value>,
}

/// Lazy `map(func, iterable)`.
///
/// Single pass, no buffering: each `next` pulls exactly one element from the
/// source iterator and applies `func` to it. The callable is re-checked on
/// every step. Once the source is exhausted every further `next` reports
/// end-of-sequence again.
#[derive(Clone)]
pub struct MapIterator(Shared<MapState>);

impl MapIterator {
    pub(super) fn new(func: Value, source: Value) -> Self {
        MapIterator(Shared::new(MapState {
            func,
            source,
            iter: None,
        }))
    }

    pub fn next(&self, cx: &Context) -> RtResult {
        let iter = self.source_iter()?;
        let func = self.0.borrow().func.clone();
        if !func.is_callable() {
            return Err(not_callable(&func));
        }
        let item = iter.next(cx)?;
        func.call(cx, CallArgs::positional(slice::from_ref(&item)))
    }

    fn source_iter(&self) -> RtResult {
        if let Some(iter) = &self.0.borrow().iter {
            return Ok(iter.clone());
        }
        let source = self.0.borrow().source.clone();
        let iter = source.iterate()?;
        trace!(kind = source.type_name(), "map source resolved");
        self.0.borrow_mut().iter = Some(iter.clone());
        Ok(iter)
    }

    pub fn ptr_eq(&self, other: &MapIterator) -> bool {
        self.0.ptr_eq(&other.0)
    }

    pub(super) fn addr(&self) -> usize {
        self.0.addr()
    }
}

// Drivers

/// Run `f` on every element of `iterable`.
///
/// End-of-sequence terminates the loop; any other error, from the iterator
/// or from `f`, is returned as is.
pub fn for_each<F>(cx: &Context, iterable: &Value, mut f: F) -> RtResult<()>
where
    F: FnMut(Value) -> RtResult<()>,
{
    let iter = iterable.iterate()?;
    while let Some(item) = iter.next_item(cx)? {
        f(item)?;
    }
    Ok(())
}

/// Drain `iterable` into a vector.
pub fn collect(cx: &Context, iterable: &Value) -> RtResult<Vec<Value>> {
    let mut items = Vec::with_capacity(iterable.raw_len().unwrap_or(0));
    for_each(cx, iterable, |item| {
        items.push(item);
        Ok(())
    })?;
    Ok(items)
}

#[cfg(test)]
mod tests;
