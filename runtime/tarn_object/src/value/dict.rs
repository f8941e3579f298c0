//! Backing map: insertion-ordered entries with a hash index.
//!
//! Keys are matched by `Value::hash_key` and then `Value::equals`, so `1`,
//! `1.0` and `True` address the same slot. Entries keep the hash they were
//! stored under. Removal leaves a tombstone, and the entry vector is compacted
//! once tombstones outnumber live entries.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::heap::Shared;
use super::iterator::KeyIterator;
use super::Value;
use crate::errors::{key_error, no_such_attribute, takes_no_arguments, RtResult};

#[derive(Clone)]
struct Entry {
    hash: u64,
    key: Value,
    value: Value,
}

/// Insertion-ordered associative storage.
#[derive(Clone, Default)]
pub struct Dict {
    // `None` marks a removed entry.
    entries: Vec<Option<Entry>>,
    // Hash -> positions in `entries`; collisions share a bucket.
    index: FxHashMap<u64, SmallVec<[usize; 1]>>,
    live: usize,
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    fn live_entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.entries.iter().flatten()
    }

    fn find(&self, hash: u64, key: &Value) -> Option<usize> {
        self.index
            .get(&hash)?
            .iter()
            .copied()
            .find(|&pos| self.entries[pos].as_ref().is_some_and(|e| e.key.equals(key)))
    }

    /// Look up `key`. Fails only if the key is unhashable.
    pub fn get(&self, key: &Value) -> RtResult<Option<&Value>> {
        let hash = key.hash_key()?;
        Ok(self
            .find(hash, key)
            .and_then(|pos| self.entries[pos].as_ref())
            .map(|e| &e.value))
    }

    pub fn contains_key(&self, key: &Value) -> RtResult<bool> {
        let hash = key.hash_key()?;
        Ok(self.find(hash, key).is_some())
    }

    /// Insert or replace. An existing key keeps its original key object.
    pub fn insert(&mut self, key: Value, value: Value) -> RtResult<()> {
        let hash = key.hash_key()?;
        self.insert_hashed(hash, key, value);
        Ok(())
    }

    /// Insert with a precomputed hash.
    pub(super) fn insert_hashed(&mut self, hash: u64, key: Value, value: Value) {
        match self.find(hash, &key) {
            Some(pos) => {
                if let Some(entry) = &mut self.entries[pos] {
                    entry.value = value;
                }
            }
            None => {
                self.index.entry(hash).or_default().push(self.entries.len());
                self.entries.push(Some(Entry { hash, key, value }));
                self.live += 1;
            }
        }
    }

    /// Remove `key` and return its value.
    ///
    /// A missing key is a `KeyError` whose message is the key's repr.
    pub fn remove(&mut self, key: &Value) -> RtResult<Value> {
        let hash = key.hash_key()?;
        let Some(entry) = self.find(hash, key).and_then(|pos| {
            self.unindex(hash, pos);
            self.entries[pos].take()
        }) else {
            return Err(key_error(key));
        };
        self.live -= 1;
        if self.entries.len() - self.live > self.live {
            self.compact();
        }
        Ok(entry.value)
    }

    fn unindex(&mut self, hash: u64, pos: usize) {
        if let Some(bucket) = self.index.get_mut(&hash) {
            bucket.retain(|p| *p != pos);
            if bucket.is_empty() {
                self.index.remove(&hash);
            }
        }
    }

    /// Drop tombstones and rebuild the index.
    fn compact(&mut self) {
        self.entries.retain(Option::is_some);
        self.index.clear();
        for (pos, entry) in self.entries.iter().flatten().enumerate() {
            self.index.entry(entry.hash).or_default().push(pos);
        }
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Value> + '_ {
        self.live_entries().map(|e| &e.key)
    }

    /// Key/value pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&Value, &Value)> + '_ {
        self.live_entries().map(|e| (&e.key, &e.value))
    }

    /// First live key at or after slot `pos`, with its slot; used by live
    /// key cursors.
    pub fn next_key(&self, pos: usize) -> Option<(usize, &Value)> {
        self.entries
            .get(pos..)?
            .iter()
            .enumerate()
            .find_map(|(offset, entry)| entry.as_ref().map(|e| (pos + offset, &e.key)))
    }

    /// XOR of all stored key hashes (order-independent).
    pub(super) fn hash_xor(&self) -> u64 {
        self.live_entries().fold(0, |acc, e| acc ^ e.hash)
    }
}

/// A `dict` value: shared, mutable backing map.
#[derive(Clone)]
pub struct DictValue(Shared<Dict>);

impl DictValue {
    pub(super) fn from_pairs(pairs: Vec<(Value, Value)>) -> RtResult<Self> {
        let mut dict = Dict::new();
        for (key, value) in pairs {
            dict.insert(key, value)?;
        }
        Ok(DictValue(Shared::new(dict)))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Store `value` under `key`.
    pub fn set_item(&self, key: Value, value: Value) -> RtResult<()> {
        let hash = key.hash_key()?;
        self.0.borrow_mut().insert_hashed(hash, key, value);
        Ok(())
    }

    /// `d[key]`.
    pub fn get_item(&self, key: &Value) -> RtResult {
        self.0
            .borrow()
            .get(key)?
            .cloned()
            .ok_or_else(|| key_error(key))
    }

    /// `key in d`.
    pub fn contains(&self, key: &Value) -> RtResult<bool> {
        self.0.borrow().contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<Value> {
        self.0.borrow().keys().cloned().collect()
    }

    pub(super) fn cursor(&self) -> KeyIterator {
        KeyIterator::new(self.0.clone())
    }

    pub fn ptr_eq(&self, other: &DictValue) -> bool {
        self.0.ptr_eq(&other.0)
    }

    /// Same size, and every key maps to a protocol-equal value in `other`.
    pub(super) fn equals(&self, other: &DictValue) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let (a, b) = (self.0.borrow(), other.0.borrow());
        a.len() == b.len()
            && a.entries().all(|(key, value)| {
                matches!(b.get(key), Ok(Some(theirs)) if value.equals(theirs))
            })
    }

    pub(super) fn repr(&self) -> String {
        let fields: Vec<String> = self
            .0
            .borrow()
            .entries()
            .map(|(k, v)| format!("{}: {}", k.repr(), v.repr()))
            .collect();
        format!("{{{}}}", fields.join(", "))
    }

    pub(super) fn call_method(&self, name: &str, args: &[Value]) -> RtResult {
        match name {
            "keys" => {
                if !args.is_empty() {
                    return Err(takes_no_arguments("keys", args.len()));
                }
                Ok(Value::list(self.keys()))
            }
            _ => Err(no_such_attribute("dict", name)),
        }
    }
}
