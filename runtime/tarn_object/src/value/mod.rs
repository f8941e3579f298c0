//! Runtime values.
//!
//! # Factory Enforcement
//!
//! Heap-backed values are only created through the factory methods on
//! `Value` (and the container constructors in this module). `Heap::new` and
//! `Shared::new` are `pub(super)`, so code outside `value` cannot wrap raw
//! storage directly.
//!
//! ```text
//! let s = Value::string("hello");             // OK
//! let list = Value::list(vec![Value::int(1)]); // OK
//! let s = Value::Str(Heap::new(...));         // ERROR: Heap::new is pub(super)
//! ```
//!
//! # Equality
//!
//! Two notions coexist:
//! - `PartialEq` is host-level structural equality: same kind, same
//!   contents. Lists use it for `==` and `in`.
//! - `Value::equals` is protocol equality with numeric coercion
//!   (`1 == 1.0 == True`). The backing map keys on it, together with
//!   `Value::hash_key`.

mod dict;
mod function;
mod heap;
mod iterator;
mod list;
mod protocol;
mod scalar;
mod set;
mod slice;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use rustc_hash::FxHasher;

use crate::context::Context;
use crate::errors::{unhashable, RtResult};
use crate::kind::{Kind, KindSet};

pub use dict::{Dict, DictValue};
pub use function::{BuiltinFn, BuiltinFunction, CallArgs};
pub use heap::{Heap, Shared};
pub use iterator::{collect, for_each, KeyIterator, MapIterator, SeqIterator};
pub use list::{ListIterator, ListValue};
pub use set::SetValue;
pub use slice::SliceValue;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    // Scalars
    /// The `None` singleton.
    None,
    /// Boolean; behaves as the integers 0 and 1 in arithmetic.
    Bool(bool),
    /// Arbitrary-precision integer.
    Int(BigInt),
    /// Double-precision float.
    Float(f64),
    /// Complex number.
    Complex { re: f64, im: f64 },
    /// Immutable text.
    Str(Heap<str>),
    /// Immutable byte string.
    Bytes(Heap<[u8]>),

    // Containers
    /// Mutable byte string.
    Bytearray(Shared<Vec<u8>>),
    /// Immutable sequence.
    Tuple(Heap<[Value]>),
    /// Mutable sequence.
    List(ListValue),
    /// Mutable set.
    Set(SetValue),
    /// Immutable set.
    FrozenSet(SetValue),
    /// Associative map.
    Dict(DictValue),
    /// Slice bounds used as a subscript.
    Slice(SliceValue),

    // Iterators
    /// Live cursor over a list.
    ListIterator(ListIterator),
    /// Live cursor over a set's elements.
    SetIterator(KeyIterator),
    /// Live cursor over a dict's keys.
    DictKeyIterator(KeyIterator),
    /// Cursor over a snapshot of an immutable sequence.
    SeqIterator(SeqIterator),
    /// Lazy `map(func, iterable)` result.
    Map(MapIterator),

    // Callables and host data
    /// Native function.
    Builtin(BuiltinFunction),
    /// Bare host mapping without a kind tag.
    HostObject(Heap<[(String, Value)]>),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    /// Create an integer value.
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(BigInt::from(n))
    }

    /// Create an integer value from an arbitrary-precision integer.
    #[inline]
    pub fn big_int(n: BigInt) -> Self {
        Value::Int(n)
    }

    /// Create a float value.
    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    /// Create a complex value.
    #[inline]
    pub fn complex(re: f64, im: f64) -> Self {
        Value::Complex { re, im }
    }

    /// Create a string value.
    ///
    /// # Example
    ///
    /// ```text
    /// let s = Value::string("hello");
    /// let s2 = Value::string(format!("value: {x}"));
    /// ```
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(Rc::from(s.into())))
    }

    /// Create an immutable byte string.
    #[inline]
    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(Heap::new(Rc::from(b.into())))
    }

    /// Create a mutable byte string.
    #[inline]
    pub fn bytearray(b: impl Into<Vec<u8>>) -> Self {
        Value::Bytearray(Shared::new(b.into()))
    }

    /// Create a tuple value.
    #[inline]
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Heap::new(Rc::from(items)))
    }

    /// Create a list value.
    ///
    /// # Example
    ///
    /// ```text
    /// let empty = Value::list(vec![]);
    /// let nums = Value::list(vec![Value::int(1), Value::int(2)]);
    /// ```
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(ListValue::new(items))
    }

    /// Create a set value. Fails if an element is unhashable.
    pub fn set(items: Vec<Value>) -> RtResult<Self> {
        Ok(Value::Set(SetValue::from_elements(items)?))
    }

    /// Create a frozenset value. Fails if an element is unhashable.
    pub fn frozenset(items: Vec<Value>) -> RtResult<Self> {
        Ok(Value::FrozenSet(SetValue::from_elements(items)?))
    }

    /// Create a dict value from key/value pairs. Later duplicates win.
    pub fn dict(pairs: Vec<(Value, Value)>) -> RtResult<Self> {
        Ok(Value::Dict(DictValue::from_pairs(pairs)?))
    }

    /// Create a slice subscript.
    #[inline]
    pub fn slice(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Value::Slice(SliceValue::new(start, stop, step))
    }

    /// Create a native function value.
    #[inline]
    pub fn builtin(name: &'static str, func: BuiltinFn) -> Self {
        Value::Builtin(BuiltinFunction::new(name, func))
    }

    /// Create a bare host mapping.
    pub fn host_object(entries: Vec<(String, Value)>) -> Self {
        Value::HostObject(Heap::new(Rc::from(entries)))
    }

    /// Create a lazy `map` iterator. The source is resolved on first `next`.
    pub fn map_iter(func: Value, source: Value) -> Self {
        Value::Map(MapIterator::new(func, source))
    }

    /// `list()` / `list(iterable)`.
    pub fn list_from(cx: &Context, args: &[Value]) -> RtResult {
        list::construct(cx, args)
    }

    /// `set()` / `set(iterable)`.
    pub fn set_from(cx: &Context, args: &[Value]) -> RtResult {
        set::construct(cx, Kind::Set, args)
    }

    /// `frozenset()` / `frozenset(iterable)`.
    pub fn frozenset_from(cx: &Context, args: &[Value]) -> RtResult {
        set::construct(cx, Kind::FrozenSet, args)
    }

    /// Wrap a bare host mapping into a dict keyed by its field names.
    pub fn dict_from_host(entries: &[(String, Value)]) -> RtResult {
        Value::dict(
            entries
                .iter()
                .map(|(k, v)| (Value::string(k.as_str()), v.clone()))
                .collect(),
        )
    }
}

// Value Methods

impl Value {
    /// Kind tag of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::None => Kind::None,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Complex { .. } => Kind::Complex,
            Value::Str(_) => Kind::Str,
            Value::Bytes(_) => Kind::Bytes,
            Value::Bytearray(_) => Kind::Bytearray,
            Value::Tuple(_) => Kind::Tuple,
            Value::List(_) => Kind::List,
            Value::Set(_) => Kind::Set,
            Value::FrozenSet(_) => Kind::FrozenSet,
            Value::Dict(_) => Kind::Dict,
            Value::Slice(_) => Kind::Slice,
            Value::ListIterator(_) => Kind::ListIterator,
            Value::SetIterator(_) => Kind::SetIterator,
            Value::DictKeyIterator(_) => Kind::DictKeyIterator,
            Value::SeqIterator(_) => Kind::SeqIterator,
            Value::Map(_) => Kind::Map,
            Value::Builtin(_) => Kind::Builtin,
            Value::HostObject(_) => Kind::HostObject,
        }
    }

    /// Type name for error messages.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Check whether this value's kind is in `kinds`.
    #[inline]
    pub fn is_instance(&self, kinds: KindSet) -> bool {
        kinds.contains(self.kind().as_set())
    }

    /// Check if value is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(n) => n.sign() != num_bigint::Sign::NoSign,
            Value::Float(f) => *f != 0.0,
            Value::Complex { re, im } => *re != 0.0 || *im != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Bytes(b) => !b.is_empty(),
            Value::Bytearray(b) => !b.borrow().is_empty(),
            Value::Tuple(items) => !items.is_empty(),
            Value::List(list) => !list.is_empty(),
            Value::Set(set) | Value::FrozenSet(set) => !set.is_empty(),
            Value::Dict(dict) => !dict.is_empty(),
            Value::HostObject(entries) => !entries.is_empty(),
            Value::Slice(_)
            | Value::ListIterator(_)
            | Value::SetIterator(_)
            | Value::DictKeyIterator(_)
            | Value::SeqIterator(_)
            | Value::Map(_)
            | Value::Builtin(_) => true,
        }
    }

    /// Raw element count, for kinds that have one.
    ///
    /// This is a direct read of the container size; iterators and scalars
    /// report `None`.
    pub fn raw_len(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::Bytes(b) => Some(b.len()),
            Value::Bytearray(b) => Some(b.borrow().len()),
            Value::Tuple(items) => Some(items.len()),
            Value::List(list) => Some(list.len()),
            Value::Set(set) | Value::FrozenSet(set) => Some(set.len()),
            Value::Dict(dict) => Some(dict.len()),
            Value::HostObject(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Get as `i64` if this is an integer (or bool) that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => n.to_i64(),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Get as a string slice if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(&**s),
            _ => None,
        }
    }

    /// Copy of the bytes held by a `bytes` or `bytearray`.
    pub fn to_byte_vec(&self) -> Option<Vec<u8>> {
        match self {
            Value::Bytes(b) => Some(b.to_vec()),
            Value::Bytearray(b) => Some(b.borrow().clone()),
            _ => None,
        }
    }

    /// Source-level representation (`repr(x)`).
    pub fn repr(&self) -> String {
        match self {
            Value::None => "None".to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => scalar::float_repr(*f),
            Value::Complex { re, im } => scalar::complex_repr(*re, *im),
            Value::Str(s) => scalar::str_repr(s),
            Value::Bytes(b) => scalar::bytes_repr(b),
            Value::Bytearray(b) => format!("bytearray({})", scalar::bytes_repr(&b.borrow())),
            Value::Tuple(items) => match &items[..] {
                [] => "()".to_string(),
                [only] => format!("({},)", only.repr()),
                _ => format!("({})", join_repr(items.iter())),
            },
            Value::List(list) => list.repr(),
            Value::Set(set) => set.repr(Kind::Set),
            Value::FrozenSet(set) => set.repr(Kind::FrozenSet),
            Value::Dict(dict) => dict.repr(),
            Value::Slice(slice) => slice.repr(),
            Value::ListIterator(_)
            | Value::SetIterator(_)
            | Value::DictKeyIterator(_)
            | Value::SeqIterator(_)
            | Value::Map(_) => format!("<{} object at 0x99999999>", self.type_name()),
            Value::Builtin(f) => format!("<built-in function {}>", f.name),
            Value::HostObject(entries) => {
                let fields: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", scalar::str_repr(k), v.repr()))
                    .collect();
                format!("{{{}}}", fields.join(", "))
            }
        }
    }

    /// Hash consistent with `equals`.
    ///
    /// Equal numbers hash equally regardless of kind. Mutable containers are
    /// unhashable; iterators hash by identity.
    pub fn hash_key(&self) -> RtResult<u64> {
        match self {
            Value::None => Ok(hash_tagged(HashTag::None, ())),
            Value::Bool(b) => Ok(hash_tagged(HashTag::Number, i64::from(*b))),
            Value::Int(n) => Ok(scalar::hash_int(n)),
            Value::Float(f) => Ok(scalar::hash_float(*f)),
            Value::Complex { re, im } => {
                if *im == 0.0 {
                    Ok(scalar::hash_float(*re))
                } else {
                    Ok(hash_tagged(HashTag::Complex, (re.to_bits(), im.to_bits())))
                }
            }
            Value::Str(s) => Ok(hash_tagged(HashTag::Str, &**s)),
            Value::Bytes(b) => Ok(hash_tagged(HashTag::Bytes, &**b)),
            Value::Tuple(items) => {
                let mut hasher = FxHasher::default();
                HashTag::Tuple.hash(&mut hasher);
                for item in items.iter() {
                    hasher.write_u64(item.hash_key()?);
                }
                Ok(hasher.finish())
            }
            Value::FrozenSet(set) => Ok(hash_tagged(HashTag::FrozenSet, set.hash_xor())),
            Value::Builtin(f) => Ok(hash_tagged(HashTag::Builtin, f.name)),
            Value::ListIterator(it) => Ok(hash_tagged(HashTag::Identity, it.addr())),
            Value::SetIterator(it) | Value::DictKeyIterator(it) => {
                Ok(hash_tagged(HashTag::Identity, it.addr()))
            }
            Value::SeqIterator(it) => Ok(hash_tagged(HashTag::Identity, it.addr())),
            Value::Map(it) => Ok(hash_tagged(HashTag::Identity, it.addr())),
            Value::Bytearray(_)
            | Value::List(_)
            | Value::Set(_)
            | Value::Dict(_)
            | Value::Slice(_)
            | Value::HostObject(_) => Err(unhashable(self)),
        }
    }

    /// Protocol equality (`==`).
    ///
    /// Numbers compare across kinds, `bytes` equals `bytearray` with the same
    /// contents, sets compare by membership. Lists keep host-level equality.
    pub fn equals(&self, other: &Value) -> bool {
        if let (Some(a), Some(b)) = (scalar::Num::of(self), scalar::Num::of(other)) {
            return a.num_eq(&b);
        }
        match (self, other) {
            (Value::Bytes(_) | Value::Bytearray(_), Value::Bytes(_) | Value::Bytearray(_)) => {
                self.to_byte_vec() == other.to_byte_vec()
            }
            (Value::Tuple(a), Value::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
            }
            (Value::Dict(a), Value::Dict(b)) => a.equals(b),
            _ => self == other,
        }
    }
}

/// Join the reprs of `items` with `", "`.
fn join_repr<'a>(items: impl Iterator<Item = &'a Value>) -> String {
    items.map(Value::repr).collect::<Vec<_>>().join(", ")
}

/// Domain separation for `hash_key`.
#[derive(Copy, Clone, Hash)]
enum HashTag {
    None,
    Number,
    Complex,
    Str,
    Bytes,
    Tuple,
    FrozenSet,
    Builtin,
    Identity,
}

fn hash_tagged(tag: HashTag, value: impl Hash) -> u64 {
    let mut hasher = FxHasher::default();
    tag.hash(&mut hasher);
    value.hash(&mut hasher);
    hasher.finish()
}

// Trait Implementations

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            _ => f.write_str(&self.repr()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Complex { re: r1, im: i1 }, Value::Complex { re: r2, im: i2 }) => {
                r1 == r2 && i1 == i2
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Bytearray(a), Value::Bytearray(b)) => {
                a.ptr_eq(b) || *a.borrow() == *b.borrow()
            }
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Set(a) | Value::FrozenSet(a), Value::Set(b) | Value::FrozenSet(b)) => {
                a.set_equals(b)
            }
            (Value::Dict(a), Value::Dict(b)) => a.equals(b),
            (Value::Slice(a), Value::Slice(b)) => a == b,
            (Value::ListIterator(a), Value::ListIterator(b)) => a.ptr_eq(b),
            (Value::SetIterator(a), Value::SetIterator(b))
            | (Value::DictKeyIterator(a), Value::DictKeyIterator(b)) => a.ptr_eq(b),
            (Value::SeqIterator(a), Value::SeqIterator(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            (Value::HostObject(a), Value::HostObject(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}
