//! Closed classification of value kinds.
//!
//! `Kind` is the tag of a `Value`; `KindSet` is a bitset of kinds used for
//! "is this operand one of K1, K2, ..." checks. The set is closed, so
//! `Value::is_instance` answers those checks from the tag alone.

use bitflags::bitflags;

/// Tag of a runtime value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    None,
    Bool,
    Int,
    Float,
    Complex,
    Str,
    Bytes,
    Bytearray,
    Tuple,
    List,
    Set,
    FrozenSet,
    Dict,
    Slice,
    ListIterator,
    SetIterator,
    DictKeyIterator,
    SeqIterator,
    Map,
    Builtin,
    HostObject,
}

impl Kind {
    /// Number of kinds.
    pub const COUNT: usize = 21;

    /// Every kind, in declaration order.
    pub const ALL: [Kind; Kind::COUNT] = [
        Kind::None,
        Kind::Bool,
        Kind::Int,
        Kind::Float,
        Kind::Complex,
        Kind::Str,
        Kind::Bytes,
        Kind::Bytearray,
        Kind::Tuple,
        Kind::List,
        Kind::Set,
        Kind::FrozenSet,
        Kind::Dict,
        Kind::Slice,
        Kind::ListIterator,
        Kind::SetIterator,
        Kind::DictKeyIterator,
        Kind::SeqIterator,
        Kind::Map,
        Kind::Builtin,
        Kind::HostObject,
    ];

    /// Type name as error messages spell it.
    pub fn name(self) -> &'static str {
        match self {
            Kind::None => "NoneType",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Complex => "complex",
            Kind::Str => "str",
            Kind::Bytes => "bytes",
            Kind::Bytearray => "bytearray",
            Kind::Tuple => "tuple",
            Kind::List => "list",
            Kind::Set => "set",
            Kind::FrozenSet => "frozenset",
            Kind::Dict => "dict",
            Kind::Slice => "slice",
            Kind::ListIterator => "list_iterator",
            Kind::SetIterator => "set_iterator",
            Kind::DictKeyIterator => "dict_keyiterator",
            Kind::SeqIterator => "iterator",
            Kind::Map => "map",
            Kind::Builtin => "builtin_function_or_method",
            Kind::HostObject => "host_object",
        }
    }

    /// Singleton set containing this kind.
    pub fn as_set(self) -> KindSet {
        match self {
            Kind::None => KindSet::NONE,
            Kind::Bool => KindSet::BOOL,
            Kind::Int => KindSet::INT,
            Kind::Float => KindSet::FLOAT,
            Kind::Complex => KindSet::COMPLEX,
            Kind::Str => KindSet::STR,
            Kind::Bytes => KindSet::BYTES,
            Kind::Bytearray => KindSet::BYTEARRAY,
            Kind::Tuple => KindSet::TUPLE,
            Kind::List => KindSet::LIST,
            Kind::Set => KindSet::SET,
            Kind::FrozenSet => KindSet::FROZENSET,
            Kind::Dict => KindSet::DICT,
            Kind::Slice => KindSet::SLICE,
            Kind::ListIterator => KindSet::LIST_ITERATOR,
            Kind::SetIterator => KindSet::SET_ITERATOR,
            Kind::DictKeyIterator => KindSet::DICT_KEY_ITERATOR,
            Kind::SeqIterator => KindSet::SEQ_ITERATOR,
            Kind::Map => KindSet::MAP,
            Kind::Builtin => KindSet::BUILTIN,
            Kind::HostObject => KindSet::HOST_OBJECT,
        }
    }
}

bitflags! {
    /// A set of kinds for compatibility checks.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct KindSet: u32 {
        const NONE = 1 << 0;
        const BOOL = 1 << 1;
        const INT = 1 << 2;
        const FLOAT = 1 << 3;
        const COMPLEX = 1 << 4;
        const STR = 1 << 5;
        const BYTES = 1 << 6;
        const BYTEARRAY = 1 << 7;
        const TUPLE = 1 << 8;
        const LIST = 1 << 9;
        const SET = 1 << 10;
        const FROZENSET = 1 << 11;
        const DICT = 1 << 12;
        const SLICE = 1 << 13;
        const LIST_ITERATOR = 1 << 14;
        const SET_ITERATOR = 1 << 15;
        const DICT_KEY_ITERATOR = 1 << 16;
        const MAP = 1 << 17;
        const BUILTIN = 1 << 18;
        const HOST_OBJECT = 1 << 19;
        const SEQ_ITERATOR = 1 << 20;

        /// Operands accepted by set algebra.
        const ANY_SET = Self::SET.bits() | Self::FROZENSET.bits();
        /// Byte sequences; lists refuse to order against these.
        const BYTE_SEQUENCES = Self::BYTES.bits() | Self::BYTEARRAY.bits();
        /// Sources accepted by `list +=`.
        const LIST_EXTENDABLE = Self::LIST.bits() | Self::STR.bits() | Self::TUPLE.bits();
        /// Sources accepted by `set.update`.
        const SET_UPDATABLE = Self::ANY_SET.bits() | Self::LIST_EXTENDABLE.bits();
        /// Kinds that reject `set * x` with the sequence-specific message.
        const SEQUENCES = Self::BYTE_SEQUENCES.bits() | Self::LIST_EXTENDABLE.bits();
        /// Kinds that answer `next`.
        const ITERATORS = Self::LIST_ITERATOR.bits()
            | Self::SET_ITERATOR.bits()
            | Self::DICT_KEY_ITERATOR.bits()
            | Self::SEQ_ITERATOR.bits()
            | Self::MAP.bits();
        /// Numeric kinds (bool counts as an integer).
        const NUMBERS = Self::BOOL.bits() | Self::INT.bits() | Self::FLOAT.bits() | Self::COMPLEX.bits();
    }
}
