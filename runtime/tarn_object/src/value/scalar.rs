//! Scalar and immutable-sequence operations.
//!
//! Numbers promote `bool -> int -> float -> complex` and support `+`, `-`
//! and `*` only. `str`, `bytes`, `bytearray` and `tuple` get concatenation
//! and repetition; everything else is rejected with the operator-specific
//! `TypeError`.

use std::cmp::Ordering;
use std::fmt::Write;

use num_bigint::BigInt;
use num_traits::{FromPrimitive, Signed, ToPrimitive};

use super::Value;
use crate::errors::{
    bad_unary_operand, can_only_concatenate, cant_multiply_sequence, index_too_large,
    sequence_too_large, unorderable, unsupported_operand, RtResult,
};
use crate::kind::KindSet;
use crate::ops::{BinaryOp, CompareOp, UnaryOp};

/// Promoted numeric operand.
#[derive(Clone, Debug)]
pub(super) enum Num {
    Int(BigInt),
    Float(f64),
    Complex(f64, f64),
}

impl Num {
    /// View a value as a number. `bool` is the integer 0 or 1.
    pub(super) fn of(value: &Value) -> Option<Num> {
        match value {
            Value::Bool(b) => Some(Num::Int(BigInt::from(u8::from(*b)))),
            Value::Int(n) => Some(Num::Int(n.clone())),
            Value::Float(f) => Some(Num::Float(*f)),
            Value::Complex { re, im } => Some(Num::Complex(*re, *im)),
            _ => None,
        }
    }

    fn to_f64(&self) -> f64 {
        match self {
            Num::Int(n) => int_to_f64(n),
            Num::Float(f) | Num::Complex(f, _) => *f,
        }
    }

    fn to_complex(&self) -> (f64, f64) {
        match self {
            Num::Complex(re, im) => (*re, *im),
            other => (other.to_f64(), 0.0),
        }
    }

    /// Numeric equality across kinds.
    pub(super) fn num_eq(&self, other: &Num) -> bool {
        match (self, other) {
            (Num::Int(a), Num::Int(b)) => a == b,
            (Num::Int(n), Num::Float(f)) | (Num::Float(f), Num::Int(n)) => int_eq_float(n, *f),
            (Num::Float(a), Num::Float(b)) => a == b,
            (Num::Complex(r1, i1), Num::Complex(r2, i2)) => r1 == r2 && i1 == i2,
            (Num::Complex(re, im), real) | (real, Num::Complex(re, im)) => {
                *im == 0.0 && Num::Float(*re).num_eq(real)
            }
        }
    }

    /// Ordering between real numbers. `None` for NaN.
    fn real_cmp(&self, other: &Num) -> Option<Ordering> {
        match (self, other) {
            (Num::Int(a), Num::Int(b)) => Some(a.cmp(b)),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

fn int_to_f64(n: &BigInt) -> f64 {
    n.to_f64().unwrap_or(if n.is_negative() {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    })
}

fn int_eq_float(n: &BigInt, f: f64) -> bool {
    f.is_finite() && f.fract() == 0.0 && BigInt::from_f64(f).is_some_and(|v| &v == n)
}

// Hashing

pub(super) fn hash_int(n: &BigInt) -> u64 {
    match n.to_i64() {
        Some(small) => super::hash_tagged(super::HashTag::Number, small),
        None => super::hash_tagged(super::HashTag::Number, n.to_signed_bytes_le()),
    }
}

/// Integral floats hash like the equal integer.
pub(super) fn hash_float(f: f64) -> u64 {
    if f.is_finite() && f.fract() == 0.0 {
        if let Some(n) = BigInt::from_f64(f) {
            return hash_int(&n);
        }
    }
    super::hash_tagged(super::HashTag::Number, f.to_bits())
}

// Comparison

/// Comparison for every kind without a container-specific implementation.
pub(super) fn compare(left: &Value, op: CompareOp, right: &Value) -> RtResult<bool> {
    match op {
        CompareOp::Eq => return Ok(left.equals(right)),
        CompareOp::Ne => return Ok(!left.equals(right)),
        _ => {}
    }
    if let (Some(a), Some(b)) = (Num::of(left), Num::of(right)) {
        if matches!(a, Num::Complex(..)) || matches!(b, Num::Complex(..)) {
            return Err(unorderable(op, left.type_name(), right.type_name()));
        }
        return Ok(a.real_cmp(&b).is_some_and(|ord| op.test(ord)));
    }
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Ok(op.test(<str as Ord>::cmp(a, b))),
        (Value::Tuple(a), Value::Tuple(b)) => {
            for (x, y) in a.iter().zip(b.iter()) {
                if !x.equals(y) {
                    return x.compare(op, y);
                }
            }
            Ok(op.test(a.len().cmp(&b.len())))
        }
        _ => match (left.to_byte_vec(), right.to_byte_vec()) {
            (Some(a), Some(b)) => Ok(op.test(a.cmp(&b))),
            _ => Err(unorderable(op, left.type_name(), right.type_name())),
        },
    }
}

// Binary Operators

/// Binary operator for scalars and immutable sequences.
///
/// `inplace` only changes the spelling of the rejection message.
pub(super) fn binary_op(op: BinaryOp, inplace: bool, left: &Value, right: &Value) -> RtResult {
    if let (Some(a), Some(b)) = (Num::of(left), Num::of(right)) {
        return numeric(op, inplace, left, right, &a, &b);
    }
    match op {
        BinaryOp::Add => concat(inplace, left, right),
        BinaryOp::Mul => repeat(inplace, left, right),
        _ => Err(unsupported_operand(
            op,
            inplace,
            left.type_name(),
            right.type_name(),
        )),
    }
}

fn numeric(
    op: BinaryOp,
    inplace: bool,
    left: &Value,
    right: &Value,
    a: &Num,
    b: &Num,
) -> RtResult {
    if !matches!(op, BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul) {
        return Err(unsupported_operand(
            op,
            inplace,
            left.type_name(),
            right.type_name(),
        ));
    }
    Ok(match (a, b) {
        (Num::Int(x), Num::Int(y)) => Value::Int(match op {
            BinaryOp::Add => x + y,
            BinaryOp::Sub => x - y,
            _ => x * y,
        }),
        (Num::Complex(..), _) | (_, Num::Complex(..)) => {
            let ((a, b), (c, d)) = (a.to_complex(), b.to_complex());
            let (re, im) = match op {
                BinaryOp::Add => (a + c, b + d),
                BinaryOp::Sub => (a - c, b - d),
                _ => (a * c - b * d, a * d + b * c),
            };
            Value::Complex { re, im }
        }
        _ => {
            let (x, y) = (a.to_f64(), b.to_f64());
            Value::Float(match op {
                BinaryOp::Add => x + y,
                BinaryOp::Sub => x - y,
                _ => x * y,
            })
        }
    })
}

fn concat(inplace: bool, left: &Value, right: &Value) -> RtResult {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Ok(Value::string([&**a, &**b].concat())),
        (Value::Bytes(a), _) => match right.to_byte_vec() {
            Some(b) => Ok(Value::bytes([&**a, &b[..]].concat())),
            None => Err(unsupported_operand(
                BinaryOp::Add,
                inplace,
                left.type_name(),
                right.type_name(),
            )),
        },
        (Value::Bytearray(a), _) => match right.to_byte_vec() {
            Some(b) => {
                let joined = [&a.borrow()[..], &b[..]].concat();
                Ok(Value::bytearray(joined))
            }
            None => Err(unsupported_operand(
                BinaryOp::Add,
                inplace,
                left.type_name(),
                right.type_name(),
            )),
        },
        (Value::Tuple(a), Value::Tuple(b)) => {
            Ok(Value::tuple(a.iter().chain(b.iter()).cloned().collect()))
        }
        (Value::Tuple(_), _) => Err(can_only_concatenate("tuple", right)),
        _ => Err(unsupported_operand(
            BinaryOp::Add,
            inplace,
            left.type_name(),
            right.type_name(),
        )),
    }
}

fn repeat(inplace: bool, left: &Value, right: &Value) -> RtResult {
    // `n * seq` repeats like `seq * n`.
    if matches!(left, Value::Bool(_) | Value::Int(_)) && right.is_instance(KindSet::SEQUENCES) {
        return right.binary_op(BinaryOp::Mul, left);
    }
    match left {
        Value::Str(s) => Ok(Value::string(repeat_str(s, repeat_count(right)?)?)),
        Value::Bytes(b) => Ok(Value::bytes(repeat_items(&b[..], repeat_count(right)?)?)),
        Value::Bytearray(b) => {
            let count = repeat_count(right)?;
            let repeated = repeat_items(&b.borrow()[..], count)?;
            Ok(Value::bytearray(repeated))
        }
        Value::Tuple(items) => {
            let count = repeat_count(right)?;
            Ok(Value::tuple(repeat_items(&items[..], count)?))
        }
        _ => Err(unsupported_operand(
            BinaryOp::Mul,
            inplace,
            left.type_name(),
            right.type_name(),
        )),
    }
}

/// Repetition count for `seq * n`.
///
/// `True` is 1, `False` is 0, negative counts clamp to 0.
pub(super) fn repeat_count(count: &Value) -> RtResult<usize> {
    match count {
        Value::Bool(b) => Ok(usize::from(*b)),
        Value::Int(n) if !n.is_positive() => Ok(0),
        Value::Int(n) => n.to_usize().ok_or_else(index_too_large),
        _ => Err(cant_multiply_sequence(count.type_name())),
    }
}

/// Length of a sequence of `len` elements of type `T` repeated `count`
/// times. Fails when the result could not be allocated.
fn repeated_len<T>(len: usize, count: usize) -> RtResult<usize> {
    let max = isize::MAX.unsigned_abs() / std::mem::size_of::<T>().max(1);
    len.checked_mul(count)
        .filter(|total| *total <= max)
        .ok_or_else(sequence_too_large)
}

/// `items` concatenated `count` times.
pub(super) fn repeat_items<T: Clone>(items: &[T], count: usize) -> RtResult<Vec<T>> {
    if items.is_empty() || count == 0 {
        return Ok(Vec::new());
    }
    let total = repeated_len::<T>(items.len(), count)?;
    let mut out = Vec::new();
    out.try_reserve_exact(total).map_err(|_| sequence_too_large())?;
    for _ in 0..count {
        out.extend_from_slice(items);
    }
    Ok(out)
}

fn repeat_str(s: &str, count: usize) -> RtResult<String> {
    if s.is_empty() || count == 0 {
        return Ok(String::new());
    }
    let mut out = String::new();
    out.try_reserve_exact(repeated_len::<u8>(s.len(), count)?)
        .map_err(|_| sequence_too_large())?;
    for _ in 0..count {
        out.push_str(s);
    }
    Ok(out)
}

// Unary Operators

pub(super) fn unary_op(op: UnaryOp, value: &Value) -> RtResult {
    let reject = || bad_unary_operand(op, value.type_name());
    match Num::of(value) {
        Some(Num::Int(n)) => match op {
            UnaryOp::Pos => Ok(Value::Int(n)),
            UnaryOp::Neg => Ok(Value::Int(-n)),
            UnaryOp::Invert => Ok(Value::Int(!n)),
            UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
        },
        Some(Num::Float(f)) => match op {
            UnaryOp::Pos => Ok(Value::Float(f)),
            UnaryOp::Neg => Ok(Value::Float(-f)),
            UnaryOp::Invert => Err(reject()),
            UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
        },
        Some(Num::Complex(re, im)) => match op {
            UnaryOp::Pos => Ok(Value::Complex { re, im }),
            UnaryOp::Neg => Ok(Value::Complex { re: -re, im: -im }),
            UnaryOp::Invert => Err(reject()),
            UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
        },
        None if op == UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
        None => Err(reject()),
    }
}

// Representation

/// Float repr: shortest round-trip digits, `.0` on integral values,
/// exponent form outside `[1e-4, 1e16)`.
pub(super) fn float_repr(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let abs = f.abs();
    if abs >= 1e16 || (abs != 0.0 && abs < 1e-4) {
        let s = format!("{f:e}");
        // Exponent is signed and at least two digits wide.
        match s.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exp),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => s,
        }
    } else if f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}

pub(super) fn complex_repr(re: f64, im: f64) -> String {
    let part = |f: f64| {
        let s = float_repr(f);
        match s.strip_suffix(".0") {
            Some(trimmed) => trimmed.to_string(),
            None => s,
        }
    };
    if re == 0.0 && re.is_sign_positive() {
        return format!("{}j", part(im));
    }
    let sign = if im.is_sign_negative() && !im.is_nan() {
        ""
    } else {
        "+"
    };
    format!("({}{sign}{}j)", part(re), part(im))
}

pub(super) fn str_repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c < ' ' || c == '\x7f' => {
                let _ = write!(out, "\\x{:02x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

pub(super) fn bytes_repr(b: &[u8]) -> String {
    let quote = if b.contains(&b'\'') && !b.contains(&b'"') {
        b'"'
    } else {
        b'\''
    };
    let mut out = String::with_capacity(b.len() + 3);
    out.push('b');
    out.push(char::from(quote));
    for &byte in b {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            byte if byte == quote => {
                out.push('\\');
                out.push(char::from(byte));
            }
            0x20..=0x7e => out.push(char::from(byte)),
            _ => {
                let _ = write!(out, "\\x{byte:02x}");
            }
        }
    }
    out.push(char::from(quote));
    out
}
