#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::errors::ExcKind;
use crate::ops::UnaryOp;
use pretty_assertions::assert_eq;

fn set(values: &[i64]) -> Value {
    Value::set(values.iter().copied().map(Value::int).collect()).unwrap()
}

fn frozen(values: &[i64]) -> Value {
    Value::frozenset(values.iter().copied().map(Value::int).collect()).unwrap()
}

fn storage(value: &Value) -> &SetValue {
    match value {
        Value::Set(s) | Value::FrozenSet(s) => s,
        other => panic!("expected a set, got {other:?}"),
    }
}

fn eq(a: &Value, b: &Value) -> bool {
    a.compare(CompareOp::Eq, b).unwrap()
}

// Construction and display

#[test]
fn construction_collapses_duplicates() {
    let cx = Context::new();
    let s = Value::set_from(&cx, &[Value::list(vec![Value::int(1), Value::int(1), Value::float(1.0)])])
        .unwrap();
    assert_eq!(s.raw_len(), Some(1));
    assert_eq!(s.repr(), "{1}");
    assert_eq!(Value::set_from(&cx, &[]).unwrap().repr(), "set()");

    let chars = Value::frozenset_from(&cx, &[Value::string("aab")]).unwrap();
    assert_eq!(chars.type_name(), "frozenset");
    assert_eq!(chars.raw_len(), Some(2));
}

#[test]
fn construction_from_any_iterable() {
    let cx = Context::new();
    let source = Value::dict(vec![(Value::int(1), Value::None), (Value::int(2), Value::None)]).unwrap();
    let s = Value::set_from(&cx, &[source]).unwrap();
    assert!(eq(&s, &set(&[1, 2])));
}

#[test]
fn construction_errors() {
    let cx = Context::new();
    let err = Value::set_from(&cx, &[Value::int(1)]).unwrap_err();
    assert_eq!(err.message, "'int' object is not iterable");
    let err = Value::frozenset_from(&cx, &[set(&[]), set(&[])]).unwrap_err();
    assert_eq!(err.message, "frozenset expected at most 1 arguments, got 2");
}

// Equality and ordering

#[test]
fn equality_checks_membership() {
    assert!(eq(&set(&[1, 2]), &set(&[2, 1])));
    assert!(eq(&set(&[1, 2]), &frozen(&[1, 2])));
    assert!(!eq(&set(&[1, 2]), &set(&[1, 3])));
    assert!(!eq(&set(&[1]), &Value::list(vec![Value::int(1)])));
    assert!(set(&[1]).compare(CompareOp::Ne, &Value::None).unwrap());
}

#[test]
fn ordering_compares_cardinality_only() {
    let a = set(&[1, 2]);
    let b = set(&[3, 4]);
    assert!(a.compare(CompareOp::Le, &b).unwrap());
    assert!(a.compare(CompareOp::Ge, &b).unwrap());
    assert!(!a.compare(CompareOp::Lt, &b).unwrap());
    assert!(set(&[9]).compare(CompareOp::Lt, &frozen(&[1, 2])).unwrap());

    let err = a.compare(CompareOp::Lt, &Value::list(vec![])).unwrap_err();
    assert_eq!(err.message, "unorderable types: set() < list()");
}

// Algebra

#[test]
fn binary_algebra() {
    let a = set(&[1, 2, 3]);
    let b = set(&[2, 3, 4]);
    assert!(eq(&a.binary_op(BinaryOp::Sub, &b).unwrap(), &set(&[1])));
    assert!(eq(&a.binary_op(BinaryOp::And, &b).unwrap(), &set(&[2, 3])));
    assert!(eq(&a.binary_op(BinaryOp::Xor, &b).unwrap(), &set(&[1, 4])));
    assert!(eq(&a.binary_op(BinaryOp::Or, &b).unwrap(), &set(&[1, 2, 3, 4])));
}

#[test]
fn algebra_keeps_receiver_kind() {
    let result = frozen(&[1]).binary_op(BinaryOp::Or, &set(&[2])).unwrap();
    assert_eq!(result.type_name(), "frozenset");
    let result = set(&[1]).binary_op(BinaryOp::Or, &frozen(&[2])).unwrap();
    assert_eq!(result.type_name(), "set");
}

#[test]
fn rejected_operands() {
    let a = set(&[1]);
    let msg = |op, other: &Value| a.binary_op(op, other).unwrap_err().message;
    assert_eq!(
        msg(BinaryOp::Add, &set(&[])),
        "unsupported operand type(s) for +: 'set' and 'set'"
    );
    assert_eq!(
        msg(BinaryOp::Or, &Value::list(vec![])),
        "unsupported operand type(s) for |: 'set' and 'list'"
    );
    assert_eq!(
        msg(BinaryOp::FloorDiv, &Value::complex(1.0, 1.0)),
        "can't take floor of complex number."
    );
    assert_eq!(
        msg(BinaryOp::Mod, &Value::complex(1.0, 1.0)),
        "can't mod complex numbers."
    );
    assert_eq!(
        msg(BinaryOp::Mul, &Value::string("x")),
        "can't multiply sequence by non-int of type 'set'"
    );
    assert_eq!(
        msg(BinaryOp::Mul, &Value::int(2)),
        "unsupported operand type(s) for *: 'set' and 'int'"
    );
    assert_eq!(
        msg(BinaryOp::Pow, &Value::int(2)),
        "unsupported operand type(s) for ** or pow(): 'set' and 'int'"
    );
}

#[test]
fn inplace_updates_receiver_and_returns_new_set() {
    let a = set(&[1, 2]);
    let result = a.inplace_op(BinaryOp::Or, &set(&[3])).unwrap();
    assert!(!storage(&result).ptr_eq(storage(&a)));
    assert!(eq(&a, &set(&[1, 2, 3])));
    assert!(eq(&result, &set(&[1, 2, 3])));

    // The difference is added back, so nothing is removed.
    let a = set(&[1, 2]);
    let result = a.inplace_op(BinaryOp::Sub, &set(&[2])).unwrap();
    assert!(eq(&result, &set(&[1])));
    assert!(eq(&a, &set(&[1, 2])));

    let a = set(&[1, 2]);
    a.inplace_op(BinaryOp::Xor, &set(&[2, 5])).unwrap();
    assert!(eq(&a, &set(&[1, 2, 5])));
}

#[test]
fn inplace_intersection_leaves_receiver_alone() {
    let a = set(&[1, 2]);
    let result = a.inplace_op(BinaryOp::And, &set(&[2])).unwrap();
    assert!(eq(&result, &set(&[2])));
    assert!(eq(&a, &set(&[1, 2])));
}

#[test]
fn inplace_on_frozenset_never_mutates() {
    let a = frozen(&[1]);
    let result = a.inplace_op(BinaryOp::Or, &set(&[2])).unwrap();
    assert_eq!(a.raw_len(), Some(1));
    assert_eq!(result.type_name(), "frozenset");
    let err = a.inplace_op(BinaryOp::Add, &set(&[])).unwrap_err();
    assert_eq!(
        err.message,
        "unsupported operand type(s) for +=: 'frozenset' and 'set'"
    );
}

#[test]
fn not_operator() {
    assert_eq!(set(&[]).unary_op(UnaryOp::Not).unwrap(), Value::Bool(true));
    assert_eq!(set(&[1]).unary_op(UnaryOp::Not).unwrap(), Value::Bool(false));
}

// Subscripting

#[test]
fn never_subscriptable() {
    let cx = Context::new();
    let a = set(&[1]);
    let subscript = |index: Value| a.get_item(&cx, &index).unwrap_err();

    assert_eq!(
        subscript(Value::Bool(true)).message,
        "'set' object does not support indexing"
    );
    assert_eq!(
        subscript(Value::int(0)).message,
        "'set' object does not support indexing"
    );
    let huge = subscript(Value::big_int(num_bigint::BigInt::from(i64::MAX) * 2));
    assert_eq!(
        (huge.kind, huge.message.as_str()),
        (ExcKind::IndexError, "cannot fit 'int' into an index-sized integer")
    );
    assert_eq!(
        subscript(Value::string("a")).message,
        "'set' object is not subscriptable"
    );
    assert_eq!(
        frozen(&[]).get_item(&cx, &Value::None).unwrap_err().message,
        "'frozenset' object is not subscriptable"
    );
}

// Containment and methods

#[test]
fn containment_uses_backing_map_keys() {
    let a = set(&[1, 2]);
    assert!(a.contains(&Value::float(1.0)).unwrap());
    assert!(a.contains(&Value::Bool(true)).unwrap());
    assert!(!a.contains(&Value::int(3)).unwrap());
    let err = a.contains(&Value::list(vec![])).unwrap_err();
    assert_eq!(err.message, "unhashable type: 'list'");
}

#[test]
fn methods() {
    let cx = Context::new();
    let a = set(&[1]);
    a.call_method(&cx, "add", &[Value::int(2)]).unwrap();
    a.call_method(&cx, "add", &[Value::int(2)]).unwrap();
    assert_eq!(a.raw_len(), Some(2));

    a.call_method(&cx, "remove", &[Value::int(1)]).unwrap();
    let err = a.call_method(&cx, "remove", &[Value::int(1)]).unwrap_err();
    assert_eq!((err.kind, err.message.as_str()), (ExcKind::KeyError, "1"));

    a.call_method(&cx, "update", &[Value::tuple(vec![Value::int(7)])]).unwrap();
    a.call_method(&cx, "update", &[Value::string("z")]).unwrap();
    assert!(eq(
        &a,
        &Value::set(vec![Value::int(2), Value::int(7), Value::string("z")]).unwrap()
    ));
    let err = a.call_method(&cx, "update", &[Value::int(3)]).unwrap_err();
    assert_eq!(err.message, "'int' object is not iterable");

    let copy = a.call_method(&cx, "copy", &[]).unwrap();
    assert!(eq(&copy, &a));
    storage(&copy).add(Value::int(100)).unwrap();
    assert_eq!(a.raw_len(), Some(3));
}

#[test]
fn frozenset_has_no_mutators() {
    let cx = Context::new();
    let a = frozen(&[1]);
    let err = a.call_method(&cx, "add", &[Value::int(2)]).unwrap_err();
    assert_eq!(err.kind, ExcKind::AttributeError);
    assert_eq!(err.message, "'frozenset' object has no attribute 'add'");
    assert_eq!(a.call_method(&cx, "copy", &[]).unwrap().type_name(), "frozenset");
}

#[test]
fn frozensets_nest() {
    let inner = frozen(&[1, 2]);
    let outer = Value::set(vec![inner.clone(), frozen(&[2, 1])]).unwrap();
    assert_eq!(outer.raw_len(), Some(1));
    assert!(outer.contains(&inner).unwrap());
}

// Iteration

#[test]
fn iterator_sees_additions() {
    let cx = Context::new();
    let a = set(&[1]);
    let it = a.iterate().unwrap();
    assert_eq!(it.type_name(), "set_iterator");
    assert_eq!(it.next(&cx).unwrap(), Value::int(1));
    storage(&a).add(Value::int(2)).unwrap();
    assert_eq!(it.next(&cx).unwrap(), Value::int(2));
    assert!(it.next_item(&cx).unwrap().is_none());
}

#[test]
fn iterator_skips_removed_elements() {
    let cx = Context::new();
    let a = set(&[1, 2, 3, 4]);
    let it = a.iterate().unwrap();
    assert_eq!(it.next(&cx).unwrap(), Value::int(1));
    storage(&a).remove(&Value::int(3)).unwrap();
    assert_eq!(it.next(&cx).unwrap(), Value::int(2));
    assert_eq!(it.next(&cx).unwrap(), Value::int(4));
    assert!(it.next_item(&cx).unwrap().is_none());
}
