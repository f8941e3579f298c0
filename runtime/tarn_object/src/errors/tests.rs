#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn display_prefixes_exception_class() {
    let err = unsupported_operand(BinaryOp::Sub, false, "list", "int");
    assert_eq!(
        err.to_string(),
        "TypeError: unsupported operand type(s) for -: 'list' and 'int'"
    );
    assert_eq!(RtError::stop_iteration().to_string(), "StopIteration");
}

#[test]
fn inplace_and_power_spelling() {
    let inplace = unsupported_operand(BinaryOp::Sub, true, "list", "list");
    assert_eq!(
        inplace.message,
        "unsupported operand type(s) for -=: 'list' and 'list'"
    );
    let pow = unsupported_operand(BinaryOp::Pow, true, "set", "int");
    assert_eq!(
        pow.message,
        "unsupported operand type(s) for ** or pow(): 'set' and 'int'"
    );
}

#[test]
fn stop_iteration_is_recognised() {
    let stop = RtError::stop_iteration();
    assert!(stop.is_stop_iteration());
    assert!(stop.is(ExcKind::StopIteration));
    assert!(!RtError::type_error("x").is_stop_iteration());
}

#[test]
fn index_wording_follows_compat_version() {
    let index = Value::string("a");
    assert_eq!(
        indices_must_be("list", CompatVersion::Py35, &index).message,
        "list indices must be integers or slices, not str"
    );
    assert_eq!(
        indices_must_be("list", CompatVersion::Py34, &index).message,
        "list indices must be integers, not str"
    );
}

#[test]
fn error_classes() {
    assert_eq!(index_out_of_range("list").kind, ExcKind::IndexError);
    assert_eq!(index_too_large().kind, ExcKind::IndexError);
    assert_eq!(zero_slice_step().kind, ExcKind::ValueError);
    assert_eq!(byte_out_of_range().kind, ExcKind::ValueError);
    assert_eq!(key_error(&Value::int(7)).kind, ExcKind::KeyError);
    assert_eq!(key_error(&Value::string("k")).message, "'k'");
    assert_eq!(
        no_such_attribute("set", "push").kind,
        ExcKind::AttributeError
    );
    assert_eq!(
        calling_convention_not_used().to_string(),
        "CallingConventionError: calling convention not used."
    );
    assert_eq!(
        not_implemented("Not implemented").kind,
        ExcKind::NotImplementedError
    );
}

#[test]
fn argument_count_messages() {
    assert_eq!(
        takes_exactly_one("append", 2).message,
        "append() takes exactly one argument (2 given)"
    );
    assert_eq!(
        takes_at_most_one("list", 2).message,
        "list() takes at most 1 argument (2 given)"
    );
    assert_eq!(
        expected_at_most("set", 1, 3).message,
        "set expected at most 1 arguments, got 3"
    );
    assert_eq!(
        expected_exactly("map", 2, 1).message,
        "map expected 2 arguments, got 1"
    );
    assert_eq!(
        no_len(&Value::int(1)).message,
        "object of type 'int' has no len()"
    );
}
