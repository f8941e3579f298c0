#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::Cell;

use super::*;
use crate::errors::ExcKind;
use pretty_assertions::assert_eq;

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::int).collect()
}

fn stringify(_cx: &Context, args: CallArgs<'_>) -> RtResult {
    let [item] = args.positional_frame()? else {
        return Err(RtError::type_error("stringify takes one argument"));
    };
    Ok(Value::string(item.to_string()))
}

fn fail_on_two(_cx: &Context, args: CallArgs<'_>) -> RtResult {
    match args.positional_frame()? {
        [item] if item.equals(&Value::int(2)) => Err(RtError::type_error("two")),
        [item] => Ok(item.clone()),
        _ => Err(RtError::type_error("one argument")),
    }
}

// Map iterator

#[test]
fn map_applies_callable_per_step() {
    let cx = Context::new();
    let func = Value::builtin("stringify", stringify);
    let mapped = Value::map_iter(func, Value::list(ints(&[1, 2, 3])));
    assert_eq!(mapped.next(&cx).unwrap(), Value::string("1"));
    assert_eq!(mapped.next(&cx).unwrap(), Value::string("2"));
    assert_eq!(mapped.next(&cx).unwrap(), Value::string("3"));
    for _ in 0..3 {
        assert!(mapped.next(&cx).unwrap_err().is_stop_iteration());
    }
}

#[test]
fn map_resolves_source_lazily() {
    let cx = Context::new();
    let source = Value::list(ints(&[1]));
    let mapped = Value::map_iter(Value::builtin("stringify", stringify), source.clone());
    // Elements added before the first pull are visible.
    if let Value::List(list) = &source {
        list.append(Value::int(2));
    }
    assert_eq!(collect(&cx, &mapped).unwrap(), vec![Value::string("1"), Value::string("2")]);
}

#[test]
fn map_source_errors_surface_on_first_next() {
    let cx = Context::new();
    let mapped = Value::map_iter(Value::builtin("stringify", stringify), Value::int(5));
    let err = mapped.next(&cx).unwrap_err();
    assert_eq!(err.message, "'int' object is not iterable");
}

#[test]
fn map_checks_callable_every_step() {
    let cx = Context::new();
    let mapped = Value::map_iter(Value::int(1), Value::list(ints(&[1, 2])));
    for _ in 0..2 {
        let err = mapped.next(&cx).unwrap_err();
        assert_eq!(err.message, "'int' object is not callable");
    }
}

#[test]
fn map_propagates_callable_errors_and_continues() {
    let cx = Context::new();
    let mapped = Value::map_iter(Value::builtin("fail_on_two", fail_on_two), Value::list(ints(&[1, 2, 3])));
    assert_eq!(mapped.next(&cx).unwrap(), Value::int(1));
    assert_eq!(mapped.next(&cx).unwrap_err().message, "two");
    assert_eq!(mapped.next(&cx).unwrap(), Value::int(3));
}

#[test]
fn map_is_single_pass() {
    let cx = Context::new();
    let mapped = Value::map_iter(Value::builtin("stringify", stringify), Value::list(ints(&[1])));
    assert_eq!(collect(&cx, &mapped).unwrap().len(), 1);
    assert_eq!(collect(&cx, &mapped).unwrap(), Vec::<Value>::new());
    assert_eq!(mapped.type_name(), "map");
}

// Sequence and key cursors

#[test]
fn sequence_iterators_snapshot_their_source() {
    let cx = Context::new();
    let text = Value::string("hé");
    assert_eq!(
        collect(&cx, &text).unwrap(),
        vec![Value::string("h"), Value::string("é")]
    );
    let bytes = Value::bytearray(b"ab".to_vec());
    let it = bytes.iterate().unwrap();
    bytes
        .call_method(&cx, "append", &[Value::int(99)])
        .unwrap();
    assert_eq!(collect(&cx, &it).unwrap(), ints(&[97, 98]));
}

#[test]
fn dict_key_iterator_is_live() {
    let cx = Context::new();
    let dict = Value::dict(vec![(Value::string("a"), Value::int(1))]).unwrap();
    let it = dict.iterate().unwrap();
    assert_eq!(it.type_name(), "dict_keyiterator");
    assert_eq!(it.next(&cx).unwrap(), Value::string("a"));
    if let Value::Dict(d) = &dict {
        d.set_item(Value::string("b"), Value::int(2)).unwrap();
    }
    assert_eq!(it.next(&cx).unwrap(), Value::string("b"));
    assert!(it.next_item(&cx).unwrap().is_none());
}

#[test]
fn next_on_non_iterator() {
    let cx = Context::new();
    let err = Value::list(vec![]).next(&cx).unwrap_err();
    assert_eq!(err.message, "'list' object is not an iterator");
}

// Drivers

#[test]
fn for_each_stops_at_end_of_sequence_only() {
    let cx = Context::new();
    let seen = Cell::new(0);
    for_each(&cx, &Value::tuple(ints(&[1, 2, 3])), |_| {
        seen.set(seen.get() + 1);
        Ok(())
    })
    .unwrap();
    assert_eq!(seen.get(), 3);

    let err = for_each(&cx, &Value::list(ints(&[1, 2])), |item| {
        if item.equals(&Value::int(2)) {
            Err(RtError::new(ExcKind::ValueError, "stop here"))
        } else {
            Ok(())
        }
    })
    .unwrap_err();
    assert_eq!(err.kind, ExcKind::ValueError);
}

#[test]
fn collect_rejects_non_iterables() {
    let cx = Context::new();
    let err = collect(&cx, &Value::None).unwrap_err();
    assert_eq!(err.message, "'NoneType' object is not iterable");
}
