//! Property-based tests for container algebra.
//!
//! Lists are checked for concatenation and repetition shape; sets for the
//! usual algebraic laws over the protocol operators.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use tarn_object::{BinaryOp, CompareOp, Context, Value};

// -- Strategies --

fn small_ints() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-20i64..20, 0..12)
}

fn list_of(values: &[i64]) -> Value {
    Value::list(values.iter().copied().map(Value::int).collect())
}

fn set_of(values: &[i64]) -> Value {
    Value::set(values.iter().copied().map(Value::int).collect()).unwrap()
}

fn len(cx: &Context, value: &Value) -> usize {
    let size = tarn_builtins::len(cx, tarn_object::CallArgs::positional(&[value.clone()])).unwrap();
    usize::try_from(size.as_i64().unwrap()).unwrap()
}

fn set_eq(a: &Value, b: &Value) -> bool {
    a.compare(CompareOp::Eq, b).unwrap()
}

// -- Property Tests --

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// Concatenation keeps both halves in order.
    #[test]
    fn prop_list_concat_layout(a in small_ints(), b in small_ints()) {
        let cx = Context::new();
        let (left, right) = (list_of(&a), list_of(&b));
        let joined = left.binary_op(BinaryOp::Add, &right).unwrap();
        prop_assert_eq!(len(&cx, &joined), a.len() + b.len());

        for (i, expected) in a.iter().chain(b.iter()).enumerate() {
            let index = Value::int(i64::try_from(i).unwrap());
            prop_assert_eq!(joined.get_item(&cx, &index).unwrap(), Value::int(*expected));
        }
    }

    /// Repetition multiplies the length, and leaves the operand alone.
    #[test]
    fn prop_list_repeat_length(a in small_ints(), n in 0i64..5) {
        let cx = Context::new();
        let list = list_of(&a);
        let repeated = list.binary_op(BinaryOp::Mul, &Value::int(n)).unwrap();
        prop_assert_eq!(len(&cx, &repeated), a.len() * usize::try_from(n).unwrap());
        prop_assert_eq!(len(&cx, &list), a.len());
    }

    /// Concatenating a non-list is always rejected.
    #[test]
    fn prop_list_concat_rejects_tuples(a in small_ints()) {
        let err = list_of(&a).binary_op(BinaryOp::Add, &Value::tuple(vec![])).unwrap_err();
        prop_assert_eq!(err.message, "can only concatenate list (not \"tuple\") to list");
    }

    /// Union is commutative and idempotent.
    #[test]
    fn prop_set_union_laws(a in small_ints(), b in small_ints()) {
        let (sa, sb) = (set_of(&a), set_of(&b));
        let ab = sa.binary_op(BinaryOp::Or, &sb).unwrap();
        let ba = sb.binary_op(BinaryOp::Or, &sa).unwrap();
        prop_assert!(set_eq(&ab, &ba));
        prop_assert!(set_eq(&sa.binary_op(BinaryOp::Or, &sa).unwrap(), &sa));
    }

    /// Intersection with self is self; difference with self is empty.
    #[test]
    fn prop_set_self_laws(a in small_ints()) {
        let sa = set_of(&a);
        prop_assert!(set_eq(&sa.binary_op(BinaryOp::And, &sa).unwrap(), &sa));
        prop_assert!(set_eq(&sa.binary_op(BinaryOp::Sub, &sa).unwrap(), &set_of(&[])));
        prop_assert!(sa.compare(CompareOp::Le, &sa).unwrap());
    }

    /// Symmetric difference is the union of both one-sided differences.
    #[test]
    fn prop_set_symmetric_difference(a in small_ints(), b in small_ints()) {
        let (sa, sb) = (set_of(&a), set_of(&b));
        let sym = sa.binary_op(BinaryOp::Xor, &sb).unwrap();
        let left = sa.binary_op(BinaryOp::Sub, &sb).unwrap();
        let right = sb.binary_op(BinaryOp::Sub, &sa).unwrap();
        prop_assert!(set_eq(&sym, &left.binary_op(BinaryOp::Or, &right).unwrap()));
    }

    /// `sum` over a list of integers matches the host sum.
    #[test]
    fn prop_sum_matches_host(a in small_ints()) {
        let cx = Context::new();
        let total = tarn_builtins::sum(
            &cx,
            tarn_object::CallArgs::positional(&[list_of(&a)]),
        )
        .unwrap();
        prop_assert_eq!(total, Value::int(a.iter().sum()));
    }
}
