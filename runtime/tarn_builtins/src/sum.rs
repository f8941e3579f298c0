//! `sum(iterable[, start])`.

use tarn_object::errors::no_keyword_arguments;
use tarn_object::{
    for_each, BinaryOp, CallArgs, Context, RtError, RtResult, SumErrorPolicy, Value,
};
use tracing::debug;

/// Message every fold failure is reported with under `SumErrorPolicy::Compat`.
const COMPAT_MESSAGE: &str = "bad operand type for sum(): 'NoneType'";

/// `sum(iterable[, start]) -> value`.
///
/// Folds left to right with `+`, seeded by `start` (default `0`).
#[tracing::instrument(level = "debug", skip_all)]
pub fn sum(cx: &Context, args: CallArgs<'_>) -> RtResult {
    let positional = args.positional_frame()?;
    if args.has_kwargs() {
        return Err(no_keyword_arguments("sum"));
    }
    let (iterable, start) = match positional {
        [] => return Err(arity("at least 1", 0)),
        [iterable] => (iterable, Value::int(0)),
        [iterable, start] => (iterable, start.clone()),
        _ => return Err(arity("at most 2", positional.len())),
    };

    fold(cx, iterable, start).map_err(|err| match cx.config().sum_errors {
        SumErrorPolicy::Precise => err,
        SumErrorPolicy::Compat => {
            debug!(cause = %err, "sum() failure reported as compat message");
            RtError::type_error(COMPAT_MESSAGE)
        }
    })
}

/// `sum()` spells its arity errors in the singular.
#[cold]
fn arity(bound: &str, given: usize) -> RtError {
    RtError::type_error(format!("sum() expected {bound} argument, got {given}"))
}

fn fold(cx: &Context, iterable: &Value, start: Value) -> RtResult {
    let mut total = start;
    for_each(cx, iterable, |item| {
        total = total.binary_op(BinaryOp::Add, &item)?;
        Ok(())
    })?;
    Ok(total)
}
