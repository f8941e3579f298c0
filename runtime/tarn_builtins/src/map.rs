//! `map(func, iterable)`.

use tarn_object::errors::{expected_at_least, no_keyword_arguments};
use tarn_object::{CallArgs, Context, RtResult, Value};

/// `map(func, iterable) -> map`.
///
/// Nothing is validated up front: the source is resolved and `func` is
/// checked for callability when the result is first advanced.
#[tracing::instrument(level = "debug", skip_all)]
pub fn map(_cx: &Context, args: CallArgs<'_>) -> RtResult {
    let positional = args.positional_frame()?;
    if args.has_kwargs() {
        return Err(no_keyword_arguments("map"));
    }
    // Arguments past the iterable are ignored.
    let [func, source, ..] = positional else {
        return Err(expected_at_least("map", 2, positional.len()));
    };
    Ok(Value::map_iter(func.clone(), source.clone()))
}
