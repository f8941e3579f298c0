//! `iter(iterable)`.

use tarn_object::errors::{
    expected_at_least, expected_at_most, no_keyword_arguments, not_implemented,
};
use tarn_object::{CallArgs, Context, RtResult, Value};

/// `iter(iterable) -> iterator`.
///
/// The callable/sentinel form is not implemented. A bare host mapping is
/// wrapped as a dict first, so iterating it yields its field names.
#[tracing::instrument(level = "debug", skip_all)]
pub fn iter(_cx: &Context, args: CallArgs<'_>) -> RtResult {
    let positional = args.positional_frame()?;
    if args.has_kwargs() {
        return Err(no_keyword_arguments("iter"));
    }
    match positional {
        [] => Err(expected_at_least("iter()", 1, 0)),
        [Value::HostObject(entries)] => Value::dict_from_host(entries)?.iterate(),
        [source] => source.iterate(),
        [_, _] => Err(not_implemented(
            "Builtin function 'iter' with callable/sentinel not implemented",
        )),
        _ => Err(expected_at_most("iter()", 2, positional.len())),
    }
}
