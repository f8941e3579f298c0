//! `bytearray(...)`.

use tarn_object::errors::{no_keyword_arguments, not_implemented};
use tarn_object::{CallArgs, Context, RtResult, Value};

/// `bytearray(bytes_or_buffer) -> bytearray`.
///
/// Only the copy overload exists: the result shares no storage with its
/// source. The string, iterable, size and empty overloads report
/// `NotImplementedError`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn bytearray(_cx: &Context, args: CallArgs<'_>) -> RtResult {
    let positional = args.positional_frame()?;
    if args.has_kwargs() {
        return Err(no_keyword_arguments("bytearray"));
    }
    match positional {
        [source] => source
            .to_byte_vec()
            .map(Value::bytearray)
            .ok_or_else(|| not_implemented("Not implemented")),
        _ => Err(not_implemented("Not implemented")),
    }
}
