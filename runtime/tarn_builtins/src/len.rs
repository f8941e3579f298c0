//! `len(obj)`.

use num_bigint::BigInt;
use tarn_object::errors::{no_len, takes_exactly_one};
use tarn_object::{CallArgs, Context, RtResult, Value};

/// `len(obj) -> int`.
///
/// Reads the container's raw size directly; there is no user-level
/// `__len__` hook.
#[tracing::instrument(level = "debug", skip_all)]
pub fn len(_cx: &Context, args: CallArgs<'_>) -> RtResult {
    let positional = args.positional_frame()?;
    let [obj] = positional else {
        return Err(takes_exactly_one("len", positional.len()));
    };
    let size = obj.raw_len().ok_or_else(|| no_len(obj))?;
    Ok(Value::big_int(BigInt::from(size)))
}
