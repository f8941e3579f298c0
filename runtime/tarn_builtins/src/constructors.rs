//! Container and text constructors exposed as callables.

use tarn_object::errors::{no_keyword_arguments, takes_at_most_one, takes_exactly_one};
use tarn_object::{CallArgs, Context, RtResult, Value};

/// Positional arguments of a constructor that rejects keywords.
fn positional<'a>(name: &str, args: &CallArgs<'a>) -> RtResult<&'a [Value]> {
    let positional = args.positional_frame()?;
    if args.has_kwargs() {
        return Err(no_keyword_arguments(name));
    }
    Ok(positional)
}

/// `list([iterable])`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn list(cx: &Context, args: CallArgs<'_>) -> RtResult {
    Value::list_from(cx, positional("list", &args)?)
}

/// `set([iterable])`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn set(cx: &Context, args: CallArgs<'_>) -> RtResult {
    Value::set_from(cx, positional("set", &args)?)
}

/// `frozenset([iterable])`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn frozenset(cx: &Context, args: CallArgs<'_>) -> RtResult {
    Value::frozenset_from(cx, positional("frozenset", &args)?)
}

/// `str([obj])`: the text form, `''` with no argument.
#[tracing::instrument(level = "debug", skip_all)]
pub fn string(_cx: &Context, args: CallArgs<'_>) -> RtResult {
    match positional("str", &args)? {
        [] => Ok(Value::string("")),
        [obj] => Ok(Value::string(obj.to_string())),
        more => Err(takes_at_most_one("str", more.len())),
    }
}

/// `repr(obj)`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn repr(_cx: &Context, args: CallArgs<'_>) -> RtResult {
    match positional("repr", &args)? {
        [obj] => Ok(Value::string(obj.repr())),
        other => Err(takes_exactly_one("repr", other.len())),
    }
}
