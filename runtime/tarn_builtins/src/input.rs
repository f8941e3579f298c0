//! `input([prompt])`.

use tarn_object::errors::expected_at_most;
use tarn_object::{CallArgs, Context, RtResult, Value};

/// `input([prompt]) -> str`.
///
/// Reads one line through the context's prompt handler, without its
/// trailing newline. End of input is an `EOFError`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn input(cx: &Context, args: CallArgs<'_>) -> RtResult {
    let positional = args.positional_frame()?;
    let prompt = match positional {
        [] => String::new(),
        [prompt] => prompt.to_string(),
        _ => return Err(expected_at_most("input", 1, positional.len())),
    };
    cx.prompt().read_line(&prompt).map(Value::string)
}
