//! Native callables and their argument frame.

use std::fmt;

use super::Value;
use crate::context::Context;
use crate::errors::{calling_convention_not_used, RtResult};

/// Signature shared by every native function.
pub type BuiltinFn = fn(&Context, CallArgs<'_>) -> RtResult;

/// A named native function.
#[derive(Copy, Clone)]
pub struct BuiltinFunction {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl BuiltinFunction {
    pub fn new(name: &'static str, func: BuiltinFn) -> Self {
        BuiltinFunction { name, func }
    }

    #[inline]
    pub fn call(&self, cx: &Context, args: CallArgs<'_>) -> RtResult {
        (self.func)(cx, args)
    }
}

impl PartialEq for BuiltinFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<built-in function {}>", self.name)
    }
}

/// Argument frame handed to a native function.
///
/// The engine always passes a positional frame, possibly empty. A missing
/// frame means the caller bypassed the calling convention.
#[derive(Copy, Clone, Debug, Default)]
pub struct CallArgs<'a> {
    args: Option<&'a [Value]>,
    kwargs: Option<&'a [(String, Value)]>,
}

impl<'a> CallArgs<'a> {
    /// Positional arguments only.
    pub fn positional(args: &'a [Value]) -> Self {
        CallArgs {
            args: Some(args),
            kwargs: None,
        }
    }

    /// Positional and keyword arguments.
    pub fn with_kwargs(args: &'a [Value], kwargs: &'a [(String, Value)]) -> Self {
        CallArgs {
            args: Some(args),
            kwargs: Some(kwargs),
        }
    }

    /// A frame with no positional slot at all.
    pub fn missing() -> Self {
        CallArgs::default()
    }

    /// The positional arguments, or a calling-convention error.
    pub fn positional_frame(&self) -> RtResult<&'a [Value]> {
        self.args.ok_or_else(calling_convention_not_used)
    }

    /// Whether any keyword argument was passed.
    pub fn has_kwargs(&self) -> bool {
        self.kwargs.is_some_and(|kw| !kw.is_empty())
    }
}
