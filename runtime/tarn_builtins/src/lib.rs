//! Tarn Builtins - native call sites over the value protocol.
//!
//! Each builtin is a plain `BuiltinFn`: it receives the `Context` and the
//! engine's argument frame, validates arity and keywords, and then defers to
//! `tarn_object` for the actual work. `lookup` resolves a builtin by name the
//! way the engine's global namespace would.

mod bytearray;
mod constructors;
mod input;
mod iter;
mod len;
mod map;
mod sum;

use std::sync::Once;

use tarn_object::{BuiltinFn, Value};

pub use bytearray::bytearray;
pub use constructors::{frozenset, list, repr, set, string};
pub use input::input;
pub use iter::iter;
pub use len::len;
pub use map::map;
pub use sum::sum;

/// Every builtin this crate provides, by name.
pub const BUILTINS: &[(&str, BuiltinFn)] = &[
    ("bytearray", bytearray),
    ("frozenset", frozenset),
    ("input", input),
    ("iter", iter),
    ("len", len),
    ("list", list),
    ("map", map),
    ("repr", repr),
    ("set", set),
    ("str", string),
    ("sum", sum),
];

/// Resolve a builtin by name as a callable value.
pub fn lookup(name: &str) -> Option<Value> {
    BUILTINS
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|&(builtin, func)| Value::builtin(builtin, func))
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for embedders.
///
/// Enable with `RUST_LOG=tarn_object=trace,tarn_builtins=debug`. Does
/// nothing when `RUST_LOG` is unset; safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
