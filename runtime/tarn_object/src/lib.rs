//! Tarn Object - value protocol and container kinds for the Tarn runtime.
//!
//! This crate provides:
//! - Runtime value types (`Value`, `Heap`, `Shared`, `ListValue`, `SetValue`, etc.)
//! - The value protocol: comparison, operators, containment, subscripting,
//!   iteration and calls, dispatched over a closed set of kinds
//! - Protocol errors (`RtError`, `RtResult`) with their message factories
//! - Kind classification (`Kind`, `KindSet`)
//! - Runtime configuration and the `Context` handed to every operation
//!
//! # Value Types
//!
//! Heap values are only built through `Value::` factory methods:
//! - `Heap<T>` wraps immutable shared data
//! - `Shared<T>` wraps mutable shared data, so containers and their live
//!   iterators observe each other's mutation
//! - Single-threaded reference counting via `Rc`

pub mod config;
mod context;
pub mod errors;
mod kind;
pub mod ops;
mod prompt;
mod value;

pub use config::{CompatVersion, RuntimeConfig, SumErrorPolicy};
pub use context::{Context, ContextBuilder};
pub use errors::{ExcKind, RtError, RtResult};
pub use kind::{Kind, KindSet};
pub use ops::{BinaryOp, CompareOp, UnaryOp};
pub use prompt::{PromptHandler, ScriptedPromptHandler, StdinPromptHandler};
pub use value::{
    collect, for_each, BuiltinFn, BuiltinFunction, CallArgs, Dict, DictValue, Heap, KeyIterator,
    ListIterator, ListValue, MapIterator, SeqIterator, SetValue, Shared, SliceValue, Value,
};
