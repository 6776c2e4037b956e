//! gf Dispatch - single/double dispatch resolution engine for generic
//! operations.
//!
//! Given a named operation and one or more tagged receiver values, the
//! engine determines which implementation runs, honoring the receiver's
//! ordered class vector, a bounded "continue to next candidate"
//! delegation protocol, operator groups sharing one fallback per class
//! tag, and a double-dispatch arbiter for symmetric binary operations.
//!
//! # Architecture
//!
//! - `resolution_order`: candidate tags for a receiver, terminal
//!   `"default"` always appended
//! - `MethodRegistry` / `SharedMethodRegistry`: per-operation and
//!   per-group dispatch tables behind a read-mostly lock
//! - `DispatchState`: per-invocation record making delegation immune to
//!   in-method tag mutation
//! - `dispatch_binary`: the arbiter applying the symmetric-operation
//!   decision table
//! - `Dispatcher` / `DispatcherBuilder`: the collaborator-facing
//!   surface (registration, `invoke`, `explain`)
//!
//! Value types come from `gf_value` and are re-exported for
//! convenience.

mod dispatcher;
mod double;
mod engine;
pub mod errors;
mod explain;
mod groups;
mod method;
mod names;
mod registry;
mod resolve;
mod warnings;

#[cfg(test)]
mod tests;

pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use double::BinaryConflictPolicy;
pub use engine::DispatchState;
pub use errors::{
    ambiguous_binary_method, malformed_class_tag, method_error, missing_dispatch_argument,
    next_candidate_outside_dispatch, no_applicable_method, DispatchError, DispatchErrorKind,
    DispatchResult,
};
pub use explain::{explain, ExplainEntry, Explanation};
pub use groups::{find_candidate, group_method, specific_method};
pub use method::{Method, MethodFn};
pub use names::{GroupId, OperationName};
pub use registry::{MethodRegistry, SharedMethodRegistry};
pub use resolve::{resolution_order, ResolutionOrder};
pub use warnings::{
    buffer_handler, silent_handler, tracing_handler, BufferWarningHandler, DispatchWarning,
    SharedWarningHandler, TracingWarningHandler, WarningHandlerImpl,
};

// Re-export value types from gf_value
pub use gf_value::{class_vector, ClassTag, ClassVector, Classify, Payload, Value};
