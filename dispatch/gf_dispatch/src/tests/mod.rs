//! Test modules relocated from implementation files.
//!
//! Engine, group, and double-dispatch behavior is exercised end-to-end
//! through the `Dispatcher` surface; unit tests for individual modules
//! stay inline with their implementations.


use crate::{Method, Value};

/// A method that ignores its arguments and returns fixed text.
fn constant(text: &'static str) -> Method {
    Method::new(move |_args, _state| Ok(Value::text(text)))
}
