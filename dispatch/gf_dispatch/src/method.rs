//! Callable method handles.
//!
//! A `Method` is one implementation of a generic operation, applicable
//! to one class tag. It receives the argument list and the in-flight
//! `DispatchState`, through which it may delegate to the next more
//! general candidate.

use std::fmt;
use std::sync::Arc;

use gf_value::Value;

use crate::engine::DispatchState;
use crate::errors::DispatchResult;

/// Implementation signature for one method of a generic operation.
pub type MethodFn = dyn Fn(&[Value], &mut DispatchState<'_>) -> DispatchResult + Send + Sync;

/// One implementation of a generic operation, applicable to one class
/// tag.
///
/// Cloning is O(1); clones share the same underlying callable, and
/// [`Method::ptr_eq`] identifies handles that denote the same
/// implementation (the identity the double-dispatch arbiter compares).
#[derive(Clone)]
pub struct Method(Arc<MethodFn>);

impl Method {
    /// Wrap a callable as a method.
    pub fn new(
        f: impl Fn(&[Value], &mut DispatchState<'_>) -> DispatchResult + Send + Sync + 'static,
    ) -> Self {
        Method(Arc::new(f))
    }

    /// Invoke the method under an in-flight dispatch state.
    #[inline]
    pub fn call(&self, args: &[Value], state: &mut DispatchState<'_>) -> DispatchResult {
        (self.0)(args, state)
    }

    /// Whether two handles denote the same implementation.
    #[inline]
    pub fn ptr_eq(&self, other: &Method) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Method({:p})", Arc::as_ptr(&self.0))
    }
}
