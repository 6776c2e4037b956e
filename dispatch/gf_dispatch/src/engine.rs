//! Single-dispatch engine and the resumable delegation protocol.
//!
//! # Architecture
//!
//! Dispatch separates "compute the resolution order once" from "try
//! candidates one at a time":
//! 1. The receiver's resolution order is computed when dispatch begins
//!    and is immutable for the life of the dispatch.
//! 2. A cursor walks the order; the first tag with a candidate
//!    (specific before group, per tag) selects the method to run.
//! 3. A method may call [`DispatchState::call_next`] to resume the walk
//!    at the position after its own tag, with whatever arguments it
//!    chooses to supply.
//!
//! Because the order is never recomputed, a method that mutates its
//! receiver's class tags mid-body cannot redirect an in-flight
//! delegation.

use gf_value::{ClassTag, Value};

use crate::errors::{next_candidate_outside_dispatch, no_applicable_method, DispatchResult};
use crate::groups::find_candidate;
use crate::names::OperationName;
use crate::registry::SharedMethodRegistry;
use crate::resolve::{resolution_order, ResolutionOrder};

/// Per-invocation dispatch record: the operation being resolved, the
/// resolution order computed when dispatch began, and a cursor marking
/// the next candidate to try.
///
/// Created fresh for every top-level dispatch, owned by the call stack
/// that created it, destroyed when the call returns. Never shared.
pub struct DispatchState<'a> {
    registry: &'a SharedMethodRegistry,
    operation: OperationName,
    order: ResolutionOrder,
    cursor: usize,
    active: bool,
}

impl<'a> DispatchState<'a> {
    pub(crate) fn new(
        registry: &'a SharedMethodRegistry,
        operation: OperationName,
        order: ResolutionOrder,
    ) -> Self {
        DispatchState {
            registry,
            operation,
            order,
            cursor: 0,
            active: true,
        }
    }

    /// State for a candidate located by the double-dispatch arbiter:
    /// the cursor is already past the chosen tag, so delegation
    /// continues down the rest of that operand's order.
    pub(crate) fn with_cursor(
        registry: &'a SharedMethodRegistry,
        operation: OperationName,
        order: ResolutionOrder,
        cursor: usize,
    ) -> Self {
        DispatchState {
            registry,
            operation,
            order,
            cursor,
            active: true,
        }
    }

    /// State for a method invoked outside any active dispatch;
    /// delegation from under it fails with
    /// `NextCandidateOutsideDispatch`.
    pub(crate) fn inactive(registry: &'a SharedMethodRegistry, operation: OperationName) -> Self {
        DispatchState {
            registry,
            operation,
            order: ResolutionOrder::new(),
            cursor: 0,
            active: false,
        }
    }

    /// The concrete operation being resolved.
    ///
    /// Inside a group method this names the operation that triggered
    /// the call, which one group implementation needs because it serves
    /// many operations.
    pub fn operation(&self) -> &OperationName {
        &self.operation
    }

    /// The resolution order computed when dispatch began.
    pub fn order(&self) -> &[ClassTag] {
        &self.order
    }

    /// Continue to the next candidate in the original resolution order.
    ///
    /// Resumes at the position after the currently executing method's
    /// tag, using `args` as supplied here (the caller may have
    /// transformed them). The order itself is the one computed when the
    /// dispatch began; mutating the receiver's tags has no effect on
    /// it.
    pub fn call_next(&mut self, args: &[Value]) -> DispatchResult {
        if !self.active {
            return Err(next_candidate_outside_dispatch(self.operation.clone()));
        }
        self.advance(args)
    }

    /// Walk the order from the cursor, invoking the first candidate.
    pub(crate) fn advance(&mut self, args: &[Value]) -> DispatchResult {
        loop {
            let Some(tag) = self.order.get(self.cursor).cloned() else {
                return Err(no_applicable_method(
                    self.operation.clone(),
                    self.order.clone(),
                ));
            };
            self.cursor += 1;

            // Clone the candidate out so the read guard is released
            // before the method body runs; a body may re-enter the
            // dispatcher or block without holding the registry.
            let candidate = {
                let registry = self.registry.read();
                find_candidate(&registry, &self.operation, &tag)
            };
            if let Some(method) = candidate {
                return method.call(args, self);
            }
        }
    }
}

/// Dispatch `operation` on `args`, resolving on `args[receiver]`.
///
/// The caller guarantees `receiver < args.len()`.
pub(crate) fn dispatch_single(
    registry: &SharedMethodRegistry,
    operation: OperationName,
    args: &[Value],
    receiver: usize,
) -> DispatchResult {
    let order = resolution_order(&args[receiver]);
    let mut state = DispatchState::new(registry, operation, order);
    state.advance(args)
}
