//! The dispatcher: registration surface and the sole dispatch entry
//! point collaborators use.
//!
//! `invoke` chooses single vs. double dispatch based on whether the
//! operation was declared binary-symmetric; everything else - the
//! resolution order, delegation, groups - is internal. Configuration
//! goes through [`DispatcherBuilder`] (conflict policy, warning
//! handler, pre-populated registry).

use gf_value::{ClassTag, Value};

use crate::double::{dispatch_binary, BinaryConflictPolicy};
use crate::engine::{dispatch_single, DispatchState};
use crate::errors::{missing_dispatch_argument, DispatchError, DispatchResult};
use crate::explain::{explain, Explanation};
use crate::method::Method;
use crate::names::{GroupId, OperationName};
use crate::registry::SharedMethodRegistry;
use crate::warnings::{tracing_handler, SharedWarningHandler};

/// Generic-operation dispatcher.
///
/// Cloning is cheap and shares the underlying registry and warning
/// handler; independent dispatches may run concurrently on clones.
#[derive(Clone)]
pub struct Dispatcher {
    registry: SharedMethodRegistry,
    warnings: SharedWarningHandler,
    conflict_policy: BinaryConflictPolicy,
}

impl Dispatcher {
    /// A dispatcher with default configuration: empty registry,
    /// fall-back-with-warning conflict policy, tracing warning handler.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start building a configured dispatcher.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// The shared registry handle.
    pub fn registry(&self) -> &SharedMethodRegistry {
        &self.registry
    }

    /// The warning handler conditions are delivered through.
    pub fn warnings(&self) -> &SharedWarningHandler {
        &self.warnings
    }

    /// Register an implementation for `(operation, tag)`.
    ///
    /// Last-writer-wins per key; registering the same pair twice is
    /// idempotent. Rejects empty tags.
    pub fn register_method(
        &self,
        operation: &str,
        tag: &str,
        method: Method,
    ) -> Result<(), DispatchError> {
        self.registry
            .write()
            .register(OperationName::from(operation), ClassTag::new(tag), method)
    }

    /// Declare `operation` a member of operator group `group`.
    pub fn register_group(&self, operation: &str, group: &str) {
        self.registry
            .write()
            .register_group(OperationName::from(operation), GroupId::from(group));
    }

    /// Register a group-level fallback implementation for
    /// `(group, tag)`.
    pub fn register_group_method(
        &self,
        group: &str,
        tag: &str,
        method: Method,
    ) -> Result<(), DispatchError> {
        self.registry
            .write()
            .register_group_method(GroupId::from(group), ClassTag::new(tag), method)
    }

    /// Declare an operation binary-symmetric: two-argument invocations
    /// go through the double-dispatch arbiter.
    pub fn declare_symmetric(&self, operation: &str) {
        self.registry
            .write()
            .declare_symmetric(OperationName::from(operation));
    }

    /// Perform a dispatch, resolving on the first argument.
    pub fn invoke(&self, operation: &str, args: &[Value]) -> DispatchResult {
        self.invoke_on(operation, args, 0)
    }

    /// Perform a dispatch with an explicitly designated dispatch
    /// argument.
    ///
    /// Binary-symmetric operations invoked with exactly two arguments
    /// take the double-dispatch path regardless of `receiver`; any
    /// other arity falls back to single dispatch on `args[receiver]`.
    pub fn invoke_on(&self, operation: &str, args: &[Value], receiver: usize) -> DispatchResult {
        let operation = OperationName::from(operation);
        if args.get(receiver).is_none() {
            return Err(missing_dispatch_argument(operation));
        }
        let symmetric = self.registry.read().is_symmetric(&operation);
        if symmetric && args.len() == 2 {
            dispatch_binary(
                &self.registry,
                &self.warnings,
                self.conflict_policy,
                operation,
                args,
            )
        } else {
            dispatch_single(&self.registry, operation, args, receiver)
        }
    }

    /// Run a method handle outside any active dispatch.
    ///
    /// Delegation from inside it fails with
    /// `NextCandidateOutsideDispatch`; this is the supported way to
    /// call a stored method as a plain function.
    pub fn call_detached(&self, operation: &str, method: &Method, args: &[Value]) -> DispatchResult {
        let mut state = DispatchState::inactive(&self.registry, OperationName::from(operation));
        method.call(args, &mut state)
    }

    /// The annotated resolution order `invoke` would walk for `value`.
    pub fn explain(&self, operation: &str, value: &Value) -> Explanation {
        explain(
            &self.registry.read(),
            &OperationName::from(operation),
            value,
        )
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Dispatcher::new()
    }
}

/// Builder for [`Dispatcher`] instances.
pub struct DispatcherBuilder {
    registry: Option<SharedMethodRegistry>,
    warnings: Option<SharedWarningHandler>,
    conflict_policy: BinaryConflictPolicy,
}

impl DispatcherBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        DispatcherBuilder {
            registry: None,
            warnings: None,
            conflict_policy: BinaryConflictPolicy::default(),
        }
    }

    /// Use a pre-populated (possibly shared) registry.
    #[must_use]
    pub fn registry(mut self, registry: SharedMethodRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Set the warning handler.
    #[must_use]
    pub fn warning_handler(mut self, handler: SharedWarningHandler) -> Self {
        self.warnings = Some(handler);
        self
    }

    /// Set the policy for conflicting double dispatch.
    #[must_use]
    pub fn conflict_policy(mut self, policy: BinaryConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    /// Build the dispatcher.
    pub fn build(self) -> Dispatcher {
        Dispatcher {
            registry: self.registry.unwrap_or_default(),
            warnings: self.warnings.unwrap_or_else(tracing_handler),
            conflict_policy: self.conflict_policy,
        }
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        DispatcherBuilder::new()
    }
}
