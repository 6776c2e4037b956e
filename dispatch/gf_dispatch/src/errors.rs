//! Error types for dispatch.
//!
//! # Structured Error Categories
//!
//! `DispatchErrorKind` provides typed error categories so callers can
//! match on the condition rather than parse message strings. Factory
//! functions (e.g. `no_applicable_method()`) are the construction API;
//! the engine never builds kinds inline.
//!
//! Failed dispatch always reports the operation name and, where it was
//! computed, the full resolution order attempted - the same view
//! `explain` exposes proactively.

use crate::names::OperationName;
use crate::resolve::ResolutionOrder;
use gf_value::{ClassTag, Value};
use thiserror::Error;

/// Result of a dispatch.
pub type DispatchResult<T = Value> = Result<T, DispatchError>;

/// Typed error category for dispatch failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DispatchErrorKind {
    /// The resolution order was exhausted with no applicable method.
    ///
    /// The terminal `"default"` entry must itself be registered by
    /// callers who want a catch-all; otherwise this is the normal
    /// not-found outcome.
    #[error(
        "no applicable method for `{operation}` (resolution order: [{}])",
        format_order(.order)
    )]
    NoApplicableMethod {
        /// The operation that failed to resolve.
        operation: OperationName,
        /// The full resolution order attempted.
        order: ResolutionOrder,
    },

    /// "Continue to next candidate" was invoked outside an active
    /// dispatch. Programming error; indicates misuse of the delegation
    /// primitive.
    #[error("`{operation}`: continue-to-next-candidate invoked outside an active dispatch")]
    NextCandidateOutsideDispatch {
        /// The operation the detached method was invoked under.
        operation: OperationName,
    },

    /// A registration carried an empty class tag. The registration is
    /// rejected and the registry left unchanged.
    #[error("malformed class tag in registration for `{context}`: tags must be non-empty")]
    MalformedClassTag {
        /// The operation or group the registration targeted.
        context: String,
    },

    /// `invoke` was called with no argument at the dispatch position.
    #[error("`{operation}` invoked with no dispatch argument")]
    MissingDispatchArgument {
        /// The operation that was invoked.
        operation: OperationName,
    },

    /// Both operands of a symmetric binary operation resolved to
    /// distinct non-default methods, under the strict conflict policy.
    #[error(
        "ambiguous double dispatch for `{operation}`: left operand resolves at `{left_tag}`, \
         right operand at `{right_tag}`"
    )]
    AmbiguousBinaryMethod {
        /// The symmetric operation.
        operation: OperationName,
        /// Tag at which the left operand's method was found.
        left_tag: ClassTag,
        /// Tag at which the right operand's method was found.
        right_tag: ClassTag,
    },

    /// Catch-all for errors raised inside method bodies.
    #[error("{message}")]
    Custom {
        /// Human-readable description.
        message: String,
    },
}

fn format_order(order: &ResolutionOrder) -> String {
    order
        .iter()
        .map(ClassTag::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Dispatch error.
///
/// Carries a structured kind; the rendered message is the kind's
/// `Display` output.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct DispatchError {
    /// Structured error category.
    pub kind: DispatchErrorKind,
}

impl DispatchError {
    fn from_kind(kind: DispatchErrorKind) -> Self {
        DispatchError { kind }
    }
}

/// Resolution order exhausted with no match.
pub fn no_applicable_method(operation: OperationName, order: ResolutionOrder) -> DispatchError {
    DispatchError::from_kind(DispatchErrorKind::NoApplicableMethod { operation, order })
}

/// Delegation invoked outside an active dispatch.
pub fn next_candidate_outside_dispatch(operation: OperationName) -> DispatchError {
    DispatchError::from_kind(DispatchErrorKind::NextCandidateOutsideDispatch { operation })
}

/// Registration rejected because of an empty class tag.
pub fn malformed_class_tag(context: impl Into<String>) -> DispatchError {
    DispatchError::from_kind(DispatchErrorKind::MalformedClassTag {
        context: context.into(),
    })
}

/// Invocation carried no argument at the dispatch position.
pub fn missing_dispatch_argument(operation: OperationName) -> DispatchError {
    DispatchError::from_kind(DispatchErrorKind::MissingDispatchArgument { operation })
}

/// Conflicting double dispatch under the strict policy.
pub fn ambiguous_binary_method(
    operation: OperationName,
    left_tag: ClassTag,
    right_tag: ClassTag,
) -> DispatchError {
    DispatchError::from_kind(DispatchErrorKind::AmbiguousBinaryMethod {
        operation,
        left_tag,
        right_tag,
    })
}

/// Error raised by a method body.
pub fn method_error(message: impl Into<String>) -> DispatchError {
    DispatchError::from_kind(DispatchErrorKind::Custom {
        message: message.into(),
    })
}
