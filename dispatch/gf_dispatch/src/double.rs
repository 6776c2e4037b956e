//! Double dispatch for symmetric binary operations.
//!
//! Arithmetic- and comparison-style operators have two receivers that
//! might disagree about which method applies. The arbiter resolves the
//! first-found method for each operand independently, without executing
//! either, then applies the decision table:
//!
//! - same implementation on both sides -> run it once
//! - both non-default and different -> don't guess; run the default
//!   implementation and signal `AmbiguousBinaryMethod` (or hard-error,
//!   per policy)
//! - exactly one non-default -> run it, operands in original order
//!
//! "Default/internal" means the candidate found at the `"default"`
//! tag. Well-behaved types get commutative symmetry: operand order
//! never changes which implementation runs.

use gf_value::{ClassTag, Classify, Value};

use crate::engine::DispatchState;
use crate::errors::{ambiguous_binary_method, no_applicable_method, DispatchResult};
use crate::groups::find_candidate;
use crate::method::Method;
use crate::names::OperationName;
use crate::registry::SharedMethodRegistry;
use crate::resolve::{resolution_order, ResolutionOrder};
use crate::warnings::{DispatchWarning, SharedWarningHandler};

/// What to do when both operands resolve to distinct non-default
/// methods.
///
/// The fall-back-with-warning behavior presumes a default
/// implementation is registered; registries without a privileged
/// built-in fallback can opt into the hard error instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BinaryConflictPolicy {
    /// Run the default implementation and emit `AmbiguousBinaryMethod`
    /// through the warning handler (the default).
    #[default]
    WarnAndUseDefault,
    /// Fail the dispatch with `AmbiguousBinaryMethod` as a hard error.
    Error,
}

/// First-found candidate for one operand, located without executing it.
struct Candidate {
    method: Method,
    tag: ClassTag,
    order: ResolutionOrder,
    /// Cursor position just past `tag`, where delegation resumes.
    next_cursor: usize,
}

impl Candidate {
    fn is_default(&self) -> bool {
        self.tag.is_default()
    }
}

fn resolve_operand(
    registry: &SharedMethodRegistry,
    operation: &OperationName,
    value: &impl Classify,
) -> Option<Candidate> {
    let order = resolution_order(value);
    let reg = registry.read();
    let found = order
        .iter()
        .enumerate()
        .find_map(|(i, tag)| find_candidate(&reg, operation, tag).map(|m| (i, tag.clone(), m)));
    drop(reg);

    found.map(|(i, tag, method)| Candidate {
        method,
        tag,
        next_cursor: i + 1,
        order,
    })
}

/// Locate the default implementation for the conflict fallback path.
fn default_candidate(
    registry: &SharedMethodRegistry,
    operation: &OperationName,
    order: &ResolutionOrder,
) -> Option<Candidate> {
    let tag = ClassTag::default_tag();
    let method = {
        let reg = registry.read();
        find_candidate(&reg, operation, &tag)
    }?;
    Some(Candidate {
        method,
        tag,
        order: order.clone(),
        // The default tag is terminal; delegation from it exhausts.
        next_cursor: order.len(),
    })
}

fn run(
    registry: &SharedMethodRegistry,
    operation: OperationName,
    candidate: Candidate,
    args: &[Value],
) -> DispatchResult {
    let mut state =
        DispatchState::with_cursor(registry, operation, candidate.order, candidate.next_cursor);
    candidate.method.call(args, &mut state)
}

/// Resolve and invoke a symmetric binary operation on exactly two
/// operands.
pub(crate) fn dispatch_binary(
    registry: &SharedMethodRegistry,
    warnings: &SharedWarningHandler,
    policy: BinaryConflictPolicy,
    operation: OperationName,
    args: &[Value],
) -> DispatchResult {
    debug_assert_eq!(args.len(), 2);
    let left = resolve_operand(registry, &operation, &args[0]);
    let right = resolve_operand(registry, &operation, &args[1]);

    match (left, right) {
        (None, None) => Err(no_applicable_method(
            operation,
            resolution_order(&args[0]),
        )),
        (Some(c), None) | (None, Some(c)) => run(registry, operation, c, args),
        (Some(l), Some(r)) => {
            if l.method.ptr_eq(&r.method) {
                // Both sides agree (including both-default); run once.
                run(registry, operation, l, args)
            } else if r.is_default() {
                run(registry, operation, l, args)
            } else if l.is_default() {
                run(registry, operation, r, args)
            } else {
                conflict(registry, warnings, policy, operation, l, r, args)
            }
        }
    }
}

fn conflict(
    registry: &SharedMethodRegistry,
    warnings: &SharedWarningHandler,
    policy: BinaryConflictPolicy,
    operation: OperationName,
    left: Candidate,
    right: Candidate,
    args: &[Value],
) -> DispatchResult {
    match policy {
        BinaryConflictPolicy::Error => {
            Err(ambiguous_binary_method(operation, left.tag, right.tag))
        }
        BinaryConflictPolicy::WarnAndUseDefault => {
            warnings.warn(&DispatchWarning::AmbiguousBinaryMethod {
                operation: operation.clone(),
                left_tag: left.tag,
                right_tag: right.tag,
            });
            match default_candidate(registry, &operation, &left.order) {
                Some(c) => run(registry, operation, c, args),
                // No privileged fallback exists; the conflict cannot
                // complete.
                None => Err(no_applicable_method(operation, left.order)),
            }
        }
    }
}
