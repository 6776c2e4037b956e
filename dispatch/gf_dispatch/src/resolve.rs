//! Resolution order computation.
//!
//! The resolution order for a value is a pure function of its
//! classification at the moment dispatch begins. The engine computes it
//! exactly once per top-level dispatch and never recomputes it
//! mid-flight, which is what makes the "continue to next candidate"
//! primitive immune to in-method mutation of the receiver's tags.

use gf_value::{ClassTag, Classify};
use smallvec::SmallVec;

/// The full ordered list of candidate class tags considered for one
/// dispatch, ending in `"default"`.
pub type ResolutionOrder = SmallVec<[ClassTag; 6]>;

/// Compute the candidate order for a receiver.
///
/// An explicit class vector `[c1, ..., cn]` yields
/// `[c1, ..., cn, "default"]`. Without one, the intrinsic fallback
/// classification stands in - itself possibly an ordered prefix such as
/// `["matrix", "numeric"]`. `"default"` is always appended as the
/// terminal candidate, so the order is never empty and resolution is
/// always finite.
pub fn resolution_order(value: &impl Classify) -> ResolutionOrder {
    let mut order: ResolutionOrder = match value.explicit_tags() {
        Some(tags) => tags.iter().cloned().collect(),
        None => value.fallback_classification().into_iter().collect(),
    };
    order.push(ClassTag::default_tag());
    order
}
