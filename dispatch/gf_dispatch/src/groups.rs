//! Operator-group resolution.
//!
//! A group is a family of related operations sharing one fallback
//! implementation per class tag. The rule that makes groups compose
//! with subtyping: a specific method for `(operation, tag)` always
//! wins over a group method for the same tag, checked at **every**
//! candidate tag in the resolution order - not "all specific tags,
//! then all group tags". A subtype can therefore override one
//! operation of a family without affecting its siblings.

use gf_value::ClassTag;

use crate::method::Method;
use crate::names::OperationName;
use crate::registry::MethodRegistry;

/// Specific method registered for `(operation, tag)`, if any.
pub fn specific_method(
    registry: &MethodRegistry,
    operation: &OperationName,
    tag: &ClassTag,
) -> Option<Method> {
    registry.lookup(operation, tag).cloned()
}

/// Group-level fallback for `operation` at `tag`.
///
/// Absent when the operation belongs to no group, or the group has no
/// implementation for the tag.
pub fn group_method(
    registry: &MethodRegistry,
    operation: &OperationName,
    tag: &ClassTag,
) -> Option<Method> {
    let group = registry.group_of(operation)?;
    registry.group_lookup(group, tag).cloned()
}

/// First candidate at a single tag: specific before group.
pub fn find_candidate(
    registry: &MethodRegistry,
    operation: &OperationName,
    tag: &ClassTag,
) -> Option<Method> {
    specific_method(registry, operation, tag)
        .or_else(|| group_method(registry, operation, tag))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::names::GroupId;
    use gf_value::Value;

    fn tagged(text: &'static str) -> Method {
        Method::new(move |_args, _state| Ok(Value::text(text)))
    }

    #[test]
    fn specific_wins_over_group_at_the_same_tag() {
        let mut registry = MethodRegistry::new();
        let op = OperationName::from("lessThan");
        let group = GroupId::from("Comparable");
        let tag = ClassTag::new("money");
        let specific = tagged("specific");

        registry.register_group(op.clone(), group.clone());
        registry
            .register_group_method(group, tag.clone(), tagged("group"))
            .unwrap();
        registry.register(op.clone(), tag.clone(), specific.clone()).unwrap();

        let found = find_candidate(&registry, &op, &tag);
        assert!(found.is_some_and(|m| m.ptr_eq(&specific)));
    }

    #[test]
    fn group_fallback_found_when_no_specific_method() {
        let mut registry = MethodRegistry::new();
        let op = OperationName::from("lessThan");
        let group = GroupId::from("Comparable");
        let tag = ClassTag::new("money");
        let fallback = tagged("group");

        registry.register_group(op.clone(), group.clone());
        registry
            .register_group_method(group, tag.clone(), fallback.clone())
            .unwrap();

        assert!(specific_method(&registry, &op, &tag).is_none());
        let found = find_candidate(&registry, &op, &tag);
        assert!(found.is_some_and(|m| m.ptr_eq(&fallback)));
    }

    #[test]
    fn no_group_membership_means_no_group_method() {
        let mut registry = MethodRegistry::new();
        let group = GroupId::from("Comparable");
        registry
            .register_group_method(group, ClassTag::new("money"), tagged("group"))
            .unwrap();

        // "greaterThan" was never declared a member of the group.
        let op = OperationName::from("greaterThan");
        assert!(group_method(&registry, &op, &ClassTag::new("money")).is_none());
    }
}
