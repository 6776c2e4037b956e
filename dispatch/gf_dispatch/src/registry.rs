//! Method registry: per-operation and per-group dispatch tables.
//!
//! The registry holds, per generic operation, a mapping from class tag
//! to implementation, plus the operation-to-group membership table, the
//! per-group fallback tables, and the set of operations declared
//! binary-symmetric.
//!
//! Registration for the same `(operation, tag)` key overwrites the
//! previous entry. Last-writer-wins is intentional: it is what lets a
//! more specific package or later load shadow an earlier, more generic
//! implementation.
//!
//! Lookup is exact-match only on the tag; there is no pattern matching
//! and no wildcard.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::sync::Arc;

use gf_value::ClassTag;

use crate::errors::{malformed_class_tag, DispatchError};
use crate::method::Method;
use crate::names::{GroupId, OperationName};

/// Dispatch tables for generic operations and operator groups.
#[derive(Default, Debug)]
pub struct MethodRegistry {
    /// operation -> tag -> implementation
    methods: FxHashMap<OperationName, FxHashMap<ClassTag, Method>>,
    /// operation -> containing operator group
    groups: FxHashMap<OperationName, GroupId>,
    /// group -> tag -> shared fallback implementation
    group_methods: FxHashMap<GroupId, FxHashMap<ClassTag, Method>>,
    /// operations resolved through the double-dispatch arbiter
    symmetric: FxHashSet<OperationName>,
}

impl MethodRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an implementation for `(operation, tag)`.
    ///
    /// Overwrites any previous entry for the same key. Rejects empty
    /// tags with `MalformedClassTag`, leaving the registry unchanged.
    pub fn register(
        &mut self,
        operation: OperationName,
        tag: ClassTag,
        method: Method,
    ) -> Result<(), DispatchError> {
        if !tag.is_well_formed() {
            return Err(malformed_class_tag(operation.as_str()));
        }
        tracing::debug!(operation = %operation, tag = %tag, "registering method");
        self.methods.entry(operation).or_default().insert(tag, method);
        Ok(())
    }

    /// Exact-match lookup of a specific method.
    pub fn lookup(&self, operation: &OperationName, tag: &ClassTag) -> Option<&Method> {
        self.methods.get(operation)?.get(tag)
    }

    /// Declare `operation` a member of `group`.
    ///
    /// An operation belongs to at most one group; a later declaration
    /// replaces the earlier one.
    pub fn register_group(&mut self, operation: OperationName, group: GroupId) {
        tracing::debug!(operation = %operation, group = %group, "registering group membership");
        self.groups.insert(operation, group);
    }

    /// The operator group `operation` belongs to, if any.
    pub fn group_of(&self, operation: &OperationName) -> Option<&GroupId> {
        self.groups.get(operation)
    }

    /// Register a group-level fallback implementation for `(group, tag)`.
    ///
    /// Same overwrite and validation rules as [`MethodRegistry::register`].
    pub fn register_group_method(
        &mut self,
        group: GroupId,
        tag: ClassTag,
        method: Method,
    ) -> Result<(), DispatchError> {
        if !tag.is_well_formed() {
            return Err(malformed_class_tag(group.as_str()));
        }
        tracing::debug!(group = %group, tag = %tag, "registering group method");
        self.group_methods.entry(group).or_default().insert(tag, method);
        Ok(())
    }

    /// Exact-match lookup of a group-level fallback.
    pub fn group_lookup(&self, group: &GroupId, tag: &ClassTag) -> Option<&Method> {
        self.group_methods.get(group)?.get(tag)
    }

    /// Declare an operation binary-symmetric, routing two-argument
    /// invocations through the double-dispatch arbiter.
    pub fn declare_symmetric(&mut self, operation: OperationName) {
        tracing::debug!(operation = %operation, "declaring operation binary-symmetric");
        self.symmetric.insert(operation);
    }

    /// Whether an operation was declared binary-symmetric.
    pub fn is_symmetric(&self, operation: &OperationName) -> bool {
        self.symmetric.contains(operation)
    }

    /// Iterate the operations with at least one specific method.
    pub fn operations(&self) -> impl Iterator<Item = &OperationName> {
        self.methods.keys()
    }

    /// Whether no specific or group methods are registered.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty() && self.group_methods.is_empty()
    }
}

/// Thread-safe shared handle to a [`MethodRegistry`].
///
/// Reads never block other reads; each registration is atomic from a
/// reader's point of view (readers observe either the old or the new
/// mapping for a key, never a partially applied one). Concurrent
/// writers serialize on the lock.
pub struct SharedMethodRegistry(Arc<RwLock<MethodRegistry>>);

impl SharedMethodRegistry {
    /// Wrap an owned registry.
    pub fn new(registry: MethodRegistry) -> Self {
        SharedMethodRegistry(Arc::new(RwLock::new(registry)))
    }

    /// Get read access to the registry.
    pub fn read(&self) -> RwLockReadGuard<'_, MethodRegistry> {
        self.0.read()
    }

    /// Get write access to the registry.
    pub fn write(&self) -> RwLockWriteGuard<'_, MethodRegistry> {
        self.0.write()
    }
}

impl Default for SharedMethodRegistry {
    fn default() -> Self {
        SharedMethodRegistry::new(MethodRegistry::new())
    }
}

impl Clone for SharedMethodRegistry {
    fn clone(&self) -> Self {
        SharedMethodRegistry(Arc::clone(&self.0))
    }
}

impl fmt::Debug for SharedMethodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedMethodRegistry({:?})", &*self.0.read())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::errors::DispatchErrorKind;
    use gf_value::Value;

    fn noop() -> Method {
        Method::new(|_args, _state| Ok(Value::unit()))
    }

    #[test]
    fn register_then_lookup() {
        let mut registry = MethodRegistry::new();
        let op = OperationName::from("render");
        let tag = ClassTag::new("money");
        registry.register(op.clone(), tag.clone(), noop()).unwrap();

        assert!(registry.lookup(&op, &tag).is_some());
        assert!(registry.lookup(&op, &ClassTag::new("text")).is_none());
        assert!(registry
            .lookup(&OperationName::from("combine"), &tag)
            .is_none());
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = MethodRegistry::new();
        let op = OperationName::from("render");
        let tag = ClassTag::new("money");
        let first = noop();
        let second = noop();

        registry.register(op.clone(), tag.clone(), first).unwrap();
        registry.register(op.clone(), tag.clone(), second.clone()).unwrap();

        let found = registry.lookup(&op, &tag);
        assert!(found.is_some_and(|m| m.ptr_eq(&second)));
    }

    #[test]
    fn empty_tag_is_rejected_and_registry_unchanged() {
        let mut registry = MethodRegistry::new();
        let err = registry.register(OperationName::from("render"), ClassTag::new(""), noop());

        assert!(matches!(
            err,
            Err(DispatchError {
                kind: DispatchErrorKind::MalformedClassTag { .. }
            })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn empty_tag_rejected_for_group_methods_too() {
        let mut registry = MethodRegistry::new();
        let err =
            registry.register_group_method(GroupId::from("Comparable"), ClassTag::new(""), noop());
        assert!(err.is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn group_membership_and_lookup() {
        let mut registry = MethodRegistry::new();
        let op = OperationName::from("lessThan");
        let group = GroupId::from("Comparable");
        let tag = ClassTag::new("money");

        registry.register_group(op.clone(), group.clone());
        registry.register_group_method(group.clone(), tag.clone(), noop()).unwrap();

        assert_eq!(registry.group_of(&op), Some(&group));
        assert!(registry.group_lookup(&group, &tag).is_some());
        assert!(registry.group_of(&OperationName::from("render")).is_none());
    }

    #[test]
    fn symmetric_declarations_are_per_operation() {
        let mut registry = MethodRegistry::new();
        registry.declare_symmetric(OperationName::from("add"));

        assert!(registry.is_symmetric(&OperationName::from("add")));
        assert!(!registry.is_symmetric(&OperationName::from("render")));
    }

    #[test]
    fn shared_registry_reads_see_whole_registrations() {
        use std::thread;

        let shared = SharedMethodRegistry::default();
        let writer = shared.clone();

        let t = thread::spawn(move || {
            for i in 0..50 {
                let op = OperationName::new(format!("op{i}"));
                writer.write().register(op, ClassTag::new("money"), noop()).unwrap();
            }
        });

        for _ in 0..200 {
            let registry = shared.read();
            // A reader sees either the old or the new mapping, never a
            // partially applied one; any lookup it performs is coherent.
            let found = registry.lookup(&OperationName::from("op0"), &ClassTag::new("money"));
            if let Some(m) = found {
                assert!(m.ptr_eq(&m.clone()));
            }
        }

        t.join().unwrap();
        assert!(shared
            .read()
            .lookup(&OperationName::from("op49"), &ClassTag::new("money"))
            .is_some());
    }
}
