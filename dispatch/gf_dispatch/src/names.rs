//! Lookup keys for generic operations and operator groups.
//!
//! Provides type-safe keys for registry lookups, keeping "the name of
//! an operation" and "the name of a group" distinct at the type level
//! rather than encoded into a single mangled identifier string.
//!
//! Uses cheaply cloneable `Arc<str>` storage so keys can be cloned into
//! dispatch states without allocation.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Name of a generic operation, globally unique within a registry.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct OperationName(Arc<str>);

impl OperationName {
    /// Create an operation name.
    #[inline]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        OperationName(name.into())
    }

    /// The operation's name.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for OperationName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OperationName {
    fn from(name: &str) -> Self {
        OperationName::new(name)
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an operator group (a family of related operations
/// sharing one fallback implementation per class tag).
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct GroupId(Arc<str>);

impl GroupId {
    /// Create a group identifier.
    #[inline]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        GroupId(name.into())
    }

    /// The group's name.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for GroupId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupId {
    fn from(name: &str) -> Self {
        GroupId::new(name)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[test]
    fn operation_names_as_map_keys() {
        let mut map: FxHashMap<OperationName, u32> = FxHashMap::default();
        map.insert(OperationName::from("render"), 1);
        map.insert(OperationName::from("combine"), 2);

        assert_eq!(map.get(&OperationName::from("render")), Some(&1));
        assert_eq!(map.get("combine"), Some(&2));
        assert_eq!(map.get("aggregate"), None);
    }

    #[test]
    fn group_ids_are_distinct_from_operation_names() {
        assert_eq!(GroupId::from("Comparable").as_str(), "Comparable");
        assert_eq!(GroupId::from("Ops"), GroupId::new("Ops"));
        assert_ne!(GroupId::from("Ops"), GroupId::from("Math"));
    }
}
