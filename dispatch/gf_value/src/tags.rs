//! Class tags and class vectors.
//!
//! A `ClassTag` is one level of a value's type identity; a `ClassVector`
//! is the ordered list of tags attached to a value, most specific first.
//! Tags are opaque labels compared by exact string equality - no casing
//! rules, no normalization.
//!
//! Uses cheaply cloneable `Arc<str>` storage so tags can flow through
//! registries and resolution orders without repeated allocation.

use smallvec::SmallVec;
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// One level of a value's type identity.
///
/// Compared by exact string equality. The terminal candidate of every
/// resolution order is the tag named [`ClassTag::DEFAULT_NAME`].
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ClassTag(Arc<str>);

impl ClassTag {
    /// Name of the terminal catch-all tag appended to every resolution order.
    pub const DEFAULT_NAME: &'static str = "default";

    /// Create a tag from a string label.
    ///
    /// Construction does not validate; the registry rejects empty tags
    /// at registration time.
    #[inline]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        ClassTag(name.into())
    }

    /// The terminal `"default"` tag.
    #[inline]
    pub fn default_tag() -> Self {
        ClassTag(Arc::from(Self::DEFAULT_NAME))
    }

    /// The tag's label.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the terminal `"default"` tag.
    #[inline]
    pub fn is_default(&self) -> bool {
        &*self.0 == Self::DEFAULT_NAME
    }

    /// Whether the tag is acceptable for registration (non-empty).
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty()
    }
}

impl Borrow<str> for ClassTag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClassTag {
    fn from(name: &str) -> Self {
        ClassTag::new(name)
    }
}

impl From<String> for ClassTag {
    fn from(name: String) -> Self {
        ClassTag::new(name)
    }
}

impl fmt::Display for ClassTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered type-identity labels attached to a value, most specific first.
///
/// May be empty (no explicit classification). Owned by the value it
/// classifies; the engine never mutates it during a dispatch.
pub type ClassVector = SmallVec<[ClassTag; 4]>;

/// Build a class vector from string labels, most specific first.
pub fn class_vector<I, S>(tags: I) -> ClassVector
where
    I: IntoIterator<Item = S>,
    S: Into<Arc<str>>,
{
    tags.into_iter().map(ClassTag::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_compare_by_exact_string_equality() {
        assert_eq!(ClassTag::new("dog"), ClassTag::new("dog"));
        assert_ne!(ClassTag::new("dog"), ClassTag::new("Dog"));
        assert_ne!(ClassTag::new("dog"), ClassTag::new("dog "));
    }

    #[test]
    fn default_tag_is_recognized() {
        assert!(ClassTag::default_tag().is_default());
        assert!(!ClassTag::new("dog").is_default());
        assert_eq!(ClassTag::default_tag().as_str(), "default");
    }

    #[test]
    fn empty_tag_is_not_well_formed() {
        assert!(!ClassTag::new("").is_well_formed());
        assert!(ClassTag::new("x").is_well_formed());
    }

    #[test]
    fn class_vector_preserves_order() {
        let cv = class_vector(["dog", "animal"]);
        assert_eq!(cv.len(), 2);
        assert_eq!(cv[0].as_str(), "dog");
        assert_eq!(cv[1].as_str(), "animal");
    }

    #[test]
    fn tag_borrows_as_str_for_keyed_lookup() {
        use std::collections::HashMap;

        let mut map: HashMap<ClassTag, u32> = HashMap::new();
        map.insert(ClassTag::new("money"), 1);
        assert_eq!(map.get("money"), Some(&1));
        assert_eq!(map.get("cents"), None);
    }
}
