//! Tagged values and fallback classification.
//!
//! A [`Value`] is an opaque payload plus an optional explicit class
//! vector. When no explicit vector is present, the value's intrinsic
//! classification is derived from the payload's physical representation
//! ([`Payload::fallback_classification`]).
//!
//! The [`Classify`] trait is the seam the dispatch engine resolves
//! against: it captures exactly the two obligations the value layer
//! owes the resolver.

use crate::tags::{class_vector, ClassTag, ClassVector};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// Physical representation of a value's payload.
///
/// Opaque to the dispatch engine; only its fallback classification is
/// ever consulted, and only when the value carries no explicit class
/// vector.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// No payload.
    Unit,
    /// A single integer.
    Int(i64),
    /// A single floating-point number.
    Float(f64),
    /// A single piece of text.
    Text(Arc<str>),
    /// A homogeneous integer sequence.
    IntSeq(Vec<i64>),
    /// A homogeneous text sequence.
    TextSeq(Vec<Arc<str>>),
    /// A string-keyed mapping.
    Mapping(FxHashMap<Arc<str>, Value>),
    /// A row-major numeric matrix.
    Matrix {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
        /// Cell data, row-major; `data.len() == rows * cols`.
        data: Vec<f64>,
    },
}

impl Payload {
    /// Intrinsic classification derived from the physical representation.
    ///
    /// Container shapes classify as an ordered prefix, shape before
    /// underlying element type (`["matrix", "numeric"]`), which the
    /// resolver treats as already being in resolution order.
    pub fn fallback_classification(&self) -> ClassVector {
        match self {
            Payload::Unit => class_vector(["unit"]),
            Payload::Int(_) => class_vector(["integer"]),
            Payload::Float(_) => class_vector(["double"]),
            Payload::Text(_) => class_vector(["text"]),
            Payload::IntSeq(_) => class_vector(["sequence-of-integers"]),
            Payload::TextSeq(_) => class_vector(["sequence-of-text"]),
            Payload::Mapping(_) => class_vector(["mapping"]),
            Payload::Matrix { .. } => class_vector(["matrix", "numeric"]),
        }
    }
}

/// Collaborator obligations consumed by the resolver.
///
/// The dispatch engine computes resolution orders against this trait
/// only; it never inspects payloads.
pub trait Classify {
    /// The explicit class vector, when one is attached.
    fn explicit_tags(&self) -> Option<&[ClassTag]>;

    /// The intrinsic classification used when no explicit vector is
    /// attached. Never empty.
    fn fallback_classification(&self) -> ClassVector;
}

/// A tagged value: opaque payload plus optional explicit class vector.
///
/// Exactly one of {explicit class vector, none} holds; when none, the
/// payload's fallback classification stands in as a one-element (or
/// short prefix) class vector during resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Value {
    payload: Payload,
    class: Option<ClassVector>,
}

impl Value {
    /// Create an untagged value from a payload.
    pub fn new(payload: Payload) -> Self {
        Value {
            payload,
            class: None,
        }
    }

    /// The unit value.
    pub fn unit() -> Self {
        Value::new(Payload::Unit)
    }

    /// An integer value.
    pub fn int(n: i64) -> Self {
        Value::new(Payload::Int(n))
    }

    /// A floating-point value.
    pub fn float(n: f64) -> Self {
        Value::new(Payload::Float(n))
    }

    /// A text value.
    pub fn text(s: impl Into<Arc<str>>) -> Self {
        Value::new(Payload::Text(s.into()))
    }

    /// An integer-sequence value.
    pub fn int_seq(items: Vec<i64>) -> Self {
        Value::new(Payload::IntSeq(items))
    }

    /// A text-sequence value.
    pub fn text_seq<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Value::new(Payload::TextSeq(items.into_iter().map(Into::into).collect()))
    }

    /// A mapping value.
    pub fn mapping(entries: FxHashMap<Arc<str>, Value>) -> Self {
        Value::new(Payload::Mapping(entries))
    }

    /// A row-major numeric matrix value.
    ///
    /// `data.len()` must equal `rows * cols`.
    pub fn matrix(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(rows.saturating_mul(cols), data.len());
        Value::new(Payload::Matrix { rows, cols, data })
    }

    /// Attach an explicit class vector, most specific first.
    #[must_use]
    pub fn with_class<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        self.class = Some(class_vector(tags));
        self
    }

    /// Replace the explicit class vector.
    pub fn set_class(&mut self, class: ClassVector) {
        self.class = Some(class);
    }

    /// Remove the explicit class vector, reverting to fallback
    /// classification.
    pub fn unset_class(&mut self) {
        self.class = None;
    }

    /// The payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}

impl Classify for Value {
    fn explicit_tags(&self) -> Option<&[ClassTag]> {
        self.class.as_deref()
    }

    fn fallback_classification(&self) -> ClassVector {
        self.payload.fallback_classification()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Payload::Unit => f.write_str("()"),
            Payload::Int(n) => write!(f, "{n}"),
            Payload::Float(n) => write!(f, "{n}"),
            Payload::Text(s) => f.write_str(s),
            Payload::IntSeq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Payload::TextSeq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(item)?;
                }
                f.write_str("]")
            }
            Payload::Mapping(entries) => {
                // Sorted keys so rendering is deterministic.
                let mut keys: Vec<&Arc<str>> = entries.keys().collect();
                keys.sort();
                f.write_str("{")?;
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {}", entries[*key])?;
                }
                f.write_str("}")
            }
            Payload::Matrix { rows, cols, .. } => write!(f, "matrix({rows}x{cols})"),
        }
    }
}
