//! Dispatch introspection.
//!
//! `explain` mirrors the resolution order for an `(operation,
//! receiver)` pair, flagging each candidate tag with whether an
//! implementation exists and which one dispatch would actually select.
//! It is the proactive counterpart of the order reported by a failed
//! dispatch.

use std::fmt;

use gf_value::{ClassTag, Classify};

use crate::groups::find_candidate;
use crate::names::OperationName;
use crate::registry::MethodRegistry;
use crate::resolve::resolution_order;

/// One row of an explanation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExplainEntry {
    /// The candidate tag at this position of the resolution order.
    pub tag: ClassTag,
    /// Whether a specific or group implementation exists for the tag.
    pub found: bool,
    /// Whether this is the entry dispatch would select.
    pub selected: bool,
}

/// The annotated resolution order for one `(operation, receiver)` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Explanation {
    /// The operation that was explained.
    pub operation: OperationName,
    /// Entries in resolution order.
    pub entries: Vec<ExplainEntry>,
}

impl Explanation {
    /// The entry dispatch would select, if any.
    pub fn selected(&self) -> Option<&ExplainEntry> {
        self.entries.iter().find(|entry| entry.selected)
    }

    /// Whether a dispatch would fail with `NoApplicableMethod`.
    pub fn would_fail(&self) -> bool {
        self.selected().is_none()
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "resolution for `{}`:", self.operation)?;
        for entry in &self.entries {
            let status = if entry.selected {
                "selected"
            } else if entry.found {
                "found"
            } else {
                "no method"
            };
            writeln!(f, "  {:<20} {status}", entry.tag.as_str())?;
        }
        Ok(())
    }
}

/// Compute the annotated resolution order for a receiver.
pub fn explain(
    registry: &MethodRegistry,
    operation: &OperationName,
    value: &impl Classify,
) -> Explanation {
    let mut selected_seen = false;
    let entries = resolution_order(value)
        .into_iter()
        .map(|tag| {
            let found = find_candidate(registry, operation, &tag).is_some();
            let selected = found && !selected_seen;
            if selected {
                selected_seen = true;
            }
            ExplainEntry {
                tag,
                found,
                selected,
            }
        })
        .collect();
    Explanation {
        operation: operation.clone(),
        entries,
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::method::Method;
    use crate::names::GroupId;
    use gf_value::Value;
    use pretty_assertions::assert_eq;

    fn noop() -> Method {
        Method::new(|_args, _state| Ok(Value::unit()))
    }

    fn rows(explanation: &Explanation) -> Vec<(&str, bool, bool)> {
        explanation
            .entries
            .iter()
            .map(|entry| (entry.tag.as_str(), entry.found, entry.selected))
            .collect()
    }

    #[test]
    fn marks_found_and_selected_entries() {
        let mut registry = MethodRegistry::new();
        let op = OperationName::from("speak");
        registry.register(op.clone(), ClassTag::new("animal"), noop()).unwrap();
        registry
            .register(op.clone(), ClassTag::default_tag(), noop())
            .unwrap();

        let v = Value::unit().with_class(["dog", "animal"]);
        let explanation = explain(&registry, &op, &v);

        assert_eq!(
            rows(&explanation),
            vec![
                ("dog", false, false),
                ("animal", true, true),
                ("default", true, false),
            ]
        );
        assert!(!explanation.would_fail());
    }

    #[test]
    fn empty_registry_explains_a_failing_dispatch() {
        let registry = MethodRegistry::new();
        let op = OperationName::from("speak");
        let explanation = explain(&registry, &op, &Value::int(1));

        assert_eq!(
            rows(&explanation),
            vec![("integer", false, false), ("default", false, false)]
        );
        assert!(explanation.would_fail());
        assert!(explanation.selected().is_none());
    }

    #[test]
    fn group_methods_count_as_found() {
        let mut registry = MethodRegistry::new();
        let op = OperationName::from("lessThan");
        let group = GroupId::from("Comparable");
        registry.register_group(op.clone(), group.clone());
        registry
            .register_group_method(group, ClassTag::new("money"), noop())
            .unwrap();

        let v = Value::int(1).with_class(["money"]);
        let explanation = explain(&registry, &op, &v);
        assert_eq!(
            rows(&explanation),
            vec![("money", true, true), ("default", false, false)]
        );
    }

    #[test]
    fn display_annotates_each_row() {
        let mut registry = MethodRegistry::new();
        let op = OperationName::from("speak");
        registry
            .register(op.clone(), ClassTag::default_tag(), noop())
            .unwrap();

        let v = Value::unit().with_class(["dog"]);
        let rendered = explain(&registry, &op, &v).to_string();
        assert!(rendered.contains("resolution for `speak`:"));
        assert!(rendered.contains("no method"));
        assert!(rendered.contains("selected"));
    }
}
