use gmsec_types::{FieldClass, FieldMode, TypeTag};

use crate::dependency::Dependency;

/// A resolved view of a [`FieldTemplate`] after its dependencies have been
/// applied against a concrete message's field values.
///
/// Carries the same contract shape as `FieldTemplate` but with `mode`,
/// `types`, `values`, and `pattern` replaced by whichever dependency (if
/// any) was active.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveFieldTemplate<'a> {
    pub name: &'a str,
    pub modified_name: &'a str,
    pub class: FieldClass,
    pub mode: FieldMode,
    pub types: Vec<TypeTag>,
    pub values: Vec<&'a str>,
    pub pattern: Option<&'a str>,
}

/// A seam implemented by a concrete message type (see `gmsec-message::Message`)
/// so that dependency resolution here never needs to depend on the message crate.
pub trait FieldLookup {
    /// The string form of the named field's current value, if present.
    fn field_string(&self, name: &str) -> Option<String>;
}

/// Immutable contract for one field of a [`crate::MessageTemplate`].
///
/// `types` is empty only for `class == Control` fields, whose contract is
/// entirely carried by `children`. `values`, when nonempty, lists every
/// legal string form (per `FieldValue::as_string_form`) the field may take.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTemplate {
    pub name: String,
    pub modified_name: String,
    pub class: FieldClass,
    pub mode: FieldMode,
    pub types: Vec<TypeTag>,
    pub values: Vec<String>,
    pub pattern: Option<String>,
    pub description: String,
    /// Only nonempty for `class == Control`: the fields grouped under this one.
    pub children: Vec<FieldTemplate>,
    /// Prefix spliced in front of each child's `modified_name` when a
    /// CONTROL field's children are expanded into an effective field list.
    pub prefix: String,
    pub dependencies: Vec<Dependency>,
}

impl FieldTemplate {
    pub fn new(name: impl Into<String>, class: FieldClass, mode: FieldMode) -> Self {
        let name = name.into();
        Self {
            modified_name: name.clone(),
            name,
            class,
            mode,
            types: Vec::new(),
            values: Vec::new(),
            pattern: None,
            description: String::new(),
            children: Vec::new(),
            prefix: String::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn concatenated_types(&self) -> String {
        self.types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn concatenated_values(&self) -> String {
        self.values.join(",")
    }

    /// Resolves this template's effective mode/types/values/pattern against
    /// `lookup`'s current field values.
    ///
    /// Dependencies are evaluated in declaration order; the first whose
    /// watched field is present and whose predicate is satisfied wins. A
    /// dependency whose watched field is absent from `lookup` is inactive —
    /// the base template rule applies, per the documented boundary behavior.
    pub fn apply<L: FieldLookup>(&self, lookup: &L) -> EffectiveFieldTemplate<'_> {
        for dep in &self.dependencies {
            let Some(actual) = lookup.field_string(&dep.name) else {
                continue;
            };
            if dep.is_active(&actual) {
                return EffectiveFieldTemplate {
                    name: &self.name,
                    modified_name: &self.modified_name,
                    class: self.class,
                    mode: dep.mode_override.unwrap_or(self.mode),
                    types: if dep.types_override.is_empty() {
                        self.types.clone()
                    } else {
                        dep.types_override.clone()
                    },
                    values: if dep.values_override.is_empty() {
                        self.values.iter().map(String::as_str).collect()
                    } else {
                        dep.values_override.iter().map(String::as_str).collect()
                    },
                    pattern: dep
                        .pattern_override
                        .as_deref()
                        .or(self.pattern.as_deref()),
                };
            }
        }
        EffectiveFieldTemplate {
            name: &self.name,
            modified_name: &self.modified_name,
            class: self.class,
            mode: self.mode,
            types: self.types.clone(),
            values: self.values.iter().map(String::as_str).collect(),
            pattern: self.pattern.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmsec_types::FieldValue;
    use std::collections::HashMap;

    struct MapLookup(HashMap<String, String>);

    impl FieldLookup for MapLookup {
        fn field_string(&self, name: &str) -> Option<String> {
            self.0.get(name).cloned()
        }
    }

    fn lookup(pairs: &[(&str, &str)]) -> MapLookup {
        MapLookup(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_concatenated_types_joins_with_comma() {
        let mut t = FieldTemplate::new("SEVERITY", FieldClass::Standard, FieldMode::Required);
        t.types = vec![TypeTag::I16, TypeTag::I32];
        assert_eq!(t.concatenated_types(), "I16,I32");
    }

    #[test]
    fn test_apply_with_no_dependencies_returns_base_contract() {
        let t = FieldTemplate::new("SUBCLASS", FieldClass::Standard, FieldMode::Required);
        let eff = t.apply(&lookup(&[]));
        assert_eq!(eff.mode, FieldMode::Required);
    }

    #[test]
    fn test_apply_activates_matching_dependency() {
        use crate::dependency::DependencyPredicate;
        let mut t = FieldTemplate::new("RESPONSE-STATUS", FieldClass::Standard, FieldMode::Optional);
        t.dependencies.push(
            Dependency::new("RESPONSE", DependencyPredicate::EqualsValue("TRUE".into()))
                .with_mode_override(FieldMode::Required),
        );
        let eff = t.apply(&lookup(&[("RESPONSE", "TRUE")]));
        assert_eq!(eff.mode, FieldMode::Required);
    }

    #[test]
    fn test_apply_inactive_when_watched_field_absent() {
        use crate::dependency::DependencyPredicate;
        let mut t = FieldTemplate::new("RESPONSE-STATUS", FieldClass::Standard, FieldMode::Optional);
        t.dependencies.push(
            Dependency::new("RESPONSE", DependencyPredicate::EqualsValue("TRUE".into()))
                .with_mode_override(FieldMode::Required),
        );
        let eff = t.apply(&lookup(&[]));
        assert_eq!(eff.mode, FieldMode::Optional);
    }

    #[test]
    fn test_field_value_string_form_used_by_lookup() {
        let v = FieldValue::I32(42);
        assert_eq!(v.as_string_form(), "42");
    }
}
