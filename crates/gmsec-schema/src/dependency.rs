use gmsec_types::{FieldMode, TypeTag};

/// The condition attached to a [`Dependency`], read from one of an
/// `<api:dependency>` element's `valueEquals`/`valueGreaterThan`/`valueLessThan`
/// attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum DependencyPredicate {
    EqualsValue(String),
    /// Numeric `>` comparison against the referenced field's value.
    GreaterThan(f64),
    /// Numeric `<` comparison against the referenced field's value.
    LessThan(f64),
}

impl DependencyPredicate {
    /// Whether `actual` (the referenced field's string form) satisfies this predicate.
    ///
    /// A numeric predicate against a non-numeric actual value never matches —
    /// the dependency is simply inactive, per the "dependency inactive; base
    /// rule applies" boundary behavior for an absent or unusable reference.
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            Self::EqualsValue(expected) => actual == expected,
            Self::GreaterThan(threshold) => actual
                .parse::<f64>()
                .map(|v| v > *threshold)
                .unwrap_or(false),
            Self::LessThan(threshold) => actual
                .parse::<f64>()
                .map(|v| v < *threshold)
                .unwrap_or(false),
        }
    }
}

/// A conditional override of a [`crate::FieldTemplate`]'s effective mode,
/// types, and values, keyed on another field's runtime value.
#[derive(Debug, Clone)]
pub struct Dependency {
    /// Name of the field whose value this dependency watches.
    pub name: String,
    pub predicate: DependencyPredicate,
    pub mode_override: Option<FieldMode>,
    pub types_override: Vec<TypeTag>,
    pub values_override: Vec<String>,
    pub pattern_override: Option<String>,
}

impl Dependency {
    pub fn new(name: impl Into<String>, predicate: DependencyPredicate) -> Self {
        Self {
            name: name.into(),
            predicate,
            mode_override: None,
            types_override: Vec::new(),
            values_override: Vec::new(),
            pattern_override: None,
        }
    }

    pub fn with_mode_override(mut self, mode: FieldMode) -> Self {
        self.mode_override = Some(mode);
        self
    }

    pub fn with_types_override(mut self, types: Vec<TypeTag>) -> Self {
        self.types_override = types;
        self
    }

    pub fn with_values_override(mut self, values: Vec<String>) -> Self {
        self.values_override = values;
        self
    }

    /// Whether the watched field's `actual` value activates this override.
    pub fn is_active(&self, actual: &str) -> bool {
        self.predicate.matches(actual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equals_value_predicate() {
        let p = DependencyPredicate::EqualsValue("ACK".into());
        assert!(p.matches("ACK"));
        assert!(!p.matches("NACK"));
    }

    #[test]
    fn test_greater_than_predicate() {
        let p = DependencyPredicate::GreaterThan(5.0);
        assert!(p.matches("6"));
        assert!(!p.matches("5"));
        assert!(!p.matches("not-a-number"));
    }

    #[test]
    fn test_less_than_predicate() {
        let p = DependencyPredicate::LessThan(5.0);
        assert!(p.matches("4"));
        assert!(!p.matches("5"));
    }

    #[test]
    fn test_dependency_is_active_delegates_to_predicate() {
        let dep = Dependency::new("RESPONSE", DependencyPredicate::EqualsValue("TRUE".into()))
            .with_mode_override(FieldMode::Required);
        assert!(dep.is_active("TRUE"));
        assert!(!dep.is_active("FALSE"));
        assert_eq!(dep.mode_override, Some(FieldMode::Required));
    }
}
