/// A positional token of a `.`-separated subject string.
///
/// An optional element is marked with a leading `!` in its stored
/// `default_value`, matching the on-disk XSD `fixed`-attribute convention —
/// [`SubjectElement::new`] strips it and sets `optional` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectElement {
    pub name: String,
    pub default_value: String,
    pub optional: bool,
}

impl SubjectElement {
    /// Builds a `SubjectElement` from its raw stored value, stripping a
    /// leading `!` (which marks the element optional) if present.
    pub fn new(name: impl Into<String>, raw_value: impl Into<String>) -> Self {
        let raw_value = raw_value.into();
        let (optional, default_value) = match raw_value.strip_prefix('!') {
            Some(rest) => (true, rest.to_string()),
            None => (false, raw_value),
        };
        Self {
            name: name.into(),
            default_value,
            optional,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_optional_marker() {
        let e = SubjectElement::new("ME", "!FILL");
        assert!(e.optional);
        assert_eq!(e.default_value, "FILL");
    }

    #[test]
    fn test_new_without_marker_is_required() {
        let e = SubjectElement::new("MISSION", "C2MS");
        assert!(!e.optional);
        assert_eq!(e.default_value, "C2MS");
    }
}
