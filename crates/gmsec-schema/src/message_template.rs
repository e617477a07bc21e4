use crate::field_template::FieldTemplate;
use crate::subject_element::SubjectElement;

/// Immutable composite describing one message's complete contract: its
/// content fields (header fields are stored separately on `Specification`
/// and prepended at validation time), subject-element list, schema level,
/// and textual definition.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageTemplate {
    /// Fully-qualified schema ID, e.g. `"2019.00.C2MS.MSG.LOG"`.
    pub schema_id: String,
    pub fields: Vec<FieldTemplate>,
    pub subject_elements: Vec<SubjectElement>,
    pub schema_level: u8,
    pub definition: String,
}

impl MessageTemplate {
    pub fn new(schema_id: impl Into<String>, schema_level: u8) -> Self {
        Self {
            schema_id: schema_id.into(),
            fields: Vec::new(),
            subject_elements: Vec::new(),
            schema_level,
            definition: String::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldTemplate> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmsec_types::{FieldClass, FieldMode};

    #[test]
    fn test_field_lookup_by_name() {
        let mut t = MessageTemplate::new("MSG.LOG", 0);
        t.fields
            .push(FieldTemplate::new("SEVERITY", FieldClass::Standard, FieldMode::Required));
        assert!(t.field("SEVERITY").is_some());
        assert!(t.field("MISSING").is_none());
    }
}
