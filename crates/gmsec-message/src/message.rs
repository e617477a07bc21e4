use indexmap::IndexMap;

use gmsec_schema::SubjectElement;
use gmsec_types::{Field, FieldValue, MessageKind};

use crate::error::{FieldError, MessageError};
use crate::selector::Selector;

/// A field name contains only `[A-Za-z0-9_-]` and `.`, is nonempty, does not
/// begin with a digit, has no consecutive dots, and is at most 255 bytes.
pub fn validate_field_name(name: &str) -> Result<(), MessageError> {
    if name.is_empty() || name.len() > 255 {
        return Err(MessageError::InvalidFieldName(name.to_string()));
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(MessageError::InvalidFieldName(name.to_string()));
    }
    if name.contains("..") {
        return Err(MessageError::InvalidFieldName(name.to_string()));
    }
    let ok = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.');
    if !ok {
        return Err(MessageError::InvalidFieldName(name.to_string()));
    }
    Ok(())
}

/// A mutable message: an ordered-by-insertion mapping from field name to
/// typed field value, plus subject, kind, and an optional schema ID.
#[derive(Debug, Clone)]
pub struct Message {
    subject: String,
    kind: MessageKind,
    fields: IndexMap<String, Field>,
    schema_id: Option<String>,
    subject_elements: Vec<SubjectElement>,
    subject_overrides: IndexMap<String, String>,
}

impl Message {
    pub fn new(subject: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            subject: subject.into(),
            kind,
            fields: IndexMap::new(),
            schema_id: None,
            subject_elements: Vec::new(),
            subject_overrides: IndexMap::new(),
        }
    }

    pub fn with_schema_id(mut self, schema_id: impl Into<String>) -> Self {
        self.schema_id = Some(schema_id.into());
        self
    }

    pub fn with_subject_elements(mut self, elements: Vec<SubjectElement>) -> Self {
        self.subject_elements = elements;
        self.recompute_subject();
        self
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: MessageKind) {
        self.kind = kind;
    }

    pub fn schema_id(&self) -> Option<&str> {
        self.schema_id.as_deref()
    }

    /// Overrides one subject-template element's value and recomputes the
    /// subject string. Elements with no override and no fixed default
    /// become `FILL` when optional.
    pub fn set_subject_element(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.subject_overrides.insert(name.into(), value.into());
        self.recompute_subject();
    }

    fn recompute_subject(&mut self) {
        if self.subject_elements.is_empty() {
            return;
        }
        let tokens: Vec<String> = self
            .subject_elements
            .iter()
            .map(|el| {
                if let Some(v) = self.subject_overrides.get(&el.name) {
                    v.clone()
                } else if !el.default_value.is_empty() {
                    el.default_value.clone()
                } else if el.optional {
                    "FILL".to_string()
                } else {
                    String::new()
                }
            })
            .collect();
        self.subject = tokens.join(".");
    }

    pub fn add_field(&mut self, field: Field) -> Result<(), MessageError> {
        validate_field_name(&field.name)?;
        self.fields.insert(field.name.clone(), field);
        Ok(())
    }

    pub fn clear_field(&mut self, name: &str) -> bool {
        self.fields.shift_remove(name).is_some()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// The string form of the named field, used by the validation engine
    /// for enumeration/pattern comparisons.
    pub fn get_field_value(&self, name: &str) -> Option<String> {
        self.fields.get(name).map(Field::as_string_form)
    }

    pub fn get_i32_value(&self, name: &str) -> Result<i32, FieldError> {
        let field = self
            .fields
            .get(name)
            .ok_or_else(|| FieldError::NotPresent(name.to_string()))?;
        field
            .value
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| FieldError::CoercionFailed {
                field: name.to_string(),
                target: "I32".to_string(),
            })
    }

    pub fn get_i64_value(&self, name: &str) -> Result<i64, FieldError> {
        let field = self
            .fields
            .get(name)
            .ok_or_else(|| FieldError::NotPresent(name.to_string()))?;
        field.value.as_i64().ok_or_else(|| FieldError::CoercionFailed {
            field: name.to_string(),
            target: "I64".to_string(),
        })
    }

    pub fn get_f64_value(&self, name: &str) -> Result<f64, FieldError> {
        let field = self
            .fields
            .get(name)
            .ok_or_else(|| FieldError::NotPresent(name.to_string()))?;
        field.value.as_f64().ok_or_else(|| FieldError::CoercionFailed {
            field: name.to_string(),
            target: "F64".to_string(),
        })
    }

    pub fn get_string_value(&self, name: &str) -> Result<String, FieldError> {
        self.fields
            .get(name)
            .map(Field::as_string_form)
            .ok_or_else(|| FieldError::NotPresent(name.to_string()))
    }

    /// Fields in insertion order, filtered by `selector`.
    pub fn fields(&self, selector: Selector) -> impl Iterator<Item = &Field> {
        self.fields
            .values()
            .filter(move |f| selector.accepts(f.is_header))
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

impl gmsec_schema::FieldLookup for Message {
    fn field_string(&self, name: &str) -> Option<String> {
        self.get_field_value(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_field_name_rejects_leading_digit() {
        assert!(validate_field_name("1FIELD").is_err());
    }

    #[test]
    fn test_validate_field_name_rejects_consecutive_dots() {
        assert!(validate_field_name("A..B").is_err());
    }

    #[test]
    fn test_validate_field_name_accepts_normal_name() {
        assert!(validate_field_name("MESSAGE-TYPE").is_ok());
        assert!(validate_field_name("MY.FIELD_NAME-1").is_ok());
    }

    #[test]
    fn test_add_field_and_lookup() {
        let mut m = Message::new("C2MS.MSG.LOG", MessageKind::Publish);
        m.add_field(Field::new("SEVERITY", FieldValue::I16(1))).unwrap();
        assert!(m.has_field("SEVERITY"));
        assert_eq!(m.get_i32_value("SEVERITY").unwrap(), 1);
    }

    #[test]
    fn test_clear_field_removes_and_reports() {
        let mut m = Message::new("S", MessageKind::Publish);
        m.add_field(Field::new("X", FieldValue::I32(1))).unwrap();
        assert!(m.clear_field("X"));
        assert!(!m.has_field("X"));
        assert!(!m.clear_field("X"));
    }

    #[test]
    fn test_fields_preserve_insertion_order() {
        let mut m = Message::new("S", MessageKind::Publish);
        m.add_field(Field::new("A", FieldValue::I32(1))).unwrap();
        m.add_field(Field::new("B", FieldValue::I32(2))).unwrap();
        m.add_field(Field::new("C", FieldValue::I32(3))).unwrap();
        let names: Vec<_> = m.fields(Selector::All).map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_set_subject_element_substitutes_and_fills_unspecified() {
        let mut m = Message::new("", MessageKind::Publish).with_subject_elements(vec![
            SubjectElement::new("CONST", "C2MS"),
            SubjectElement::new("MISSION", "!"),
            SubjectElement::new("ME", "!"),
            SubjectElement::new("CONST2", "MSG.LOG"),
        ]);
        m.set_subject_element("ME", "ACME");
        assert_eq!(m.subject(), "C2MS.FILL.ACME.MSG.LOG");
    }

    #[test]
    fn test_get_i32_value_missing_field_errors() {
        let m = Message::new("S", MessageKind::Publish);
        assert!(m.get_i32_value("MISSING").is_err());
    }
}
