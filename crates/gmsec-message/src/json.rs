use serde_json::{json, Value};

use gmsec_types::{Field, MessageKind};

use crate::coerce::parse_field_value;
use crate::error::MessageError;
use crate::message::Message;
use crate::selector::Selector;

/// Renders `message` in the documented
/// `{"MESSAGE":{"SUBJECT":...,"KIND":...,"FIELD":[...]}}` JSON form.
///
/// `Field`/`FieldValue` deliberately don't derive `Serialize` (see
/// DESIGN.md), so the `Value` tree is built by hand here.
pub fn to_json(message: &Message) -> Value {
    let fields: Vec<Value> = message
        .fields(Selector::All)
        .map(|f| {
            json!({
                "NAME": f.name,
                "TYPE": f.type_tag().as_str(),
                "VALUE": f.as_string_form(),
                "HEAD": if f.is_header { "T" } else { "F" },
            })
        })
        .collect();

    json!({
        "MESSAGE": {
            "SUBJECT": message.subject(),
            "KIND": message.kind().as_str(),
            "FIELD": fields,
        }
    })
}

/// Parses the documented JSON form back into a [`Message`].
pub fn from_json(text: &str) -> Result<Message, MessageError> {
    let value: Value = serde_json::from_str(text)?;
    let root = value
        .get("MESSAGE")
        .ok_or_else(|| MessageError::Xml("missing top-level \"MESSAGE\" key".to_string()))?;

    let subject = root.get("SUBJECT").and_then(Value::as_str).unwrap_or("");
    let kind = root
        .get("KIND")
        .and_then(Value::as_str)
        .and_then(MessageKind::parse)
        .unwrap_or(MessageKind::Publish);

    let mut message = Message::new(subject, kind);

    let fields = root.get("FIELD").and_then(Value::as_array).cloned().unwrap_or_default();
    for entry in fields {
        let name = entry
            .get("NAME")
            .and_then(Value::as_str)
            .ok_or_else(|| MessageError::Xml("field entry missing NAME".to_string()))?
            .to_string();
        let type_name = entry
            .get("TYPE")
            .and_then(Value::as_str)
            .ok_or_else(|| MessageError::Xml("field entry missing TYPE".to_string()))?;
        let type_tag = gmsec_types::TypeTag::parse(type_name).ok_or_else(|| {
            MessageError::IncorrectFieldType {
                field: name.clone(),
                expected: "a known TYPE".to_string(),
                found: type_name.to_string(),
            }
        })?;
        let value_text = entry.get("VALUE").and_then(Value::as_str).unwrap_or("");
        let is_header = entry.get("HEAD").and_then(Value::as_str) == Some("T");

        let value = parse_field_value(&name, type_tag, value_text)?;
        let field = if is_header {
            Field::header(name, value)
        } else {
            Field::new(name, value)
        };
        message.add_field(field)?;
    }

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmsec_types::FieldValue;

    #[test]
    fn test_round_trip_preserves_fields_and_order() {
        let mut m = Message::new("C2MS.MSG.LOG", MessageKind::Publish);
        m.add_field(Field::header("MESSAGE-TYPE", FieldValue::String("MSG".into())))
            .unwrap();
        m.add_field(Field::new("SEVERITY", FieldValue::I16(1))).unwrap();

        let value = to_json(&m);
        let rendered = value.to_string();
        let parsed = from_json(&rendered).unwrap();

        assert_eq!(parsed.subject(), "C2MS.MSG.LOG");
        assert_eq!(parsed.get_i32_value("SEVERITY").unwrap(), 1);
        assert!(parsed.get_field("MESSAGE-TYPE").unwrap().is_header);
    }

    #[test]
    fn test_from_json_rejects_missing_message_key() {
        assert!(from_json("{}").is_err());
    }

    #[test]
    fn test_from_json_rejects_unknown_type() {
        let text = r#"{"MESSAGE":{"SUBJECT":"S","KIND":"PUBLISH","FIELD":[{"NAME":"X","TYPE":"NOPE","VALUE":"1","HEAD":"F"}]}}"#;
        assert!(from_json(text).is_err());
    }
}
