use gmsec_types::{FieldValue, TypeTag};

use crate::error::MessageError;

/// Parses `text` (the XML/JSON text content of a `FIELD` element) into a
/// [`FieldValue`] according to `type_tag`, the declared `TYPE` attribute.
pub fn parse_field_value(
    field_name: &str,
    type_tag: TypeTag,
    text: &str,
) -> Result<FieldValue, MessageError> {
    let incorrect = |expected: &str| MessageError::IncorrectFieldType {
        field: field_name.to_string(),
        expected: expected.to_string(),
        found: text.to_string(),
    };
    Ok(match type_tag {
        TypeTag::I8 => FieldValue::I8(text.parse().map_err(|_| incorrect("I8"))?),
        TypeTag::I16 => FieldValue::I16(text.parse().map_err(|_| incorrect("I16"))?),
        TypeTag::I32 => FieldValue::I32(text.parse().map_err(|_| incorrect("I32"))?),
        TypeTag::I64 => FieldValue::I64(text.parse().map_err(|_| incorrect("I64"))?),
        TypeTag::U8 => FieldValue::U8(text.parse().map_err(|_| incorrect("U8"))?),
        TypeTag::U16 => FieldValue::U16(text.parse().map_err(|_| incorrect("U16"))?),
        TypeTag::U32 => FieldValue::U32(text.parse().map_err(|_| incorrect("U32"))?),
        TypeTag::U64 => FieldValue::U64(text.parse().map_err(|_| incorrect("U64"))?),
        TypeTag::F32 => FieldValue::F32(text.parse().map_err(|_| incorrect("F32"))?),
        TypeTag::F64 => FieldValue::F64(text.parse().map_err(|_| incorrect("F64"))?),
        TypeTag::Boolean => match text {
            "TRUE" => FieldValue::Boolean(true),
            "FALSE" => FieldValue::Boolean(false),
            _ => return Err(incorrect("BOOL")),
        },
        TypeTag::Char => FieldValue::Char(text.chars().next().ok_or_else(|| incorrect("CHAR"))?),
        TypeTag::Binary => FieldValue::Binary(decode_hex(text).ok_or_else(|| incorrect("BINARY"))?),
        TypeTag::String | TypeTag::Variable | TypeTag::HeaderString | TypeTag::Time => {
            FieldValue::String(text.to_string())
        }
        TypeTag::Unset => return Err(incorrect("UNSET")),
    })
}

fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(s.get(i..i + 2)?, 16).ok())
        .collect()
}
