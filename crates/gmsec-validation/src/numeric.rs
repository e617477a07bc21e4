use gmsec_types::{FieldValue, TypeTag};

/// Checks `value` against the representable range of `type_tag`.
///
/// Unsigned types reject any value whose *textual* form contains `-`,
/// checked before any numeric parse — so `"-0"` is rejected even though it
/// numerically equals zero (§10.5, matching the reference implementation).
pub fn check_range(type_tag: TypeTag, value: &FieldValue) -> Result<(), String> {
    if type_tag.is_unsigned_integer() && value.as_string_form().contains('-') {
        return Err(format!(
            "{} is negative, not permitted for unsigned type {type_tag}",
            value.as_string_form()
        ));
    }

    match type_tag {
        TypeTag::I8 => in_i64_range(value, i8::MIN as i64, i8::MAX as i64, type_tag),
        TypeTag::I16 => in_i64_range(value, i16::MIN as i64, i16::MAX as i64, type_tag),
        TypeTag::I32 => in_i64_range(value, i32::MIN as i64, i32::MAX as i64, type_tag),
        TypeTag::I64 => Ok(()),
        TypeTag::U8 => in_i64_range(value, 0, u8::MAX as i64, type_tag),
        TypeTag::U16 => in_i64_range(value, 0, u16::MAX as i64, type_tag),
        TypeTag::U32 => in_i64_range(value, 0, u32::MAX as i64, type_tag),
        TypeTag::U64 => {
            if value.as_u64().is_some() {
                Ok(())
            } else {
                Err(format!("{} cannot be coerced to {type_tag}", value.as_string_form()))
            }
        }
        TypeTag::F32 | TypeTag::F64 => {
            if value.as_f64().is_some() {
                Ok(())
            } else {
                Err(format!("{} cannot be coerced to {type_tag}", value.as_string_form()))
            }
        }
        _ => Ok(()),
    }
}

fn in_i64_range(value: &FieldValue, min: i64, max: i64, type_tag: TypeTag) -> Result<(), String> {
    let Some(v) = value.as_i64() else {
        return Err(format!("{} cannot be coerced to {type_tag}", value.as_string_form()));
    };
    if v < min || v > max {
        Err(format!("{v} is out of range for {type_tag} ({min}..={max})"))
    } else {
        Ok(())
    }
}
