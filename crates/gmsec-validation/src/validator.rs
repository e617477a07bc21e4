use std::collections::HashSet;

use regex::Regex;

use gmsec_message::{Message, Selector};
use gmsec_schema::{EffectiveFieldTemplate, FieldTemplate, MessageTemplate};
use gmsec_spec_loader::Specification;
use gmsec_types::{Field, FieldValue, TypeTag};

use crate::codes::ErrorCodes;
use crate::numeric::check_range;
use crate::status::Status;
use crate::subject::validate_subject;
use crate::time::validate_time;
use crate::violation::Violation;

/// Runs the full validation engine (§4.6) against `message` and returns an
/// aggregated [`Status`] — never an `Err`; construction-time failures are
/// the only thing in this system that propagates as a `Result`.
pub fn validate(spec: &Specification, message: &Message) -> Status {
    let mut status = Status::new();

    let template = match resolve_template(spec, message) {
        Ok(template) => template,
        Err(reason) => {
            status.push(Violation::message_error(ErrorCodes::MISSING_REQUIRED_FIELD, reason));
            return status;
        }
    };

    let header_fields = spec.header_fields_for(&template.schema_id);
    let mut effective: Vec<(String, &FieldTemplate)> = Vec::new();
    collect_effective(header_fields, "", &mut effective);
    collect_effective(&template.fields, "", &mut effective);

    let mut allowed_names: HashSet<&str> = HashSet::new();

    for (full_name, field_template) in &effective {
        tracing::trace!(field = %full_name, "checking field against template");
        allowed_names.insert(full_name.as_str());
        let resolved = field_template.apply(message);

        if resolved.types.contains(&TypeTag::Unset) {
            if message.has_field(full_name) {
                status.push(Violation::error(
                    ErrorCodes::INCORRECT_FIELD_TYPE,
                    full_name.clone(),
                    "field is declared UNSET but is present",
                ));
            }
            continue;
        }

        let Some(field) = message.get_field(full_name) else {
            if resolved.mode.is_required() {
                status.push(Violation::error(
                    ErrorCodes::MISSING_REQUIRED_FIELD,
                    full_name.clone(),
                    "required field is absent",
                ));
            }
            continue;
        };

        check_type(&resolved, full_name, field, &mut status);
        check_value_set(&resolved, full_name, field, &mut status);
    }

    for field in message.fields(Selector::All) {
        if !allowed_names.contains(field.name.as_str()) {
            status.push(Violation::error(
                ErrorCodes::NON_ALLOWED_FIELD,
                field.name.clone(),
                "field is not declared by the message template",
            ));
        }
    }

    for violation in validate_subject(&template.subject_elements, message.subject()) {
        status.push(violation);
    }

    if status.is_ok() {
        tracing::info!(schema_id = %template.schema_id, "message passed validation");
    } else {
        tracing::warn!(
            schema_id = %template.schema_id,
            errors = status.errors().count(),
            warnings = status.warnings().count(),
            "message failed validation"
        );
    }

    status
}

/// Resolves `message`'s explicit schema ID, if set, otherwise specializes
/// the level-0 schema name using `find_definition` against the message's
/// own field values as key-field lookups.
fn resolve_template<'a>(spec: &'a Specification, message: &Message) -> Result<&'a MessageTemplate, String> {
    if let Some(schema_id) = message.schema_id() {
        return spec
            .find_template(schema_id)
            .map_err(|e| format!("{schema_id} does not resolve to a template: {e}"));
    }

    let mut name = "MSG".to_string();
    spec.find_definition(spec.schema_level, &mut name, &|field| message.get_field_value(field));
    spec.find_template(&name)
        .map_err(|_| "message has no schema ID and no definition could be composed".to_string())
}

/// Flattens `fields` into `(effective_name, template)` pairs. CONTROL
/// fields contribute no entry of their own; their children are expanded
/// with `prefix` spliced ahead of each child's `modified_name` (§4.6 step 2).
fn collect_effective<'a>(
    fields: &'a [FieldTemplate],
    prefix: &str,
    out: &mut Vec<(String, &'a FieldTemplate)>,
) {
    for field in fields {
        if field.class.is_control() {
            let child_prefix = format!("{prefix}{}", field.prefix);
            collect_effective(&field.children, &child_prefix, out);
        } else {
            out.push((format!("{prefix}{}", field.modified_name), field));
        }
    }
}

fn check_type(resolved: &EffectiveFieldTemplate<'_>, full_name: &str, field: &Field, status: &mut Status) {
    if resolved.types.is_empty() || resolved.types.contains(&TypeTag::Variable) {
        return;
    }

    if resolved.types.contains(&TypeTag::HeaderString) {
        match &field.value {
            FieldValue::String(s)
                if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') => {}
            _ => status.push(Violation::error(
                ErrorCodes::INCORRECT_FIELD_TYPE,
                full_name,
                format!("{} is not a valid HEADER_STRING", field.as_string_form()),
            )),
        }
        return;
    }

    if resolved.types.contains(&TypeTag::Time) {
        match &field.value {
            FieldValue::String(s) => match validate_time(s) {
                Ok(check) => {
                    if let Some(warning) = check.warning {
                        status.push(Violation::warning(ErrorCodes::INVALID_FIELD_VALUE, full_name, warning));
                    }
                }
                Err(reason) => status.push(Violation::error(ErrorCodes::INCORRECT_FIELD_TYPE, full_name, reason)),
            },
            _ => status.push(Violation::error(
                ErrorCodes::INCORRECT_FIELD_TYPE,
                full_name,
                "TIME field must hold a String value",
            )),
        }
        return;
    }

    let actual = field.type_tag();
    // A value need not carry the exact declared width: a U32-held value
    // against a declared U16 field is a range question, not a type
    // mismatch, so long as the two are in the same numeric family.
    let range_check_against = resolved.types.iter().find(|tag| {
        **tag == actual
            || (tag.is_signed_integer() && actual.is_signed_integer())
            || (tag.is_unsigned_integer() && actual.is_unsigned_integer())
            || (tag.is_float() && actual.is_float())
    });

    let Some(tag) = range_check_against else {
        status.push(Violation::error(
            ErrorCodes::INCORRECT_FIELD_TYPE,
            full_name,
            format!(
                "expected one of [{}], found {actual}",
                resolved.types.iter().map(TypeTag::as_str).collect::<Vec<_>>().join(",")
            ),
        ));
        return;
    };

    if let Err(reason) = check_range(*tag, &field.value) {
        status.push(Violation::error(ErrorCodes::INVALID_FIELD_VALUE, full_name, reason));
    }
}

fn check_value_set(resolved: &EffectiveFieldTemplate<'_>, full_name: &str, field: &Field, status: &mut Status) {
    let form = field.as_string_form();

    if !resolved.values.is_empty() && !resolved.values.iter().any(|v| *v == form) {
        status.push(Violation::error(
            ErrorCodes::INVALID_FIELD_VALUE,
            full_name,
            format!("{form} is not one of the allowed values [{}]", resolved.values.join(",")),
        ));
    }

    if let Some(pattern) = resolved.pattern {
        match Regex::new(pattern) {
            Ok(re) if re.is_match(&form) => {}
            Ok(_) => status.push(Violation::error(
                ErrorCodes::INVALID_FIELD_VALUE,
                full_name,
                format!("{form} does not match pattern {pattern}"),
            )),
            Err(e) => status.push(Violation::error(
                ErrorCodes::INVALID_FIELD_VALUE,
                full_name,
                format!("field template pattern {pattern:?} is not a valid regular expression: {e}"),
            )),
        }
    }
}
