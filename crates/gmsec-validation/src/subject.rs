use gmsec_schema::SubjectElement;

use crate::codes::ErrorCodes;
use crate::violation::Violation;

/// Validates `subject`'s `.`-separated tokens against `elements` (§4.6
/// step 4).
///
/// Walks the subject's tokens with a cursor rather than zipping
/// position-for-position: an element's `default_value` may itself contain
/// embedded dots (e.g. `"MSG.LOG"`), consuming several subject tokens for
/// one template element. A non-optional element's tokens must match its
/// fixed value exactly; an optional element (e.g. `ME`, whose `!FILL`
/// default is just a placeholder for an unspecified value, not a constant
/// to enforce) consumes exactly one token, which must be nonempty unless
/// the element is optional. Leftover or missing tokens at the end are a
/// single trailing violation.
pub fn validate_subject(elements: &[SubjectElement], subject: &str) -> Vec<Violation> {
    if elements.is_empty() {
        return Vec::new();
    }

    let tokens: Vec<&str> = subject.split('.').collect();
    let mut violations = Vec::new();
    let mut cursor = 0usize;

    for element in elements {
        if !element.optional && !element.default_value.is_empty() {
            let parts: Vec<&str> = element.default_value.split('.').collect();
            let end = cursor + parts.len();
            let actual = (end <= tokens.len()).then(|| &tokens[cursor..end]);
            if actual != Some(parts.as_slice()) {
                violations.push(Violation::error(
                    ErrorCodes::SUBJECT_BINDING_FAILED,
                    element.name.clone(),
                    format!(
                        "expected fixed value {:?}, found {:?}",
                        element.default_value,
                        actual.map(|s| s.join(".")).unwrap_or_default()
                    ),
                ));
            }
            cursor = end;
        } else {
            let token = tokens.get(cursor).copied().unwrap_or("");
            if !element.optional && token.is_empty() {
                violations.push(Violation::error(
                    ErrorCodes::SUBJECT_BINDING_FAILED,
                    element.name.clone(),
                    "required subject element is empty",
                ));
            }
            cursor += 1;
        }
    }

    if cursor != tokens.len() {
        violations.push(Violation::error(
            ErrorCodes::SUBJECT_BINDING_FAILED,
            "SUBJECT",
            format!(
                "subject {subject:?} has {} token(s), template consumed {cursor}",
                tokens.len()
            ),
        ));
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements() -> Vec<SubjectElement> {
        vec![
            SubjectElement::new("CONST", "C2MS"),
            SubjectElement::new("MISSION", "!"),
            SubjectElement::new("ME", "!"),
            SubjectElement::new("CONST2", "MSG.LOG"),
        ]
    }

    #[test]
    fn test_matching_subject_produces_no_violations() {
        let v = validate_subject(&elements(), "C2MS.FILL.ACME.MSG.LOG");
        assert!(v.is_empty());
    }

    #[test]
    fn test_fixed_mismatch_is_a_violation() {
        let v = validate_subject(&elements(), "WRONG.FILL.ACME.MSG.LOG");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].code, ErrorCodes::SUBJECT_BINDING_FAILED);
    }

    #[test]
    fn test_empty_required_element_is_a_violation() {
        let v = validate_subject(&elements(), "C2MS..ACME.MSG.LOG");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].field.as_deref(), Some("MISSION"));
    }

    #[test]
    fn test_short_subject_reports_trailing_mismatch() {
        let v = validate_subject(&elements(), "C2MS.FILL.ACME");
        assert!(!v.is_empty());
    }

    #[test]
    fn test_embedded_dot_in_fixed_suffix_consumes_two_tokens() {
        let single_element = vec![SubjectElement::new("CONST2", "MSG.LOG")];
        let v = validate_subject(&single_element, "MSG.LOG");
        assert!(v.is_empty());
    }

    #[test]
    fn test_no_template_elements_always_passes() {
        assert!(validate_subject(&[], "ANYTHING.AT.ALL").is_empty());
    }

    #[test]
    fn test_optional_element_with_fill_placeholder_accepts_substituted_value() {
        // `ME` is `!FILL`: optional, default_value "FILL" is a placeholder for
        // an unspecified value, not a constant to enforce once substituted.
        let elements = vec![
            SubjectElement::new("CONST", "C2MS"),
            SubjectElement::new("MISSION", "!"),
            SubjectElement::new("ME", "!FILL"),
            SubjectElement::new("CONST2", "MSG.LOG"),
        ];
        let v = validate_subject(&elements, "C2MS.FILL.ACME.MSG.LOG");
        assert!(v.is_empty(), "{v:?}");
    }
}
