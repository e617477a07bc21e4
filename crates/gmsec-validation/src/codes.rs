//! Machine-readable codes for the error classes named in §7.
//!
//! Codes follow the class prefix the crate they belong to: `SPECIFICATION_ERROR`
//! codes live in `gmsec-spec-loader::SpecError`; these are the two classes the
//! validation engine itself raises or aggregates.

/// `MSG_ERROR`/`FIELD_ERROR` codes the validation engine folds into a [`crate::Status`].
pub struct ErrorCodes;

impl ErrorCodes {
    /// A `REQUIRED` field is absent from the message.
    pub const MISSING_REQUIRED_FIELD: &'static str = "MISSING_REQUIRED_FIELD";

    /// A field's runtime type is not in its effective type set.
    pub const INCORRECT_FIELD_TYPE: &'static str = "INCORRECT_FIELD_TYPE";

    /// A field is present that the template's contract does not name.
    pub const NON_ALLOWED_FIELD: &'static str = "NON_ALLOWED_FIELD";

    /// A field's value fails range, enumeration, or pattern conformance.
    pub const INVALID_FIELD_VALUE: &'static str = "INVALID_FIELD_VALUE";

    /// A subject element is missing or does not match its fixed value.
    pub const SUBJECT_BINDING_FAILED: &'static str = "SUBJECT_BINDING_FAILED";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable_strings() {
        assert_eq!(ErrorCodes::MISSING_REQUIRED_FIELD, "MISSING_REQUIRED_FIELD");
        assert_eq!(ErrorCodes::INVALID_FIELD_VALUE, "INVALID_FIELD_VALUE");
    }
}
