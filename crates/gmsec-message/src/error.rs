/// `MSG_ERROR`-class failures raised by `Message`/`MessageFactory` operations.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("invalid field name: {0}")]
    InvalidFieldName(String),

    #[error("incorrect field type for {field}: expected {expected}, found {found}")]
    IncorrectFieldType {
        field: String,
        expected: String,
        found: String,
    },

    #[error("missing required field: {0}")]
    MissingRequiredField(String),

    #[error("field not allowed by template: {0}")]
    NonAllowedField(String),

    #[error("failed to parse XML message: {0}")]
    Xml(String),

    #[error("failed to parse JSON message: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Spec(#[from] gmsec_spec_loader::SpecError),
}

impl MessageError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidFieldName(_) => "INVALID_FIELD_NAME",
            Self::IncorrectFieldType { .. } => "INCORRECT_FIELD_TYPE",
            Self::MissingRequiredField(_) => "MISSING_REQUIRED_FIELD",
            Self::NonAllowedField(_) => "NON_ALLOWED_FIELD",
            Self::Xml(_) | Self::Json(_) => "INCORRECT_FIELD_TYPE",
            Self::Spec(_) => "TEMPLATE_ID_DOES_NOT_EXIST",
        }
    }

    pub fn class(&self) -> &'static str {
        "MSG_ERROR"
    }
}

/// `FIELD_ERROR`-class failures raised by typed `Field` coercion.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("invalid value for field {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("field {field} cannot be coerced to {target}")]
    CoercionFailed { field: String, target: String },

    #[error("field {0} not present")]
    NotPresent(String),
}

impl FieldError {
    pub fn code(&self) -> &'static str {
        "INVALID_FIELD_VALUE"
    }

    pub fn class(&self) -> &'static str {
        "FIELD_ERROR"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_error_codes() {
        assert_eq!(
            MessageError::MissingRequiredField("X".into()).code(),
            "MISSING_REQUIRED_FIELD"
        );
        assert_eq!(MessageError::InvalidFieldName("1X".into()).class(), "MSG_ERROR");
    }

    #[test]
    fn test_field_error_code() {
        assert_eq!(
            FieldError::NotPresent("X".into()).code(),
            "INVALID_FIELD_VALUE"
        );
    }
}
