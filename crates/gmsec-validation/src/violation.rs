use serde::{Deserialize, Serialize};

/// Severity of one validation finding.
///
/// `Warning` never fails validation on its own (§9 Open Question b: an
/// over-precise `TIME` value is a warning, not an error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// One validation finding against a single field, or the message as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    pub severity: Severity,
    pub code: &'static str,
    pub field: Option<String>,
    pub reason: String,
}

impl Violation {
    pub fn error(code: &'static str, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            field: Some(field.into()),
            reason: reason.into(),
        }
    }

    pub fn warning(code: &'static str, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            field: Some(field.into()),
            reason: reason.into(),
        }
    }

    pub fn message_error(code: &'static str, reason: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            field: None,
            reason: reason.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.code)?;
        if let Some(field) = &self.field {
            write!(f, " ({field})")?;
        }
        write!(f, ": {}", self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_violation_is_error() {
        let v = Violation::error("MISSING_REQUIRED_FIELD", "SEVERITY", "field is required");
        assert!(v.is_error());
    }

    #[test]
    fn test_warning_violation_is_not_error() {
        let v = Violation::warning("INVALID_FIELD_VALUE", "EVENT-TIME", "more than 3 fractional digits");
        assert!(!v.is_error());
    }

    #[test]
    fn test_display_includes_code_and_field() {
        let v = Violation::error("NON_ALLOWED_FIELD", "X", "not declared by template");
        let rendered = format!("{v}");
        assert!(rendered.contains("NON_ALLOWED_FIELD"));
        assert!(rendered.contains("(X)"));
    }
}
