use serde::{Deserialize, Serialize};

use crate::violation::{Severity, Violation};

/// Aggregated result of one [`crate::validate`] call.
///
/// Never returned as an `Err` — every violation found is data folded in
/// here, per the propagation policy in §7: "Runtime validation never
/// errors from user input alone."
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Status {
    violations: Vec<Violation>,
}

impl Status {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn is_ok(&self) -> bool {
        !self.violations.iter().any(Violation::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.severity == Severity::Warning)
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Concatenated per-field diagnostics, one per line, in the order
    /// violations were recorded (§4.6 step 5).
    pub fn reason(&self) -> String {
        self.violations
            .iter()
            .map(Violation::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.violations.is_empty() {
            return write!(f, "OK");
        }
        write!(f, "{}", self.reason())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_status_is_ok() {
        let status = Status::new();
        assert!(status.is_ok());
        assert_eq!(status.to_string(), "OK");
    }

    #[test]
    fn test_status_with_only_warnings_is_ok() {
        let mut status = Status::new();
        status.push(Violation::warning("INVALID_FIELD_VALUE", "EVENT-TIME", "extra precision"));
        assert!(status.is_ok());
        assert_eq!(status.warnings().count(), 1);
    }

    #[test]
    fn test_status_with_error_is_not_ok() {
        let mut status = Status::new();
        status.push(Violation::error("MISSING_REQUIRED_FIELD", "SEVERITY", "required"));
        assert!(!status.is_ok());
        assert_eq!(status.errors().count(), 1);
    }

    #[test]
    fn test_reason_joins_violations_in_order() {
        let mut status = Status::new();
        status.push(Violation::error("A", "X", "first"));
        status.push(Violation::error("B", "Y", "second"));
        let reason = status.reason();
        assert!(reason.find("first").unwrap() < reason.find("second").unwrap());
    }
}
