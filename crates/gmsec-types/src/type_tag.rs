/// The GMSEC scalar type set, plus the pseudo-types a field template may
/// declare instead of (or alongside) a concrete scalar.
///
/// `Variable`, `HeaderString`, `Time`, and `Unset` never appear as the type
/// of a runtime [`crate::FieldValue`] — they only appear in a template's
/// declared type set and are resolved against a concrete value by the
/// validation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    String,
    Char,
    Boolean,
    Binary,
    /// Accepts any runtime value.
    Variable,
    /// Accepts a `String` restricted to `[A-Za-z0-9_-]+`.
    HeaderString,
    /// Accepts a `String` matching `YYYY-DDDTHH:MM:SS[.sss]`.
    Time,
    /// Accepts no value — the field must be absent.
    Unset,
}

impl TypeTag {
    /// Parses the XSD/template spelling of a type name (e.g. `"I32"`, `"HEADER_STRING"`).
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "I8" => Self::I8,
            "I16" => Self::I16,
            "I32" => Self::I32,
            "I64" => Self::I64,
            "U8" => Self::U8,
            "U16" => Self::U16,
            "U32" => Self::U32,
            "U64" => Self::U64,
            "F32" => Self::F32,
            "F64" => Self::F64,
            "STRING" => Self::String,
            "CHAR" => Self::Char,
            "BOOL" | "BOOLEAN" => Self::Boolean,
            "BINARY" | "BLOB" => Self::Binary,
            "VARIABLE" => Self::Variable,
            "HEADER_STRING" => Self::HeaderString,
            "TIME" => Self::Time,
            "UNSET" => Self::Unset,
            _ => return None,
        })
    }

    /// The canonical template spelling, the inverse of [`TypeTag::parse`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::I8 => "I8",
            Self::I16 => "I16",
            Self::I32 => "I32",
            Self::I64 => "I64",
            Self::U8 => "U8",
            Self::U16 => "U16",
            Self::U32 => "U32",
            Self::U64 => "U64",
            Self::F32 => "F32",
            Self::F64 => "F64",
            Self::String => "STRING",
            Self::Char => "CHAR",
            Self::Boolean => "BOOL",
            Self::Binary => "BINARY",
            Self::Variable => "VARIABLE",
            Self::HeaderString => "HEADER_STRING",
            Self::Time => "TIME",
            Self::Unset => "UNSET",
        }
    }

    /// Whether this tag names a concrete scalar carried by [`crate::FieldValue`],
    /// as opposed to a pseudo-type resolved only during validation.
    pub fn is_concrete(&self) -> bool {
        !matches!(
            self,
            Self::Variable | Self::HeaderString | Self::Time | Self::Unset
        )
    }

    pub fn is_signed_integer(&self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    pub fn is_unsigned_integer(&self) -> bool {
        matches!(self, Self::U8 | Self::U16 | Self::U32 | Self::U64)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_as_str() {
        for tag in [
            TypeTag::I8,
            TypeTag::I16,
            TypeTag::I32,
            TypeTag::I64,
            TypeTag::U8,
            TypeTag::U16,
            TypeTag::U32,
            TypeTag::U64,
            TypeTag::F32,
            TypeTag::F64,
            TypeTag::String,
            TypeTag::Char,
            TypeTag::Binary,
            TypeTag::Variable,
            TypeTag::HeaderString,
            TypeTag::Time,
            TypeTag::Unset,
        ] {
            assert_eq!(TypeTag::parse(tag.as_str()), Some(tag));
        }
    }

    #[test]
    fn test_parse_bool_alias() {
        assert_eq!(TypeTag::parse("BOOLEAN"), Some(TypeTag::Boolean));
        assert_eq!(TypeTag::parse("BOOL"), Some(TypeTag::Boolean));
    }

    #[test]
    fn test_parse_unknown_is_none() {
        assert_eq!(TypeTag::parse("NOT-A-TYPE"), None);
    }

    #[test]
    fn test_pseudo_types_are_not_concrete() {
        assert!(!TypeTag::Variable.is_concrete());
        assert!(!TypeTag::HeaderString.is_concrete());
        assert!(!TypeTag::Time.is_concrete());
        assert!(!TypeTag::Unset.is_concrete());
        assert!(TypeTag::I32.is_concrete());
    }

    #[test]
    fn test_signed_unsigned_float_classification() {
        assert!(TypeTag::I16.is_signed_integer());
        assert!(!TypeTag::U16.is_signed_integer());
        assert!(TypeTag::U32.is_unsigned_integer());
        assert!(TypeTag::F64.is_float());
        assert!(!TypeTag::I64.is_float());
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(TypeTag::I32.to_string(), "I32");
        assert_eq!(TypeTag::Boolean.to_string(), "BOOL");
    }
}
