use indexmap::IndexMap;

use crate::error::SpecError;

/// An insertion-ordered string→string map of tunables, passed explicitly
/// to `Specification::load` instead of read from the environment.
///
/// Recognizes `GMSEC-SCHEMA-PATH`, `GMSEC-MESSAGE-SPEC-VERSION`, and
/// `GMSEC-SCHEMA-LEVEL` (see `Specification::load`); any other key is
/// stored but otherwise ignored by this crate.
#[derive(Debug, Clone, Default)]
pub struct Config {
    values: IndexMap<String, String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Parses the named key as `i32`, falling back to `default` when absent,
    /// and failing with `SpecError::InvalidConfigValue` when present but
    /// unparseable.
    pub fn get_i32(&self, key: &str, default: i32) -> Result<i32, SpecError> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw
                .parse()
                .map_err(|_| SpecError::InvalidConfigValue {
                    key: key.to_string(),
                    value: raw.to_string(),
                }),
        }
    }

    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool, SpecError> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => match raw.to_ascii_uppercase().as_str() {
                "1" | "TRUE" => Ok(true),
                "0" | "FALSE" => Ok(false),
                _ => Err(SpecError::InvalidConfigValue {
                    key: key.to_string(),
                    value: raw.to_string(),
                }),
            },
        }
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_falls_back_when_absent() {
        let cfg = Config::new();
        assert_eq!(cfg.get_or("GMSEC-SCHEMA-PATH", "/default"), "/default");
    }

    #[test]
    fn test_get_i32_parses_present_value() {
        let mut cfg = Config::new();
        cfg.set("GMSEC-SCHEMA-LEVEL", "3");
        assert_eq!(cfg.get_i32("GMSEC-SCHEMA-LEVEL", 0).unwrap(), 3);
    }

    #[test]
    fn test_get_i32_rejects_unparseable_value() {
        let mut cfg = Config::new();
        cfg.set("GMSEC-SCHEMA-LEVEL", "not-a-number");
        assert!(cfg.get_i32("GMSEC-SCHEMA-LEVEL", 0).is_err());
    }

    #[test]
    fn test_get_bool_accepts_case_insensitive_true_false() {
        let mut cfg = Config::new();
        cfg.set("X", "true");
        assert!(cfg.get_bool("X", false).unwrap());
        cfg.set("X", "0");
        assert!(!cfg.get_bool("X", true).unwrap());
    }

    #[test]
    fn test_iter_preserves_insertion_order() {
        let mut cfg = Config::new();
        cfg.set("A", "1").set("B", "2").set("C", "3");
        let keys: Vec<_> = cfg.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["A", "B", "C"]);
    }
}
