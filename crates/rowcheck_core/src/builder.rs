//! Builder pattern for creating rule sets in code.

use crate::{ConfigError, FieldRule, Result, RuleSet};
use std::collections::BTreeMap;

/// Builder for creating a [`RuleSet`].
///
/// Rule constructors that can fail (regex, length range) are deferred until
/// [`build`](RuleSetBuilder::build), so the first configuration error is
/// reported from a single place.
///
/// # Example
///
/// ```rust
/// use rowcheck_core::RuleSetBuilder;
///
/// let rule_set = RuleSetBuilder::new("employee")
///     .blocklist(0, ["UNKNOWN"], false)
///     .regex(1, r"^\d{3}-\d{2}-\d{4}$", false)
///     .aba(2, true, true)
///     .length(3, true, 4, -1, true)
///     .build()
///     .unwrap();
///
/// assert_eq!(rule_set.expected_field_count(), 4);
/// ```
#[derive(Debug)]
pub struct RuleSetBuilder {
    name: String,
    field_count: Option<usize>,
    rules: Vec<(usize, Result<FieldRule>)>,
}

impl RuleSetBuilder {
    /// Creates a new builder for the named rule set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_count: None,
            rules: Vec::new(),
        }
    }

    /// Sets the expected field count explicitly.
    pub fn field_count(mut self, count: usize) -> Self {
        self.field_count = Some(count);
        self
    }

    /// Adds an already constructed rule.
    pub fn rule(mut self, position: usize, rule: FieldRule) -> Self {
        self.rules.push((position, Ok(rule)));
        self
    }

    /// Adds a string blocklist rule.
    pub fn blocklist<I, S>(self, position: usize, values: I, allow_empty: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule(position, FieldRule::blocklist(values, allow_empty))
    }

    /// Adds a regex rule.
    pub fn regex(mut self, position: usize, pattern: &str, allow_empty: bool) -> Self {
        self.rules
            .push((position, FieldRule::regex(position, pattern, allow_empty)));
        self
    }

    /// Adds a length range rule (`max` of -1 means unbounded).
    pub fn length(
        mut self,
        position: usize,
        check_numeric: bool,
        min: usize,
        max: i64,
        allow_empty: bool,
    ) -> Self {
        self.rules.push((
            position,
            FieldRule::length_range(position, check_numeric, min, max, allow_empty),
        ));
        self
    }

    /// Adds an ABA routing number rule.
    pub fn aba(self, position: usize, validate_checksum: bool, allow_empty: bool) -> Self {
        self.rule(position, FieldRule::aba_checksum(validate_checksum, allow_empty))
    }

    /// Builds the rule set.
    pub fn build(self) -> Result<RuleSet> {
        let mut rules = BTreeMap::new();
        for (position, rule) in self.rules {
            if rules.insert(position, rule?).is_some() {
                return Err(ConfigError::duplicate_position(&self.name, position));
            }
        }
        RuleSet::new(self.name, rules, self.field_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_minimal() {
        let rule_set = RuleSetBuilder::new("names")
            .blocklist(0, ["N/A"], false)
            .build()
            .unwrap();
        assert_eq!(rule_set.name(), "names");
        assert_eq!(rule_set.expected_field_count(), 1);
        assert!(!rule_set.for_position(0).unwrap().check("N/A"));
    }

    #[test]
    fn test_builder_reports_regex_error() {
        let err = RuleSetBuilder::new("broken")
            .blocklist(0, Vec::<String>::new(), false)
            .regex(1, "(", false)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRegex { position: 1, .. }));
    }

    #[test]
    fn test_builder_rejects_duplicate_position() {
        let err = RuleSetBuilder::new("dup")
            .aba(0, true, true)
            .aba(0, false, true)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicatePosition { position: 0, .. }));
    }

    #[test]
    fn test_builder_with_field_count() {
        let rule_set = RuleSetBuilder::new("wide")
            .field_count(6)
            .aba(5, true, true)
            .build()
            .unwrap();
        assert_eq!(rule_set.expected_field_count(), 6);
        assert_eq!(rule_set.rule_count(), 1);
    }
}
