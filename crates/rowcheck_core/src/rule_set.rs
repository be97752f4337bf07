//! Rule sets: the rules for one record type.

use crate::{ConfigError, FieldRule, Result, RuleSetDefinition};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Name of the rule set that accepts every record unchecked.
pub const NO_VALIDATION: &str = "novalidate";

/// An ordered mapping from field position to [`FieldRule`] for one record type.
///
/// Positions without a rule always pass. Header labels are attached once, from
/// the first record of the input, and are only used to name fields in
/// rejection messages and summaries.
#[derive(Debug, Clone)]
pub struct RuleSet {
    name: String,
    rules: BTreeMap<usize, FieldRule>,
    expected_field_count: usize,
    field_names: OnceLock<Vec<String>>,
}

impl RuleSet {
    /// Creates a rule set from compiled rules.
    ///
    /// `field_count` overrides the expected number of fields; by default it is
    /// the number of rules. Every rule position must fall inside that count.
    pub fn new(
        name: impl Into<String>,
        rules: BTreeMap<usize, FieldRule>,
        field_count: Option<usize>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::BlankName);
        }
        if name == NO_VALIDATION && !rules.is_empty() {
            return Err(ConfigError::SentinelWithRules(name));
        }

        let expected_field_count = field_count.unwrap_or(rules.len());
        if let Some((&position, _)) = rules.last_key_value() {
            if position >= expected_field_count {
                return Err(ConfigError::position_out_of_range(
                    name,
                    position,
                    expected_field_count,
                ));
            }
        }

        Ok(Self {
            name,
            rules,
            expected_field_count,
            field_names: OnceLock::new(),
        })
    }

    /// Creates the rule set that skips all validation.
    pub fn no_validation() -> Self {
        Self {
            name: NO_VALIDATION.to_string(),
            rules: BTreeMap::new(),
            expected_field_count: 0,
            field_names: OnceLock::new(),
        }
    }

    /// Compiles a rule set definition.
    pub fn compile(definition: &RuleSetDefinition) -> Result<Self> {
        let mut rules = BTreeMap::new();
        for field in &definition.fields {
            if rules.contains_key(&field.position) {
                return Err(ConfigError::duplicate_position(
                    &definition.name,
                    field.position,
                ));
            }
            rules.insert(field.position, FieldRule::compile(field)?);
        }
        Self::new(&definition.name, rules, definition.field_count)
    }

    /// Returns the rule set name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true for the rule set that accepts everything.
    pub fn is_no_validation(&self) -> bool {
        self.name == NO_VALIDATION
    }

    /// Returns the number of fields every record must have.
    pub fn expected_field_count(&self) -> usize {
        self.expected_field_count
    }

    /// Returns the rule for a position, or `None` when the position is unchecked.
    pub fn for_position(&self, position: usize) -> Option<&FieldRule> {
        self.rules.get(&position)
    }

    /// Returns the positions that carry a rule, in ascending order.
    pub fn ruled_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.rules.keys().copied()
    }

    /// Returns the number of configured rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Stores the header labels. May only be called once.
    pub fn set_header_names(&self, header: &[String]) -> Result<()> {
        self.field_names
            .set(header.to_vec())
            .map_err(|_| ConfigError::HeaderAlreadySet(self.name.clone()))
    }

    /// Returns true once header labels have been stored.
    pub fn has_header_names(&self) -> bool {
        self.field_names.get().is_some()
    }

    /// Returns the header label for a position, if one was recorded.
    pub fn header_name(&self, position: usize) -> Option<&str> {
        self.field_names
            .get()
            .and_then(|names| names.get(position))
            .map(String::as_str)
    }

    /// Returns the header label for a position, falling back to the position number.
    pub fn field_name(&self, position: usize) -> String {
        self.header_name(position)
            .map(str::to_string)
            .unwrap_or_else(|| position.to_string())
    }
}
