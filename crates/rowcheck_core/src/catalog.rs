//! Rule catalogs: the named rule sets available to a run.
//!
//! A catalog replaces any process-wide registry. It is compiled once from a
//! [`CatalogDefinition`] and handed to whoever selects a rule set by name.

use crate::{CatalogDefinition, ConfigError, Result, RuleSet};
use tracing::debug;

/// A compiled, immutable collection of rule sets.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    rule_sets: Vec<RuleSet>,
}

impl RuleCatalog {
    /// Builds a catalog from already compiled rule sets.
    pub fn new(rule_sets: Vec<RuleSet>) -> Result<Self> {
        if rule_sets.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for (i, rule_set) in rule_sets.iter().enumerate() {
            if rule_sets[..i].iter().any(|r| r.name() == rule_set.name()) {
                return Err(ConfigError::DuplicateRuleSet(rule_set.name().to_string()));
            }
        }
        Ok(Self { rule_sets })
    }

    /// Compiles every rule set in a definition.
    pub fn compile(definition: &CatalogDefinition) -> Result<Self> {
        let rule_sets = definition
            .rule_sets
            .iter()
            .map(|d| {
                let rule_set = RuleSet::compile(d)?;
                debug!(
                    "Compiled rule set '{}' ({} rules, {} fields)",
                    rule_set.name(),
                    rule_set.rule_count(),
                    rule_set.expected_field_count()
                );
                Ok(rule_set)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(rule_sets)
    }

    /// Returns the configured names in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.rule_sets.iter().map(|r| r.name().to_string()).collect()
    }

    /// Looks up a rule set by name.
    pub fn get(&self, name: &str) -> Option<&RuleSet> {
        self.rule_sets.iter().find(|r| r.name() == name)
    }

    /// Returns a fresh copy of the named rule set for one run.
    ///
    /// The copy has no header labels attached, so each run can record its own.
    pub fn select(&self, name: &str) -> Result<RuleSet> {
        self.get(name)
            .map(|r| {
                RuleSet::new(
                    r.name(),
                    r.ruled_positions()
                        .filter_map(|p| r.for_position(p).map(|rule| (p, rule.clone())))
                        .collect(),
                    Some(r.expected_field_count()),
                )
            })
            .ok_or_else(|| ConfigError::unknown_rule_set(name, self.names()))?
    }

    /// Returns the number of rule sets.
    pub fn len(&self) -> usize {
        self.rule_sets.len()
    }

    /// Returns true if the catalog is empty. Compiled catalogs never are.
    pub fn is_empty(&self) -> bool {
        self.rule_sets.is_empty()
    }

    /// Iterates over the rule sets in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleSet> {
        self.rule_sets.iter()
    }
}
