//! Rule catalog definitions.
//!
//! This module contains the plain, serialisable description of rule sets as
//! they appear in a catalog file. Definitions carry no compiled state; turning
//! them into executable rules is done by [`RuleCatalog::compile`](crate::RuleCatalog::compile).

use serde::{Deserialize, Serialize};

/// A catalog of named rule set definitions.
///
/// # Example
///
/// ```rust
/// use rowcheck_core::{CatalogDefinition, FieldRuleDefinition, RuleKindDefinition, RuleSetDefinition};
///
/// let catalog = CatalogDefinition {
///     rule_sets: vec![RuleSetDefinition {
///         name: "vendor".to_string(),
///         field_count: None,
///         fields: vec![FieldRuleDefinition {
///             position: 0,
///             allow_empty: false,
///             kind: RuleKindDefinition::Blocklist {
///                 strings: vec!["N/A".to_string()],
///             },
///         }],
///     }],
/// };
/// assert_eq!(catalog.rule_sets.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDefinition {
    /// Rule sets in declaration order
    pub rule_sets: Vec<RuleSetDefinition>,
}

/// Definition of one record type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSetDefinition {
    /// Name used to select this rule set (e.g. "employee")
    pub name: String,

    /// Expected number of fields per record.
    ///
    /// Defaults to the number of configured field rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_count: Option<usize>,

    /// Field rules keyed by position
    #[serde(default)]
    pub fields: Vec<FieldRuleDefinition>,
}

/// Definition of the rule applied to one field position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRuleDefinition {
    /// Zero-based field position
    pub position: usize,

    /// Whether an empty (after trimming) field passes
    pub allow_empty: bool,

    /// Kind-specific parameters
    #[serde(flatten)]
    pub kind: RuleKindDefinition,
}

/// Kind-specific rule parameters, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RuleKindDefinition {
    /// Field fails if it equals one of the listed strings
    #[serde(rename = "str", alias = "blocklist")]
    Blocklist {
        /// Disallowed exact values
        strings: Vec<String>,
    },

    /// Field fails unless the pattern matches at its start
    #[serde(rename = "re", alias = "regex")]
    Regex {
        /// Regular expression source
        regex: String,
    },

    /// Field fails outside the length range, or on non-digits when numeric
    #[serde(rename = "len", alias = "length")]
    Length {
        /// Reject fields containing non-digit characters
        check_numeric: bool,
        /// `[min, max]`; min 0 means no minimum, max -1 means no maximum
        range: (usize, i64),
    },

    /// ABA routing number check digit
    #[serde(rename = "aba")]
    Aba {
        /// When false the rule only enforces `allow_empty`
        validate: bool,
    },
}

impl RuleKindDefinition {
    /// Returns the catalog tag of this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            RuleKindDefinition::Blocklist { .. } => "str",
            RuleKindDefinition::Regex { .. } => "re",
            RuleKindDefinition::Length { .. } => "len",
            RuleKindDefinition::Aba { .. } => "aba",
        }
    }
}
