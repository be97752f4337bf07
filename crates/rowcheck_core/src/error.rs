//! Error types for rule configuration.
//!
//! Everything in this module is fatal and raised before the first data row is
//! read: a rule that cannot be compiled, a rule set that contradicts itself, or
//! a catalog lookup for a name that was never configured.

use thiserror::Error;

/// Result type for rule configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while compiling or selecting rule sets.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Regular expression failed to compile
    #[error("Invalid regex for field {position}: {message}")]
    InvalidRegex {
        /// Field position the rule was configured for
        position: usize,
        /// Compiler message
        message: String,
    },

    /// Length range bounds are contradictory or out of domain
    #[error("Invalid length range for field {position}: min {min}, max {max}")]
    InvalidRange {
        /// Field position the rule was configured for
        position: usize,
        /// Configured minimum (0 = no minimum)
        min: usize,
        /// Configured maximum (-1 = no maximum)
        max: i64,
    },

    /// Two rules were configured for the same field position
    #[error("Rule set '{rule_set}' configures field {position} more than once")]
    DuplicatePosition {
        /// Rule set name
        rule_set: String,
        /// Repeated position
        position: usize,
    },

    /// A rule targets a position beyond the expected field count
    #[error(
        "Rule set '{rule_set}' configures field {position} but only expects {field_count} fields"
    )]
    PositionOutOfRange {
        /// Rule set name
        rule_set: String,
        /// Offending position
        position: usize,
        /// Expected number of fields per record
        field_count: usize,
    },

    /// Rule set was declared without a usable name
    #[error("Rule set name must not be blank")]
    BlankName,

    /// The no-validation sentinel must not carry rules
    #[error("Rule set '{0}' disables validation and cannot declare field rules")]
    SentinelWithRules(String),

    /// Two rule sets share a name
    #[error("Rule set '{0}' is defined more than once")]
    DuplicateRuleSet(String),

    /// The catalog contains no rule sets at all
    #[error("Rule catalog is empty")]
    EmptyCatalog,

    /// The requested rule set does not exist
    #[error("Unknown source data type: {name}. Valid types are: {}", available.join(" "))]
    UnknownRuleSet {
        /// Requested name
        name: String,
        /// Names that are configured
        available: Vec<String>,
    },

    /// Header labels were supplied twice for the same rule set
    #[error("Header names for rule set '{0}' are already set")]
    HeaderAlreadySet(String),
}

impl ConfigError {
    /// Creates a new invalid regex error.
    pub fn invalid_regex(position: usize, message: impl Into<String>) -> Self {
        Self::InvalidRegex {
            position,
            message: message.into(),
        }
    }

    /// Creates a new invalid range error.
    pub fn invalid_range(position: usize, min: usize, max: i64) -> Self {
        Self::InvalidRange { position, min, max }
    }

    /// Creates a new duplicate position error.
    pub fn duplicate_position(rule_set: impl Into<String>, position: usize) -> Self {
        Self::DuplicatePosition {
            rule_set: rule_set.into(),
            position,
        }
    }

    /// Creates a new position out of range error.
    pub fn position_out_of_range(
        rule_set: impl Into<String>,
        position: usize,
        field_count: usize,
    ) -> Self {
        Self::PositionOutOfRange {
            rule_set: rule_set.into(),
            position,
            field_count,
        }
    }

    /// Creates a new unknown rule set error.
    pub fn unknown_rule_set(name: impl Into<String>, available: Vec<String>) -> Self {
        Self::UnknownRuleSet {
            name: name.into(),
            available,
        }
    }
}
