//! Typed field rules.
//!
//! A [`FieldRule`] is one compiled check for one field position. The kind is
//! resolved once when the rule is built, so evaluating a field is a single
//! `match` with no string dispatch.

use crate::{ConfigError, FieldRuleDefinition, Result, RuleKindDefinition};
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

/// Weights applied to the nine digits of an ABA routing number.
const ABA_WEIGHTS: [u32; 9] = [3, 7, 1, 3, 7, 1, 3, 7, 1];

/// A single compiled validation rule.
#[derive(Debug, Clone)]
pub struct FieldRule {
    allow_empty: bool,
    kind: RuleKind,
}

/// The check performed by a [`FieldRule`].
#[derive(Clone)]
pub enum RuleKind {
    /// Fails when the field equals a blocked value
    StringBlocklist {
        /// Disallowed exact values
        blocked: HashSet<String>,
    },

    /// Fails unless the pattern matches at the start of the field
    RegexMatch {
        /// Compiled pattern
        pattern: Regex,
    },

    /// Fails outside the length range or, when numeric, on any non-digit
    LengthRange {
        /// Require every character to be an ASCII digit
        check_numeric: bool,
        /// Minimum length, 0 for none
        min_length: usize,
        /// Maximum length, `None` for unbounded
        max_length: Option<usize>,
    },

    /// ABA routing number check digit
    AbaChecksum {
        /// When false every non-empty value passes
        validate_checksum: bool,
    },
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::StringBlocklist { blocked } => f
                .debug_struct("StringBlocklist")
                .field("blocked", &blocked.len())
                .finish(),
            RuleKind::RegexMatch { pattern } => f
                .debug_struct("RegexMatch")
                .field("pattern", &pattern.as_str())
                .finish(),
            RuleKind::LengthRange {
                check_numeric,
                min_length,
                max_length,
            } => f
                .debug_struct("LengthRange")
                .field("check_numeric", check_numeric)
                .field("min_length", min_length)
                .field("max_length", max_length)
                .finish(),
            RuleKind::AbaChecksum { validate_checksum } => f
                .debug_struct("AbaChecksum")
                .field("validate_checksum", validate_checksum)
                .finish(),
        }
    }
}

impl FieldRule {
    /// Creates a rule that rejects any of the given exact values.
    pub fn blocklist<I, S>(values: I, allow_empty: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allow_empty,
            kind: RuleKind::StringBlocklist {
                blocked: values.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// Creates a rule that requires `pattern` to match at the start of the field.
    ///
    /// `position` is only used to label the error if the pattern does not compile.
    pub fn regex(position: usize, pattern: &str, allow_empty: bool) -> Result<Self> {
        let pattern =
            Regex::new(pattern).map_err(|e| ConfigError::invalid_regex(position, e.to_string()))?;
        Ok(Self {
            allow_empty,
            kind: RuleKind::RegexMatch { pattern },
        })
    }

    /// Creates a length range rule from catalog bounds.
    ///
    /// `min` of 0 disables the minimum and `max` of -1 disables the maximum.
    pub fn length_range(
        position: usize,
        check_numeric: bool,
        min: usize,
        max: i64,
        allow_empty: bool,
    ) -> Result<Self> {
        let max_length = match max {
            -1 => None,
            m if m < -1 => return Err(ConfigError::invalid_range(position, min, max)),
            m => {
                let m = usize::try_from(m)
                    .map_err(|_| ConfigError::invalid_range(position, min, max))?;
                if min > m {
                    return Err(ConfigError::invalid_range(position, min, max));
                }
                Some(m)
            }
        };

        Ok(Self {
            allow_empty,
            kind: RuleKind::LengthRange {
                check_numeric,
                min_length: min,
                max_length,
            },
        })
    }

    /// Creates an ABA routing number rule.
    pub fn aba_checksum(validate_checksum: bool, allow_empty: bool) -> Self {
        Self {
            allow_empty,
            kind: RuleKind::AbaChecksum { validate_checksum },
        }
    }

    /// Compiles a catalog definition.
    pub fn compile(definition: &FieldRuleDefinition) -> Result<Self> {
        let position = definition.position;
        let allow_empty = definition.allow_empty;

        match &definition.kind {
            RuleKindDefinition::Blocklist { strings } => {
                Ok(Self::blocklist(strings.iter().cloned(), allow_empty))
            }
            RuleKindDefinition::Regex { regex } => Self::regex(position, regex, allow_empty),
            RuleKindDefinition::Length {
                check_numeric,
                range: (min, max),
            } => Self::length_range(position, *check_numeric, *min, *max, allow_empty),
            RuleKindDefinition::Aba { validate } => Ok(Self::aba_checksum(*validate, allow_empty)),
        }
    }

    /// Returns whether an empty field passes.
    pub fn allow_empty(&self) -> bool {
        self.allow_empty
    }

    /// Returns the rule kind.
    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Checks an already trimmed field value.
    ///
    /// An empty field returns `allow_empty` regardless of the kind.
    pub fn check(&self, field: &str) -> bool {
        if field.is_empty() {
            return self.allow_empty;
        }

        match &self.kind {
            RuleKind::StringBlocklist { blocked } => !blocked.contains(field),
            RuleKind::RegexMatch { pattern } => pattern.find(field).is_some_and(|m| m.start() == 0),
            RuleKind::LengthRange {
                check_numeric,
                min_length,
                max_length,
            } => {
                if *check_numeric && !field.chars().all(|c| c.is_ascii_digit()) {
                    return false;
                }
                let length = field.chars().count();
                if *min_length != 0 && length < *min_length {
                    return false;
                }
                max_length.is_none_or(|max| length <= max)
            }
            RuleKind::AbaChecksum { validate_checksum } => {
                !*validate_checksum || aba_checksum_valid(field)
            }
        }
    }
}

/// Returns true when `value` is a nine digit ABA routing number whose weighted
/// digit sum is divisible by ten.
pub fn aba_checksum_valid(value: &str) -> bool {
    if value.len() != 9 {
        return false;
    }

    let mut sum = 0;
    for (c, weight) in value.chars().zip(ABA_WEIGHTS) {
        match c.to_digit(10) {
            Some(d) => sum += d * weight,
            None => return false,
        }
    }
    sum % 10 == 0
}
