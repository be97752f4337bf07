//! Per-row validation.
//!
//! [`RowValidator`] applies one [`RuleSet`] to one record and classifies it.
//! Checks run in a fixed order: the no-validation sentinel, the record shape,
//! then each field in position order. The first failing check decides the
//! outcome and no later field is looked at.

use rowcheck_core::RuleSet;

/// Classification of a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// Every check passed
    Accepted,
    /// Field count differs from the rule set's expected count
    RejectedShapeMismatch,
    /// The record reached its empty-field budget
    RejectedTooManyEmptyFields,
    /// The rule at this position failed
    RejectedFieldFailed(usize),
}

impl RowOutcome {
    /// Returns true for [`RowOutcome::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, RowOutcome::Accepted)
    }
}

/// Evaluates records against one rule set.
#[derive(Debug, Clone, Copy)]
pub struct RowValidator<'a> {
    rule_set: &'a RuleSet,
}

impl<'a> RowValidator<'a> {
    /// Creates a validator for the given rule set.
    pub fn new(rule_set: &'a RuleSet) -> Self {
        Self { rule_set }
    }

    /// Returns the rule set this validator applies.
    pub fn rule_set(&self) -> &'a RuleSet {
        self.rule_set
    }

    /// Returns how many empty fields end a record's evaluation.
    ///
    /// A record of N fields is rejected on its (N-1)th empty field, so a
    /// single-field record is rejected as soon as its field is empty.
    pub fn empty_budget(&self) -> usize {
        self.rule_set.expected_field_count().saturating_sub(1)
    }

    /// Classifies a record.
    pub fn validate<S: AsRef<str>>(&self, row: &[S]) -> RowOutcome {
        if self.rule_set.is_no_validation() {
            return RowOutcome::Accepted;
        }

        if row.len() != self.rule_set.expected_field_count() {
            return RowOutcome::RejectedShapeMismatch;
        }

        let budget = self.empty_budget();
        let mut empty_count = 0;

        for (position, raw) in row.iter().enumerate() {
            let field = raw.as_ref().trim();

            if let Some(rule) = self.rule_set.for_position(position) {
                if !rule.check(field) {
                    return RowOutcome::RejectedFieldFailed(position);
                }
            }

            if field.is_empty() {
                empty_count += 1;
                if empty_count >= budget {
                    return RowOutcome::RejectedTooManyEmptyFields;
                }
            }
        }

        RowOutcome::Accepted
    }
}
