//! Run orchestration.
//!
//! This module provides the [`ValidationRunner`] that drives one pass over an
//! input: it copies the header to both outputs, classifies every following
//! record with a [`RowValidator`], routes it to the accepted or rejected sink
//! and keeps the counters reported at the end of the run.

use crate::{RecordSink, RecordSource, RowOutcome, RowValidator, RunError};
use rowcheck_core::{RuleCatalog, RuleSet};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Header of the column appended to rejected records.
pub const ERROR_COLUMN: &str = "ERROR_MESSAGE";

/// Message for records with the wrong number of fields.
pub const SHAPE_MISMATCH_MESSAGE: &str = "INCORRECT NUMBER OF FIELDS";

/// Message for records that exhausted their empty-field budget.
pub const TOO_MANY_EMPTY_MESSAGE: &str = "TOO MANY EMPTY FIELDS";

/// Running count of rule failures per field position.
///
/// Every ruled position starts at zero, so positions that never failed are
/// still reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureCounters {
    counts: BTreeMap<usize, u64>,
}

impl FailureCounters {
    /// Creates zeroed counters for every ruled position of a rule set.
    pub fn for_rule_set(rule_set: &RuleSet) -> Self {
        Self {
            counts: rule_set.ruled_positions().map(|p| (p, 0)).collect(),
        }
    }

    /// Records one failure at `position`.
    pub fn record(&mut self, position: usize) {
        *self.counts.entry(position).or_insert(0) += 1;
    }

    /// Returns the failure count at `position`.
    pub fn get(&self, position: usize) -> u64 {
        self.counts.get(&position).copied().unwrap_or(0)
    }

    /// Returns the sum over all positions.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterates `(position, count)` in position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.counts.iter().map(|(p, c)| (*p, *c))
    }
}

/// Failure count for one ruled field, as reported in a [`RunSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFailureCount {
    /// Field position
    pub position: usize,
    /// Header label (or the position when the header had none)
    pub name: String,
    /// Rows rejected because of this field
    pub failures: u64,
}

/// End-of-run report.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Name of the rule set applied
    pub rule_set: String,
    /// Rows read, excluding the header
    pub total_rows: u64,
    /// Rows written to the accepted sink
    pub accepted_rows: u64,
    /// Rows written to the rejected sink
    pub rejected_rows: u64,
    /// Per-field failure counts for every ruled position
    pub field_failures: Vec<FieldFailureCount>,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

/// Drives one validation pass for one rule set.
///
/// # Example
///
/// ```rust
/// use rowcheck_core::RuleSetBuilder;
/// use rowcheck_validator::{ValidationRunner, VecSink, VecSource};
///
/// let rule_set = RuleSetBuilder::new("bank")
///     .blocklist(0, ["UNKNOWN"], false)
///     .aba(1, true, false)
///     .build()
///     .unwrap();
///
/// let mut source = VecSource::from_rows([
///     vec!["holder", "routing"],
///     vec!["Ann", "490000018"],
///     vec!["UNKNOWN", "490000018"],
/// ]);
/// let mut accepted = VecSink::new();
/// let mut rejected = VecSink::new();
///
/// let summary = ValidationRunner::new(rule_set)
///     .run(&mut source, &mut accepted, &mut rejected)
///     .unwrap();
///
/// assert_eq!(summary.accepted_rows, 1);
/// assert_eq!(rejected.records()[1][2], "BAD DATA IN FIELD: holder VALUE: UNKNOWN");
/// ```
#[derive(Debug)]
pub struct ValidationRunner {
    rule_set: RuleSet,
}

impl ValidationRunner {
    /// Creates a runner for a rule set.
    pub fn new(rule_set: RuleSet) -> Self {
        Self { rule_set }
    }

    /// Creates a runner for the named rule set of a catalog.
    pub fn from_catalog(catalog: &RuleCatalog, name: &str) -> Result<Self, RunError> {
        Ok(Self::new(catalog.select(name)?))
    }

    /// Returns the rule set this runner applies.
    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    /// Validates every record of `source`, routing each to `accepted` or `rejected`.
    ///
    /// The header is checked against the rule set before any data row is
    /// read; a mismatch aborts the run with nothing but the header consumed.
    pub fn run<S, A, R>(
        self,
        source: &mut S,
        accepted: &mut A,
        rejected: &mut R,
    ) -> Result<RunSummary, RunError>
    where
        S: RecordSource + ?Sized,
        A: RecordSink + ?Sized,
        R: RecordSink + ?Sized,
    {
        let start = Instant::now();
        let rule_set = &self.rule_set;

        let header = source.next_record()?.ok_or(RunError::MissingHeader)?;
        self.check_header(&header)?;
        rule_set.set_header_names(&header)?;

        info!(
            "Validating with rule set '{}' ({} fields)",
            rule_set.name(),
            header.len()
        );

        accepted.write_record(&header)?;
        let mut rejected_header = header;
        rejected_header.push(ERROR_COLUMN.to_string());
        rejected.write_record(&rejected_header)?;

        let validator = RowValidator::new(rule_set);
        let mut counters = FailureCounters::for_rule_set(rule_set);
        let mut total_rows = 0u64;
        let mut accepted_rows = 0u64;
        let mut rejected_rows = 0u64;

        while let Some(mut row) = source.next_record()? {
            total_rows += 1;
            let outcome = validator.validate(&row);

            match rejection_message(rule_set, &row, outcome) {
                None => {
                    accepted_rows += 1;
                    accepted.write_record(&row)?;
                }
                Some(message) => {
                    if let RowOutcome::RejectedFieldFailed(position) = outcome {
                        counters.record(position);
                    }
                    debug!("Row {} rejected: {}", total_rows, message);
                    rejected_rows += 1;
                    row.push(message);
                    rejected.write_record(&row)?;
                }
            }
        }

        accepted.flush()?;
        rejected.flush()?;

        let summary = RunSummary {
            rule_set: rule_set.name().to_string(),
            total_rows,
            accepted_rows,
            rejected_rows,
            field_failures: counters
                .iter()
                .map(|(position, failures)| FieldFailureCount {
                    position,
                    name: rule_set.field_name(position),
                    failures,
                })
                .collect(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "Processed {} rows: {} accepted, {} rejected",
            summary.total_rows, summary.accepted_rows, summary.rejected_rows
        );

        Ok(summary)
    }

    fn check_header(&self, header: &[String]) -> Result<(), RunError> {
        let rule_set = &self.rule_set;
        if rule_set.is_no_validation() {
            return Ok(());
        }

        if header.len() != rule_set.expected_field_count() {
            return Err(RunError::config_mismatch(
                rule_set.name(),
                rule_set.expected_field_count(),
                header.len(),
            ));
        }

        for position in rule_set.ruled_positions() {
            if header[position].trim().is_empty() {
                warn!(
                    "Header label for ruled field {} is blank; messages will use the position",
                    position
                );
            }
        }

        Ok(())
    }
}

/// Returns the message appended to a rejected row, or `None` for accepted rows.
///
/// Field failures quote the original, untrimmed value, or `EMPTY` when the
/// field is empty.
pub fn rejection_message(rule_set: &RuleSet, row: &[String], outcome: RowOutcome) -> Option<String> {
    match outcome {
        RowOutcome::Accepted => None,
        RowOutcome::RejectedShapeMismatch => Some(SHAPE_MISMATCH_MESSAGE.to_string()),
        RowOutcome::RejectedTooManyEmptyFields => Some(TOO_MANY_EMPTY_MESSAGE.to_string()),
        RowOutcome::RejectedFieldFailed(position) => {
            let value = row
                .get(position)
                .map(String::as_str)
                .filter(|v| !v.is_empty())
                .unwrap_or("EMPTY");
            Some(format!(
                "BAD DATA IN FIELD: {} VALUE: {}",
                rule_set.field_name(position),
                value
            ))
        }
    }
}
