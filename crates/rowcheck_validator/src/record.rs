//! Record sources and sinks.
//!
//! The runner only needs two capabilities: pull the next record, and push a
//! record. File-backed implementations live in [`crate::dialect`]; the
//! in-memory ones here serve tests and library callers that already hold
//! their data.

use crate::RunError;
use std::collections::VecDeque;

/// One delimited record: its fields in order.
pub type Record = Vec<String>;

/// Produces records in input order. The first record is the header.
pub trait RecordSource {
    /// Returns the next record, or `None` at end of input.
    fn next_record(&mut self) -> Result<Option<Record>, RunError>;
}

/// Consumes records in output order. The first record written is the header.
pub trait RecordSink {
    /// Writes one record.
    fn write_record(&mut self, record: &[String]) -> Result<(), RunError>;

    /// Flushes buffered output.
    fn flush(&mut self) -> Result<(), RunError> {
        Ok(())
    }
}

/// A record source backed by a list of records.
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    records: VecDeque<Record>,
}

impl VecSource {
    /// Creates a source yielding `records` in order.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Creates a source from borrowed string rows.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}

impl RecordSource for VecSource {
    fn next_record(&mut self) -> Result<Option<Record>, RunError> {
        Ok(self.records.pop_front())
    }
}

/// A record sink that keeps everything written to it.
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    records: Vec<Record>,
}

impl VecSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the records written so far, header first.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes the sink and returns its records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl RecordSink for VecSink {
    fn write_record(&mut self, record: &[String]) -> Result<(), RunError> {
        self.records.push(record.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_vec_source_yields_in_order() {
        let mut source = VecSource::from_rows([vec!["a", "b"], vec!["c"]]);
        assert_eq!(source.next_record().unwrap(), Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(source.next_record().unwrap(), Some(vec!["c".to_string()]));
        assert_eq!(source.next_record().unwrap(), None);
    }

    #[test]
    fn test_vec_sink_keeps_records() {
        let mut sink = VecSink::new();
        sink.write_record(&["x".to_string()]).unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.into_records(), vec![vec!["x".to_string()]]);
    }
}
