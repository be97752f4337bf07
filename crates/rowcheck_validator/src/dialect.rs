//! Pipe-delimited record dialect.
//!
//! Fields are separated by `|`, nothing is quoted, and a backslash makes the
//! following character literal. A record ends at an unescaped line break; an
//! escaped line break continues the current field on the next line. A blank
//! line is a record with no fields.

use crate::{Record, RecordSink, RecordSource, RunError};
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Field delimiter.
pub const DELIMITER: char = '|';

/// Escape character.
pub const ESCAPE: char = '\\';

/// Record terminator written by [`PipeWriter`].
pub const TERMINATOR: &str = "\r\n";

/// How a physical line ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineEnd {
    /// The record is complete
    Record,
    /// The line break was escaped; the field continues on the next line
    Continued,
}

/// Reads pipe-delimited records.
pub struct PipeReader<R: Read> {
    inner: BufReader<R>,
    line: Vec<u8>,
}

impl PipeReader<File> {
    /// Opens a file for reading.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RunError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| RunError::io(path, e))?;
        Ok(Self::new(file))
    }
}

impl<R: Read> PipeReader<R> {
    /// Wraps a reader.
    pub fn new(reader: R) -> Self {
        Self {
            inner: BufReader::new(reader),
            line: Vec::new(),
        }
    }

    /// Reads the next physical line into `self.line` without its `\n`.
    ///
    /// Returns `None` at end of input, otherwise whether a `\n` was removed.
    fn read_line(&mut self) -> Result<Option<bool>, RunError> {
        self.line.clear();
        if self.inner.read_until(b'\n', &mut self.line)? == 0 {
            return Ok(None);
        }
        let terminated = self.line.last() == Some(&b'\n');
        if terminated {
            self.line.pop();
        }
        Ok(Some(terminated))
    }
}

impl<R: Read> RecordSource for PipeReader<R> {
    fn next_record(&mut self) -> Result<Option<Record>, RunError> {
        let Some(mut terminated) = self.read_line()? else {
            return Ok(None);
        };
        if self.line.is_empty() || self.line == b"\r" {
            return Ok(Some(Vec::new()));
        }

        let mut fields = Vec::new();
        let mut current = String::new();
        loop {
            let line = std::str::from_utf8(&self.line)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            if split_line(line, terminated, &mut fields, &mut current) == LineEnd::Record {
                break;
            }

            match self.read_line()? {
                Some(next) => terminated = next,
                None => {
                    fields.push(std::mem::take(&mut current));
                    break;
                }
            }
        }

        Ok(Some(fields))
    }
}

/// Splits one physical line into `fields`, resolving escapes.
///
/// `current` carries a field across an escaped line break. A trailing `\r`
/// belongs to the terminator unless it is escaped. A dangling escape at end of
/// input is dropped.
fn split_line(line: &str, terminated: bool, fields: &mut Record, current: &mut String) -> LineEnd {
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            ESCAPE => match chars.next() {
                Some(next) => current.push(next),
                None if terminated => {
                    current.push('\n');
                    return LineEnd::Continued;
                }
                None => {}
            },
            DELIMITER => fields.push(std::mem::take(current)),
            '\r' if terminated && chars.as_str().is_empty() => {}
            _ => current.push(c),
        }
    }

    fields.push(std::mem::take(current));
    LineEnd::Record
}

/// Writes pipe-delimited records.
pub struct PipeWriter<W: Write> {
    inner: BufWriter<W>,
}

impl PipeWriter<File> {
    /// Creates (or truncates) a file for writing.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RunError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| RunError::io(path, e))?;
        Ok(Self::new(file))
    }
}

impl<W: Write> PipeWriter<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self {
            inner: BufWriter::new(writer),
        }
    }
}

impl<W: Write> RecordSink for PipeWriter<W> {
    fn write_record(&mut self, record: &[String]) -> Result<(), RunError> {
        for (i, field) in record.iter().enumerate() {
            if i > 0 {
                self.inner.write_all(&[DELIMITER as u8])?;
            }
            self.inner.write_all(escape_field(field).as_bytes())?;
        }
        self.inner.write_all(TERMINATOR.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), RunError> {
        self.inner.flush()?;
        Ok(())
    }
}

/// Escapes the characters that would otherwise end a field or a record.
pub fn escape_field(field: &str) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, ESCAPE | DELIMITER | '"' | '\r' | '\n');
    if !field.chars().any(needs_escape) {
        return Cow::Borrowed(field);
    }

    let mut escaped = String::with_capacity(field.len() + 4);
    for c in field.chars() {
        if needs_escape(c) {
            escaped.push(ESCAPE);
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}
