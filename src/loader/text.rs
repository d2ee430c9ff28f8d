use std::str::FromStr;

use crate::error::LoadError;

/// Number of header lines at the top of the plant and demand files
const HEADER_LINES: usize = 2;

/// Whitespace token reader over a descriptor file, with the header lines skipped.
pub(crate) struct RecordReader<'a> {
    file: &'a str,
    tokens: std::iter::Peekable<std::vec::IntoIter<&'a str>>,
    record: usize,
}

impl<'a> RecordReader<'a> {
    pub(crate) fn new(file: &'a str, contents: &'a str) -> Self {
        let tokens: Vec<&str> = contents
            .lines()
            .skip(HEADER_LINES)
            .flat_map(str::split_whitespace)
            .collect();
        Self {
            file,
            tokens: tokens.into_iter().peekable(),
            record: 0,
        }
    }

    /// Start the next record, or `None` at end of input
    pub(crate) fn next_record(&mut self) -> Option<usize> {
        self.tokens.peek()?;
        self.record += 1;
        Some(self.record)
    }

    pub(crate) fn field<T: FromStr>(&mut self, name: &str) -> Result<T, LoadError> {
        let token = self.tokens.next().ok_or_else(|| self.error(format!("missing field '{name}'")))?;
        token
            .parse()
            .map_err(|_| self.error(format!("invalid value '{token}' for field '{name}'")))
    }

    pub(crate) fn error(&self, message: String) -> LoadError {
        LoadError::Parse {
            file: self.file.to_string(),
            record: self.record,
            message,
        }
    }
}
