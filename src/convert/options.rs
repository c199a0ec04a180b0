use crate::errors::{ConvertError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Emit a header record before the data records.
    pub write_headers: bool,
    /// Replaces the cursor's column names in the header record when non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<String>>,
    /// strftime-style pattern for timestamps; unset means the long default form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_format: Option<String>,
    pub delimiter: char,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self { write_headers: true, headers: None, time_format: None, delimiter: ',' }
    }
}

impl ConvertOptions {
    /// The header record to emit, if any. An empty override counts as unset.
    #[must_use]
    pub fn header_record<'a>(&'a self, columns: &'a [String]) -> Option<&'a [String]> {
        if !self.write_headers {
            return None;
        }
        match self.headers.as_deref() {
            Some(h) if !h.is_empty() => Some(h),
            _ => Some(columns),
        }
    }

    /// # Errors
    /// Returns `InvalidDelimiter` for non-ASCII delimiters and for the quote
    /// and line-break characters.
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter {
            '"' | '\n' | '\r' => Err(ConvertError::InvalidDelimiter(self.delimiter)),
            c if c.is_ascii() => Ok(c as u8),
            c => Err(ConvertError::InvalidDelimiter(c)),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConvertReport {
    /// Data records written, header excluded.
    pub written: u64,
    /// Rows dropped by the row pre-processor.
    pub skipped: u64,
}
