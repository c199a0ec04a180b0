use crate::cursor::RowCursor;
use crate::errors::{ConvertError, Result};
use crate::format::ValueFormatter;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::options::{ConvertOptions, ConvertReport};
use super::sinks::{CsvSink, RecordSink};

const PROGRESS_EVERY: u64 = 10_000;

/// Per-row hook: receives the converted record and the column names.
///
/// Returning `None` drops the row. Returning `Some(record)` writes that record
/// in place of the original; its length is not checked against the columns.
pub type RowPreProcessor<'a> = Box<dyn FnMut(Vec<String>, &[String]) -> Option<Vec<String>> + 'a>;

/// Streams the rows of a [`RowCursor`] out as CSV.
///
/// Construct with [`Converter::new`], adjust options, then call exactly one of
/// the output methods. Those take `self`, so a converter cannot be run twice.
/// Pass `&mut cursor` to keep ownership of the cursor on the caller's side.
pub struct Converter<'a, C> {
    cursor: C,
    options: ConvertOptions,
    pre_processor: Option<RowPreProcessor<'a>>,
}

impl<'a, C: RowCursor> Converter<'a, C> {
    pub fn new(cursor: C) -> Self {
        Self::with_options(cursor, ConvertOptions::default())
    }

    pub fn with_options(cursor: C, options: ConvertOptions) -> Self {
        Self { cursor, options, pre_processor: None }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut ConvertOptions {
        &mut self.options
    }

    #[must_use]
    pub fn write_headers(mut self, write_headers: bool) -> Self {
        self.options.write_headers = write_headers;
        self
    }

    #[must_use]
    pub fn headers<S: Into<String>>(mut self, headers: impl IntoIterator<Item = S>) -> Self {
        self.options.headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn time_format(mut self, pattern: impl Into<String>) -> Self {
        self.options.time_format = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.options.delimiter = delimiter;
        self
    }

    /// Installs the per-row hook, replacing any previous one. See [`RowPreProcessor`].
    pub fn set_row_pre_processor<F>(&mut self, f: F)
    where
        F: FnMut(Vec<String>, &[String]) -> Option<Vec<String>> + 'a,
    {
        self.pre_processor = Some(Box::new(f));
    }

    #[must_use]
    pub fn with_row_pre_processor<F>(mut self, f: F) -> Self
    where
        F: FnMut(Vec<String>, &[String]) -> Option<Vec<String>> + 'a,
    {
        self.set_row_pre_processor(f);
        self
    }

    /// Streams the CSV document to `writer`.
    ///
    /// Records written before a failure stay in `writer`.
    ///
    /// # Errors
    /// `CursorRead` when the cursor fails, `Encoding` when a value or record
    /// cannot be rendered, `SinkWrite` when `writer` fails.
    pub fn write_to<W: Write>(self, writer: W) -> Result<ConvertReport> {
        let delimiter = self.options.delimiter_byte()?;
        let mut sink = CsvSink::new(writer, delimiter);
        let report = self.write_records(&mut sink)?;
        sink.finish()?;
        Ok(report)
    }

    /// Creates or truncates the file at `path` and streams the CSV document into it.
    ///
    /// The file is closed on every exit path. A failed run leaves a partial file.
    ///
    /// # Errors
    /// `FileOpen` if the file cannot be created, otherwise as [`Converter::write_to`].
    pub fn write_to_file(self, path: impl AsRef<Path>) -> Result<ConvertReport> {
        let path = path.as_ref();
        log::info!("csv export: path={}", path.display());
        let file = File::create(path)
            .map_err(|source| ConvertError::FileOpen { path: path.to_path_buf(), source })?;
        self.write_to(file)
    }

    /// Renders the whole document in memory. No partial output is returned on failure.
    ///
    /// # Errors
    /// As [`Converter::write_to`].
    pub fn into_string(self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        String::from_utf8(buf).map_err(|e| ConvertError::Encoding(e.to_string()))
    }

    /// Runs the conversion loop against any [`RecordSink`], then flushes it.
    ///
    /// # Errors
    /// As [`Converter::write_to`].
    pub fn write_records<S: RecordSink + ?Sized>(self, sink: &mut S) -> Result<ConvertReport> {
        let Converter { mut cursor, options, mut pre_processor } = self;
        let formatter = ValueFormatter::new(options.time_format.as_deref())?;
        let columns = cursor.column_names().map_err(ConvertError::CursorRead)?;
        log::debug!(
            "csv export start: columns={}, write_headers={}, custom_headers={}",
            columns.len(),
            options.write_headers,
            options.headers.as_ref().is_some_and(|h| !h.is_empty())
        );

        if let Some(header) = options.header_record(&columns) {
            sink.write_record(header)?;
        }

        let mut report = ConvertReport::default();
        let mut values = Vec::with_capacity(columns.len());
        let mut record = Vec::with_capacity(columns.len());
        let mut row_no: u64 = 0;
        while cursor.advance().map_err(ConvertError::CursorRead)? {
            row_no += 1;
            values.clear();
            cursor.scan(&mut values).map_err(ConvertError::CursorRead)?;
            formatter.format_row(&values, &mut record)?;
            match pre_processor.as_mut() {
                Some(hook) => match hook(std::mem::take(&mut record), columns.as_slice()) {
                    Some(out) => {
                        sink.write_record(&out)?;
                        report.written += 1;
                        record = out;
                    }
                    None => {
                        log::trace!("row {row_no} dropped by pre-processor");
                        report.skipped += 1;
                    }
                },
                None => {
                    sink.write_record(&record)?;
                    report.written += 1;
                }
            }
            if row_no % PROGRESS_EVERY == 0 {
                log::debug!("exported {} records ({} skipped)", report.written, report.skipped);
            }
        }
        sink.flush()?;
        log::info!("csv export done: written={}, skipped={}", report.written, report.skipped);
        Ok(report)
    }
}
