use crate::errors::{ConvertError, Result};
use std::io::{self, Write};

/// Destination for finished records. Escaping is the sink's concern.
pub trait RecordSink {
    /// # Errors
    /// Returns an error if the record cannot be encoded or written.
    fn write_record(&mut self, record: &[String]) -> Result<()>;

    /// # Errors
    /// Returns an error if buffered bytes cannot reach the destination.
    fn flush(&mut self) -> Result<()>;
}

/// RFC 4180 style encoder: double-quote escaping, `\n` record terminator.
///
/// Records are not required to share a length; a pre-processor may reshape rows.
pub struct CsvSink<W: Write> {
    w: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W, delimiter: u8) -> Self {
        let w = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .terminator(csv::Terminator::Any(b'\n'))
            .quote_style(csv::QuoteStyle::Necessary)
            .flexible(true)
            .from_writer(inner);
        Self { w }
    }

    /// Flushes and hands back the underlying writer.
    ///
    /// # Errors
    /// Returns `SinkWrite` if the final flush fails.
    pub fn finish(self) -> Result<W> {
        self.w
            .into_inner()
            .map_err(|e| ConvertError::SinkWrite(io::Error::new(e.error().kind(), e.error().to_string())))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_record(&mut self, record: &[String]) -> Result<()> {
        self.w.write_record(record)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.w.flush().map_err(ConvertError::SinkWrite)
    }
}

/// Collects records in memory, unescaped.
#[derive(Debug, Default, Clone)]
pub struct RecordBuffer {
    pub records: Vec<Vec<String>>,
}

impl RecordSink for RecordBuffer {
    fn write_record(&mut self, record: &[String]) -> Result<()> {
        self.records.push(record.to_vec());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
