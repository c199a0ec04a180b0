mod options;
mod pipeline;
mod sinks;

pub use options::{ConvertOptions, ConvertReport};
pub use pipeline::{Converter, RowPreProcessor};
pub use sinks::{CsvSink, RecordBuffer, RecordSink};
