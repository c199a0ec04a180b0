//! Stream query result rows out as CSV.
//!
//! A [`Converter`] wraps a [`RowCursor`], renders each typed [`Value`] to text,
//! optionally reshapes or drops rows through a pre-processor hook, and writes
//! CSV to any `io::Write`, a file, or a `String`.
//!
//! ```
//! use rowcsv::{Converter, MemoryCursor, Timestamp, Value};
//!
//! let mut rows = MemoryCursor::new(["name", "age", "bdate"]).with_row([
//!     Value::from("Alice"),
//!     Value::from(1i64),
//!     Value::from(Timestamp::from_unix(123_456_789).unwrap()),
//! ]);
//! let csv = Converter::new(&mut rows).into_string().unwrap();
//! assert_eq!(csv, "name,age,bdate\nAlice,1,1973-11-29 21:33:09 +0000 UTC\n");
//! ```

pub mod config;
pub mod convert;
pub mod cursor;
pub mod errors;
pub mod format;
pub mod logger;
pub mod value;

pub use convert::{ConvertOptions, ConvertReport, Converter, CsvSink, RecordSink, RowPreProcessor};
pub use cursor::{IterCursor, MemoryCursor, RowCursor};
pub use errors::{ConvertError, CursorError, Result};
pub use value::{Timestamp, Value};

use std::io::Write;
use std::path::Path;

/// Writes every row of `cursor` to a new file at `path` with default options.
///
/// # Errors
/// See [`Converter::write_to_file`].
pub fn write_file<C: RowCursor>(path: impl AsRef<Path>, cursor: C) -> Result<ConvertReport> {
    Converter::new(cursor).write_to_file(path)
}

/// Writes every row of `cursor` to `writer` with default options.
///
/// # Errors
/// See [`Converter::write_to`].
pub fn write<W: Write, C: RowCursor>(writer: W, cursor: C) -> Result<ConvertReport> {
    Converter::new(cursor).write_to(writer)
}

/// Renders every row of `cursor` to a string with default options.
///
/// # Errors
/// See [`Converter::into_string`].
pub fn write_string<C: RowCursor>(cursor: C) -> Result<String> {
    Converter::new(cursor).into_string()
}
