use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type returned by [`crate::cursor::RowCursor`] implementations.
pub type CursorError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("cursor read error: {0}")]
    CursorRead(#[source] CursorError),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("invalid time format: {0:?}")]
    InvalidTimeFormat(String),

    #[error("invalid delimiter: {0:?}")]
    InvalidDelimiter(char),

    #[error("sink write error: {0}")]
    SinkWrite(#[source] io::Error),

    #[error("failed to open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config error: {0}")]
    Config(String),
}

impl From<csv::Error> for ConvertError {
    fn from(e: csv::Error) -> Self {
        let msg = e.to_string();
        match e.into_kind() {
            csv::ErrorKind::Io(io) => Self::SinkWrite(io),
            _ => Self::Encoding(msg),
        }
    }
}

impl From<toml::de::Error> for ConvertError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}
