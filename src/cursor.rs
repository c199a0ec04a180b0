use crate::errors::CursorError;
use crate::value::Value;
use std::collections::VecDeque;

/// Forward-only handle over a query's result rows.
///
/// `advance` moves to the next row and returns `false` once the rows are
/// exhausted; `scan` then yields that row's values, aligned to `column_names`.
/// A cursor is read once and never rewound.
pub trait RowCursor {
    /// # Errors
    /// Returns an error if the column metadata cannot be read.
    fn column_names(&self) -> Result<Vec<String>, CursorError>;

    /// # Errors
    /// Returns an error if fetching the next row fails.
    fn advance(&mut self) -> Result<bool, CursorError>;

    /// Appends the current row's values to `values`.
    ///
    /// # Errors
    /// Returns an error if the row cannot be decoded, or if called without a
    /// successful `advance`.
    fn scan(&mut self, values: &mut Vec<Value>) -> Result<(), CursorError>;
}

impl<C: RowCursor + ?Sized> RowCursor for &mut C {
    fn column_names(&self) -> Result<Vec<String>, CursorError> {
        (**self).column_names()
    }
    fn advance(&mut self) -> Result<bool, CursorError> {
        (**self).advance()
    }
    fn scan(&mut self, values: &mut Vec<Value>) -> Result<(), CursorError> {
        (**self).scan(values)
    }
}

/// Cursor over rows already held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCursor {
    columns: Vec<String>,
    rows: VecDeque<Vec<Value>>,
    current: Option<Vec<Value>>,
}

impl MemoryCursor {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: VecDeque::new(),
            current: None,
        }
    }

    #[must_use]
    pub fn with_row<V: Into<Value>>(mut self, row: impl IntoIterator<Item = V>) -> Self {
        self.push_row(row);
        self
    }

    pub fn push_row<V: Into<Value>>(&mut self, row: impl IntoIterator<Item = V>) {
        self.rows.push_back(row.into_iter().map(Into::into).collect());
    }

    /// Rows not yet advanced past.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl RowCursor for MemoryCursor {
    fn column_names(&self) -> Result<Vec<String>, CursorError> {
        Ok(self.columns.clone())
    }

    fn advance(&mut self) -> Result<bool, CursorError> {
        self.current = self.rows.pop_front();
        Ok(self.current.is_some())
    }

    fn scan(&mut self, values: &mut Vec<Value>) -> Result<(), CursorError> {
        let row = self.current.take().ok_or("scan called without a current row")?;
        values.extend(row);
        Ok(())
    }
}

/// Adapts a fallible row iterator, such as a driver's result stream, into a [`RowCursor`].
pub struct IterCursor<I> {
    columns: Vec<String>,
    rows: I,
    current: Option<Vec<Value>>,
}

impl<I, E> IterCursor<I>
where
    I: Iterator<Item = Result<Vec<Value>, E>>,
    E: Into<CursorError>,
{
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>, rows: I) -> Self {
        Self { columns: columns.into_iter().map(Into::into).collect(), rows, current: None }
    }
}

impl<I, E> RowCursor for IterCursor<I>
where
    I: Iterator<Item = Result<Vec<Value>, E>>,
    E: Into<CursorError>,
{
    fn column_names(&self) -> Result<Vec<String>, CursorError> {
        Ok(self.columns.clone())
    }

    fn advance(&mut self) -> Result<bool, CursorError> {
        match self.rows.next() {
            Some(Ok(row)) => {
                self.current = Some(row);
                Ok(true)
            }
            Some(Err(e)) => {
                self.current = None;
                Err(e.into())
            }
            None => {
                self.current = None;
                Ok(false)
            }
        }
    }

    fn scan(&mut self, values: &mut Vec<Value>) -> Result<(), CursorError> {
        let row = self.current.take().ok_or("scan called without a current row")?;
        values.extend(row);
        Ok(())
    }
}
