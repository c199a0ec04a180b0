use crate::errors::{ConvertError, Result};
use crate::value::{Timestamp, Value};
use chrono::format::{Fixed, Item, StrftimeItems};
use std::fmt::Write;

/// Renders [`Value`]s to CSV field text.
///
/// A custom time pattern is parsed once at construction so a bad pattern fails
/// before any row is read. `%Z` prints the timestamp's zone abbreviation when
/// it has one and the numeric offset otherwise.
pub struct ValueFormatter<'a> {
    time_items: Option<Vec<Item<'a>>>,
    zone_name: bool,
}

impl<'a> ValueFormatter<'a> {
    /// # Errors
    /// Returns `InvalidTimeFormat` if `time_format` is not a valid strftime pattern.
    pub fn new(time_format: Option<&'a str>) -> Result<Self> {
        let time_items = match time_format {
            Some(pattern) => {
                let items: Vec<Item<'a>> = StrftimeItems::new(pattern).collect();
                if items.iter().any(|i| matches!(i, Item::Error)) {
                    return Err(ConvertError::InvalidTimeFormat(pattern.to_string()));
                }
                Some(items)
            }
            None => None,
        };
        let zone_name = time_items
            .as_ref()
            .is_some_and(|items| items.iter().any(|i| matches!(i, Item::Fixed(Fixed::TimezoneName))));
        Ok(Self { time_items, zone_name })
    }

    /// # Errors
    /// Returns `Encoding` when a byte value is not valid UTF-8 or a timestamp
    /// cannot be rendered with the configured pattern.
    pub fn format(&self, value: &Value) -> Result<String> {
        Ok(match value {
            Value::Null => String::new(),
            Value::Int(i) => i.to_string(),
            Value::UInt(u) => u.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Text(s) => s.clone(),
            Value::Bytes(b) => String::from_utf8(b.clone()).map_err(|e| {
                ConvertError::Encoding(format!("{} value is not UTF-8: {e}", value.type_name()))
            })?,
            Value::Timestamp(ts) => self.format_timestamp(ts).map_err(|_| {
                ConvertError::Encoding(format!("cannot format {} {ts}", value.type_name()))
            })?,
        })
    }

    /// Formats a whole row into `out`, replacing its previous contents.
    ///
    /// # Errors
    /// See [`ValueFormatter::format`].
    pub fn format_row(&self, values: &[Value], out: &mut Vec<String>) -> Result<()> {
        out.clear();
        for v in values {
            out.push(self.format(v)?);
        }
        Ok(())
    }

    fn format_timestamp(&self, ts: &Timestamp) -> std::result::Result<String, std::fmt::Error> {
        let Some(items) = &self.time_items else {
            return Ok(ts.to_string());
        };
        let mut s = String::new();
        let written = match ts.zone().filter(|_| self.zone_name) {
            Some(zone) => {
                let named = items.iter().map(|i| match i {
                    Item::Fixed(Fixed::TimezoneName) => Item::OwnedLiteral(zone.into()),
                    other => other.clone(),
                });
                write!(s, "{}", ts.instant().format_with_items(named))
            }
            None => write!(s, "{}", ts.instant().format_with_items(items.iter())),
        };
        written.map(|()| s)
    }
}
