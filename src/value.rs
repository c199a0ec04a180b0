//! Loosely-typed column values as they arrive from a row cursor.
//!
//! Drivers hand back heterogeneous runtime types; [`Value`] is the closed set the
//! converter knows how to render. Everything a cursor yields must be mapped into
//! one of these variants before it reaches the formatting stage.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike, Utc};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Text(String),
    Bytes(Vec<u8>),
    Timestamp(Timestamp),
}

impl Value {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short type label, used in diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Timestamp(_) => "timestamp",
        }
    }
}

/// An instant with its UTC offset and, when the source knows it, the zone abbreviation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    instant: DateTime<FixedOffset>,
    zone: Option<String>,
}

impl Timestamp {
    #[must_use]
    pub fn new(instant: DateTime<FixedOffset>, zone: Option<String>) -> Self {
        Self { instant, zone }
    }

    /// Seconds since the Unix epoch, rendered in UTC.
    #[must_use]
    pub fn from_unix(secs: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp(secs, 0).map(Self::from)
    }

    /// Parses an RFC 3339 string. A `Z` suffix is named `UTC`; explicit offsets stay unnamed.
    ///
    /// # Errors
    /// Returns the chrono parse error for malformed input.
    pub fn parse_rfc3339(s: &str) -> Result<Self, chrono::ParseError> {
        let instant = DateTime::parse_from_rfc3339(s)?;
        let zone = (s.ends_with('Z') || s.ends_with('z')).then(|| "UTC".to_string());
        Ok(Self { instant, zone })
    }

    #[must_use]
    pub fn instant(&self) -> &DateTime<FixedOffset> {
        &self.instant
    }

    #[must_use]
    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }
}

/// Long form: `YYYY-MM-DD HH:MM:SS[.fraction] ±HHMM ZONE`.
///
/// The fraction is printed only when non-zero, without trailing zeros. When the
/// zone abbreviation is unknown the numeric offset stands in for it.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.instant.format("%Y-%m-%d %H:%M:%S"))?;
        // leap seconds are encoded as nanos >= 1e9
        let nanos = self.instant.nanosecond() % 1_000_000_000;
        if nanos != 0 {
            let frac = format!("{nanos:09}");
            write!(f, ".{}", frac.trim_end_matches('0'))?;
        }
        let offset = self.instant.format("%z").to_string();
        match &self.zone {
            Some(zone) => write!(f, " {offset} {zone}"),
            None => write!(f, " {offset} {offset}"),
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self { instant: dt.fixed_offset(), zone: Some("UTC".to_string()) }
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self { instant: dt, zone: None }
    }
}

/// Naive values are taken to be UTC, which is what most drivers hand back.
impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Self::from(dt.and_utc())
    }
}

macro_rules! value_from {
    ($variant:ident: $($t:ty),+) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self { Value::$variant(v.into()) }
        })+
    };
}

value_from!(Int: i8, i16, i32, i64);
value_from!(UInt: u8, u16, u32, u64);
value_from!(Float: f64);
value_from!(Bool: bool);
value_from!(Text: String, &str);
value_from!(Bytes: Vec<u8>, &[u8]);
value_from!(Timestamp: Timestamp, DateTime<Utc>, DateTime<FixedOffset>, NaiveDateTime);

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
