//! Shared identifier and timestamp types.
//!
//! Upstream subsystems disagree on identifier types (numeric keys in one,
//! string keys in another) and occasionally ship unparseable dates, so both
//! are modelled explicitly instead of being coerced at the edges.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// All timestamps are UTC.
pub type Timestamp = DateTime<Utc>;

// ---------------------------------------------------------------------------
// RecordId
// ---------------------------------------------------------------------------

/// Opaque record identifier, either numeric or textual.
///
/// `==` is strict: `Num(5)` and `Text("5")` are different identifiers.
/// Use [`RecordId::loose_eq`] where numeric and string forms of the same key
/// must be treated as equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordId {
    Num(i64),
    Text(String),
}

impl RecordId {
    /// Compare the string forms of two identifiers.
    pub fn loose_eq(&self, other: &RecordId) -> bool {
        match (self, other) {
            (Self::Num(a), Self::Num(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Num(n), Self::Text(s)) | (Self::Text(s), Self::Num(n)) => *s == n.to_string(),
        }
    }
}

/// Loose comparison of an optional identifier against a known one.
pub fn id_matches(candidate: Option<&RecordId>, id: &RecordId) -> bool {
    candidate.is_some_and(|c| c.loose_eq(id))
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self::Num(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Num(n) => serializer.serialize_i64(*n),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RecordIdVisitor)
    }
}

struct RecordIdVisitor;

impl<'de> Visitor<'de> for RecordIdVisitor {
    type Value = RecordId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or string identifier")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RecordId, E> {
        Ok(RecordId::Num(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RecordId, E> {
        Ok(i64::try_from(v)
            .map(RecordId::Num)
            .unwrap_or_else(|_| RecordId::Text(v.to_string())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RecordId, E> {
        if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
            Ok(RecordId::Num(v as i64))
        } else {
            Err(E::custom(format!("non-integral identifier {v}")))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RecordId, E> {
        Ok(RecordId::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RecordId, E> {
        Ok(RecordId::Text(v))
    }
}

// ---------------------------------------------------------------------------
// RecordTime
// ---------------------------------------------------------------------------

/// Accepted naive datetime layouts, tried in order after RFC 3339.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Accepted date-only layout; interpreted as midnight UTC.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A timestamp as delivered by the data-access layer.
///
/// Unparseable values are kept verbatim so that callers can decide how to
/// degrade instead of failing the whole snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordTime {
    Valid(Timestamp),
    Malformed(String),
}

impl RecordTime {
    /// Parse a raw timestamp string.
    ///
    /// Tries RFC 3339, then naive `YYYY-MM-DDTHH:MM:SS[.f]` and
    /// `YYYY-MM-DD HH:MM:SS[.f]` (taken as UTC), then a bare `YYYY-MM-DD`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::Valid(dt.with_timezone(&Utc));
        }

        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Self::Valid(Utc.from_utc_datetime(&naive));
            }
        }

        if let Some(naive) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Self::Valid(Utc.from_utc_datetime(&naive));
        }

        Self::Malformed(raw.to_string())
    }

    /// The parsed timestamp, or `None` if the raw value was malformed.
    pub fn valid(&self) -> Option<Timestamp> {
        match self {
            Self::Valid(ts) => Some(*ts),
            Self::Malformed(_) => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    /// The raw text form, used in diagnostics.
    pub fn raw(&self) -> String {
        match self {
            Self::Valid(ts) => ts.to_rfc3339(),
            Self::Malformed(raw) => raw.clone(),
        }
    }
}

impl From<Timestamp> for RecordTime {
    fn from(ts: Timestamp) -> Self {
        Self::Valid(ts)
    }
}

impl Serialize for RecordTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw())
    }
}

impl<'de> Deserialize<'de> for RecordTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
