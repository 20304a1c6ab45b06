//! Dynamic value representation for TOML data.
//!
//! This module provides the [`TomlValue`] enum which represents any valid TOML
//! value, and the [`Datetime`] type covering the three date-time granularities
//! of the format.
//!
//! ## Core Types
//!
//! - [`TomlValue`]: a closed enum over every decodable value (boolean, integer,
//!   float, date-time, string, array, table, array of tables)
//! - [`Datetime`]: a date, a local date-time, or an offset date-time,
//!   distinguished by which components were present in the source text
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use tomlio::TomlValue;
//!
//! // From primitives
//! let boolean = TomlValue::from(true);
//! let number = TomlValue::from(42);
//! let text = TomlValue::from("hello");
//!
//! // Using the toml! macro
//! use tomlio::toml;
//! let table = toml!({
//!     "name" = "Alice",
//!     "age" = 30
//! });
//! ```
//!
//! ### Type Checking
//!
//! ```rust
//! use tomlio::TomlValue;
//!
//! let value = TomlValue::from(42);
//! assert!(value.is_integer());
//! assert!(!value.is_str());
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use tomlio::TomlValue;
//! use std::convert::TryFrom;
//!
//! let value = TomlValue::from(42);
//! let num: i64 = i64::try_from(value).unwrap();
//! assert_eq!(num, 42);
//! ```

use crate::TomlMap;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed representation of any valid TOML value.
///
/// This enum can represent everything the reader decodes. It is particularly
/// useful when:
///
/// - The structure isn't known at compile time
/// - You need to manipulate TOML data generically
/// - Building TOML documents programmatically
///
/// Arrays are homogeneous: the reader rejects an array whose elements are not
/// all of the same variant, and the writer relies on that invariant.
///
/// # Examples
///
/// ```rust
/// use tomlio::TomlValue;
///
/// let num = TomlValue::Integer(42);
/// let text = TomlValue::String("hello".to_string());
///
/// assert!(num.is_integer());
/// assert!(text.is_str());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum TomlValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Datetime(Datetime),
    String(String),
    Array(Vec<TomlValue>),
    Table(TomlMap),
    TableArray(Vec<TomlMap>),
}

/// A TOML date-time value.
///
/// TOML distinguishes three granularities by which components appear in the
/// text: a bare date, a date-time without offset, and a date-time with a UTC
/// offset. The variant decoded from `1979-05-27` stays a bare date; it is never
/// widened to midnight-UTC.
///
/// # Examples
///
/// ```rust
/// use tomlio::Datetime;
///
/// let date = Datetime::parse("1979-05-27").unwrap();
/// assert!(matches!(date, Datetime::Date(_)));
/// assert_eq!(date.to_string(), "1979-05-27");
///
/// let zoned = Datetime::parse("1979-05-27T07:32:00Z").unwrap();
/// assert!(matches!(zoned, Datetime::Offset(_)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Datetime {
    /// A date without a time-of-day, e.g. `1979-05-27`.
    Date(NaiveDate),
    /// A date and time without offset, e.g. `1979-05-27T07:32:00`.
    Local(NaiveDateTime),
    /// A date and time with a UTC offset, e.g. `1979-05-27T07:32:00Z`.
    Offset(DateTime<FixedOffset>),
}

impl Datetime {
    /// Parses date-time text, trying the richest granularity first.
    ///
    /// Returns `None` if the text matches none of the three grammars.
    #[must_use]
    pub fn parse(text: &str) -> Option<Datetime> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(Datetime::Offset(dt));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(Datetime::Local(dt));
        }
        if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return Some(Datetime::Date(d));
        }
        None
    }
}

impl fmt::Display for Datetime {
    /// Formats the value exactly as the reader accepts it. A bare date prints
    /// without any `T` suffix.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datetime::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Datetime::Local(dt) => {
                write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S"))?;
                let nanos = dt.nanosecond();
                if nanos > 0 {
                    let frac = format!("{:09}", nanos);
                    write!(f, ".{}", frac.trim_end_matches('0'))?;
                }
                Ok(())
            }
            Datetime::Offset(dt) => {
                write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}

impl TomlValue {
    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, TomlValue::Bool(_))
    }

    /// Returns `true` if the value is an integer.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, TomlValue::Integer(_))
    }

    /// Returns `true` if the value is a float.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, TomlValue::Float(_))
    }

    /// Returns `true` if the value is a date-time of any granularity.
    #[inline]
    #[must_use]
    pub const fn is_datetime(&self) -> bool {
        matches!(self, TomlValue::Datetime(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, TomlValue::String(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, TomlValue::Array(_))
    }

    /// Returns `true` if the value is a table.
    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, TomlValue::Table(_))
    }

    /// Returns `true` if the value is an array of tables.
    #[inline]
    #[must_use]
    pub const fn is_table_array(&self) -> bool {
        matches!(self, TomlValue::TableArray(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlio::TomlValue;
    ///
    /// assert_eq!(TomlValue::Bool(true).as_bool(), Some(true));
    /// assert_eq!(TomlValue::from(42).as_bool(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TomlValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is an integer, returns it. Otherwise returns `None`.
    ///
    /// Floats are not coerced: `10.0` is not an integer.
    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            TomlValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a float, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            TomlValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is a date-time, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> Option<&Datetime> {
        match self {
            TomlValue::Datetime(dt) => Some(dt),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlio::TomlValue;
    ///
    /// assert_eq!(TomlValue::from("hello").as_str(), Some("hello"));
    /// assert_eq!(TomlValue::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TomlValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<TomlValue>> {
        match self {
            TomlValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is a table, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&TomlMap> {
        match self {
            TomlValue::Table(table) => Some(table),
            _ => None,
        }
    }

    /// If the value is an array of tables, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_table_array(&self) -> Option<&Vec<TomlMap>> {
        match self {
            TomlValue::TableArray(tables) => Some(tables),
            _ => None,
        }
    }

    /// Returns the name of this value's type, as used in error messages and
    /// the homogeneous-array check.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            TomlValue::Bool(_) => "boolean",
            TomlValue::Integer(_) => "integer",
            TomlValue::Float(_) => "float",
            TomlValue::Datetime(_) => "date-time",
            TomlValue::String(_) => "string",
            TomlValue::Array(_) => "array",
            TomlValue::Table(_) => "table",
            TomlValue::TableArray(_) => "array of tables",
        }
    }

    /// Returns `true` if `other` has the same variant as `self`.
    ///
    /// Date-time granularities all count as one variant.
    #[must_use]
    pub fn same_variant(&self, other: &TomlValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for TomlValue {
    /// Renders the value with inline syntax. Strings print quoted and escaped;
    /// tables print as inline tables.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TomlValue::Bool(b) => write!(f, "{}", b),
            TomlValue::Integer(i) => write!(f, "{}", i),
            TomlValue::Float(v) => write!(f, "{}", crate::ser::display_float(*v)),
            TomlValue::Datetime(dt) => write!(f, "{}", dt),
            TomlValue::String(s) => write!(f, "{}", crate::ser::escape_basic_string(s)),
            TomlValue::Array(arr) => {
                write!(f, "[")?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            TomlValue::Table(table) => write!(f, "{}", table),
            TomlValue::TableArray(tables) => {
                write!(f, "[")?;
                for (i, t) in tables.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", t)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl Serialize for TomlValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TomlValue::Bool(b) => serializer.serialize_bool(*b),
            TomlValue::Integer(i) => serializer.serialize_i64(*i),
            TomlValue::Float(v) => serializer.serialize_f64(*v),
            TomlValue::Datetime(dt) => serializer.serialize_str(&dt.to_string()),
            TomlValue::String(s) => serializer.serialize_str(s),
            TomlValue::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            TomlValue::Table(table) => table.serialize(serializer),
            TomlValue::TableArray(tables) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(tables.len()))?;
                for table in tables {
                    seq.serialize_element(table)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for TomlValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct TomlValueVisitor;

        impl<'de> Visitor<'de> for TomlValueVisitor {
            type Value = TomlValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid TOML value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E> {
                Ok(TomlValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E> {
                Ok(TomlValue::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value <= i64::MAX as u64 {
                    Ok(TomlValue::Integer(value as i64))
                } else {
                    Err(E::custom("integer value does not fit a TOML integer"))
                }
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E> {
                Ok(TomlValue::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E> {
                Ok(TomlValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E> {
                Ok(TomlValue::String(value))
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec: Vec<TomlValue> = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                // arrays whose elements are all tables become an array of
                // tables, like the reader produces
                if !vec.is_empty() && vec.iter().all(TomlValue::is_table) {
                    let mut tables = Vec::with_capacity(vec.len());
                    for v in vec {
                        if let TomlValue::Table(t) = v {
                            tables.push(t);
                        }
                    }
                    return Ok(TomlValue::TableArray(tables));
                }
                Ok(TomlValue::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = TomlMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(TomlValue::Table(values))
            }
        }

        deserializer.deserialize_any(TomlValueVisitor)
    }
}

// TryFrom implementations for extracting values from TomlValue
impl TryFrom<TomlValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: TomlValue) -> crate::Result<Self> {
        match value {
            TomlValue::Integer(i) => Ok(i),
            _ => Err(crate::Error::custom(format!(
                "expected integer, found {}",
                value.type_name()
            ))),
        }
    }
}

impl TryFrom<TomlValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: TomlValue) -> crate::Result<Self> {
        match value {
            TomlValue::Integer(i) => Ok(i as f64),
            TomlValue::Float(v) => Ok(v),
            _ => Err(crate::Error::custom(format!(
                "expected number, found {}",
                value.type_name()
            ))),
        }
    }
}

impl TryFrom<TomlValue> for bool {
    type Error = crate::Error;

    fn try_from(value: TomlValue) -> crate::Result<Self> {
        match value {
            TomlValue::Bool(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected boolean, found {}",
                value.type_name()
            ))),
        }
    }
}

impl TryFrom<TomlValue> for String {
    type Error = crate::Error;

    fn try_from(value: TomlValue) -> crate::Result<Self> {
        match value {
            TomlValue::String(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {}",
                value.type_name()
            ))),
        }
    }
}

// From implementations for creating TomlValue from primitives
impl From<bool> for TomlValue {
    fn from(value: bool) -> Self {
        TomlValue::Bool(value)
    }
}

impl From<i8> for TomlValue {
    fn from(value: i8) -> Self {
        TomlValue::Integer(value as i64)
    }
}

impl From<i16> for TomlValue {
    fn from(value: i16) -> Self {
        TomlValue::Integer(value as i64)
    }
}

impl From<i32> for TomlValue {
    fn from(value: i32) -> Self {
        TomlValue::Integer(value as i64)
    }
}

impl From<i64> for TomlValue {
    fn from(value: i64) -> Self {
        TomlValue::Integer(value)
    }
}

impl From<u8> for TomlValue {
    fn from(value: u8) -> Self {
        TomlValue::Integer(value as i64)
    }
}

impl From<u16> for TomlValue {
    fn from(value: u16) -> Self {
        TomlValue::Integer(value as i64)
    }
}

impl From<u32> for TomlValue {
    fn from(value: u32) -> Self {
        TomlValue::Integer(value as i64)
    }
}

impl From<f32> for TomlValue {
    fn from(value: f32) -> Self {
        TomlValue::Float(value as f64)
    }
}

impl From<f64> for TomlValue {
    fn from(value: f64) -> Self {
        TomlValue::Float(value)
    }
}

impl From<String> for TomlValue {
    fn from(value: String) -> Self {
        TomlValue::String(value)
    }
}

impl From<&str> for TomlValue {
    fn from(value: &str) -> Self {
        TomlValue::String(value.to_string())
    }
}

impl From<Datetime> for TomlValue {
    fn from(value: Datetime) -> Self {
        TomlValue::Datetime(value)
    }
}

impl From<NaiveDate> for TomlValue {
    fn from(value: NaiveDate) -> Self {
        TomlValue::Datetime(Datetime::Date(value))
    }
}

impl From<NaiveDateTime> for TomlValue {
    fn from(value: NaiveDateTime) -> Self {
        TomlValue::Datetime(Datetime::Local(value))
    }
}

impl From<DateTime<FixedOffset>> for TomlValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        TomlValue::Datetime(Datetime::Offset(value))
    }
}

impl From<Vec<TomlValue>> for TomlValue {
    fn from(value: Vec<TomlValue>) -> Self {
        TomlValue::Array(value)
    }
}

impl From<TomlMap> for TomlValue {
    fn from(value: TomlMap) -> Self {
        TomlValue::Table(value)
    }
}

impl From<Vec<TomlMap>> for TomlValue {
    fn from(value: Vec<TomlMap>) -> Self {
        TomlValue::TableArray(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_tryfrom_i64() {
        let value = TomlValue::Integer(42);
        let result: i64 = TryFrom::try_from(value).unwrap();
        assert_eq!(result, 42);

        let value = TomlValue::String("test".to_string());
        assert!(i64::try_from(value).is_err());
    }

    #[test]
    fn test_tryfrom_f64() {
        let value = TomlValue::Float(3.5);
        let result: f64 = TryFrom::try_from(value).unwrap();
        assert_eq!(result, 3.5);

        let value = TomlValue::Integer(42);
        let result: f64 = TryFrom::try_from(value).unwrap();
        assert_eq!(result, 42.0);
    }

    #[test]
    fn test_tryfrom_bool() {
        let value = TomlValue::Bool(true);
        let result: bool = TryFrom::try_from(value).unwrap();
        assert!(result);

        let value = TomlValue::Integer(1);
        assert!(bool::try_from(value).is_err());
    }

    #[test]
    fn test_tryfrom_string() {
        let value = TomlValue::String("hello".to_string());
        let result: String = TryFrom::try_from(value).unwrap();
        assert_eq!(result, "hello");

        let value = TomlValue::Integer(42);
        assert!(String::try_from(value).is_err());
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(TomlValue::from(true), TomlValue::Bool(true));
        assert_eq!(TomlValue::from(42i32), TomlValue::Integer(42));
        assert_eq!(TomlValue::from(42i64), TomlValue::Integer(42));
        assert_eq!(TomlValue::from(3.5f64), TomlValue::Float(3.5));
        assert_eq!(TomlValue::from("test"), TomlValue::String("test".to_string()));
        assert_eq!(
            TomlValue::from("test".to_string()),
            TomlValue::String("test".to_string())
        );
    }

    #[test]
    fn test_from_collections() {
        let vec = vec![TomlValue::from(1i32), TomlValue::from(2i32)];
        let value = TomlValue::from(vec.clone());
        assert_eq!(value, TomlValue::Array(vec));

        let mut map = TomlMap::new();
        map.insert("key".to_string(), TomlValue::from(42i32));
        let value = TomlValue::from(map.clone());
        assert_eq!(value, TomlValue::Table(map));
    }

    #[test]
    fn test_datetime_parse_granularities() {
        assert!(matches!(
            Datetime::parse("1979-05-27"),
            Some(Datetime::Date(_))
        ));
        assert!(matches!(
            Datetime::parse("1979-05-27T07:32:00"),
            Some(Datetime::Local(_))
        ));
        assert!(matches!(
            Datetime::parse("1979-05-27T07:32:00Z"),
            Some(Datetime::Offset(_))
        ));
        assert!(matches!(
            Datetime::parse("1979-05-27T00:32:00-07:00"),
            Some(Datetime::Offset(_))
        ));
        assert_eq!(Datetime::parse("not a date"), None);
        assert_eq!(Datetime::parse("1979-13-40"), None);
    }

    #[test]
    fn test_datetime_display_no_trailing_t() {
        let date = Datetime::parse("1979-05-27").unwrap();
        assert_eq!(date.to_string(), "1979-05-27");

        let local = Datetime::parse("1979-05-27T07:32:00").unwrap();
        assert_eq!(local.to_string(), "1979-05-27T07:32:00");

        let frac = Datetime::parse("1979-05-27T07:32:00.5").unwrap();
        assert_eq!(frac.to_string(), "1979-05-27T07:32:00.5");
    }

    #[test]
    fn test_datetime_display_roundtrip() {
        for text in [
            "1979-05-27",
            "1979-05-27T07:32:00",
            "1979-05-27T07:32:00.25",
            "1979-05-27T07:32:00Z",
            "1979-05-27T00:32:00-07:00",
        ] {
            let dt = Datetime::parse(text).unwrap();
            let again = Datetime::parse(&dt.to_string()).unwrap();
            assert_eq!(dt, again, "{} did not survive display", text);
        }
    }

    #[test]
    fn test_type_name_and_same_variant() {
        assert_eq!(TomlValue::Integer(1).type_name(), "integer");
        assert_eq!(TomlValue::Table(TomlMap::new()).type_name(), "table");
        assert!(TomlValue::Integer(1).same_variant(&TomlValue::Integer(9)));
        assert!(!TomlValue::Integer(1).same_variant(&TomlValue::Float(1.0)));

        let date = TomlValue::from(Datetime::parse("1979-05-27").unwrap());
        let zoned = TomlValue::from(Datetime::parse("1979-05-27T07:32:00Z").unwrap());
        assert!(date.same_variant(&zoned));
    }

    #[test]
    fn test_display_inline() {
        assert_eq!(TomlValue::Bool(true).to_string(), "true");
        assert_eq!(TomlValue::Float(10.0).to_string(), "10.0");
        assert_eq!(
            TomlValue::String("a\tb".to_string()).to_string(),
            "\"a\\tb\""
        );
        assert_eq!(
            TomlValue::Array(vec![TomlValue::Integer(1), TomlValue::Integer(2)]).to_string(),
            "[1, 2]"
        );
    }
}
