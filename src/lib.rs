//! # tomlio
//!
//! A reader/writer for TOML v0.4.0 with a dynamic value model and Serde support.
//!
//! ## What is this?
//!
//! TOML is a human-editable configuration format. This library decodes TOML
//! text into a typed, nested value tree and encodes such a tree back into
//! canonical text, with a hand-written single-pass parser at its core.
//!
//! ## Key Features
//!
//! - **Dynamic value model**: [`TomlValue`] and [`TomlMap`] represent any
//!   document without needing matching Rust types
//! - **Serde Compatible**: works with existing types via
//!   `#[derive(Serialize, Deserialize)]`
//! - **Faithful scalars**: integers, floats and the three date-time
//!   granularities are told apart exactly as written
//! - **Precise errors**: every parse failure carries a 1-based line number
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! tomlio = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Reading and writing a value tree
//!
//! ```rust
//! use tomlio::{parse, write};
//!
//! let table = parse(r#"
//! title = "example"
//!
//! [server]
//! host = "localhost"
//! port = 8080
//! "#).unwrap();
//!
//! let server = table.get("server").and_then(|v| v.as_table()).unwrap();
//! assert_eq!(server.get("port").and_then(|v| v.as_integer()), Some(8080));
//!
//! // Re-emit canonical text; re-parsing it yields an equal tree
//! let text = write(&table).unwrap();
//! assert_eq!(parse(&text).unwrap(), table);
//! ```
//!
//! ### Serde derive
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use tomlio::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Config {
//!     name: String,
//!     port: u16,
//!     active: bool,
//! }
//!
//! let config = Config {
//!     name: "demo".to_string(),
//!     port: 8080,
//!     active: true,
//! };
//!
//! let toml_text = to_string(&config).unwrap();
//! let config_back: Config = from_str(&toml_text).unwrap();
//! assert_eq!(config, config_back);
//! ```
//!
//! ### Building values with the toml! macro
//!
//! ```rust
//! use tomlio::{toml, TomlValue};
//!
//! let data = toml!({
//!     "name" = "Alice",
//!     "age" = 30,
//!     "tags" = ["rust", "toml"]
//! });
//!
//! if let TomlValue::Table(table) = data {
//!     assert_eq!(table.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! ```
//!
//! ## Input Convention
//!
//! The parser expects `\n` line endings. [`parse_reader`] and [`from_reader`]
//! normalize `\r\n` and bare `\r` before parsing; if you hand `parse` a string
//! straight from a Windows file, normalize it first.
//!
//! ## Concurrency
//!
//! Every call owns a private cursor and result tree; no state is shared
//! between calls, so concurrent calls on independent inputs need no
//! coordination.
//!
//! ## Examples
//!
//! See the `demos/` directory for focused, runnable examples:
//!
//! - **`simple.rs`** - parse a config, read values, write it back
//! - **`dynamic_values.rs`** - build documents with `TomlValue` and `toml!`
//! - **`custom_options.rs`** - lenient bare keys and indentation control
//!
//! Run any example with: `cargo run --example <name>`

pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod spec;
pub mod value;

pub use de::{TomlReader, ValueDeserializer};
pub use error::{Error, Result};
pub use map::TomlMap;
pub use options::{BareKeys, TomlOptions};
pub use ser::{TomlValueSerializer, TomlWriter};
pub use value::{Datetime, TomlValue};

use serde::{de::DeserializeOwned, Serialize};
use std::io;

/// Parses a TOML document into its root table.
///
/// The input must use `\n` line endings (see the crate-level notes).
///
/// # Examples
///
/// ```rust
/// let table = tomlio::parse("x = 1_000").unwrap();
/// assert_eq!(table.get("x").and_then(|v| v.as_integer()), Some(1000));
/// ```
///
/// # Errors
///
/// Returns an error describing the first violation, tagged with its line
/// number. No partial tree is returned.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(text: &str) -> Result<TomlMap> {
    parse_with_options(text, TomlOptions::default())
}

/// Parses a TOML document with explicit options (e.g. lenient bare keys).
///
/// # Examples
///
/// ```rust
/// use tomlio::{parse_with_options, BareKeys, TomlOptions};
///
/// let options = TomlOptions::new().with_bare_keys(BareKeys::Lenient);
/// let table = parse_with_options("a.b = 1", options).unwrap();
/// assert_eq!(table.get("a.b").and_then(|v| v.as_integer()), Some(1));
/// ```
///
/// # Errors
///
/// Returns an error describing the first violation, tagged with its line
/// number.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(text: &str, options: TomlOptions) -> Result<TomlMap> {
    TomlReader::new(text, options).parse()
}

/// Parses a TOML document from an I/O stream.
///
/// Line endings are normalized (`\r\n` and bare `\r` become `\n`) before
/// parsing.
///
/// # Errors
///
/// Returns an error if reading fails, the bytes are not valid UTF-8, or the
/// text is not valid TOML.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_reader<R: io::Read>(mut reader: R) -> Result<TomlMap> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::io(&e.to_string()))?;
    parse(&normalize_newlines(&text))
}

/// Writes a table tree as canonical TOML text.
///
/// Re-parsing the output yields a tree equal to the input.
///
/// # Examples
///
/// ```rust
/// use tomlio::{parse, write};
///
/// let table = parse("x = 1\n[a]\ny = 2").unwrap();
/// let text = write(&table).unwrap();
/// assert_eq!(parse(&text).unwrap(), table);
/// ```
///
/// # Errors
///
/// Returns an error for values that cannot be represented in TOML text, such
/// as non-finite floats.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn write(table: &TomlMap) -> Result<String> {
    write_with_options(table, TomlOptions::default())
}

/// Writes a table tree as TOML text with explicit options (e.g. indentation).
///
/// # Errors
///
/// Returns an error for values that cannot be represented in TOML text.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn write_with_options(table: &TomlMap, options: TomlOptions) -> Result<String> {
    let mut writer = TomlWriter::new(options);
    writer.write_document(table)?;
    Ok(writer.into_inner())
}

/// Deserialize an instance of type `T` from a string of TOML text.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use tomlio::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i64, y: i64 }
///
/// let point: Point = from_str("x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid TOML or cannot be deserialized
/// to type `T`. Parse errors include line numbers.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let table = parse(s)?;
    from_value(TomlValue::Table(table))
}

/// Deserialize an instance of type `T` from bytes of TOML text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid TOML, or
/// cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from an I/O stream of TOML.
///
/// Line endings are normalized before parsing.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use std::io::Cursor;
/// use tomlio::from_reader;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i64, y: i64 }
///
/// let cursor = Cursor::new(b"x = 1\r\ny = 2\r\n");
/// let point: Point = from_reader(cursor).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid TOML, or the
/// data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let table = parse_reader(reader)?;
    from_value(TomlValue::Table(table))
}

/// Deserialize an instance of type `T` from an already-parsed value.
///
/// # Errors
///
/// Returns an error if the value cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: TomlValue) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// Serialize any `T: Serialize` to a TOML string.
///
/// The value must serialize to a table: TOML documents are tables at the top
/// level.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use tomlio::to_string;
///
/// #[derive(Serialize)]
/// struct Point { x: i64, y: i64 }
///
/// let toml_text = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert!(toml_text.contains("x = 1"));
/// ```
///
/// # Errors
///
/// Returns an error if the value is not a table at the top level, or contains
/// something TOML cannot represent (e.g. `None`).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, TomlOptions::default())
}

/// Serialize any `T: Serialize` to a TOML string with explicit options.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: TomlOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    match to_value(value)? {
        TomlValue::Table(table) => write_with_options(&table, options),
        other => Err(Error::unsupported_type(format!(
            "TOML documents are tables at the top level, found {}",
            other.type_name()
        ))),
    }
}

/// Convert any `T: Serialize` into a [`TomlValue`].
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use tomlio::to_value;
///
/// #[derive(Serialize)]
/// struct Point { x: i64, y: i64 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_table());
/// ```
///
/// # Errors
///
/// Returns an error if the value contains something TOML cannot represent.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<TomlValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(TomlValueSerializer)
}

/// Serialize any `T: Serialize` to a writer in TOML format.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Replaces `\r\n` sequences and bare `\r` characters with `\n`.
fn normalize_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i64,
        y: i64,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Service {
        name: String,
        port: u16,
        active: bool,
        tags: Vec<String>,
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_service() {
        let service = Service {
            name: "gateway".to_string(),
            port: 8080,
            active: true,
            tags: vec!["edge".to_string(), "http".to_string()],
        };

        let text = to_string(&service).unwrap();
        let service_back: Service = from_str(&text).unwrap();
        assert_eq!(service, service_back);
    }

    #[test]
    fn test_to_value() {
        let point = Point { x: 1, y: 2 };
        let value = to_value(&point).unwrap();

        match value {
            TomlValue::Table(table) => {
                assert_eq!(table.get("x"), Some(&TomlValue::Integer(1)));
                assert_eq!(table.get("y"), Some(&TomlValue::Integer(2)));
            }
            _ => panic!("Expected table"),
        }
    }

    #[test]
    fn test_top_level_must_be_a_table() {
        let numbers = vec![1, 2, 3];
        assert!(to_string(&numbers).is_err());
    }

    #[test]
    fn test_parse_reader_normalizes_line_endings() {
        let cursor = std::io::Cursor::new(b"a = 1\r\nb = 2\r".to_vec());
        let table = parse_reader(cursor).unwrap();
        assert_eq!(table.get("a").and_then(|v| v.as_integer()), Some(1));
        assert_eq!(table.get("b").and_then(|v| v.as_integer()), Some(2));
    }

    #[test]
    fn test_value_tree_roundtrip() {
        let table = parse(
            "title = \"demo\"\nratio = 0.5\n[owner]\nname = \"Tom\"\n[[port]]\nn = 1\n[[port]]\nn = 2\n",
        )
        .unwrap();
        let text = write(&table).unwrap();
        assert_eq!(parse(&text).unwrap(), table);
    }

    #[test]
    fn test_from_value() {
        let value = crate::toml!({ "x" = 3, "y" = 4 });
        let point: Point = from_value(value).unwrap();
        assert_eq!(point, Point { x: 3, y: 4 });
    }
}
