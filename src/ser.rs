//! TOML writing.
//!
//! This module provides [`TomlWriter`], which re-emits a [`TomlMap`] tree as
//! canonical TOML text, and [`TomlValueSerializer`], the serde bridge that
//! builds a [`TomlValue`] from any `T: Serialize` (used by
//! [`to_value`](crate::to_value) and [`to_string`](crate::to_string)).
//!
//! ## Output shape
//!
//! Each table is written in two passes so that its simple entries always
//! precede its sub-tables in the text:
//!
//! 1. every `key = value` entry whose value is a scalar or a plain array
//! 2. every nested table (as a `[a.b.c]` header) and every array of tables
//!    (as one `[[a.b.c]]` header per element), recursing depth-first
//!
//! Keys that contain any character outside `[A-Za-z0-9_-]` are written quoted.
//! Strings are always written double-quoted with full escaping, so any parsed
//! string (including multi-line ones) re-parses to the same value.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use tomlio::{parse, write};
//!
//! let table = parse("[server]\nport = 8080").unwrap();
//! let text = write(&table).unwrap();
//! assert!(text.contains("[server]"));
//! assert!(text.contains("port = 8080"));
//! ```

use crate::options::BareKeys;
use crate::{Error, Result, TomlMap, TomlOptions, TomlValue};
use serde::{ser, Serialize};

/// The TOML writer.
///
/// Walks a value tree once and appends canonical text to an internal buffer.
/// A writer is used for one document; nothing is shared between calls.
pub struct TomlWriter {
    output: String,
    options: TomlOptions,
    table_names: Vec<String>,
    // -1 keeps the first nesting level flush left
    indent_level: i32,
    line_breaks: u8,
}

impl TomlWriter {
    pub fn new(options: TomlOptions) -> Self {
        TomlWriter {
            output: String::with_capacity(256),
            options,
            table_names: Vec::new(),
            indent_level: -1,
            line_breaks: 0,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes a whole document from its root table.
    pub fn write_document(&mut self, table: &TomlMap) -> Result<()> {
        self.write_table_content(table)
    }

    fn write_table_content(&mut self, table: &TomlMap) -> Result<()> {
        self.write_entries(table, true)?;
        self.write_entries(table, false)
    }

    /// Writes the entries of one table.
    ///
    /// `simple_values` selects pass 1 (scalars and plain arrays) or pass 2
    /// (sub-tables and arrays of tables).
    fn write_entries(&mut self, table: &TomlMap, simple_values: bool) -> Result<()> {
        for (name, value) in table.iter() {
            match value {
                TomlValue::Table(sub) => {
                    if simple_values {
                        continue;
                    }
                    self.table_names.push(name.clone());
                    self.indent_level += 1;

                    self.indent();
                    self.push('[');
                    self.write_table_name();
                    self.push(']');
                    self.newline();
                    self.write_table_content(sub)?;

                    self.indent_level -= 1;
                    self.table_names.pop();
                }
                TomlValue::TableArray(elements) => {
                    if simple_values {
                        continue;
                    }
                    self.table_names.push(name.clone());
                    self.indent_level += 1;
                    for element in elements {
                        self.indent();
                        self.push_str("[[");
                        self.write_table_name();
                        self.push_str("]]");
                        self.newline();
                        self.write_table_content(element)?;
                    }
                    self.indent_level -= 1;
                    self.table_names.pop();
                }
                _ => {
                    if !simple_values {
                        continue;
                    }
                    self.indent();
                    self.write_key(name);
                    self.push_str(" = ");
                    self.write_value(value)?;
                    self.newline();
                }
            }
            self.newline();
        }
        self.newline();
        Ok(())
    }

    /// Writes the dotted header path built from the current nesting stack.
    fn write_table_name(&mut self) {
        let path = self
            .table_names
            .iter()
            .map(|part| display_key(part))
            .collect::<Vec<_>>()
            .join(".");
        self.push_str(&path);
    }

    /// Writes a value in inline position (after `key = ` or inside an array).
    fn write_value(&mut self, value: &TomlValue) -> Result<()> {
        match value {
            TomlValue::Bool(b) => self.push_str(if *b { "true" } else { "false" }),
            TomlValue::Integer(i) => self.push_str(&i.to_string()),
            TomlValue::Float(f) => {
                if !f.is_finite() {
                    return Err(Error::unsupported_type(
                        "non-finite floats cannot be written as TOML",
                    ));
                }
                self.push_str(&display_float(*f));
            }
            TomlValue::Datetime(dt) => self.push_str(&dt.to_string()),
            TomlValue::String(s) => self.push_str(&escape_basic_string(s)),
            TomlValue::Array(elements) => {
                self.push('[');
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.push_str(", ");
                    }
                    self.write_value(element)?;
                }
                self.push(']');
            }
            TomlValue::Table(_) | TomlValue::TableArray(_) => {
                return Err(Error::unsupported_type(
                    "a table cannot be written in an inline value position",
                ));
            }
        }
        Ok(())
    }

    fn write_key(&mut self, key: &str) {
        let quoted = display_key(key);
        self.push_str(&quoted);
    }

    fn indent(&mut self) {
        let units = self.indent_level.max(0) as usize * self.options.indent;
        let c = self.options.indent_char();
        for _ in 0..units {
            self.push(c);
        }
    }

    /// Emits a line break, never producing more than one blank line in a row.
    fn newline(&mut self) {
        if self.line_breaks <= 1 {
            self.output.push('\n');
            self.line_breaks += 1;
        }
    }

    fn push(&mut self, c: char) {
        self.output.push(c);
        self.line_breaks = 0;
    }

    fn push_str(&mut self, s: &str) {
        self.output.push_str(s);
        self.line_breaks = 0;
    }
}

/// Returns `true` if every character of `key` is legal in a strict bare key.
pub(crate) fn is_bare_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| BareKeys::Strict.allows(c))
}

/// Renders a key the way the writer emits it: bare when possible, quoted and
/// escaped otherwise.
pub(crate) fn display_key(key: &str) -> String {
    if is_bare_key(key) {
        key.to_string()
    } else {
        escape_basic_string(key)
    }
}

/// Renders a float so that it re-parses as a float: a `.0` suffix is added
/// when the shortest representation looks like an integer.
pub(crate) fn display_float(f: f64) -> String {
    let mut s = f.to_string();
    if f.is_finite() && !s.contains('.') && !s.contains('e') && !s.contains('E') {
        s.push_str(".0");
    }
    s
}

/// Escapes a string as a double-quoted basic string, quotes included.
///
/// Named escapes cover the usual control characters; any other character below
/// U+0020 (and DEL) becomes a `\u` escape.
pub(crate) fn escape_basic_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\u{0008}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{000C}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if (c as u32) < 0x20 || c == '\u{7F}' => {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

// === Serde bridge: build a TomlValue from any Serialize type ===

pub(crate) fn to_toml_value<T>(value: &T) -> Result<TomlValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(TomlValueSerializer)
}

/// A serde `Serializer` whose output is a [`TomlValue`].
///
/// Values TOML cannot represent (`None`, units, non-string map keys,
/// heterogeneous sequences) are rejected with an error rather than silently
/// altered.
pub struct TomlValueSerializer;

pub struct SerializeVec {
    vec: Vec<TomlValue>,
}

pub struct SerializeTable {
    map: TomlMap,
    current_key: Option<String>,
}

impl ser::Serializer for TomlValueSerializer {
    type Ok = TomlValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeTable;
    type SerializeStruct = SerializeTable;
    type SerializeStructVariant = SerializeTable;

    fn serialize_bool(self, v: bool) -> Result<TomlValue> {
        Ok(TomlValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<TomlValue> {
        Ok(TomlValue::Integer(v as i64))
    }

    fn serialize_i16(self, v: i16) -> Result<TomlValue> {
        Ok(TomlValue::Integer(v as i64))
    }

    fn serialize_i32(self, v: i32) -> Result<TomlValue> {
        Ok(TomlValue::Integer(v as i64))
    }

    fn serialize_i64(self, v: i64) -> Result<TomlValue> {
        Ok(TomlValue::Integer(v))
    }

    fn serialize_u8(self, v: u8) -> Result<TomlValue> {
        Ok(TomlValue::Integer(v as i64))
    }

    fn serialize_u16(self, v: u16) -> Result<TomlValue> {
        Ok(TomlValue::Integer(v as i64))
    }

    fn serialize_u32(self, v: u32) -> Result<TomlValue> {
        Ok(TomlValue::Integer(v as i64))
    }

    fn serialize_u64(self, v: u64) -> Result<TomlValue> {
        if v <= i64::MAX as u64 {
            Ok(TomlValue::Integer(v as i64))
        } else {
            Err(Error::unsupported_type(
                "u64 value does not fit a TOML integer",
            ))
        }
    }

    fn serialize_f32(self, v: f32) -> Result<TomlValue> {
        Ok(TomlValue::Float(v as f64))
    }

    fn serialize_f64(self, v: f64) -> Result<TomlValue> {
        Ok(TomlValue::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<TomlValue> {
        Ok(TomlValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<TomlValue> {
        Ok(TomlValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<TomlValue> {
        let vec = v.iter().map(|&b| TomlValue::Integer(b as i64)).collect();
        Ok(TomlValue::Array(vec))
    }

    fn serialize_none(self) -> Result<TomlValue> {
        Err(Error::unsupported_type("TOML has no null value (None)"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<TomlValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<TomlValue> {
        Err(Error::unsupported_type("TOML has no null value (unit)"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<TomlValue> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<TomlValue> {
        Ok(TomlValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<TomlValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<TomlValue>
    where
        T: ?Sized + Serialize,
    {
        let mut map = TomlMap::with_capacity(1);
        map.insert(variant.to_string(), to_toml_value(value)?);
        Ok(TomlValue::Table(map))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new())
    }

    fn serialize_tuple(self, _len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new())
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeVec> {
        Err(Error::unsupported_type("tuple variants"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeTable> {
        Ok(SerializeTable::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeTable> {
        Ok(SerializeTable::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeTable> {
        Err(Error::unsupported_type("struct variants"))
    }
}

impl SerializeVec {
    fn new() -> Self {
        SerializeVec { vec: Vec::new() }
    }

    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let value = to_toml_value(value)?;
        if let Some(first) = self.vec.first() {
            if !first.same_variant(&value) {
                return Err(Error::unsupported_type(format!(
                    "mixed array: expected {}, found {}",
                    first.type_name(),
                    value.type_name()
                )));
            }
        }
        self.vec.push(value);
        Ok(())
    }

    fn finish(self) -> TomlValue {
        if !self.vec.is_empty() && self.vec.iter().all(TomlValue::is_table) {
            let mut tables = Vec::with_capacity(self.vec.len());
            for value in self.vec {
                if let TomlValue::Table(t) = value {
                    tables.push(t);
                }
            }
            return TomlValue::TableArray(tables);
        }
        TomlValue::Array(self.vec)
    }
}

impl SerializeTable {
    fn new() -> Self {
        SerializeTable {
            map: TomlMap::new(),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = TomlValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<TomlValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = TomlValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<TomlValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = TomlValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<TomlValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = TomlValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<TomlValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeTable {
    type Ok = TomlValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_toml_value(key)? {
            TomlValue::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(Error::custom("map keys must be strings")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_toml_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<TomlValue> {
        Ok(TomlValue::Table(self.map))
    }
}

impl ser::SerializeStruct for SerializeTable {
    type Ok = TomlValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_toml_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<TomlValue> {
        Ok(TomlValue::Table(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeTable {
    type Ok = TomlValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_toml_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<TomlValue> {
        Ok(TomlValue::Table(self.map))
    }
}
