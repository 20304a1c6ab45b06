//! TOML parsing.
//!
//! This module provides [`TomlReader`], the hand-written recursive-descent
//! parser that turns TOML text into a [`TomlMap`] tree, and the serde bridge
//! ([`ValueDeserializer`]) that drives `Deserialize` implementations from a
//! parsed tree.
//!
//! ## Overview
//!
//! - **Single-pass parsing**: one monotonically advancing cursor over the whole
//!   input, with bounded lookahead (three characters, for multi-line string
//!   delimiters)
//! - **Scalar disambiguation**: integers, floats and date-times are told apart
//!   during one forward scan, not by trial re-parsing
//! - **Fail fast**: the first violation aborts the parse with a line-tagged
//!   error; no partial tree is ever returned
//!
//! The reader expects its input to use `\n` line endings. The stream entry
//! points in the crate root normalize `\r\n` and bare `\r` before parsing;
//! stray carriage returns in string input are treated as insignificant
//! whitespace.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use tomlio::parse;
//!
//! let table = parse("answer = 42").unwrap();
//! assert_eq!(table.get("answer").and_then(|v| v.as_integer()), Some(42));
//! ```

use crate::options::{BareKeys, TomlOptions};
use crate::{Error, Result, TomlMap, TomlValue};
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// The TOML reader.
///
/// Owns a private cursor over one in-memory text buffer. A reader is used for
/// exactly one [`parse`](TomlReader::parse) call; nothing is shared between
/// calls or threads.
pub struct TomlReader<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    col: usize,
    bare_keys: BareKeys,
}

impl<'a> TomlReader<'a> {
    pub fn new(input: &'a str, options: TomlOptions) -> Self {
        TomlReader {
            input,
            pos: 0,
            line: 1,
            col: 1,
            bare_keys: options.bare_keys,
        }
    }

    /// Parses the whole input into a table tree.
    ///
    /// Reads the root table content, then repeats: read one `[header]` or
    /// `[[header]]`, read the table content that follows it, and attach that
    /// content to the tree at the header's dotted path.
    pub fn parse(mut self) -> Result<TomlMap> {
        let mut root = self.read_table_content()?;
        loop {
            self.skip_insignificant(true);
            match self.peek_char() {
                None => break,
                Some('[') => {
                    self.next_char();
                    self.read_header_into(&mut root)?;
                }
                // read_table_content only stops at '[' or end of input
                Some(c) => {
                    return Err(Error::syntax(
                        self.line,
                        self.col,
                        format!("unexpected character {:?} at top level", c),
                    ))
                }
            }
        }
        Ok(root)
    }

    // === Cursor primitives ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Non-consuming lookahead of the n-th next character (0 = the next one).
    fn peek_at(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.input[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    /// Skips spaces and tabs on the current line.
    fn skip_ws_same_line(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == ' ' || c == '\t' || c == '\r' {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Skips whitespace, newlines and (when enabled) whole-line `#` comments.
    fn skip_insignificant(&mut self, skip_comments: bool) {
        while let Some(c) = self.peek_char() {
            match c {
                ' ' | '\t' | '\r' | '\n' => {
                    self.next_char();
                }
                '#' if skip_comments => self.skip_comment(),
                _ => break,
            }
        }
    }

    /// Consumes a comment up to (but not including) the next line feed.
    fn skip_comment(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.next_char();
        }
    }

    fn err_syntax(&self, msg: impl Into<String>) -> Error {
        Error::syntax(self.line, self.col, msg)
    }

    fn err_eof(&self, expected: &str) -> Error {
        Error::unexpected_eof(self.line, expected)
    }

    // === Structural parsing ===

    /// Reads the content of a table: `key = value` entries, comments and blank
    /// lines. Stops without consuming at the `[` of the next header, or at the
    /// end of the input.
    fn read_table_content(&mut self) -> Result<TomlMap> {
        let mut table = TomlMap::new();
        loop {
            self.skip_insignificant(true);
            match self.peek_char() {
                None | Some('[') => return Ok(table),
                _ => {}
            }

            let key_line = self.line;
            let key = self.read_key()?;

            self.skip_ws_same_line();
            match self.peek_char() {
                Some('=') => {
                    self.next_char();
                }
                Some(c) => {
                    return Err(self.err_syntax(format!(
                        "expected '=' after key '{}', found {:?}",
                        key, c
                    )))
                }
                None => return Err(self.err_eof(&format!("'=' after key '{}'", key))),
            }

            self.skip_ws_same_line();
            match self.peek_char() {
                None => return Err(self.err_eof("a value after '='")),
                Some('\n') => return Err(self.err_syntax("missing value after '='")),
                _ => {}
            }

            let value = self.read_value()?;

            // the rest of the line must be a comment or nothing
            self.skip_ws_same_line();
            match self.peek_char() {
                None => {}
                Some('\n') => {
                    self.next_char();
                }
                Some('#') => self.skip_comment(),
                Some(c) => {
                    return Err(self.err_syntax(format!(
                        "unexpected character {:?} after value; expected a comment or a line break",
                        c
                    )))
                }
            }

            if table.contains_key(&key) {
                return Err(Error::duplicate_key(key_line, key));
            }
            table.insert(key, value);
        }
    }

    /// Reads one key: bare, or a single-line quoted string.
    fn read_key(&mut self) -> Result<String> {
        match self.peek_char() {
            Some('"') => {
                if self.peek_at(1) == Some('"') && self.peek_at(2) == Some('"') {
                    return Err(self.err_syntax("multi-line strings cannot be used as keys"));
                }
                self.next_char();
                self.read_basic_string()
            }
            Some('\'') => {
                if self.peek_at(1) == Some('\'') && self.peek_at(2) == Some('\'') {
                    return Err(self.err_syntax("multi-line strings cannot be used as keys"));
                }
                self.next_char();
                self.read_literal_string()
            }
            _ => self.read_bare_key(),
        }
    }

    /// Reads an unquoted key, validating every character against the active
    /// strictness mode.
    fn read_bare_key(&mut self) -> Result<String> {
        let mut key = String::new();
        while let Some(c) = self.peek_char() {
            match c {
                ' ' | '\t' | '\r' | '=' | '\n' => break,
                _ => {
                    if !self.bare_keys.allows(c) {
                        return Err(
                            self.err_syntax(format!("forbidden character {:?} in a bare key", c))
                        );
                    }
                    key.push(c);
                    self.next_char();
                }
            }
        }
        if key.is_empty() {
            return Err(self.err_syntax("expected a key"));
        }
        Ok(key)
    }

    /// Reads one `[name]` or `[[name]]` header (the first `[` is already
    /// consumed), the table content below it, and attaches that content to the
    /// tree at the header's dotted path.
    fn read_header_into(&mut self, root: &mut TomlMap) -> Result<()> {
        let header_line = self.line;
        let is_array = self.peek_char() == Some('[');
        if is_array {
            self.next_char();
        }

        let path = self.read_header_path()?;

        if is_array {
            match self.peek_char() {
                Some(']') => {
                    self.next_char();
                }
                Some(c) => {
                    return Err(self.err_syntax(format!(
                        "missing second ']' of a table-array header, found {:?}",
                        c
                    )))
                }
                None => return Err(self.err_eof("the second ']' of a table-array header")),
            }
        }

        // nothing but a comment may follow a header on its line
        self.skip_ws_same_line();
        match self.peek_char() {
            None | Some('\n') => {}
            Some('#') => self.skip_comment(),
            Some(c) => {
                return Err(self.err_syntax(format!(
                    "unexpected character {:?} after a table header",
                    c
                )))
            }
        }

        let payload = self.read_table_content()?;
        install_header(root, &path, payload, is_array, header_line)
    }

    /// Reads the dotted key path of a header, up to and including the closing
    /// `]`. Segments are bare (trimmed) or quoted; an empty bare segment is an
    /// error.
    fn read_header_path(&mut self) -> Result<Vec<String>> {
        let mut parts = Vec::new();
        loop {
            self.skip_ws_same_line();
            let segment = match self.peek_char() {
                None => return Err(self.err_eof("a table header segment")),
                Some('\n') => return Err(self.err_syntax("line break inside a table header")),
                Some('"') => {
                    if self.peek_at(1) == Some('"') && self.peek_at(2) == Some('"') {
                        return Err(
                            self.err_syntax("multi-line strings cannot be used in a table header")
                        );
                    }
                    self.next_char();
                    self.read_basic_string()?
                }
                Some('\'') => {
                    if self.peek_at(1) == Some('\'') && self.peek_at(2) == Some('\'') {
                        return Err(
                            self.err_syntax("multi-line strings cannot be used in a table header")
                        );
                    }
                    self.next_char();
                    self.read_literal_string()?
                }
                _ => {
                    let mut seg = String::new();
                    while let Some(c) = self.peek_char() {
                        match c {
                            '.' | ']' => break,
                            '\n' => {
                                return Err(self.err_syntax("line break inside a table header"))
                            }
                            _ => {
                                seg.push(c);
                                self.next_char();
                            }
                        }
                    }
                    let trimmed = seg.trim();
                    if trimmed.is_empty() {
                        return Err(self.err_syntax("empty segment in a table header"));
                    }
                    trimmed.to_string()
                }
            };
            parts.push(segment);

            self.skip_ws_same_line();
            match self.peek_char() {
                Some('.') => {
                    self.next_char();
                }
                Some(']') => {
                    self.next_char();
                    return Ok(parts);
                }
                Some(c) => {
                    return Err(
                        self.err_syntax(format!("expected '.' or ']' in a table header, found {:?}", c))
                    )
                }
                None => return Err(self.err_eof("the closing ']' of a table header")),
            }
        }
    }

    /// Reads the next value, dispatching on its first significant character.
    fn read_value(&mut self) -> Result<TomlValue> {
        match self.peek_char() {
            None => Err(self.err_eof("a value")),
            Some('[') => {
                self.next_char();
                self.read_array()
            }
            Some('{') => {
                self.next_char();
                self.read_inline_table()
            }
            Some('"') => {
                if self.peek_at(1) == Some('"') && self.peek_at(2) == Some('"') {
                    self.next_char();
                    self.next_char();
                    self.next_char();
                    self.read_basic_multiline().map(TomlValue::String)
                } else {
                    self.next_char();
                    self.read_basic_string().map(TomlValue::String)
                }
            }
            Some('\'') => {
                if self.peek_at(1) == Some('\'') && self.peek_at(2) == Some('\'') {
                    self.next_char();
                    self.next_char();
                    self.next_char();
                    self.read_literal_multiline().map(TomlValue::String)
                } else {
                    self.next_char();
                    self.read_literal_string().map(TomlValue::String)
                }
            }
            Some('t') | Some('f') => self.read_bool().map(TomlValue::Bool),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' => self.read_number_or_date(),
            Some(c) => Err(self.err_syntax(format!(
                "unexpected character {:?} at the start of a value",
                c
            ))),
        }
    }

    /// Reads an array of values. The opening `[` is already consumed.
    ///
    /// Commas are required between elements; newlines and comments may appear
    /// freely between them. Every element must have the same variant as the
    /// first. An array whose elements are all tables becomes a table array so
    /// it round-trips through `[[name]]` headers.
    fn read_array(&mut self) -> Result<TomlValue> {
        let mut items: Vec<TomlValue> = Vec::new();
        loop {
            self.skip_insignificant(true);
            match self.peek_char() {
                None => return Err(self.err_eof("a value or ']'")),
                Some(']') => {
                    self.next_char();
                    break;
                }
                _ => {}
            }

            let element_line = self.line;
            let value = self.read_value()?;
            if let Some(first) = items.first() {
                if !first.same_variant(&value) {
                    return Err(Error::mixed_array(
                        element_line,
                        first.type_name(),
                        value.type_name(),
                    ));
                }
            }
            items.push(value);

            self.skip_insignificant(true);
            match self.peek_char() {
                None => return Err(self.err_eof("',' or ']'")),
                Some(']') => {
                    self.next_char();
                    break;
                }
                Some(',') => {
                    self.next_char();
                }
                Some(c) => {
                    return Err(
                        self.err_syntax(format!("expected ',' or ']' in an array, found {:?}", c))
                    )
                }
            }
        }

        if !items.is_empty() && items.iter().all(TomlValue::is_table) {
            let mut tables = Vec::with_capacity(items.len());
            for item in items {
                if let TomlValue::Table(t) = item {
                    tables.push(t);
                }
            }
            return Ok(TomlValue::TableArray(tables));
        }
        Ok(TomlValue::Array(items))
    }

    /// Reads an inline table. The opening `{` is already consumed.
    ///
    /// One logical line: raw newlines and comments are forbidden anywhere
    /// inside, entries are comma-separated, and a trailing comma is not
    /// allowed.
    fn read_inline_table(&mut self) -> Result<TomlValue> {
        let mut table = TomlMap::new();
        self.skip_ws_same_line();
        if self.peek_char() == Some('}') {
            self.next_char();
            return Ok(TomlValue::Table(table));
        }
        loop {
            self.skip_ws_same_line();
            let key_line = self.line;
            let key = match self.peek_char() {
                None => return Err(self.err_eof("a key or '}'")),
                Some('\n') => return Err(self.err_syntax("line break inside an inline table")),
                Some('#') => return Err(self.err_syntax("comment inside an inline table")),
                _ => self.read_key()?,
            };

            self.skip_ws_same_line();
            match self.peek_char() {
                Some('=') => {
                    self.next_char();
                }
                Some('\n') => return Err(self.err_syntax("line break inside an inline table")),
                Some(c) => {
                    return Err(self.err_syntax(format!(
                        "expected '=' after key '{}' in an inline table, found {:?}",
                        key, c
                    )))
                }
                None => return Err(self.err_eof(&format!("'=' after key '{}'", key))),
            }

            self.skip_ws_same_line();
            match self.peek_char() {
                None => return Err(self.err_eof("a value after '='")),
                Some('\n') => return Err(self.err_syntax("line break inside an inline table")),
                _ => {}
            }
            let value = self.read_value()?;

            if table.contains_key(&key) {
                return Err(Error::duplicate_key(key_line, key));
            }
            table.insert(key, value);

            self.skip_ws_same_line();
            match self.peek_char() {
                None => return Err(self.err_eof("',' or '}'")),
                Some('}') => {
                    self.next_char();
                    return Ok(TomlValue::Table(table));
                }
                Some(',') => {
                    self.next_char();
                }
                Some('\n') => return Err(self.err_syntax("line break inside an inline table")),
                Some('#') => return Err(self.err_syntax("comment inside an inline table")),
                Some(c) => {
                    return Err(self.err_syntax(format!(
                        "expected ',' or '}}' in an inline table, found {:?}",
                        c
                    )))
                }
            }
        }
    }

    // === Scalar decoders ===

    /// Reads a boolean: the exact literal `true` or `false`, nothing else.
    fn read_bool(&mut self) -> Result<bool> {
        let rest = &self.input[self.pos..];
        if rest.starts_with("true") {
            for _ in 0..4 {
                self.next_char();
            }
            Ok(true)
        } else if rest.starts_with("false") {
            for _ in 0..5 {
                self.next_char();
            }
            Ok(false)
        } else {
            Err(self.err_syntax("invalid boolean value; expected 'true' or 'false'"))
        }
    }

    /// Reads an integer, a float or a date-time with a single forward scan.
    ///
    /// Three eligibility flags start true and are narrowed by the characters
    /// seen. The `-` rule carries the only subtlety: it is a date separator
    /// (killing both numeric readings) unless it is the leading sign or an
    /// exponent sign right after `e`/`E` - that exception is what keeps
    /// `1e-10` a float. Underscores are digit-group separators: dropped from
    /// the text, and incompatible with a date.
    ///
    /// The terminating character (comma, whitespace, `]`, `}` or end of input)
    /// is left unconsumed for the caller.
    fn read_number_or_date(&mut self) -> Result<TomlValue> {
        let line = self.line;
        let mut text = String::new();
        let mut maybe_integer = true;
        let mut maybe_float = true;
        let mut maybe_date = true;
        let mut prev = '\0';

        while let Some(c) = self.peek_char() {
            match c {
                ',' | ' ' | '\t' | '\r' | '\n' | ']' | '}' => break,
                ':' | 'T' | 'Z' => {
                    maybe_integer = false;
                    maybe_float = false;
                }
                'e' | 'E' => {
                    maybe_integer = false;
                    maybe_date = false;
                }
                '.' => {
                    maybe_integer = false;
                }
                '-' if !text.is_empty() && prev != 'e' && prev != 'E' => {
                    maybe_integer = false;
                    maybe_float = false;
                }
                _ => {}
            }
            self.next_char();
            prev = c;
            if c == '_' {
                maybe_date = false;
            } else {
                text.push(c);
            }
        }

        if maybe_integer {
            text.parse::<i64>()
                .map(TomlValue::Integer)
                .map_err(|_| Error::invalid_value(line, text))
        } else if maybe_float {
            text.parse::<f64>()
                .map(TomlValue::Float)
                .map_err(|_| Error::invalid_value(line, text))
        } else if maybe_date {
            crate::Datetime::parse(&text)
                .map(TomlValue::Datetime)
                .ok_or_else(|| Error::invalid_value(line, text))
        } else {
            Err(Error::invalid_value(line, text))
        }
    }

    // === String decoders ===

    /// Reads a single-line literal string (no escapes). The opening `'` is
    /// already consumed.
    fn read_literal_string(&mut self) -> Result<String> {
        let mut s = String::new();
        loop {
            match self.next_char() {
                None => return Err(self.err_eof("the closing \"'\" of a literal string")),
                Some('\n') => {
                    return Err(self.err_syntax("raw line break inside a single-line string"))
                }
                Some('\'') => return Ok(s),
                Some(c) => s.push(c),
            }
        }
    }

    /// Reads a multi-line literal string. The opening `'''` is already
    /// consumed; a newline immediately after it is discarded.
    fn read_literal_multiline(&mut self) -> Result<String> {
        if self.peek_char() == Some('\n') {
            self.next_char();
        }
        let mut s = String::new();
        loop {
            match self.next_char() {
                None => return Err(self.err_eof("the closing \"'''\" of a multi-line string")),
                Some('\'') => {
                    if self.peek_char() == Some('\'') && self.peek_at(1) == Some('\'') {
                        self.next_char();
                        self.next_char();
                        return Ok(s);
                    }
                    s.push('\'');
                }
                Some(c) => s.push(c),
            }
        }
    }

    /// Reads a single-line basic string with escape processing. The opening
    /// `"` is already consumed.
    fn read_basic_string(&mut self) -> Result<String> {
        let mut s = String::new();
        loop {
            match self.next_char() {
                None => return Err(self.err_eof("the closing '\"' of a basic string")),
                Some('\n') => {
                    return Err(self.err_syntax("raw line break inside a single-line string"))
                }
                Some('\\') => s.push(self.read_escape()?),
                Some('"') => return Ok(s),
                Some(c) => s.push(c),
            }
        }
    }

    /// Reads a multi-line basic string. The opening `"""` is already consumed;
    /// a newline immediately after it is discarded. A backslash followed by a
    /// line break (the break optionally preceded by spaces/tabs) is a line
    /// continuation: it consumes that break and all following whitespace
    /// without emitting anything.
    fn read_basic_multiline(&mut self) -> Result<String> {
        if self.peek_char() == Some('\n') {
            self.next_char();
        }
        let mut s = String::new();
        loop {
            match self.next_char() {
                None => return Err(self.err_eof("the closing '\"\"\"' of a multi-line string")),
                Some('\\') => {
                    if !self.try_line_continuation() {
                        s.push(self.read_escape()?);
                    }
                }
                Some('"') => {
                    if self.peek_char() == Some('"') && self.peek_at(1) == Some('"') {
                        self.next_char();
                        self.next_char();
                        return Ok(s);
                    }
                    s.push('"');
                }
                Some(c) => s.push(c),
            }
        }
    }

    /// After a backslash: if only spaces/tabs separate it from a line break,
    /// consumes through that break and every following whitespace character,
    /// and returns `true`. Otherwise consumes nothing and returns `false`.
    fn try_line_continuation(&mut self) -> bool {
        let mut n = 0;
        loop {
            match self.peek_at(n) {
                Some(' ') | Some('\t') | Some('\r') => n += 1,
                Some('\n') => {
                    for _ in 0..=n {
                        self.next_char();
                    }
                    while matches!(self.peek_char(), Some(' ' | '\t' | '\r' | '\n')) {
                        self.next_char();
                    }
                    return true;
                }
                _ => return false,
            }
        }
    }

    /// Decodes one escape sequence; the backslash is already consumed.
    fn read_escape(&mut self) -> Result<char> {
        match self.next_char() {
            None => Err(self.err_eof("an escape sequence")),
            Some('b') => Ok('\u{0008}'),
            Some('t') => Ok('\t'),
            Some('n') => Ok('\n'),
            Some('f') => Ok('\u{000C}'),
            Some('r') => Ok('\r'),
            Some('"') => Ok('"'),
            Some('\\') => Ok('\\'),
            Some('u') => self.read_unicode_escape(4),
            Some('U') => self.read_unicode_escape(8),
            Some(c) => Err(self.err_syntax(format!("invalid escape sequence '\\{}'", c))),
        }
    }

    /// Decodes `\u` (4 hex digits) or `\U` (8 hex digits) into a Unicode
    /// scalar value.
    fn read_unicode_escape(&mut self, digits: u32) -> Result<char> {
        let mut value: u32 = 0;
        for _ in 0..digits {
            match self.next_char() {
                Some(c) => match c.to_digit(16) {
                    Some(d) => value = value.wrapping_mul(16).wrapping_add(d),
                    None => {
                        return Err(self.err_syntax(format!(
                            "invalid unicode escape: expected {} hex digits, found {:?}",
                            digits, c
                        )))
                    }
                },
                None => return Err(self.err_eof("hex digits of a unicode escape")),
            }
        }
        char::from_u32(value)
            .ok_or_else(|| self.err_syntax(format!("\\u{:X} is not a unicode scalar value", value)))
    }
}

/// Attaches a header's table content to the tree.
///
/// Intermediate path segments resolve to existing tables, descend into the
/// last element of an existing table array, or create a new table on demand.
/// At the terminal segment, a `[name]` header installs or merges a table and a
/// `[[name]]` header appends to a (possibly new) table array. Merging exists
/// so that `[a.b]` followed by `[a]` works; any individual key collision is
/// still a duplicate-key error.
fn install_header(
    root: &mut TomlMap,
    path: &[String],
    payload: TomlMap,
    is_array: bool,
    line: usize,
) -> Result<()> {
    let (last, parents) = match path.split_last() {
        Some(split) => split,
        None => return Err(Error::syntax(line, 1, "empty table header")),
    };

    let mut current = root;
    for part in parents {
        if !current.contains_key(part) {
            current.insert(part.clone(), TomlValue::Table(TomlMap::new()));
        }
        current = match current.get_mut(part) {
            Some(TomlValue::Table(table)) => table,
            Some(TomlValue::TableArray(elements)) => match elements.last_mut() {
                Some(table) => table,
                None => {
                    return Err(Error::custom(format!(
                        "table array '{}' has no elements",
                        part
                    )))
                }
            },
            _ => {
                return Err(Error::syntax(
                    line,
                    1,
                    format!("key '{}' in a table header is not a table", part),
                ))
            }
        };
    }

    if current.contains_key(last) {
        match current.get_mut(last) {
            Some(TomlValue::TableArray(elements)) if is_array => {
                elements.push(payload);
            }
            Some(TomlValue::Table(existing)) if !is_array => {
                for (key, value) in payload {
                    if existing.contains_key(&key) {
                        return Err(Error::duplicate_key(line, key));
                    }
                    existing.insert(key, value);
                }
            }
            _ => return Err(Error::duplicate_key(line, last.clone())),
        }
    } else if is_array {
        current.insert(last.clone(), TomlValue::TableArray(vec![payload]));
    } else {
        current.insert(last.clone(), TomlValue::Table(payload));
    }
    Ok(())
}

// === Serde bridge: deserialize Rust types from a parsed value tree ===

/// A serde `Deserializer` over an owned [`TomlValue`].
///
/// Drives any `T: Deserialize` from a parsed tree; used by
/// [`from_str`](crate::from_str) and [`from_value`](crate::from_value).
pub struct ValueDeserializer {
    value: TomlValue,
}

impl ValueDeserializer {
    pub fn new(value: TomlValue) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            TomlValue::Bool(b) => visitor.visit_bool(b),
            TomlValue::Integer(i) => visitor.visit_i64(i),
            TomlValue::Float(f) => visitor.visit_f64(f),
            TomlValue::Datetime(dt) => visitor.visit_string(dt.to_string()),
            TomlValue::String(s) => visitor.visit_string(s),
            TomlValue::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            TomlValue::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
            TomlValue::TableArray(tables) => visitor.visit_seq(SeqDeserializer::new(
                tables.into_iter().map(TomlValue::Table).collect(),
            )),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        // TOML has no null; a present value is always Some
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            TomlValue::String(s) => visitor.visit_enum(s.into_deserializer()),
            TomlValue::Table(table) => {
                if table.len() == 1 {
                    match table.into_iter().next() {
                        Some((variant, value)) => {
                            visitor.visit_enum(EnumDeserializer::new(variant, value))
                        }
                        None => Err(Error::custom("expected a single-entry table for an enum")),
                    }
                } else {
                    Err(Error::custom("expected a single-entry table for an enum"))
                }
            }
            other => Err(Error::custom(format!(
                "expected a string or table for an enum, found {}",
                other.type_name()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<TomlValue>,
}

impl SeqDeserializer {
    fn new(vec: Vec<TomlValue>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, TomlValue>,
    value: Option<TomlValue>,
}

impl MapDeserializer {
    fn new(map: TomlMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(TomlValue::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<TomlValue>,
}

impl EnumDeserializer {
    fn new(variant: String, value: TomlValue) -> Self {
        EnumDeserializer {
            variant,
            value: Some(value),
        }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(TomlValue::String(self.variant)))?;
        let visitor = VariantDeserializer { value: self.value };
        Ok((variant, visitor))
    }
}

struct VariantDeserializer {
    value: Option<TomlValue>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            None => Ok(()),
            Some(_) => Err(Error::custom("expected a unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("expected a newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(TomlValue::Array(arr)) => visitor.visit_seq(SeqDeserializer::new(arr)),
            _ => Err(Error::custom("expected a tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(TomlValue::Table(table)) => visitor.visit_map(MapDeserializer::new(table)),
            _ => Err(Error::custom("expected a struct variant")),
        }
    }
}
