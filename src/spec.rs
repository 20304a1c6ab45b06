//! TOML Format Notes
//!
//! This module documents the TOML v0.4.0 subset implemented by this library:
//! what the reader accepts, what the writer emits, and where the two differ
//! from stricter readings of the specification.
//!
//! # Overview
//!
//! TOML is a configuration format built around `key = value` entries grouped
//! into tables. This library decodes a document into a dynamic value tree
//! ([`TomlMap`](crate::TomlMap) of [`TomlValue`](crate::TomlValue)) and encodes
//! such a tree back into canonical text.
//!
//! # Core Syntax
//!
//! ## Key/value entries
//!
//! ```text
//! title = "TOML Example"
//! enabled = true
//! ```
//!
//! **Rules**:
//! - A key is bare, or a single-line quoted string (`"a key"`, `'a key'`)
//! - Bare keys allow `[A-Za-z0-9_-]` in strict mode; lenient mode accepts any
//!   character above U+0020 except `[`, `]`, `=`, `#`
//! - After the value, only a comment or the end of the line may follow
//! - Defining the same key twice in one table is an error
//!
//! ## Tables and arrays of tables
//!
//! ```text
//! [server]
//! host = "localhost"
//!
//! [server.tls]
//! enabled = false
//!
//! [[account]]
//! name = "first"
//!
//! [[account]]
//! name = "second"
//! ```
//!
//! A header's dotted path creates intermediate tables on demand. When a path
//! segment names an existing array of tables, resolution continues inside its
//! *last* element, so `[a.b]` after `[[a]]` attaches to the most recent `[[a]]`
//! entry.
//!
//! ## Scalars
//!
//! | Type | Syntax | Example |
//! |------|--------|---------|
//! | Boolean | `true` or `false` | `active = true` |
//! | Integer | decimal digits, optional sign, `_` separators | `count = 1_000` |
//! | Float | decimal point and/or exponent | `ratio = 6.26e-34` |
//! | Date | ISO date | `dob = 1979-05-27` |
//! | Local date-time | date `T` time | `start = 1979-05-27T07:32:00` |
//! | Offset date-time | date `T` time offset | `utc = 1979-05-27T07:32:00Z` |
//!
//! A scalar that starts with a digit or a sign is classified during a single
//! forward scan. `1e-10` is a float because the `-` follows `e`; `1979-05-27`
//! is a date because its dashes do not.
//!
//! ## Strings
//!
//! Four variants, by quoting and line discipline:
//!
//! | | single-line | multi-line |
//! |---|---|---|
//! | **literal** (no escapes) | `'C:\path'` | `'''raw
//! text'''` |
//! | **basic** (escapes) | `"a\tb"` | `"""wrapped \
//! text"""` |
//!
//! The escape table is `\b \t \n \f \r \" \\`, plus `\uXXXX` and `\UXXXXXXXX`
//! for Unicode scalar values. Multi-line strings discard one newline directly
//! after the opening delimiter. In multi-line basic strings a backslash at the
//! end of a line swallows the break and all following whitespace.
//!
//! ## Arrays and inline tables
//!
//! ```text
//! ports = [8001, 8002, 8003]
//! point = { x = 1, y = 2 }
//! ```
//!
//! Arrays are homogeneous (all elements share one type), may span lines, and
//! may contain comments between elements. Inline tables are a single logical
//! line: no raw newlines, no comments, no trailing comma.
//!
//! # Canonical Output
//!
//! The writer emits, for each table, scalar and array entries first, then
//! sub-tables and arrays of tables, depth-first. Strings always come out as
//! escaped basic strings and keys are quoted only when they have to be, so
//! `parse(write(t))` reproduces `t` for every tree this library can produce.
//!
//! # Out of Scope
//!
//! Comments and original formatting are not preserved on round-trip. There is
//! no streaming mode: a document is parsed from one in-memory buffer in a
//! single pass, and the first error abandons the parse.
