//! Configuration options for TOML reading and writing.
//!
//! This module provides types to customize parsing and output:
//!
//! - [`TomlOptions`]: Main configuration struct
//! - [`BareKeys`]: Choice of character class for unquoted keys (strict or lenient)
//!
//! ## Examples
//!
//! ```rust
//! use tomlio::{parse_with_options, BareKeys, TomlOptions};
//!
//! // Strict mode (the default) only allows [A-Za-z0-9_-] in bare keys
//! assert!(parse_with_options("a.b = 1", TomlOptions::new()).is_err());
//!
//! // Lenient mode accepts the key verbatim
//! let options = TomlOptions::new().with_bare_keys(BareKeys::Lenient);
//! let table = parse_with_options("a.b = 1", options).unwrap();
//! assert!(table.contains_key("a.b"));
//! ```

/// Character-class rules for bare (unquoted) keys.
///
/// TOML's specification restricts bare keys to ASCII letters, digits,
/// underscores and dashes. The lenient mode mirrors the permissive behavior of
/// many real-world readers: any character above U+0020 is accepted except the
/// ones that are structurally meaningful on a key/value line.
///
/// # Examples
///
/// ```rust
/// use tomlio::BareKeys;
///
/// assert!(BareKeys::Strict.allows('a'));
/// assert!(!BareKeys::Strict.allows('.'));
/// assert!(BareKeys::Lenient.allows('.'));
/// assert!(!BareKeys::Lenient.allows('='));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BareKeys {
    #[default]
    Strict,
    Lenient,
}

impl BareKeys {
    /// Returns `true` if `c` is legal in a bare key under this mode.
    #[must_use]
    pub const fn allows(self, c: char) -> bool {
        match self {
            BareKeys::Strict => c.is_ascii_alphanumeric() || c == '_' || c == '-',
            BareKeys::Lenient => c > ' ' && !matches!(c, '[' | ']' | '=' | '#'),
        }
    }
}

/// Configuration options for TOML reading and writing.
///
/// Controls the bare-key strictness mode used by the reader and the
/// indentation of nested tables emitted by the writer.
///
/// # Examples
///
/// ```rust
/// use tomlio::{BareKeys, TomlOptions};
///
/// // Defaults: strict bare keys, nested tables indented with one tab
/// let options = TomlOptions::new();
///
/// // Custom configuration
/// let options = TomlOptions::new()
///     .with_bare_keys(BareKeys::Lenient)
///     .with_indent(4)
///     .with_indent_spaces(true);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TomlOptions {
    pub bare_keys: BareKeys,
    pub indent: usize,
    pub indent_spaces: bool,
}

impl Default for TomlOptions {
    fn default() -> Self {
        TomlOptions {
            bare_keys: BareKeys::default(),
            indent: 1,
            indent_spaces: false,
        }
    }
}

impl TomlOptions {
    /// Creates default options (strict bare keys, one-tab indents).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlio::{BareKeys, TomlOptions};
    ///
    /// let options = TomlOptions::new();
    /// assert_eq!(options.bare_keys, BareKeys::Strict);
    /// assert_eq!(options.indent, 1);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bare-key character-class mode used by the reader.
    #[must_use]
    pub fn with_bare_keys(mut self, bare_keys: BareKeys) -> Self {
        self.bare_keys = bare_keys;
        self
    }

    /// Sets the indent width (number of indent characters per nesting level).
    ///
    /// Only affects the writer. Default is 1.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Selects spaces (`true`) or tabs (`false`, the default) for indentation.
    ///
    /// Only affects the writer.
    #[must_use]
    pub fn with_indent_spaces(mut self, indent_spaces: bool) -> Self {
        self.indent_spaces = indent_spaces;
        self
    }

    /// Returns the character used for one unit of indentation.
    #[must_use]
    pub const fn indent_char(&self) -> char {
        if self.indent_spaces {
            ' '
        } else {
            '\t'
        }
    }
}
