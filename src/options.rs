//! Configuration options for parsing and writing.
//!
//! - [`ParseOptions`]: number conversion policy and nesting limit
//! - [`NumberPolicy`]: how numeric literals become `f64`
//! - [`WriteOptions`]: indentation of the pretty writer
//!
//! ## Examples
//!
//! ```rust
//! use jsondoc::{Document, NumberPolicy, ParseOptions, WriteOptions};
//!
//! let options = ParseOptions::new()
//!     .with_number_policy(NumberPolicy::Table)
//!     .with_max_depth(Some(64));
//! let mut doc = Document::with_options(options);
//! doc.parse_str("[1, 2.5]").unwrap();
//!
//! let text = doc.to_string_with(&WriteOptions::new().with_indent(4)).unwrap();
//! assert_eq!(text, "[\n    1,\n    2.5\n]");
//! ```

/// Conversion policy for numeric literals.
///
/// Both policies accept exactly the same grammar; they differ only in how the
/// validated digits are turned into a double.
///
/// # Examples
///
/// ```rust
/// use jsondoc::NumberPolicy;
///
/// assert_eq!(NumberPolicy::default(), NumberPolicy::Precise);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum NumberPolicy {
    /// Correctly rounded conversion. Every finite double written by the
    /// crate reads back bit-for-bit.
    #[default]
    Precise,
    /// Significant digits scaled through a power-of-ten table. Exact for
    /// up to 15 significant digits with exponents within ±22, approximate
    /// beyond that.
    Table,
}

/// Default maximum nesting depth of arrays and objects.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Options controlling how text is parsed into a value tree.
///
/// # Examples
///
/// ```rust
/// use jsondoc::{NumberPolicy, ParseOptions};
///
/// let options = ParseOptions::new();
/// assert_eq!(options.number_policy, NumberPolicy::Precise);
/// assert_eq!(options.max_depth, Some(512));
///
/// let unbounded = ParseOptions::new().with_max_depth(None);
/// assert_eq!(unbounded.max_depth, None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub number_policy: NumberPolicy,
    /// `None` disables the limit; nesting is then bounded only by the stack.
    pub max_depth: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            number_policy: NumberPolicy::default(),
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl ParseOptions {
    /// Creates default options (precise numbers, depth limit of 512).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the numeric conversion policy.
    #[must_use]
    pub fn with_number_policy(mut self, policy: NumberPolicy) -> Self {
        self.number_policy = policy;
        self
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Options controlling the pretty writer.
///
/// Each nesting level is indented by `indent` copies of `indent_char`.
///
/// # Examples
///
/// ```rust
/// use jsondoc::WriteOptions;
///
/// let options = WriteOptions::new();
/// assert_eq!(options.indent, 2);
/// assert_eq!(options.indent_char, ' ');
///
/// let tabs = WriteOptions::tabs();
/// assert_eq!(tabs.indent, 1);
/// assert_eq!(tabs.indent_char, '\t');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteOptions {
    pub indent: usize,
    pub indent_char: char,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            indent: 2,
            indent_char: ' ',
        }
    }
}

impl WriteOptions {
    /// Creates default options (two spaces per level).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// One tab per level.
    #[must_use]
    pub fn tabs() -> Self {
        WriteOptions {
            indent: 1,
            indent_char: '\t',
        }
    }

    /// Sets the number of indent characters per level.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsondoc::WriteOptions;
    ///
    /// let options = WriteOptions::new().with_indent(4);
    /// assert_eq!(options.indent, 4);
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the character repeated for each indent step.
    #[must_use]
    pub fn with_indent_char(mut self, indent_char: char) -> Self {
        self.indent_char = indent_char;
        self
    }

    pub(crate) fn push_step(&self, prefix: &mut String) {
        prefix.extend(std::iter::repeat(self.indent_char).take(self.indent));
    }

    pub(crate) fn step_len(&self) -> usize {
        self.indent_char.len_utf8() * self.indent
    }
}
