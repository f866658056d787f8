//! Configuration for encoding and decoding.
//!
//! - [`EncodeOptions`]: indentation width, delimiter, wrap width, depth bound
//! - [`DecodeOptions`]: indentation width, delimiter, strict/lenient mode,
//!   depth bound
//! - [`Delimiter`]: comma (default), tab, or pipe
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{encode_with_options, toon, Delimiter, EncodeOptions};
//!
//! let value = toon!({ "tags": ["a", "b"] });
//!
//! let options = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
//! let text = encode_with_options(&value, &options).unwrap();
//! assert_eq!(text, "tags [2]: a| b");
//! ```

/// Delimiter choice for primitive-array bodies and tabular cells.
///
/// - **Comma**: default, most compact
/// - **Tab**: TSV-like output
/// - **Pipe**: readable, markdown-style
///
/// # Examples
///
/// ```rust
/// use toon_codec::Delimiter;
///
/// assert_eq!(Delimiter::Comma.as_char(), ',');
/// assert_eq!(Delimiter::Tab.as_char(), '\t');
/// assert_eq!(Delimiter::Pipe.as_char(), '|');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// The delimiter character itself.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// The separator written between cells: delimiter plus one space, except
    /// for tabs. Decoders split on the character and trim, so the space is
    /// cosmetic and lossless.
    #[must_use]
    pub const fn separator(&self) -> &'static str {
        match self {
            Delimiter::Comma => ", ",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "| ",
        }
    }

    /// Recognizes a delimiter character (used when reading `[N,]` headers).
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            ',' => Some(Delimiter::Comma),
            '\t' => Some(Delimiter::Tab),
            '|' => Some(Delimiter::Pipe),
            _ => None,
        }
    }
}

/// Decode strictness.
///
/// Strict mode is for trusted, machine-generated input where any grammar
/// deviation should be rejected. Lenient mode exists because the format's
/// primary producer is a language model whose output is not guaranteed
/// grammatically perfect; a defined set of deviations is tolerated and
/// reported as warnings instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DecodeMode {
    #[default]
    Strict,
    Lenient,
}

/// Options controlling the encoder.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{Delimiter, EncodeOptions};
///
/// let options = EncodeOptions::new()
///     .with_indent(4)
///     .with_delimiter(Delimiter::Tab)
///     .with_wrap_width(120);
/// ```
#[derive(Clone, Debug)]
pub struct EncodeOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Delimiter for primitive-array bodies and tabular cells.
    pub delimiter: Delimiter,
    /// Column budget for inline primitive arrays. A list whose full line
    /// (indentation, key, marker and joined body) would exceed this width is
    /// wrapped: the header stays on its own line and the delimited body moves
    /// to one line at the next depth.
    pub wrap_width: usize,
    /// Maximum nesting depth before encoding aborts with `CyclicStructure`.
    pub max_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent: 2,
            delimiter: Delimiter::default(),
            wrap_width: 80,
            max_depth: 64,
        }
    }
}

impl EncodeOptions {
    /// Default options: 2-space indent, comma delimiter, 80-column wrap,
    /// depth bound of 64.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation width (spaces per level).
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the inline wrap width for primitive arrays.
    #[must_use]
    pub fn with_wrap_width(mut self, wrap_width: usize) -> Self {
        self.wrap_width = wrap_width;
        self
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Options controlling the decoder.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{DecodeMode, DecodeOptions};
///
/// let lenient = DecodeOptions::new().with_mode(DecodeMode::Lenient);
/// assert_eq!(lenient.mode, DecodeMode::Lenient);
/// ```
#[derive(Clone, Debug)]
pub struct DecodeOptions {
    /// Expected spaces per nesting level. In lenient mode the first indented
    /// line overrides this; in strict mode every line must conform.
    pub indent: usize,
    /// Delimiter for primitive-array bodies. Tabular blocks carry their own
    /// delimiter inside the `[N,]` header.
    pub delimiter: Delimiter,
    /// Strict or lenient.
    pub mode: DecodeMode,
    /// Maximum nesting depth before decoding aborts with `MaxDepthExceeded`.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            indent: 2,
            delimiter: Delimiter::default(),
            mode: DecodeMode::default(),
            max_depth: 64,
        }
    }
}

impl DecodeOptions {
    /// Default options: strict mode, 2-space indent, comma delimiter, depth
    /// bound of 64.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lenient-mode options with everything else at defaults.
    #[must_use]
    pub fn lenient() -> Self {
        DecodeOptions {
            mode: DecodeMode::Lenient,
            ..Default::default()
        }
    }

    /// Sets the indentation width.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the delimiter used for primitive-array bodies.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the decode mode.
    #[must_use]
    pub fn with_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
