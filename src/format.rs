//! TOON Wire Format
//!
//! This module documents the TOON (Token-Oriented Object Notation) textual
//! format as implemented by this library.
//!
//! # Overview
//!
//! TOON is a minimalist serialization format designed for efficient token
//! usage in Large Language Model (LLM) contexts. It trades JSON's braces,
//! brackets, and mandatory quotes for indentation, length markers, and
//! tabular compression of uniform data.
//!
//! # Mappings
//!
//! A mapping is one entry per line. A scalar value follows its key on the
//! same line; a nested mapping opens an indented block:
//!
//! ```text
//! intent: find
//! entities:
//!   name: Alice
//!   status: active
//! ```
//!
//! **Rules**:
//! - The indentation unit is a fixed number of spaces (default 2). Tabs are
//!   never valid indentation.
//! - A key is quoted when it contains `:` or `[`, or matches any of the
//!   string quoting triggers below. Anything else stays bare, including
//!   keys with inner spaces.
//! - `key:` with nothing after the colon and no deeper block is an empty
//!   mapping.
//! - Duplicate keys are not an error; the last entry wins.
//!
//! # Arrays
//!
//! Every array carries a bracketed length marker after its key. The marker
//! form encodes which of three renderings follows.
//!
//! ## Primitive arrays: `key [N]: ...`
//!
//! An array whose elements are all scalars (or which is empty) renders as a
//! delimited list on one line:
//!
//! ```text
//! tags [3]: a, b, c
//! empty [0]:
//! ```
//!
//! **Wrap policy**: the inline form is used while the full line fits within
//! `wrap_width` characters (default 80). A longer array keeps `key [N]:` on
//! its own line and puts the delimited list on one line at depth+1. This
//! threshold is implementation-defined and deliberately deterministic.
//!
//! ## Tabular arrays: `key [N,]`
//!
//! An array of mappings that all share the same keys *in the same order*,
//! with only scalar values, renders as a header line plus `N` rows. The
//! active delimiter is embedded in the marker (`[N,]`, `[N|]`, or `[N` tab
//! `]`) so a decoder needs no configuration to split the rows:
//!
//! ```text
//! contacts [2,]
//!   name, email
//!   John, john@x.com
//!   Sarah, sarah@x.com
//! ```
//!
//! Mappings with the same keys in a different order do **not** qualify;
//! they fall back to the list form rather than emit rows whose cell order
//! contradicts one of the elements. A single qualifying mapping still uses
//! the tabular form.
//!
//! ## List arrays: `key [N]`
//!
//! Everything else renders as `N` dash items at depth+1:
//!
//! ```text
//! items [3]
//!   - 1
//!   -
//!     kind: point
//!   - [2]: 4, 5
//! ```
//!
//! - A scalar item follows the dash on the same line.
//! - A mapping item is a bare `-` with its entries at one level deeper.
//! - A nested array puts its (keyless) length marker right after the dash.
//!
//! # Scalars
//!
//! | Type    | Syntax                             | Example          |
//! |---------|------------------------------------|------------------|
//! | Null    | `null`                             | `value: null`    |
//! | Boolean | `true` or `false`                  | `active: true`   |
//! | Integer | decimal digits, optional sign      | `count: 42`      |
//! | Float   | decimal point or exponent          | `price: 19.99`   |
//! | String  | bare, or `"quoted"` with escapes   | `name: Alice`    |
//!
//! Non-finite floats have no TOON representation and fail to encode.
//! Timestamps are not a wire-level type; the value conversion layer
//! normalizes them to ISO-8601 strings before encoding.
//!
//! # String quoting
//!
//! Strings are unquoted by default. A string is quoted exactly when:
//!
//! - it is empty
//! - it contains the active delimiter character
//! - it contains a newline or carriage return
//! - it contains `"` or `\`
//! - it matches `true`, `false`, `null`, or `none` in any letter case
//!   (decoders refuse bare case variants as ambiguous)
//! - it has leading or trailing whitespace
//! - it parses as a number
//!
//! Two positions add a narrow guard on top, because a bare string there
//! would be read as structure: a list item starting with `[`, and a
//! top-level scalar containing `:` or `[`.
//!
//! Inside quotes the escapes are `\"`, `\\`, `\n`, `\r`, and `\t`.
//!
//! # Delimiters
//!
//! The delimiter is one of `,` (default), tab, or `|`, fixed per document
//! by configuration. The encoder writes `", "` and `"| "` separators for
//! readability and a bare tab for the tab delimiter; the decoder splits on
//! the delimiter character and trims each cell.
//!
//! # Strict and lenient decoding
//!
//! Strict mode enforces the grammar exactly: the configured indentation
//! unit, agreeing length markers, matching tabular column counts, and
//! exact-case literals. Lenient mode infers the indentation unit from the
//! first indented line, trusts the actual element count over the declared
//! one, pads or truncates uneven tabular rows, and accepts case variants
//! of the literals, recording a warning for every repair. Unterminated
//! quotes, malformed array headers, tabs in indentation, and nesting past
//! the depth limit fail in both modes.
