//! # toon_codec
//!
//! A codec for TOON (Token-Oriented Object Notation), a compact
//! serialization format designed for efficient communication with Large
//! Language Models, with Serde integration.
//!
//! ## What is TOON?
//!
//! TOON is a compact, human-readable data format. It drops JSON's braces,
//! brackets, and mandatory quotes in favor of indentation and length
//! markers, and collapses uniform arrays of objects into compact tables,
//! typically 30-60% fewer tokens than the equivalent JSON.
//!
//! ## Key Features
//!
//! - **Token-Efficient**: minimalist syntax; uniform object arrays
//!   serialize as tables with a single header
//! - **Strict and lenient decoding**: fail-fast for machine-generated
//!   input, best-effort with warnings for model-generated input
//! - **Serde Compatible**: works with existing Rust types via
//!   `#[derive(Serialize, Deserialize)]`
//! - **Validation without decoding**: lexical checks plus style warnings,
//!   each with a line number
//! - **Token accounting**: measure the savings against JSON with your own
//!   tokenizer
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use toon_codec::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "id: 123\nname: Alice\nactive: true");
//!
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! ## Tabular Arrays
//!
//! Arrays of uniform objects serialize as space-efficient tables:
//!
//! ```rust
//! use serde::Serialize;
//! use toon_codec::to_string;
//!
//! #[derive(Serialize)]
//! struct Product {
//!     id: u32,
//!     name: String,
//! }
//!
//! let products = vec![
//!     Product { id: 1, name: "Widget".to_string() },
//!     Product { id: 2, name: "Gadget".to_string() },
//! ];
//!
//! assert_eq!(
//!     to_string(&products).unwrap(),
//!     "[2,]\n  id, name\n  1, Widget\n  2, Gadget"
//! );
//! ```
//!
//! ## Dynamic Values with the toon! Macro
//!
//! ```rust
//! use toon_codec::{encode, toon};
//!
//! let data = toon!({
//!     "name": "Alice",
//!     "tags": ["rust", "serde", "llm"]
//! });
//!
//! assert_eq!(encode(&data).unwrap(), "name: Alice\ntags [3]: rust, serde, llm");
//! ```
//!
//! ## Lenient Decoding
//!
//! Model output is not guaranteed grammatically perfect. Lenient mode
//! repairs what it safely can and reports each repair:
//!
//! ```rust
//! use toon_codec::{decode_with_options, DecodeOptions};
//!
//! let sloppy = "tags [3]: a, b";
//! let decoded = decode_with_options(sloppy, &DecodeOptions::lenient()).unwrap();
//! assert_eq!(decoded.warnings.len(), 1);
//! ```
//!
//! ## Measuring Token Savings
//!
//! ```rust
//! use toon_codec::{compare, toon, CharEstimator};
//!
//! let value = toon!({
//!     "contacts": [
//!         {"name": "John", "email": "john@x.com"},
//!         {"name": "Sarah", "email": "sarah@x.com"}
//!     ]
//! });
//! let report = compare(&value, &CharEstimator).unwrap();
//! assert!(report.savings_percent > 0.0);
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - All four operations (encode, decode, validate, compare) are pure
//!   functions over their inputs, safe to call concurrently
//! - Errors propagate through `Result`; no panics in the public API
//!
//! For the wire format itself, see the [`format`] module.

pub mod de;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod tokens;
pub mod validate;
pub mod value;

pub use de::{decode, decode_with_options, from_str, from_value, Decoded, ValueDeserializer};
pub use error::{DecodeError, Diagnostic, EncodeError};
pub use map::Map;
pub use options::{DecodeMode, DecodeOptions, Delimiter, EncodeOptions};
pub use ser::{classify, encode, encode_with_options, to_value, ArrayShape, ValueSerializer};
pub use tokens::{compare, compare_with_options, CharEstimator, TokenComparison, Tokenizer};
pub use validate::{validate, validate_with_options, ValidationReport};
pub use value::{Number, Value};

use serde::Serialize;

/// Serializes any `T: Serialize` to a TOON string with default options.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use toon_codec::to_string;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x: 1\ny: 2");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented (non-finite floats,
/// maps with non-string keys) or nests past the depth limit.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String, EncodeError>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &EncodeOptions::default())
}

/// Serializes any `T: Serialize` to a TOON string with the given options.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{to_string_with_options, Delimiter, EncodeOptions};
///
/// let rows = vec![("a", 1), ("b", 2)];
/// let options = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
/// let text = to_string_with_options(&rows, &options).unwrap();
/// assert_eq!(text, "[2]\n  - [2]: a| 1\n  - [2]: b| 2");
/// ```
///
/// # Errors
///
/// See [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &EncodeOptions) -> Result<String, EncodeError>
where
    T: ?Sized + Serialize,
{
    encode_with_options(&to_value(value)?, options)
}
