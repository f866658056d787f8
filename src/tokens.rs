//! Token accounting.
//!
//! TOON exists to spend fewer LLM tokens than JSON on the same data; this
//! module measures that claim for a concrete value. Tokenization itself is
//! model-specific, so the counter is a collaborator supplied by the caller
//! through the [`Tokenizer`] trait (any `Fn(&str) -> usize` works), with
//! [`CharEstimator`] as a rough built-in default.
//!
//! ```rust
//! use toon_codec::{compare, toon, CharEstimator};
//!
//! let value = toon!({
//!     "users": [
//!         {"id": 1, "name": "Alice"},
//!         {"id": 2, "name": "Bob"}
//!     ]
//! });
//! let report = compare(&value, &CharEstimator).unwrap();
//! assert!(report.savings_percent > 0.0);
//! ```

use crate::{encode_with_options, EncodeError, EncodeOptions, Value};

/// Counts the tokens a model would spend on a piece of text.
pub trait Tokenizer {
    fn count(&self, text: &str) -> usize;
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> usize,
{
    fn count(&self, text: &str) -> usize {
        self(text)
    }
}

/// Crude model-free estimate: roughly four characters per token, never
/// zero. Good enough for relative comparisons; plug in a real tokenizer for
/// absolute numbers.
#[derive(Clone, Copy, Debug, Default)]
pub struct CharEstimator;

impl Tokenizer for CharEstimator {
    fn count(&self, text: &str) -> usize {
        (text.chars().count() / 4).max(1)
    }
}

/// Token counts for the same value in both formats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TokenComparison {
    pub json_tokens: usize,
    pub toon_tokens: usize,
    /// Positive when TOON is cheaper. Zero when the JSON side counts zero
    /// tokens.
    pub savings_percent: f64,
}

/// Encodes `value` as compact JSON and as TOON, counts both with the given
/// tokenizer, and reports the relative savings.
///
/// # Errors
///
/// Any [`EncodeError`] from the TOON side; a JSON rendering failure
/// surfaces as [`EncodeError::Message`].
pub fn compare<T: Tokenizer + ?Sized>(
    value: &Value,
    tokenizer: &T,
) -> Result<TokenComparison, EncodeError> {
    compare_with_options(value, &EncodeOptions::default(), tokenizer)
}

/// [`compare`] with explicit TOON encoding options.
///
/// # Errors
///
/// See [`compare`].
pub fn compare_with_options<T: Tokenizer + ?Sized>(
    value: &Value,
    options: &EncodeOptions,
    tokenizer: &T,
) -> Result<TokenComparison, EncodeError> {
    let json = serde_json::to_string(value).map_err(|e| EncodeError::Message(e.to_string()))?;
    let toon = encode_with_options(value, options)?;

    let json_tokens = tokenizer.count(&json);
    let toon_tokens = tokenizer.count(&toon);
    let savings_percent = if json_tokens == 0 {
        0.0
    } else {
        (json_tokens as f64 - toon_tokens as f64) / json_tokens as f64 * 100.0
    };

    Ok(TokenComparison {
        json_tokens,
        toon_tokens,
        savings_percent,
    })
}
