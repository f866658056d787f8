//! TOON decoding.
//!
//! This module holds the line-oriented recursive-descent parser that turns
//! TOON text back into a [`Value`] tree, and the serde bridge that
//! deserializes a [`Value`] into any `T: Deserialize`.
//!
//! ## Strict and lenient modes
//!
//! Strict mode aborts on the first grammar deviation with a precise line
//! and column. Lenient mode exists because the format's primary producer is
//! a language model: it tolerates inconsistent-but-unambiguous indentation,
//! length markers that disagree with the actual count, and literal keywords
//! in the wrong case, recording a [`Diagnostic`] for each repair instead of
//! failing. Deviations that make continuation ambiguous (an unterminated
//! quote, a malformed array header, tabs in indentation, nesting past the
//! depth limit) fail hard in both modes.
//!
//! ## Usage
//!
//! ```rust
//! use toon_codec::{decode, toon};
//!
//! let decoded = decode("name: Alice\ntags [2]: a, b").unwrap();
//! assert_eq!(decoded.value, toon!({ "name": "Alice", "tags": ["a", "b"] }));
//! assert!(decoded.warnings.is_empty());
//! ```

use crate::ser::parses_as_number;
use crate::{DecodeError, DecodeMode, DecodeOptions, Delimiter, Diagnostic, Map, Number, Value};
use serde::de::{self, DeserializeOwned, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;

/// The result of a successful decode: the value plus any lenient-mode
/// repairs. In strict mode `warnings` is always empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoded {
    pub value: Value,
    pub warnings: Vec<Diagnostic>,
}

/// Parses TOON text into a [`Value`] with default (strict) options.
///
/// # Errors
///
/// Any [`DecodeError`] variant; see the module docs for which deviations
/// fail in which mode.
pub fn decode(input: &str) -> Result<Decoded, DecodeError> {
    decode_with_options(input, &DecodeOptions::default())
}

/// Parses TOON text into a [`Value`] with the given options.
///
/// Empty input (or input with only blank lines) decodes to an empty object.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{decode_with_options, DecodeOptions, toon};
///
/// // The declared length is wrong; lenient mode keeps the actual count.
/// let decoded = decode_with_options("tags [3]: a, b", &DecodeOptions::lenient()).unwrap();
/// assert_eq!(decoded.value, toon!({ "tags": ["a", "b"] }));
/// assert_eq!(decoded.warnings.len(), 1);
/// ```
///
/// # Errors
///
/// Any [`DecodeError`] variant.
pub fn decode_with_options(input: &str, options: &DecodeOptions) -> Result<Decoded, DecodeError> {
    let (lines, warnings) = layout(input, options)?;
    let mut parser = Parser {
        lines,
        pos: 0,
        options,
        warnings,
    };
    let value = parser.parse_document()?;
    Ok(Decoded {
        value,
        warnings: parser.warnings,
    })
}

#[derive(Clone, Debug)]
struct Line {
    number: usize,
    indent: usize,
    depth: usize,
    text: String,
}

/// Splits the input into non-blank lines with resolved depths. Tabs in
/// indentation fail in both modes. In strict mode every indent must be a
/// multiple of the configured unit; in lenient mode the first indented line
/// defines the unit and non-multiples round down with a warning.
fn layout(
    input: &str,
    options: &DecodeOptions,
) -> Result<(Vec<Line>, Vec<Diagnostic>), DecodeError> {
    let mut raw = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let number = i + 1;
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            continue;
        }
        let indent = line.len() - line.trim_start_matches(' ').len();
        if line[indent..].starts_with('\t') {
            return Err(DecodeError::indentation(
                number,
                indent + 1,
                "tab character in indentation",
            ));
        }
        let text = line[indent..].trim_end().to_string();
        raw.push((number, indent, text));
    }

    let mut warnings = Vec::new();
    let unit = match options.mode {
        DecodeMode::Strict => options.indent,
        DecodeMode::Lenient => match raw.iter().find(|(_, indent, _)| *indent > 0) {
            Some((number, indent, _)) => {
                if *indent != options.indent {
                    warnings.push(Diagnostic::new(
                        *number,
                        format!("inferring an indentation unit of {} spaces", indent),
                    ));
                }
                *indent
            }
            None => options.indent,
        },
    }
    .max(1);

    let mut lines = Vec::with_capacity(raw.len());
    for (number, indent, text) in raw {
        if indent % unit != 0 {
            match options.mode {
                DecodeMode::Strict => {
                    return Err(DecodeError::indentation(
                        number,
                        indent + 1,
                        format!("indent of {} spaces is not a multiple of {}", indent, unit),
                    ));
                }
                DecodeMode::Lenient => warnings.push(Diagnostic::new(
                    number,
                    format!(
                        "indent of {} spaces is not a multiple of the inferred unit {}",
                        indent, unit
                    ),
                )),
            }
        }
        lines.push(Line {
            number,
            indent,
            depth: indent / unit,
            text,
        });
    }
    Ok((lines, warnings))
}

/// A parsed `[N]`, `[N,]`, or `[N]: ...` marker.
pub(crate) struct Header {
    pub(crate) count: usize,
    pub(crate) delimiter: Option<Delimiter>,
    pub(crate) colon: bool,
    pub(crate) rest: String,
}

pub(crate) fn parse_header(text: &str, line: usize) -> Result<Header, DecodeError> {
    let close = text
        .find(']')
        .ok_or_else(|| DecodeError::malformed_header(line, "missing ']' in array header"))?;
    let inside = &text[1..close];

    let digits_end = inside
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(inside.len());
    let (digits, tail) = inside.split_at(digits_end);
    if digits.is_empty() {
        return Err(DecodeError::malformed_header(
            line,
            format!("length marker '[{}]' must start with a number", inside),
        ));
    }
    let count: usize = digits.parse().map_err(|_| {
        DecodeError::malformed_header(line, format!("length marker '{}' out of range", digits))
    })?;
    let delimiter = match tail {
        "" => None,
        "," => Some(Delimiter::Comma),
        "\t" => Some(Delimiter::Tab),
        "|" => Some(Delimiter::Pipe),
        _ => {
            return Err(DecodeError::malformed_header(
                line,
                format!("invalid array header '[{}]'", inside),
            ))
        }
    };

    let after = &text[close + 1..];
    if delimiter.is_some() {
        if !after.trim().is_empty() {
            return Err(DecodeError::malformed_header(
                line,
                "unexpected text after tabular header",
            ));
        }
        return Ok(Header {
            count,
            delimiter,
            colon: false,
            rest: String::new(),
        });
    }
    if let Some(rest) = after.strip_prefix(':') {
        Ok(Header {
            count,
            delimiter: None,
            colon: true,
            rest: rest.trim().to_string(),
        })
    } else if after.trim().is_empty() {
        Ok(Header {
            count,
            delimiter: None,
            colon: false,
            rest: String::new(),
        })
    } else {
        Err(DecodeError::malformed_header(
            line,
            "expected ':' or end of line after array header",
        ))
    }
}

/// Reads a quoted token starting at the first byte of `text`. Returns the
/// unescaped string and the byte index just past the closing quote.
pub(crate) fn parse_quoted(
    text: &str,
    line: usize,
    column: usize,
) -> Result<(String, usize), DecodeError> {
    let mut out = String::new();
    let mut iter = text.char_indices();
    iter.next(); // opening quote
    while let Some((i, ch)) = iter.next() {
        match ch {
            '\\' => match iter.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, 't')) => out.push('\t'),
                Some((_, '"')) => out.push('"'),
                Some((_, '\\')) => out.push('\\'),
                Some((_, other)) => out.push(other),
                None => return Err(DecodeError::unterminated_quote(line, column)),
            },
            '"' => return Ok((out, i + 1)),
            _ => out.push(ch),
        }
    }
    Err(DecodeError::unterminated_quote(line, column))
}

/// Splits a delimited row into raw cell strings, respecting quotes.
pub(crate) fn split_cells(
    s: &str,
    delimiter: char,
    line: usize,
    column: usize,
) -> Result<Vec<String>, DecodeError> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if in_quotes {
            current.push(ch);
            match ch {
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                }
                '"' => in_quotes = false,
                _ => {}
            }
        } else if ch == '"' {
            in_quotes = true;
            current.push(ch);
        } else if ch == delimiter {
            cells.push(current.trim().to_string());
            current = String::new();
        } else {
            current.push(ch);
        }
    }
    if in_quotes {
        return Err(DecodeError::unterminated_quote(line, column));
    }
    cells.push(current.trim().to_string());
    Ok(cells)
}

struct Parser<'a> {
    lines: Vec<Line>,
    pos: usize,
    options: &'a DecodeOptions,
    warnings: Vec<Diagnostic>,
}

impl Parser<'_> {
    fn lenient(&self) -> bool {
        self.options.mode == DecodeMode::Lenient
    }

    fn warn(&mut self, line: usize, message: impl Into<String>) {
        self.warnings.push(Diagnostic::new(line, message));
    }

    fn peek(&self) -> Option<&Line> {
        self.lines.get(self.pos)
    }

    fn advance(&mut self) -> Line {
        let line = self.lines[self.pos].clone();
        self.pos += 1;
        line
    }

    fn check_recursion(&self, rec: usize, line: usize) -> Result<(), DecodeError> {
        if rec > self.options.max_depth {
            Err(DecodeError::max_depth(line, self.options.max_depth))
        } else {
            Ok(())
        }
    }

    fn parse_document(&mut self) -> Result<Value, DecodeError> {
        let first = match self.peek() {
            Some(line) => line.clone(),
            None => return Ok(Value::Object(Map::new())),
        };
        if first.depth != 0 {
            if self.lenient() {
                self.warn(first.number, "first line is indented");
            } else {
                return Err(DecodeError::indentation(
                    first.number,
                    first.indent + 1,
                    "first line must not be indented",
                ));
            }
        }
        let base = first.depth;

        if first.text.starts_with('[') {
            let line = self.advance();
            return self.parse_array(&line.text, &line, base, 1);
        }

        if line_is_entry(&first.text) {
            let map = self.parse_mapping(base, 1)?;
            if let Some(leftover) = self.peek() {
                let (number, indent) = (leftover.number, leftover.indent);
                if self.lenient() {
                    self.warn(number, "ignoring content past the top-level block");
                    self.pos = self.lines.len();
                } else {
                    return Err(DecodeError::indentation(
                        number,
                        indent + 1,
                        "unexpected content past the top-level block",
                    ));
                }
            }
            return Ok(Value::Object(map));
        }

        // A single bare line is a top-level scalar.
        let line = self.advance();
        if let Some(extra) = self.peek() {
            let (number, indent) = (extra.number, extra.indent);
            if self.lenient() {
                self.warn(number, "ignoring content after top-level scalar");
                self.pos = self.lines.len();
            } else {
                return Err(DecodeError::indentation(
                    number,
                    indent + 1,
                    "unexpected content after top-level scalar",
                ));
            }
        }
        self.parse_scalar_token(&line.text, line.number, line.indent + 1)
    }

    fn parse_mapping(&mut self, depth: usize, rec: usize) -> Result<Map, DecodeError> {
        let mut map = Map::new();
        while let Some(line) = self.peek() {
            if line.depth < depth {
                break;
            }
            if line.depth > depth {
                let (number, indent) = (line.number, line.indent);
                if self.lenient() {
                    self.warn(number, "skipping over-indented line");
                    self.pos += 1;
                    continue;
                }
                return Err(DecodeError::indentation(
                    number,
                    indent + 1,
                    "unexpected indentation",
                ));
            }

            let line = self.advance();
            let (key, after) = self.parse_key(&line)?;
            let value = if after.starts_with('[') {
                self.parse_array(&after, &line, depth, rec + 1)?
            } else if let Some(rest) = after.strip_prefix(':') {
                let rest = rest.trim();
                if rest.is_empty() {
                    self.parse_nested_block(depth, rec + 1)?
                } else {
                    self.parse_scalar_token(rest, line.number, line.indent + 1)?
                }
            } else {
                return Err(DecodeError::indentation(
                    line.number,
                    line.indent + 1,
                    "expected ':' or an array header after key",
                ));
            };
            // Duplicate keys: last write wins.
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Splits an entry line into its key and the remainder (which begins
    /// with `:` or `[`).
    fn parse_key(&self, line: &Line) -> Result<(String, String), DecodeError> {
        let text = &line.text;
        if text.starts_with('"') {
            let (key, end) = parse_quoted(text, line.number, line.indent + 1)?;
            return Ok((key, text[end..].trim_start().to_string()));
        }
        match text.find([':', '[']) {
            Some(idx) => Ok((
                text[..idx].trim().to_string(),
                text[idx..].to_string(),
            )),
            None => Err(DecodeError::indentation(
                line.number,
                line.indent + 1,
                "expected ':' after key",
            )),
        }
    }

    /// Parses the block under a `key:` line. No deeper line means an empty
    /// mapping.
    fn parse_nested_block(&mut self, depth: usize, rec: usize) -> Result<Value, DecodeError> {
        let child_depth = match self.peek() {
            Some(line) if line.depth > depth => line.depth,
            _ => return Ok(Value::Object(Map::new())),
        };
        if !self.lenient() && child_depth != depth + 1 {
            let line = &self.lines[self.pos];
            return Err(DecodeError::indentation(
                line.number,
                line.indent + 1,
                "expected exactly one level of indentation",
            ));
        }
        if let Some(line) = self.peek() {
            self.check_recursion(rec, line.number)?;
        }
        Ok(Value::Object(self.parse_mapping(child_depth, rec)?))
    }

    /// Parses an array whose header starts at `after` on `line`.
    fn parse_array(
        &mut self,
        after: &str,
        line: &Line,
        depth: usize,
        rec: usize,
    ) -> Result<Value, DecodeError> {
        self.check_recursion(rec, line.number)?;
        let header = parse_header(after, line.number)?;

        if let Some(delimiter) = header.delimiter {
            return self.parse_tabular(header.count, delimiter, line, depth);
        }
        if header.colon {
            return self.parse_primitive(&header, line, depth);
        }
        self.parse_list(header.count, line, depth, rec)
    }

    fn parse_primitive(
        &mut self,
        header: &Header,
        line: &Line,
        depth: usize,
    ) -> Result<Value, DecodeError> {
        let delimiter = self.options.delimiter.as_char();
        let mut values = Vec::new();

        if !header.rest.is_empty() {
            for cell in split_cells(&header.rest, delimiter, line.number, line.indent + 1)? {
                values.push(self.parse_scalar_token(&cell, line.number, line.indent + 1)?);
            }
        } else if header.count > 0 {
            // Wrapped form: body on the following deeper line(s).
            let body_depth = match self.peek() {
                Some(next) if next.depth > depth => next.depth,
                _ => {
                    if self.lenient() {
                        self.warn(
                            line.number,
                            format!("declared {} values but found none", header.count),
                        );
                        return Ok(Value::Array(values));
                    }
                    return Err(DecodeError::length_mismatch(line.number, header.count, 0));
                }
            };
            if !self.lenient() && body_depth != depth + 1 {
                let next = &self.lines[self.pos];
                return Err(DecodeError::indentation(
                    next.number,
                    next.indent + 1,
                    "expected exactly one level of indentation",
                ));
            }
            while let Some(next) = self.peek() {
                if next.depth < body_depth {
                    break;
                }
                let next = self.advance();
                for cell in split_cells(&next.text, delimiter, next.number, next.indent + 1)? {
                    values.push(self.parse_scalar_token(&cell, next.number, next.indent + 1)?);
                }
            }
        }

        self.check_count(header.count, values.len(), line.number)?;
        Ok(Value::Array(values))
    }

    fn parse_tabular(
        &mut self,
        count: usize,
        delimiter: Delimiter,
        line: &Line,
        depth: usize,
    ) -> Result<Value, DecodeError> {
        let row_depth = match self.peek() {
            Some(next) if next.depth > depth => next.depth,
            _ => {
                return Err(DecodeError::malformed_header(
                    line.number,
                    "tabular array is missing its header row",
                ))
            }
        };
        if !self.lenient() && row_depth != depth + 1 {
            let next = &self.lines[self.pos];
            return Err(DecodeError::indentation(
                next.number,
                next.indent + 1,
                "expected exactly one level of indentation",
            ));
        }

        let header_row = self.advance();
        let mut columns = Vec::new();
        for cell in split_cells(
            &header_row.text,
            delimiter.as_char(),
            header_row.number,
            header_row.indent + 1,
        )? {
            if cell.starts_with('"') {
                let (name, _) = parse_quoted(&cell, header_row.number, header_row.indent + 1)?;
                columns.push(name);
            } else {
                columns.push(cell);
            }
        }

        let mut rows = Vec::new();
        while let Some(next) = self.peek() {
            if next.depth < row_depth {
                break;
            }
            if next.depth > row_depth {
                let (number, indent) = (next.number, next.indent);
                if self.lenient() {
                    self.warn(number, "skipping over-indented line in tabular block");
                    self.pos += 1;
                    continue;
                }
                return Err(DecodeError::indentation(
                    number,
                    indent + 1,
                    "unexpected indentation in tabular block",
                ));
            }
            let row = self.advance();
            let mut cells = Vec::new();
            for cell in split_cells(&row.text, delimiter.as_char(), row.number, row.indent + 1)? {
                cells.push(self.parse_scalar_token(&cell, row.number, row.indent + 1)?);
            }
            if cells.len() != columns.len() {
                if self.lenient() {
                    self.warn(
                        row.number,
                        format!(
                            "row has {} cells, header has {} columns",
                            cells.len(),
                            columns.len()
                        ),
                    );
                    cells.resize(columns.len(), Value::Null);
                } else {
                    return Err(DecodeError::malformed_header(
                        row.number,
                        format!(
                            "row has {} cells, header has {} columns",
                            cells.len(),
                            columns.len()
                        ),
                    ));
                }
            }
            let mut obj = Map::with_capacity(columns.len());
            for (column, cell) in columns.iter().zip(cells) {
                obj.insert(column.clone(), cell);
            }
            rows.push(Value::Object(obj));
        }
        self.check_count(count, rows.len(), line.number)?;
        Ok(Value::Array(rows))
    }

    fn parse_list(
        &mut self,
        count: usize,
        line: &Line,
        depth: usize,
        rec: usize,
    ) -> Result<Value, DecodeError> {
        let mut items = Vec::new();
        let item_depth = match self.peek() {
            Some(next) if next.depth > depth => next.depth,
            _ => {
                self.check_count(count, 0, line.number)?;
                return Ok(Value::Array(items));
            }
        };
        if !self.lenient() && item_depth != depth + 1 {
            let next = &self.lines[self.pos];
            return Err(DecodeError::indentation(
                next.number,
                next.indent + 1,
                "expected exactly one level of indentation",
            ));
        }

        while let Some(next) = self.peek() {
            if next.depth < item_depth {
                break;
            }
            if next.depth > item_depth {
                let (number, indent) = (next.number, next.indent);
                if self.lenient() {
                    self.warn(number, "skipping over-indented line in list");
                    self.pos += 1;
                    continue;
                }
                return Err(DecodeError::indentation(
                    number,
                    indent + 1,
                    "unexpected indentation in list",
                ));
            }
            let item = self.advance();
            if item.text == "-" {
                items.push(self.parse_item_block(item_depth, rec + 1)?);
            } else if let Some(rest) = item.text.strip_prefix("- ") {
                let rest = rest.trim_start();
                if rest.starts_with('[') {
                    items.push(self.parse_array(rest, &item, item_depth, rec + 1)?);
                } else {
                    items.push(self.parse_scalar_token(rest, item.number, item.indent + 1)?);
                }
            } else if self.lenient() {
                self.warn(item.number, "treating line without '-' as a list item");
                items.push(self.parse_scalar_token(&item.text, item.number, item.indent + 1)?);
            } else {
                return Err(DecodeError::indentation(
                    item.number,
                    item.indent + 1,
                    "expected '-' list item",
                ));
            }
        }

        self.check_count(count, items.len(), line.number)?;
        Ok(Value::Array(items))
    }

    /// Parses the mapping block under a bare `-` item. No deeper line means
    /// an empty mapping.
    fn parse_item_block(&mut self, item_depth: usize, rec: usize) -> Result<Value, DecodeError> {
        let child_depth = match self.peek() {
            Some(next) if next.depth > item_depth => next.depth,
            _ => return Ok(Value::Object(Map::new())),
        };
        if !self.lenient() && child_depth != item_depth + 1 {
            let next = &self.lines[self.pos];
            return Err(DecodeError::indentation(
                next.number,
                next.indent + 1,
                "expected exactly one level of indentation",
            ));
        }
        if let Some(next) = self.peek() {
            self.check_recursion(rec, next.number)?;
        }
        Ok(Value::Object(self.parse_mapping(child_depth, rec)?))
    }

    fn check_count(
        &mut self,
        declared: usize,
        actual: usize,
        line: usize,
    ) -> Result<(), DecodeError> {
        if declared == actual {
            return Ok(());
        }
        if self.lenient() {
            self.warn(
                line,
                format!("declared {} elements but found {}", declared, actual),
            );
            Ok(())
        } else {
            Err(DecodeError::length_mismatch(line, declared, actual))
        }
    }

    fn parse_scalar_token(
        &mut self,
        token: &str,
        line: usize,
        column: usize,
    ) -> Result<Value, DecodeError> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(Value::Null);
        }
        if token.starts_with('"') {
            let (s, end) = parse_quoted(token, line, column)?;
            if !token[end..].trim().is_empty() {
                if self.lenient() {
                    self.warn(line, "ignoring text after closing quote");
                } else {
                    return Err(DecodeError::Message(format!(
                        "line {}: unexpected text after closing quote",
                        line
                    )));
                }
            }
            return Ok(Value::String(s));
        }

        match token {
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            "null" => return Ok(Value::Null),
            _ => {}
        }

        let lower = token.to_ascii_lowercase();
        if matches!(lower.as_str(), "true" | "false" | "null" | "none") {
            if self.lenient() {
                self.warn(line, format!("interpreting '{}' as a literal", token));
                return Ok(match lower.as_str() {
                    "true" => Value::Bool(true),
                    "false" => Value::Bool(false),
                    _ => Value::Null,
                });
            }
            return Err(DecodeError::ambiguous_literal(line, column, token));
        }

        if parses_as_number(token) {
            if !token.contains(['.', 'e', 'E']) {
                if let Ok(i) = token.parse::<i64>() {
                    return Ok(Value::Number(Number::Integer(i)));
                }
            }
            let f: f64 = token
                .parse()
                .map_err(|_| DecodeError::Message(format!("invalid number '{}'", token)))?;
            return Ok(Value::Number(Number::Float(f)));
        }

        Ok(Value::String(token.to_string()))
    }
}

/// Whether a bare top-level line reads as a mapping entry rather than a
/// scalar.
fn line_is_entry(text: &str) -> bool {
    if text.starts_with('"') {
        // A quoted key must be followed by ':' or an array header.
        return match parse_quoted(text, 0, 0) {
            Ok((_, end)) => {
                let after = text[end..].trim_start();
                after.starts_with(':') || after.starts_with('[')
            }
            Err(_) => false,
        };
    }
    text.contains([':', '['])
}

/// Deserializes any `T: Deserialize` from an already-decoded [`Value`].
///
/// Integers widen to floats where the target asks for one; enums accept the
/// externally tagged shapes [`to_value`](crate::to_value) produces.
///
/// # Errors
///
/// [`DecodeError::Message`] when the value's shape does not match `T`.
pub fn from_value<T>(value: Value) -> Result<T, DecodeError>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// Decodes TOON text (strict mode) straight into a `T: Deserialize`.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Query {
///     intent: String,
///     limit: i64,
/// }
///
/// let query: Query = toon_codec::from_str("intent: find\nlimit: 5").unwrap();
/// assert_eq!(query.intent, "find");
/// assert_eq!(query.limit, 5);
/// ```
///
/// # Errors
///
/// Any [`DecodeError`] from parsing or from the shape mismatching `T`.
pub fn from_str<T>(input: &str) -> Result<T, DecodeError>
where
    T: DeserializeOwned,
{
    let decoded = decode(input)?;
    from_value(decoded.value)
}

/// Serde deserializer reading from a [`Value`] tree.
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    #[must_use]
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = DecodeError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, DecodeError>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Value::Number(Number::Float(f)) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer {
                iter: arr.into_iter(),
            }),
            Value::Object(map) => visitor.visit_map(MapDeserializer {
                iter: map.into_iter(),
                value: None,
            }),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, DecodeError>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, DecodeError>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, DecodeError>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::String(variant) => visitor.visit_enum(EnumDeserializer {
                variant,
                value: None,
            }),
            Value::Object(map) => {
                let mut iter = map.into_iter();
                let (variant, value) = iter
                    .next()
                    .ok_or_else(|| de::Error::custom("expected a single-entry object for enum"))?;
                if iter.next().is_some() {
                    return Err(de::Error::custom(
                        "expected a single-entry object for enum",
                    ));
                }
                visitor.visit_enum(EnumDeserializer {
                    variant,
                    value: Some(value),
                })
            }
            other => Err(de::Error::custom(format!(
                "expected a string or object for enum, found {:?}",
                other
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
    iter: std::vec::IntoIter<Value>,
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = DecodeError;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, DecodeError>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = DecodeError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, DecodeError>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, DecodeError>
    where
        V: de::DeserializeSeed<'de>,
    {
        let value = self
            .value
            .take()
            .ok_or_else(|| de::Error::custom("value requested before key"))?;
        seed.deserialize(ValueDeserializer::new(value))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = DecodeError;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, VariantDeserializer), DecodeError>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(self.variant.into_deserializer())?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = DecodeError;

    fn unit_variant(self) -> Result<(), DecodeError> {
        match self.value {
            None | Some(Value::Null) => Ok(()),
            Some(other) => Err(de::Error::custom(format!(
                "expected unit variant, found {:?}",
                other
            ))),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value, DecodeError>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(de::Error::custom("expected newtype variant value")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value, DecodeError>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Some(Value::Array(arr)) => visitor.visit_seq(SeqDeserializer {
                iter: arr.into_iter(),
            }),
            _ => Err(de::Error::custom("expected tuple variant array")),
        }
    }

    fn struct_variant<V>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, DecodeError>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Some(Value::Object(map)) => visitor.visit_map(MapDeserializer {
                iter: map.into_iter(),
                value: None,
            }),
            _ => Err(de::Error::custom("expected struct variant object")),
        }
    }
}
