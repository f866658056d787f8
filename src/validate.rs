//! Structural validation without decoding.
//!
//! [`validate`] runs the same lexical checks as the strict decoder, line by
//! line, without building a [`Value`](crate::Value) tree, and keeps going
//! after the first problem so a whole document can be checked in one pass.
//! On top of the hard errors it flags style issues that decode fine but
//! suggest sloppy output: unnecessary quoting, a tabular row written with a
//! different delimiter than its block declared, and trailing whitespace.
//!
//! The intended use is triage of model-generated text: cheap to run, every
//! finding carries a line number, and [`ValidationReport::is_valid`] answers
//! "would a strict decode accept this" before committing to one.
//!
//! ```rust
//! use toon_codec::validate;
//!
//! let report = validate("name: \"Alice\"\ntags [2]: a, b");
//! assert!(report.is_valid());
//! assert_eq!(report.warnings.len(), 1); // "Alice" did not need quotes
//! ```

use crate::de::{parse_quoted, split_cells};
use crate::ser::needs_quoting;
use crate::{DecodeOptions, Delimiter, Diagnostic};

/// Everything [`validate`] found, split into hard errors (a strict decode
/// would fail) and style warnings (it would succeed).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationReport {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl ValidationReport {
    /// True when no hard errors were found; warnings do not count.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates TOON text with default options.
#[must_use]
pub fn validate(input: &str) -> ValidationReport {
    validate_with_options(input, &DecodeOptions::default())
}

/// Validates TOON text against the given decode options (indent unit and
/// configured delimiter).
#[must_use]
pub fn validate_with_options(input: &str, options: &DecodeOptions) -> ValidationReport {
    Validator::new(options).run(input)
}

enum BlockKind {
    Tabular {
        delimiter: Delimiter,
        columns: usize,
        declared: usize,
        rows: usize,
        header_seen: bool,
    },
    List {
        declared: usize,
        items: usize,
    },
    WrappedPrimitive {
        declared: usize,
        cells: usize,
    },
}

struct Block {
    depth: usize,
    line: usize,
    kind: BlockKind,
}

struct Validator<'a> {
    options: &'a DecodeOptions,
    report: ValidationReport,
    stack: Vec<Block>,
}

impl<'a> Validator<'a> {
    fn new(options: &'a DecodeOptions) -> Self {
        Validator {
            options,
            report: ValidationReport::default(),
            stack: Vec::new(),
        }
    }

    fn error(&mut self, line: usize, message: impl Into<String>) {
        self.report.errors.push(Diagnostic::new(line, message));
    }

    fn warning(&mut self, line: usize, message: impl Into<String>) {
        self.report.warnings.push(Diagnostic::new(line, message));
    }

    fn run(mut self, input: &str) -> ValidationReport {
        let unit = self.options.indent.max(1);
        for (i, raw) in input.lines().enumerate() {
            let number = i + 1;
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            if raw.trim().is_empty() {
                continue;
            }
            if raw != raw.trim_end() {
                self.warning(number, "trailing whitespace");
            }

            let indent = raw.len() - raw.trim_start_matches(' ').len();
            if raw[indent..].starts_with('\t') {
                self.error(number, "tab character in indentation");
                continue;
            }
            if indent % unit != 0 {
                self.error(
                    number,
                    format!("indent of {} spaces is not a multiple of {}", indent, unit),
                );
            }
            let depth = indent / unit;
            let text = raw[indent..].trim_end();

            self.close_blocks(depth);
            self.check_line(text, number, depth);
        }
        self.close_blocks(0);
        self.report
    }

    /// Pops and length-checks every block the current line has stepped out
    /// of.
    fn close_blocks(&mut self, depth: usize) {
        while let Some(top) = self.stack.last() {
            if depth > top.depth {
                break;
            }
            let block = match self.stack.pop() {
                Some(block) => block,
                None => break,
            };
            self.finalize(block);
        }
    }

    fn finalize(&mut self, block: Block) {
        match block.kind {
            BlockKind::Tabular {
                declared,
                rows,
                header_seen,
                ..
            } => {
                if !header_seen {
                    self.error(block.line, "tabular array is missing its header row");
                } else if rows != declared {
                    self.error(
                        block.line,
                        format!("declared {} rows but found {}", declared, rows),
                    );
                }
            }
            BlockKind::List { declared, items } => {
                if items != declared {
                    self.error(
                        block.line,
                        format!("declared {} elements but found {}", declared, items),
                    );
                }
            }
            BlockKind::WrappedPrimitive { declared, cells } => {
                if cells != declared {
                    self.error(
                        block.line,
                        format!("declared {} values but found {}", declared, cells),
                    );
                }
            }
        }
    }

    fn check_line(&mut self, text: &str, number: usize, depth: usize) {
        // Lines one level under an open tabular or wrapped-primitive block
        // are data, not entries.
        if let Some(top) = self.stack.last_mut() {
            if depth == top.depth + 1 {
                match &mut top.kind {
                    BlockKind::Tabular { .. } => {
                        self.check_tabular_line(text, number);
                        return;
                    }
                    BlockKind::WrappedPrimitive { cells, .. } => {
                        match split_cells(text, self.options.delimiter.as_char(), number, 1) {
                            Ok(parts) => {
                                *cells += parts.len();
                                for part in parts {
                                    self.check_scalar(&part, number);
                                }
                            }
                            Err(_) => self.error(number, "unterminated quoted string"),
                        }
                        return;
                    }
                    BlockKind::List { items, .. } => {
                        if text == "-" || text.starts_with("- ") {
                            *items += 1;
                            let rest = text[1..].trim_start().to_string();
                            if rest.starts_with('[') {
                                self.check_array_header(&rest, number, depth);
                            } else if !rest.is_empty() {
                                self.check_scalar(&rest, number);
                            }
                            return;
                        }
                        self.error(number, "expected '-' list item");
                        return;
                    }
                }
            }
        }

        self.check_entry(text, number, depth);
    }

    fn check_tabular_line(&mut self, text: &str, number: usize) {
        let (delimiter, expected_columns, header_seen) = match self.stack.last() {
            Some(Block {
                kind:
                    BlockKind::Tabular {
                        delimiter,
                        columns,
                        header_seen,
                        ..
                    },
                ..
            }) => (*delimiter, *columns, *header_seen),
            _ => return,
        };

        let cells = match split_cells(text, delimiter.as_char(), number, 1) {
            Ok(cells) => cells,
            Err(_) => {
                self.error(number, "unterminated quoted string");
                return;
            }
        };

        if !header_seen {
            if let Some(Block {
                kind:
                    BlockKind::Tabular {
                        columns,
                        header_seen,
                        ..
                    },
                ..
            }) = self.stack.last_mut()
            {
                *columns = cells.len();
                *header_seen = true;
            }
            return;
        }

        if cells.len() != expected_columns {
            if self.row_uses_other_delimiter(text, delimiter, expected_columns, number) {
                if let Some(Block {
                    kind: BlockKind::Tabular { rows, .. },
                    ..
                }) = self.stack.last_mut()
                {
                    *rows += 1;
                }
                return;
            }
            self.error(
                number,
                format!(
                    "row has {} cells, header has {} columns",
                    cells.len(),
                    expected_columns
                ),
            );
        }
        if let Some(Block {
            kind: BlockKind::Tabular { rows, .. },
            ..
        }) = self.stack.last_mut()
        {
            *rows += 1;
        }
        for cell in cells {
            self.check_scalar(&cell, number);
        }
    }

    /// Detects a row written with a different delimiter than the block
    /// declared; warned, not errored, since the intent is recoverable.
    fn row_uses_other_delimiter(
        &mut self,
        text: &str,
        declared: Delimiter,
        columns: usize,
        number: usize,
    ) -> bool {
        for other in [Delimiter::Comma, Delimiter::Tab, Delimiter::Pipe] {
            if other == declared {
                continue;
            }
            if let Ok(cells) = split_cells(text, other.as_char(), number, 1) {
                if cells.len() == columns {
                    self.warning(
                        number,
                        format!(
                            "row uses '{}' but the block declared '{}'",
                            other.as_char().escape_default(),
                            declared.as_char().escape_default()
                        ),
                    );
                    return true;
                }
            }
        }
        false
    }

    fn check_entry(&mut self, text: &str, number: usize, depth: usize) {
        let after = if text.starts_with('"') {
            match parse_quoted(text, number, 1) {
                Ok((_, end)) => text[end..].trim_start().to_string(),
                Err(_) => {
                    self.error(number, "unterminated quoted string");
                    return;
                }
            }
        } else {
            match text.find([':', '[']) {
                Some(idx) => text[idx..].to_string(),
                None => {
                    // A bare line is only a scalar at the top level.
                    if depth == 0 {
                        self.check_scalar(text, number);
                    } else {
                        self.error(number, "expected ':' after key");
                    }
                    return;
                }
            }
        };

        if after.starts_with('[') {
            self.check_array_header(&after, number, depth);
        } else if let Some(rest) = after.strip_prefix(':') {
            let rest = rest.trim();
            if !rest.is_empty() {
                self.check_scalar(rest, number);
            }
        } else {
            self.error(number, "expected ':' or an array header after key");
        }
    }

    fn check_array_header(&mut self, after: &str, number: usize, depth: usize) {
        let header = match crate::de::parse_header(after, number) {
            Ok(header) => header,
            Err(err) => {
                self.error(number, err.to_string());
                return;
            }
        };

        if let Some(delimiter) = header.delimiter {
            self.stack.push(Block {
                depth,
                line: number,
                kind: BlockKind::Tabular {
                    delimiter,
                    columns: 0,
                    declared: header.count,
                    rows: 0,
                    header_seen: false,
                },
            });
        } else if header.colon {
            if !header.rest.is_empty() {
                match split_cells(&header.rest, self.options.delimiter.as_char(), number, 1) {
                    Ok(cells) => {
                        if cells.len() != header.count {
                            self.error(
                                number,
                                format!(
                                    "declared {} values but found {}",
                                    header.count,
                                    cells.len()
                                ),
                            );
                        }
                        for cell in cells {
                            self.check_scalar(&cell, number);
                        }
                    }
                    Err(_) => self.error(number, "unterminated quoted string"),
                }
            } else if header.count > 0 {
                self.stack.push(Block {
                    depth,
                    line: number,
                    kind: BlockKind::WrappedPrimitive {
                        declared: header.count,
                        cells: 0,
                    },
                });
            }
        } else {
            self.stack.push(Block {
                depth,
                line: number,
                kind: BlockKind::List {
                    declared: header.count,
                    items: 0,
                },
            });
        }
    }

    fn check_scalar(&mut self, token: &str, number: usize) {
        let token = token.trim();
        if token.starts_with('"') {
            match parse_quoted(token, number, 1) {
                Ok((content, end)) => {
                    if !token[end..].trim().is_empty() {
                        self.error(number, "unexpected text after closing quote");
                    } else if !needs_quoting(&content, self.options.delimiter) {
                        self.warning(
                            number,
                            format!("unnecessary quotes around \"{}\"", content),
                        );
                    }
                }
                Err(_) => self.error(number, "unterminated quoted string"),
            }
            return;
        }

        let lower = token.to_ascii_lowercase();
        if matches!(lower.as_str(), "true" | "false" | "null" | "none")
            && !matches!(token, "true" | "false" | "null")
        {
            self.error(
                number,
                format!("ambiguous literal '{}' (did you mean '{}'?)", token, lower),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_document() {
        let input = "intent: find\nentities:\n  name: Alice\ncontacts [2,]\n  name, email\n  a, a@x.com\n  b, b@x.com";
        let report = validate(input);
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_tab_indentation_is_error() {
        let report = validate("a:\n\tb: 1");
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].line, 2);
    }

    #[test]
    fn test_length_mismatches() {
        let report = validate("tags [3]: a, b");
        assert!(!report.is_valid());

        let report = validate("rows [2,]\n  a, b\n  1, 2");
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].line, 1);

        let report = validate("items [1]\n  - 1\n  - 2");
        assert!(!report.is_valid());
    }

    #[test]
    fn test_unnecessary_quotes_warning() {
        let report = validate("name: \"Alice\"");
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("unnecessary quotes"));

        // These quotes are load-bearing, case variants of the literals
        // included.
        let report = validate("name: \"true\"\ncsv: \"a, b\"\nflag: \"True\"\nempty: \"None\"");
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_trailing_whitespace_warning() {
        let report = validate("a: 1  \nb: 2");
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].line, 1);
    }

    #[test]
    fn test_delimiter_drift_warning() {
        let report = validate("rows [2,]\n  a, b\n  1, 2\n  3| 4");
        assert!(report.is_valid());
        assert!(report
            .warnings
            .iter()
            .any(|w| w.line == 4 && w.message.contains("declared")));
    }

    #[test]
    fn test_malformed_header_is_error() {
        let report = validate("a [x]: 1");
        assert!(!report.is_valid());

        let report = validate("a [2;]: 1, 2");
        assert!(!report.is_valid());
    }

    #[test]
    fn test_ambiguous_literal_is_error() {
        let report = validate("a: True\nb: None");
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn test_unterminated_quote_is_error() {
        let report = validate("a: \"oops");
        assert!(!report.is_valid());
    }

    #[test]
    fn test_collects_multiple_errors() {
        let report = validate("a: True\nb [9]: 1, 2\nc: \"oops");
        assert_eq!(report.errors.len(), 3);
    }
}
