//! TOON encoding.
//!
//! This module holds the array-shape classifier, the encoder that walks a
//! [`Value`] tree into TOON text, and the serde bridge that turns any
//! `T: Serialize` into a [`Value`] first.
//!
//! ## Overview
//!
//! The encoder applies TOON's space-saving renderings, choosing per array:
//!
//! - **Primitive arrays**: all-scalar arrays render as one delimited inline
//!   list, `tags [3]: a, b, c`
//! - **Tabular arrays**: uniform scalar-valued objects render as a header
//!   plus rows under a `key [N,]` marker
//! - **List arrays**: everything else renders as `key [N]` with one `- `
//!   item per element
//! - **Quote minimization**: strings stay unquoted whenever unambiguous
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use toon_codec::{encode, toon};
//!
//! let value = toon!({
//!     "intent": "find",
//!     "tags": ["a", "b", "c"]
//! });
//!
//! let text = encode(&value).unwrap();
//! assert_eq!(text, "intent: find\ntags [3]: a, b, c");
//! ```

use crate::{Delimiter, EncodeError, EncodeOptions, Map, Number, Value};
use serde::{ser, Serialize};

/// The rendering strategy chosen for one array.
///
/// Derived by [`classify`] each time an array is encoded; never stored in
/// the value itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayShape {
    /// All elements are scalars (or the array is empty): one inline
    /// delimited list.
    Primitive,
    /// All elements are objects sharing the same keys in the same order,
    /// with only scalar values: header plus rows.
    Tabular,
    /// Anything else: one indented block per element.
    List,
}

/// Decides how an array should be rendered.
///
/// Objects qualify for the tabular form only when their key *order* matches
/// exactly, not just the key set; same keys in a different order fall back to
/// the list form rather than emit misleading column headers. An array with a
/// single tabular-eligible element still uses the tabular form.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{classify, toon, ArrayShape};
///
/// let rows = toon!([{"id": 1, "name": "Alice"}, {"id": 2, "name": "Bob"}]);
/// assert_eq!(classify(rows.as_array().unwrap()), ArrayShape::Tabular);
///
/// let scalars = toon!([1, 2, 3]);
/// assert_eq!(classify(scalars.as_array().unwrap()), ArrayShape::Primitive);
/// ```
#[must_use]
pub fn classify(elements: &[Value]) -> ArrayShape {
    if elements.is_empty() {
        return ArrayShape::Primitive;
    }

    if elements.iter().all(Value::is_scalar) {
        return ArrayShape::Primitive;
    }

    if let Some(columns) = tabular_columns(elements) {
        if !columns.is_empty() {
            return ArrayShape::Tabular;
        }
    }

    ArrayShape::List
}

/// The shared key list if every element is an object with identical keys in
/// identical order and only scalar values.
fn tabular_columns(elements: &[Value]) -> Option<Vec<&str>> {
    let first = match elements.first()? {
        Value::Object(obj) => obj,
        _ => return None,
    };
    let columns: Vec<&str> = first.keys().map(String::as_str).collect();

    for element in elements {
        let obj = match element {
            Value::Object(obj) => obj,
            _ => return None,
        };
        if obj.len() != columns.len() {
            return None;
        }
        // Key order must match exactly, and every cell must be scalar.
        for (column, (key, value)) in columns.iter().zip(obj.iter()) {
            if key != column || !value.is_scalar() {
                return None;
            }
        }
    }

    Some(columns)
}

/// Whether a bare string would be misread by the decoder and therefore needs
/// quoting. The triggers are exactly the documented set: empty; contains the
/// active delimiter; contains a newline or carriage return; contains `"` or
/// `\`; matches a literal keyword in any letter case; leading/trailing
/// whitespace; parses as a number. Positions where a bare string could be
/// mistaken for structure (list items, top-level scalars) add their own
/// narrow guards on top.
pub(crate) fn needs_quoting(s: &str, delimiter: Delimiter) -> bool {
    s.is_empty()
        || s.contains(delimiter.as_char())
        || s.contains('\n')
        || s.contains('\r')
        || s.contains('"')
        || s.contains('\\')
        || is_literal_like(s)
        || s.trim() != s
        || parses_as_number(s)
}

/// Whether a bare token collides with a literal keyword. Case variants
/// (`True`, `NONE`, ...) count too: the decoder refuses them as ambiguous,
/// so a string that spells one must be quoted to survive a round trip.
pub(crate) fn is_literal_like(s: &str) -> bool {
    s.eq_ignore_ascii_case("true")
        || s.eq_ignore_ascii_case("false")
        || s.eq_ignore_ascii_case("null")
        || s.eq_ignore_ascii_case("none")
}

/// Keys quote on everything a value would, plus the characters that end a
/// key token (`:`) or start an array marker (`[`).
pub(crate) fn needs_quoting_key(s: &str, delimiter: Delimiter) -> bool {
    needs_quoting(s, delimiter) || s.contains(':') || s.contains('[')
}

/// Whether a bare token reads as a numeric literal. The leading-character
/// guard keeps words like `nan` and `inf` (which `f64::from_str` accepts)
/// from counting as numbers.
pub(crate) fn parses_as_number(s: &str) -> bool {
    let looks_numeric = s
        .chars()
        .next()
        .is_some_and(|ch| ch.is_ascii_digit() || ch == '-' || ch == '+' || ch == '.');
    looks_numeric && s.parse::<f64>().map(|f| f.is_finite()).unwrap_or(false)
}

/// Appends `s` as a quoted string with the escape set shared with the
/// decoder.
pub(crate) fn push_quoted(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

struct Encoder<'a> {
    lines: Vec<String>,
    options: &'a EncodeOptions,
}

impl<'a> Encoder<'a> {
    fn new(options: &'a EncodeOptions) -> Self {
        Encoder {
            lines: Vec::new(),
            options,
        }
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }

    fn indent(&self, depth: usize) -> String {
        " ".repeat(depth * self.options.indent)
    }

    fn check_depth(&self, depth: usize) -> Result<(), EncodeError> {
        if depth > self.options.max_depth {
            Err(EncodeError::CyclicStructure {
                max_depth: self.options.max_depth,
            })
        } else {
            Ok(())
        }
    }

    fn scalar_text(&self, value: &Value) -> Result<String, EncodeError> {
        let mut out = String::new();
        match value {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => {
                if !n.is_finite() {
                    return Err(EncodeError::unsupported("non-finite float"));
                }
                out.push_str(&n.to_string());
            }
            Value::String(s) => {
                if needs_quoting(s, self.options.delimiter) {
                    push_quoted(&mut out, s);
                } else {
                    out.push_str(s);
                }
            }
            Value::Array(_) | Value::Object(_) => {
                // callers only pass scalars here
                return Err(EncodeError::unsupported("composite value in scalar position"));
            }
        }
        Ok(out)
    }

    /// Like [`Encoder::scalar_text`], with an extra quoting guard for
    /// strings that would otherwise be read as structure in this position.
    fn scalar_text_guarded(
        &self,
        value: &Value,
        misreads: fn(&str) -> bool,
    ) -> Result<String, EncodeError> {
        if let Value::String(s) = value {
            if !needs_quoting(s, self.options.delimiter) && misreads(s) {
                let mut out = String::new();
                push_quoted(&mut out, s);
                return Ok(out);
            }
        }
        self.scalar_text(value)
    }

    fn key_text(&self, key: &str) -> String {
        if needs_quoting_key(key, self.options.delimiter) {
            let mut out = String::new();
            push_quoted(&mut out, key);
            out
        } else {
            key.to_string()
        }
    }

    fn write_object(&mut self, obj: &Map, depth: usize) -> Result<(), EncodeError> {
        self.check_depth(depth)?;
        for (key, value) in obj.iter() {
            let key = self.key_text(key);
            match value {
                Value::Object(nested) => {
                    self.lines.push(format!("{}{}:", self.indent(depth), key));
                    self.write_object(nested, depth + 1)?;
                }
                Value::Array(arr) => {
                    self.write_array(Some(&key), arr, depth)?;
                }
                scalar => {
                    let text = self.scalar_text(scalar)?;
                    self.lines
                        .push(format!("{}{}: {}", self.indent(depth), key, text));
                }
            }
        }
        Ok(())
    }

    /// Renders one array. `key` is the already-quoted key text, or `None`
    /// for bare headers (top-level arrays and elements of list arrays).
    fn write_array(
        &mut self,
        key: Option<&str>,
        arr: &[Value],
        depth: usize,
    ) -> Result<(), EncodeError> {
        self.check_depth(depth)?;
        let prefix = match key {
            Some(k) => format!("{} ", k),
            None => String::new(),
        };

        match classify(arr) {
            ArrayShape::Primitive => self.write_primitive(&prefix, arr, depth),
            ArrayShape::Tabular => self.write_tabular(&prefix, arr, depth),
            ArrayShape::List => self.write_list(&prefix, arr, depth),
        }
    }

    fn write_primitive(
        &mut self,
        prefix: &str,
        arr: &[Value],
        depth: usize,
    ) -> Result<(), EncodeError> {
        let indent = self.indent(depth);
        if arr.is_empty() {
            self.lines.push(format!("{}{}[0]:", indent, prefix));
            return Ok(());
        }

        let cells: Vec<String> = arr
            .iter()
            .map(|v| self.scalar_text(v))
            .collect::<Result<_, _>>()?;
        let body = cells.join(self.options.delimiter.separator());
        let inline = format!("{}{}[{}]: {}", indent, prefix, arr.len(), body);

        if inline.chars().count() <= self.options.wrap_width {
            self.lines.push(inline);
        } else {
            // Too wide: header alone, body on one line at the next depth.
            self.lines
                .push(format!("{}{}[{}]:", indent, prefix, arr.len()));
            self.lines.push(format!("{}{}", self.indent(depth + 1), body));
        }
        Ok(())
    }

    fn write_tabular(
        &mut self,
        prefix: &str,
        arr: &[Value],
        depth: usize,
    ) -> Result<(), EncodeError> {
        let columns = tabular_columns(arr).unwrap_or_default();
        let separator = self.options.delimiter.separator();

        self.lines.push(format!(
            "{}{}[{}{}]",
            self.indent(depth),
            prefix,
            arr.len(),
            self.options.delimiter.as_char()
        ));

        let row_indent = self.indent(depth + 1);
        let header: Vec<String> = columns.iter().map(|c| self.key_text(c)).collect();
        self.lines
            .push(format!("{}{}", row_indent, header.join(separator)));

        for element in arr {
            let obj = match element {
                Value::Object(obj) => obj,
                _ => unreachable!("classify guarantees tabular elements are objects"),
            };
            let cells: Vec<String> = columns
                .iter()
                .map(|c| self.scalar_text(obj.get(c).unwrap_or(&Value::Null)))
                .collect::<Result<_, _>>()?;
            self.lines
                .push(format!("{}{}", row_indent, cells.join(separator)));
        }
        Ok(())
    }

    fn write_list(&mut self, prefix: &str, arr: &[Value], depth: usize) -> Result<(), EncodeError> {
        self.lines
            .push(format!("{}{}[{}]", self.indent(depth), prefix, arr.len()));
        let item_indent = self.indent(depth + 1);

        for element in arr {
            match element {
                Value::Object(obj) => {
                    self.lines.push(format!("{}-", item_indent));
                    self.write_object(obj, depth + 2)?;
                }
                Value::Array(nested) => {
                    // Bare header spliced onto the dash line; children were
                    // already emitted at depth + 2 by the recursive call.
                    let at = self.lines.len();
                    self.write_array(None, nested, depth + 1)?;
                    let header = self.lines[at].trim_start().to_string();
                    self.lines[at] = format!("{}- {}", item_indent, header);
                }
                scalar => {
                    // A bare item starting with `[` would read as an array
                    // header.
                    let text = self.scalar_text_guarded(scalar, |s| s.starts_with('['))?;
                    self.lines.push(format!("{}- {}", item_indent, text));
                }
            }
        }
        Ok(())
    }
}

/// Renders a [`Value`] to TOON text with the given options.
///
/// Top-level objects render as entry lines, top-level arrays as a bare
/// (keyless) array block, top-level scalars as a single line.
///
/// # Errors
///
/// [`EncodeError::UnsupportedType`] for non-finite floats;
/// [`EncodeError::CyclicStructure`] when nesting exceeds
/// [`EncodeOptions::max_depth`].
pub fn encode_with_options(value: &Value, options: &EncodeOptions) -> Result<String, EncodeError> {
    let mut encoder = Encoder::new(options);
    match value {
        Value::Object(obj) => encoder.write_object(obj, 0)?,
        Value::Array(arr) => encoder.write_array(None, arr, 0)?,
        scalar => {
            // A bare top-level line containing a colon or a bracket would
            // read as a mapping entry or an array header.
            let text =
                encoder.scalar_text_guarded(scalar, |s| s.contains(':') || s.contains('['))?;
            encoder.lines.push(text);
        }
    }
    Ok(encoder.finish())
}

/// Renders a [`Value`] to TOON text with default options.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{encode, toon};
///
/// let value = toon!({ "name": "Alice", "age": 30 });
/// assert_eq!(encode(&value).unwrap(), "name: Alice\nage: 30");
/// ```
///
/// # Errors
///
/// See [`encode_with_options`].
pub fn encode(value: &Value) -> Result<String, EncodeError> {
    encode_with_options(value, &EncodeOptions::default())
}

/// Converts any `T: Serialize` into a [`Value`].
///
/// This is the documented conversion boundary for host types: structs and
/// maps become objects, sequences/tuples/sets become arrays in iteration
/// order, chrono timestamps become ISO-8601 strings (through their serde
/// form), and options become the inner value or null.
///
/// # Errors
///
/// [`EncodeError::UnsupportedType`] for values with no TOON representation
/// (non-finite floats, maps with non-string keys).
pub fn to_value<T>(value: &T) -> Result<Value, EncodeError>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serde serializer producing a [`Value`] instead of text.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeValueMap {
    map: Map,
    current_key: Option<String>,
}

/// Tuple/struct variants collect into a sequence or map nested under the
/// variant name (externally tagged, the serde_json convention).
pub struct SerializeTagged<Inner> {
    variant: &'static str,
    inner: Inner,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = EncodeError;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTagged<SerializeVec>;
    type SerializeMap = SerializeValueMap;
    type SerializeStruct = SerializeValueMap;
    type SerializeStructVariant = SerializeTagged<SerializeValueMap>;

    fn serialize_bool(self, v: bool) -> Result<Value, EncodeError> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, EncodeError> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Value, EncodeError> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Value, EncodeError> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Value, EncodeError> {
        Ok(Value::Number(Number::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, EncodeError> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<Value, EncodeError> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<Value, EncodeError> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<Value, EncodeError> {
        if v <= i64::MAX as u64 {
            Ok(Value::Number(Number::Integer(v as i64)))
        } else {
            Ok(Value::Number(Number::Float(v as f64)))
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value, EncodeError> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<Value, EncodeError> {
        if !v.is_finite() {
            return Err(EncodeError::unsupported("non-finite float"));
        }
        Ok(Value::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value, EncodeError> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, EncodeError> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, EncodeError> {
        Ok(Value::Array(
            v.iter()
                .map(|&b| Value::Number(Number::Integer(b as i64)))
                .collect(),
        ))
    }

    fn serialize_none(self) -> Result<Value, EncodeError> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value, EncodeError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, EncodeError> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, EncodeError> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, EncodeError> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, EncodeError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, EncodeError>
    where
        T: ?Sized + Serialize,
    {
        let mut map = Map::new();
        map.insert(variant.to_string(), value.serialize(ValueSerializer)?);
        Ok(Value::Object(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec, EncodeError> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec, EncodeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeVec, EncodeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant, EncodeError> {
        Ok(SerializeTagged {
            variant,
            inner: SerializeVec {
                vec: Vec::with_capacity(len),
            },
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeValueMap, EncodeError> {
        Ok(SerializeValueMap {
            map: Map::new(),
            current_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<SerializeValueMap, EncodeError> {
        self.serialize_map(None)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, EncodeError> {
        Ok(SerializeTagged {
            variant,
            inner: SerializeValueMap {
                map: Map::new(),
                current_key: None,
            },
        })
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), EncodeError>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, EncodeError> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), EncodeError>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, EncodeError> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), EncodeError>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, EncodeError> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTupleVariant for SerializeTagged<SerializeVec> {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), EncodeError>
    where
        T: ?Sized + Serialize,
    {
        self.inner.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, EncodeError> {
        let mut map = Map::new();
        map.insert(self.variant.to_string(), Value::Array(self.inner.vec));
        Ok(Value::Object(map))
    }
}

impl ser::SerializeMap for SerializeValueMap {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), EncodeError>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            other => Err(EncodeError::unsupported(format!(
                "map key must be a string, found {:?}",
                other
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), EncodeError>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| EncodeError::Message("serialize_value before serialize_key".into()))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, EncodeError> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeValueMap {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), EncodeError>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, EncodeError> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeTagged<SerializeValueMap> {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), EncodeError>
    where
        T: ?Sized + Serialize,
    {
        self.inner.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, EncodeError> {
        let mut map = Map::new();
        map.insert(self.variant.to_string(), Value::Object(self.inner.map));
        Ok(Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toon;

    #[test]
    fn test_classify_primitive() {
        assert_eq!(classify(&[]), ArrayShape::Primitive);
        let arr = toon!([1, "x", true, null]);
        assert_eq!(classify(arr.as_array().unwrap()), ArrayShape::Primitive);
    }

    #[test]
    fn test_classify_tabular() {
        let arr = toon!([
            {"name": "Alice", "role": "admin"},
            {"name": "Bob", "role": "user"}
        ]);
        assert_eq!(classify(arr.as_array().unwrap()), ArrayShape::Tabular);

        // A single eligible element is still tabular.
        let single = toon!([{"id": 1}]);
        assert_eq!(classify(single.as_array().unwrap()), ArrayShape::Tabular);
    }

    #[test]
    fn test_classify_key_order_mismatch_is_list() {
        let mut first = Map::new();
        first.insert("a".into(), Value::from(1));
        first.insert("b".into(), Value::from(2));
        let mut second = Map::new();
        second.insert("b".into(), Value::from(2));
        second.insert("a".into(), Value::from(1));

        let arr = vec![Value::Object(first), Value::Object(second)];
        assert_eq!(classify(&arr), ArrayShape::List);
    }

    #[test]
    fn test_classify_nested_value_is_list() {
        let arr = toon!([{"id": 1, "tags": ["x"]}, {"id": 2, "tags": ["y"]}]);
        assert_eq!(classify(arr.as_array().unwrap()), ArrayShape::List);

        let mixed = toon!([1, {"a": 2}]);
        assert_eq!(classify(mixed.as_array().unwrap()), ArrayShape::List);
    }

    #[test]
    fn test_quoting_triggers() {
        let d = Delimiter::Comma;
        assert!(needs_quoting("", d));
        assert!(needs_quoting("a,b", d));
        assert!(needs_quoting("line\nbreak", d));
        assert!(needs_quoting("true", d));
        assert!(needs_quoting("null", d));
        // Case variants of the literals decode as ambiguous, so they quote.
        assert!(needs_quoting("True", d));
        assert!(needs_quoting("FALSE", d));
        assert!(needs_quoting("Null", d));
        assert!(needs_quoting("None", d));
        assert!(needs_quoting("none", d));
        assert!(needs_quoting(" padded", d));
        assert!(needs_quoting("padded ", d));
        assert!(needs_quoting("42", d));
        assert!(needs_quoting("-3.5", d));
        assert!(needs_quoting("1e6", d));
        assert!(needs_quoting("say \"hi\"", d));

        assert!(!needs_quoting("hello world", d));
        assert!(!needs_quoting("truest", d));
        assert!(!needs_quoting("nonetheless", d));
        assert!(!needs_quoting("a:b", d));
        assert!(!needs_quoting("[3]", d));
        assert!(!needs_quoting("- item", d));
        assert!(!needs_quoting("2nd place", d));
        assert!(!needs_quoting("a|b", d));
        // Pipe delimiter flips that last one.
        assert!(needs_quoting("a|b", Delimiter::Pipe));
        assert!(!needs_quoting("a,b", Delimiter::Pipe));
    }

    #[test]
    fn test_encode_nested_object() {
        let value = toon!({
            "intent": "find",
            "entities": { "name": "Alice", "status": "active" }
        });
        assert_eq!(
            encode(&value).unwrap(),
            "intent: find\nentities:\n  name: Alice\n  status: active"
        );
    }

    #[test]
    fn test_encode_tabular() {
        let value = toon!({
            "contacts": [
                {"name": "John", "email": "john@x.com"},
                {"name": "Sarah", "email": "sarah@x.com"}
            ]
        });
        assert_eq!(
            encode(&value).unwrap(),
            "contacts [2,]\n  name, email\n  John, john@x.com\n  Sarah, sarah@x.com"
        );
    }

    #[test]
    fn test_encode_primitive_inline() {
        let value = toon!({ "tags": ["a", "b", "c"] });
        assert_eq!(encode(&value).unwrap(), "tags [3]: a, b, c");
    }

    #[test]
    fn test_encode_empty_array() {
        let value = toon!({ "tags": [] });
        assert_eq!(encode(&value).unwrap(), "tags [0]:");
    }

    #[test]
    fn test_encode_list_array() {
        let value = toon!({
            "items": [1, {"a": 2}]
        });
        assert_eq!(encode(&value).unwrap(), "items [2]\n  - 1\n  -\n    a: 2");
    }

    #[test]
    fn test_encode_positional_quote_guards() {
        // In value position a leading bracket stays bare.
        let value = toon!({ "msg": "[ok]" });
        assert_eq!(encode(&value).unwrap(), "msg: [ok]");

        // As a list item it would read as an array header.
        let value = toon!({ "items": ["[ok]", {"a": 1}] });
        assert_eq!(
            encode(&value).unwrap(),
            "items [2]\n  - \"[ok]\"\n  -\n    a: 1"
        );

        // A top-level string with a colon would read as a mapping entry.
        let value = Value::from("note: read me");
        assert_eq!(encode(&value).unwrap(), "\"note: read me\"");

        // So would one with a bracket anywhere, via the array-header rule.
        let value = Value::from("a[b");
        assert_eq!(encode(&value).unwrap(), "\"a[b\"");
    }

    #[test]
    fn test_encode_wrap_policy() {
        let value = toon!({ "nums": [1, 2, 3] });
        let options = EncodeOptions::new().with_wrap_width(10);
        assert_eq!(
            encode_with_options(&value, &options).unwrap(),
            "nums [3]:\n  1, 2, 3"
        );
    }

    #[test]
    fn test_encode_rejects_non_finite() {
        let mut map = Map::new();
        map.insert("bad".to_string(), Value::Number(Number::Float(f64::NAN)));
        assert!(matches!(
            encode(&Value::Object(map)),
            Err(EncodeError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_encode_depth_guard() {
        let mut value = Value::from(1);
        for _ in 0..100 {
            let mut map = Map::new();
            map.insert("deep".to_string(), value);
            value = Value::Object(map);
        }
        assert!(matches!(
            encode(&value),
            Err(EncodeError::CyclicStructure { .. })
        ));
    }

    #[test]
    fn test_to_value_struct() {
        #[derive(serde::Serialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("x"), Some(&Value::from(1)));
        assert_eq!(obj.get("y"), Some(&Value::from(2)));
    }

    #[test]
    fn test_to_value_rejects_nan() {
        assert!(matches!(
            to_value(&f64::NAN),
            Err(EncodeError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_to_value_tuple_and_set() {
        let value = to_value(&(1, "two", 3.0)).unwrap();
        assert_eq!(value, toon!([1, "two", 3.0]));

        let set: std::collections::BTreeSet<&str> = ["b", "a"].into_iter().collect();
        let value = to_value(&set).unwrap();
        assert_eq!(value, toon!(["a", "b"]));
    }
}
