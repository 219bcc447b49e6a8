//! Query-literal formatting and parsing for values.
//!
//! The formatter renders the values that can live inside composite record
//! ids. The parser reads the same grammar back, so any id built in this crate
//! survives a trip through its textual form.
//!
//! ```text
//! value  := NONE | integer | string | array | object | thing
//! array  := "[" (value ("," value)*)? "]"
//! object := "{" (key ":" value ("," key ":" value)*)? "}"
//! string := '"' chars '"' | "'" chars "'" | `chars`
//! thing  := (ident | ⟨chars⟩) (":" id)?
//! ```
//!
//! An angle-delimited token is always an identifier, and a backtick token on
//! its own is a string. Table references that would read as something else
//! (`NONE`, digits) are written angle-delimited.

use crate::codec::reader::Reader;
use crate::error::ThingError;
use crate::limits::MAX_LITERAL_DEPTH;
use crate::model::escape::{
    auto_escape, auto_quote, delimit, is_numeric, is_simple, undelimit, Delimiter,
};
use crate::model::{IdValue, Object, RecordId, Table, Thing, Value};

/// Null literal token.
pub const NONE: &str = "NONE";

/// Alternate null token accepted by the parser.
const NULL: &str = "NULL";

/// Delimiter choices for the literal formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralOptions {
    /// Delimiter for text written directly after `table:`.
    pub top_level: Delimiter,
    /// Delimiter for non-simple strings inside arrays and objects.
    ///
    /// [`parse_value`] reads angle-delimited tokens as table references, so
    /// only backtick output reads back as a string.
    pub nested: Delimiter,
    /// Delimiter for non-simple object keys.
    pub keys: Delimiter,
}

impl Default for LiteralOptions {
    fn default() -> Self {
        Self::canonical()
    }
}

impl LiteralOptions {
    /// Angle brackets at the top level, backticks inside composites.
    pub fn canonical() -> Self {
        Self {
            top_level: Delimiter::Angle,
            nested: Delimiter::Backtick,
            keys: Delimiter::Backtick,
        }
    }

    /// Backticks everywhere, for contexts that cannot carry `⟨…⟩`.
    pub fn backtick() -> Self {
        Self {
            top_level: Delimiter::Backtick,
            nested: Delimiter::Backtick,
            keys: Delimiter::Backtick,
        }
    }
}

// =============================================================================
// FORMATTING
// =============================================================================

/// Renders `value` as a query literal with the canonical delimiters.
///
/// Leaf strings are quoted when `quote_leaf_strings` is set and escaped
/// otherwise. Array elements and object values are always quoted.
///
/// ```rust
/// use surrealdb_rpc::codec::format_value;
/// use surrealdb_rpc::{Object, Value};
///
/// let value = Value::from(Object::from([("foo", "bar")]));
/// assert_eq!(format_value(&value, false).unwrap(), "{foo:\"bar\"}");
/// assert_eq!(format_value(&Value::from("a b"), false).unwrap(), "⟨a b⟩");
/// ```
pub fn format_value(value: &Value, quote_leaf_strings: bool) -> Result<String, ThingError> {
    format_value_with(value, quote_leaf_strings, &LiteralOptions::default())
}

/// [`format_value`] with explicit delimiter choices.
pub fn format_value_with(
    value: &Value,
    quote_leaf_strings: bool,
    options: &LiteralOptions,
) -> Result<String, ThingError> {
    let mut out = String::new();
    write_value(&mut out, value, quote_leaf_strings, options, 0)?;
    Ok(out)
}

/// Renders an array id.
pub fn format_array(items: &[Value], options: &LiteralOptions) -> Result<String, ThingError> {
    let mut out = String::new();
    write_array(&mut out, items, options, 0)?;
    Ok(out)
}

/// Renders an object id. Keys are written in insertion order.
pub fn format_object(object: &Object, options: &LiteralOptions) -> Result<String, ThingError> {
    let mut out = String::new();
    write_object(&mut out, object, options, 0)?;
    Ok(out)
}

fn write_value(
    out: &mut String,
    value: &Value,
    quote: bool,
    options: &LiteralOptions,
    depth: usize,
) -> Result<(), ThingError> {
    match value {
        Value::None => out.push_str(NONE),
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::String(s) if quote => out.push_str(&auto_quote(s, options.nested)),
        Value::String(s) => out.push_str(&auto_escape(s, options.top_level)),
        Value::Array(items) => write_array(out, items, options, depth)?,
        Value::Object(object) => write_object(out, object, options, depth)?,
        Value::Thing(Thing::Table(table)) => write_table(out, table),
        Value::Thing(thing) => out.push_str(&thing.literal()),
        Value::Bool(_) | Value::Float(_) => {
            return Err(ThingError::UnsupportedLiteralType { kind: value.kind() });
        }
    }
    Ok(())
}

fn write_array(
    out: &mut String,
    items: &[Value],
    options: &LiteralOptions,
    depth: usize,
) -> Result<(), ThingError> {
    check_depth(depth)?;
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_value(out, item, true, options, depth + 1)?;
    }
    out.push(']');
    Ok(())
}

fn write_object(
    out: &mut String,
    object: &Object,
    options: &LiteralOptions,
    depth: usize,
) -> Result<(), ThingError> {
    check_depth(depth)?;
    out.push('{');
    for (i, (key, value)) in object.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if key.is_empty() {
            out.push_str(&delimit(key, options.keys));
        } else {
            out.push_str(&auto_escape(key, options.keys));
        }
        out.push(':');
        write_value(out, value, true, options, depth + 1)?;
    }
    out.push('}');
    Ok(())
}

/// Writes a table reference that reads back as the same table.
fn write_table(out: &mut String, table: &Table) {
    let name = table.literal();
    let reads_as_other = name.is_empty()
        || is_numeric(name)
        || name.eq_ignore_ascii_case(NONE)
        || name.eq_ignore_ascii_case(NULL);
    if is_simple(name) && !reads_as_other {
        out.push_str(name);
    } else {
        out.push_str(&delimit(&table.raw_name(), Delimiter::Angle));
    }
}

#[inline]
fn check_depth(depth: usize) -> Result<(), ThingError> {
    if depth >= MAX_LITERAL_DEPTH {
        return Err(ThingError::LiteralTooDeep {
            max: MAX_LITERAL_DEPTH,
        });
    }
    Ok(())
}

// =============================================================================
// PARSING
// =============================================================================

/// Parses a complete query literal.
///
/// Accepts everything [`format_value`] produces, plus `NULL`, single-quoted
/// strings and whitespace between tokens. A bare or angle-delimited
/// identifier parses as a table reference and `ident:id` as a record
/// reference.
pub fn parse_value(text: &str) -> Result<Value, ThingError> {
    let mut reader = Reader::new(text);
    reader.skip_ws();
    let value = read_value(&mut reader, 0)?;
    reader.skip_ws();
    if !reader.is_empty() {
        return Err(reader.error("trailing characters after literal"));
    }
    Ok(value)
}

/// Reads the id side of an already-escaped `table:id` string.
///
/// A delimited id is Text even when its content is digits. Canonical integers
/// are Numeric. Arrays, objects and quoted strings are parsed. Anything that
/// is not a complete literal of a supported id kind is kept verbatim as Text.
pub fn parse_id(text: &str) -> IdValue {
    if let Some(inner) = undelimit(text) {
        return IdValue::Text(inner);
    }
    if let Ok(n) = text.parse::<i64>() {
        if n.to_string() == text {
            return IdValue::Numeric(n);
        }
    }
    if matches!(text.chars().next(), Some('[' | '{' | '"' | '\'')) {
        match parse_value(text) {
            Ok(Value::Array(items)) => return IdValue::Array(items),
            Ok(Value::Object(object)) => return IdValue::Object(object),
            Ok(Value::String(s)) => return IdValue::Text(s),
            Ok(_) => {}
            Err(error) => {
                tracing::debug!(text, %error, "id is not a composite literal, keeping it as text");
            }
        }
    }
    IdValue::from_text(text)
}

#[inline]
fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn read_value(reader: &mut Reader<'_>, depth: usize) -> Result<Value, ThingError> {
    match reader.peek() {
        Some('[') => read_array(reader, depth).map(Value::Array),
        Some('{') => read_object(reader, depth).map(Value::Object),
        Some(quote @ ('"' | '\'')) => read_quoted(reader, quote).map(Value::String),
        Some(c) if Delimiter::from_open(c).is_some() => {
            let text = read_delimited(reader)?;
            if reader.peek() == Some(':') {
                read_record(reader, Table::new(&text), depth).map(Value::from)
            } else if c == Delimiter::Angle.open() {
                Ok(Value::Thing(Thing::Table(Table::new(&text))))
            } else {
                Ok(Value::String(text))
            }
        }
        Some('-') => read_integer(reader).map(Value::Int),
        Some(c) if is_ident_char(c) => {
            let word = reader.take_while(is_ident_char);
            if reader.peek() == Some(':') {
                return read_record(reader, Table::new(word), depth).map(Value::from);
            }
            if word.bytes().all(|b| b.is_ascii_digit()) {
                return word
                    .parse::<i64>()
                    .map(Value::Int)
                    .map_err(|_| reader.error("integer out of range"));
            }
            if word.eq_ignore_ascii_case(NONE) || word.eq_ignore_ascii_case(NULL) {
                return Ok(Value::None);
            }
            Ok(Value::Thing(Thing::Table(Table::new(word))))
        }
        _ => Err(reader.error("expected a value")),
    }
}

fn read_array(reader: &mut Reader<'_>, depth: usize) -> Result<Vec<Value>, ThingError> {
    check_depth(depth)?;
    reader.expect('[', "array")?;
    let mut items = Vec::new();
    reader.skip_ws();
    if reader.eat(']') {
        return Ok(items);
    }
    loop {
        reader.skip_ws();
        items.push(read_value(reader, depth + 1)?);
        reader.skip_ws();
        if reader.eat(',') {
            continue;
        }
        reader.expect(']', "expected ',' or ']' in array")?;
        return Ok(items);
    }
}

fn read_object(reader: &mut Reader<'_>, depth: usize) -> Result<Object, ThingError> {
    check_depth(depth)?;
    reader.expect('{', "object")?;
    let mut object = Object::new();
    reader.skip_ws();
    if reader.eat('}') {
        return Ok(object);
    }
    loop {
        reader.skip_ws();
        let key = read_key(reader)?;
        reader.skip_ws();
        reader.expect(':', "expected ':' after object key")?;
        reader.skip_ws();
        let value = read_value(reader, depth + 1)?;
        object.insert(key, value);
        reader.skip_ws();
        if reader.eat(',') {
            continue;
        }
        reader.expect('}', "expected ',' or '}' in object")?;
        return Ok(object);
    }
}

fn read_key(reader: &mut Reader<'_>) -> Result<String, ThingError> {
    match reader.peek() {
        Some(quote @ ('"' | '\'')) => read_quoted(reader, quote),
        Some(c) if Delimiter::from_open(c).is_some() => read_delimited(reader),
        _ => {
            let word = reader.take_while(is_ident_char);
            if word.is_empty() {
                return Err(reader.error("expected an object key"));
            }
            Ok(word.to_string())
        }
    }
}

fn read_record(
    reader: &mut Reader<'_>,
    table: Table,
    depth: usize,
) -> Result<RecordId, ThingError> {
    reader.expect(':', "record reference")?;
    let id = match reader.peek() {
        Some('[') => IdValue::Array(read_array(reader, depth + 1)?),
        Some('{') => IdValue::Object(read_object(reader, depth + 1)?),
        Some(c) if Delimiter::from_open(c).is_some() => IdValue::Text(read_delimited(reader)?),
        Some('-') => IdValue::Numeric(read_integer(reader)?),
        Some(c) if is_ident_char(c) => IdValue::from_text(reader.take_while(is_ident_char)),
        _ => return Err(reader.error("expected a record id")),
    };
    RecordId::from_id_value(table, id)
}

fn read_integer(reader: &mut Reader<'_>) -> Result<i64, ThingError> {
    let start = reader.remaining();
    let negative = reader.eat('-');
    let digits = reader.take_while(|c| c.is_ascii_digit());
    if digits.is_empty() {
        return Err(reader.error("expected digits"));
    }
    let len = usize::from(negative) + digits.len();
    start[..len]
        .parse::<i64>()
        .map_err(|_| reader.error("integer out of range"))
}

/// Reads a `"…"` or `'…'` string with backslash escapes.
fn read_quoted(reader: &mut Reader<'_>, quote: char) -> Result<String, ThingError> {
    reader.expect(quote, "string")?;
    let mut out = String::new();
    loop {
        match reader.read_char("unterminated string")? {
            '\\' => match reader.read_char("unterminated escape")? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                '0' => out.push('\0'),
                other => out.push(other),
            },
            c if c == quote => return Ok(out),
            c => out.push(c),
        }
    }
}

/// Reads a `⟨…⟩` or backtick token, removing escapes.
fn read_delimited(reader: &mut Reader<'_>) -> Result<String, ThingError> {
    let open = reader.read_char("delimited text")?;
    let delimiter =
        Delimiter::from_open(open).ok_or_else(|| reader.error("expected a delimiter"))?;
    let close = delimiter.close();
    let mut out = String::new();
    loop {
        match reader.read_char("unterminated delimited text")? {
            '\\' => out.push(reader.read_char("unterminated escape")?),
            c if c == close => return Ok(out),
            c => out.push(c),
        }
    }
}
