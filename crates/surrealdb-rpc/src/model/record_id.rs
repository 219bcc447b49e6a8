//! Record identifiers: a table plus an id of one of four kinds.

use std::fmt;

use rand::Rng;

use crate::codec::literal::{self, LiteralOptions};
use crate::error::ThingError;
use crate::model::escape::{auto_escape, delimit, is_numeric};
use crate::model::id;
use crate::model::{Object, Table, Value};

/// The kind of a record id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    Text,
    Numeric,
    Array,
    Object,
}

/// The id part of a record reference.
#[derive(Debug, Clone, PartialEq)]
pub enum IdValue {
    /// Unescaped text. Rendered bare when simple, delimited otherwise.
    Text(String),
    Numeric(i64),
    Array(Vec<Value>),
    Object(Object),
}

impl IdValue {
    /// Returns the kind of this id.
    pub fn kind(&self) -> IdKind {
        match self {
            IdValue::Text(_) => IdKind::Text,
            IdValue::Numeric(_) => IdKind::Numeric,
            IdValue::Array(_) => IdKind::Array,
            IdValue::Object(_) => IdKind::Object,
        }
    }

    /// Infers the kind of a raw text id.
    ///
    /// Digit-only text in canonical form (no leading zero, fits `i64`) is
    /// Numeric. Everything else, including `"007"`, stays Text.
    pub fn from_text(text: impl Into<String>) -> IdValue {
        let text = text.into();
        if is_numeric(&text) && (text == "0" || !text.starts_with('0')) {
            if let Ok(n) = text.parse::<i64>() {
                return IdValue::Numeric(n);
            }
        }
        IdValue::Text(text)
    }

    /// Infers the id kind from the shape of `value`.
    ///
    /// Only the top level is inspected; nested values are checked when the
    /// record id is built.
    pub fn infer(value: Value) -> Result<IdValue, ThingError> {
        match value {
            Value::String(s) => Ok(IdValue::from_text(s)),
            Value::Int(n) => Ok(IdValue::Numeric(n)),
            Value::Array(items) => Ok(IdValue::Array(items)),
            Value::Object(object) => Ok(IdValue::Object(object)),
            other => Err(ThingError::InvalidRecordIdKind { kind: other.kind() }),
        }
    }

    /// Converts the id back into a plain value.
    pub fn into_value(self) -> Value {
        match self {
            IdValue::Text(s) => Value::String(s),
            IdValue::Numeric(n) => Value::Int(n),
            IdValue::Array(items) => Value::Array(items),
            IdValue::Object(object) => Value::Object(object),
        }
    }

    /// Renders the id part of a record literal.
    pub fn literal(&self, options: &LiteralOptions) -> Result<String, ThingError> {
        match self {
            IdValue::Text(text) => Ok(text_literal(text, options)),
            IdValue::Numeric(n) => Ok(n.to_string()),
            IdValue::Array(items) => literal::format_array(items, options),
            IdValue::Object(object) => literal::format_object(object, options),
        }
    }
}

fn text_literal(text: &str, options: &LiteralOptions) -> String {
    // Digit-only text must stay distinguishable from a Numeric id, and an
    // empty id still needs a token after the colon.
    if is_numeric(text) || text.is_empty() {
        delimit(text, options.top_level)
    } else {
        auto_escape(text, options.top_level).into_owned()
    }
}

/// A reference to one record in a table.
///
/// The id literal is rendered once at construction, so a `RecordId` that
/// exists can always be written to the wire.
#[derive(Debug, Clone)]
pub struct RecordId {
    table: Table,
    id: IdValue,
    id_literal: String,
}

impl RecordId {
    /// Creates a record id, inferring the id kind from the shape of `id`.
    ///
    /// ```rust
    /// use surrealdb_rpc::{IdKind, Object, RecordId};
    ///
    /// assert_eq!(RecordId::new("example", 123).unwrap().literal(), "example:123");
    /// assert_eq!(RecordId::new("example", "123").unwrap().kind(), IdKind::Numeric);
    /// assert_eq!(RecordId::new("example", "foo-bar").unwrap().literal(), "example:⟨foo-bar⟩");
    ///
    /// let id = RecordId::new("example", Object::from([("foo", "bar")])).unwrap();
    /// assert_eq!(id.literal(), "example:{foo:\"bar\"}");
    /// ```
    pub fn new(table: impl Into<Table>, id: impl Into<Value>) -> Result<Self, ThingError> {
        Self::from_id_value(table, IdValue::infer(id.into())?)
    }

    /// Creates a record id from an already typed id.
    ///
    /// Fails if an array or object id contains a value that has no literal form.
    pub fn from_id_value(table: impl Into<Table>, id: IdValue) -> Result<Self, ThingError> {
        let id_literal = id.literal(&LiteralOptions::default())?;
        Ok(Self {
            table: table.into(),
            id,
            id_literal,
        })
    }

    /// Creates a Text-kind record id without kind inference.
    pub fn text(table: impl Into<Table>, id: impl Into<String>) -> Self {
        let text = id.into();
        Self {
            table: table.into(),
            id_literal: text_literal(&text, &LiteralOptions::default()),
            id: IdValue::Text(text),
        }
    }

    /// Parses `table:id`, splitting on the first colon outside delimiters.
    ///
    /// With `already_escaped` unset the id side is raw text and goes through
    /// kind inference. With it set, the id side is read as a literal: a
    /// delimited id stays Text even if it is digit-only, and arrays and
    /// objects are parsed.
    pub fn from_text(text: &str, already_escaped: bool) -> Result<Self, ThingError> {
        let (table, id) = split_top_level(text)
            .filter(|(table, id)| !table.is_empty() && !id.is_empty())
            .ok_or_else(|| ThingError::InvalidRecordIdString {
                input: text.to_string(),
            })?;
        let id = if already_escaped {
            literal::parse_id(id)
        } else {
            IdValue::from_text(id)
        };
        Self::from_id_value(Table::from_literal(table), id)
    }

    /// Generates a random 20-character id of lowercase letters and digits.
    pub fn random(table: impl Into<Table>) -> Self {
        Self::random_with(table, &mut rand::thread_rng())
    }

    /// [`RecordId::random`] with a caller-supplied random source.
    pub fn random_with<R: Rng + ?Sized>(table: impl Into<Table>, rng: &mut R) -> Self {
        Self::text(table, id::random_id(rng))
    }

    /// Generates a lowercase ULID id, sortable by creation time.
    pub fn sortable(table: impl Into<Table>) -> Self {
        Self::sortable_at(table, id::unix_millis_now(), &mut rand::thread_rng())
    }

    /// [`RecordId::sortable`] with a caller-supplied clock reading and random source.
    pub fn sortable_at<R: Rng + ?Sized>(
        table: impl Into<Table>,
        unix_millis: u64,
        rng: &mut R,
    ) -> Self {
        Self::text(table, id::ulid(unix_millis, rng))
    }

    /// Generates a UUIDv7 id.
    ///
    /// `unix_nanos` overrides the timestamp embedded in the UUID.
    pub fn time_ordered(table: impl Into<Table>, unix_nanos: Option<u128>) -> Self {
        Self::text(table, id::uuid_v7(unix_nanos).to_string())
    }

    /// Returns the table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Returns the id.
    pub fn id(&self) -> &IdValue {
        &self.id
    }

    /// Returns the kind of the id.
    pub fn kind(&self) -> IdKind {
        self.id.kind()
    }

    /// Returns the same id in a different table.
    pub fn with_table(&self, table: impl Into<Table>) -> RecordId {
        Self {
            table: table.into(),
            id: self.id.clone(),
            id_literal: self.id_literal.clone(),
        }
    }

    /// Returns the rendered id part.
    pub fn id_literal(&self) -> &str {
        &self.id_literal
    }

    /// Returns the wire literal `table:id`.
    pub fn literal(&self) -> String {
        format!("{}:{}", self.table.literal(), self.id_literal)
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table && self.id == other.id
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.table, self.id_literal)
    }
}

/// Splits on the first `:` that is not inside a `⟨…⟩` or backtick pair.
pub(crate) fn split_top_level(text: &str) -> Option<(&str, &str)> {
    let mut close: Option<char> = None;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        match close {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(end) if c == end => close = None,
            Some(_) => {}
            None => match c {
                ':' => return Some((&text[..i], &text[i + 1..])),
                '⟨' => close = Some('⟩'),
                '`' => close = Some('`'),
                _ => {}
            },
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_kind() {
        let id = RecordId::new("test", "foo").unwrap();
        assert_eq!(id.kind(), IdKind::Text);
        assert_eq!(id.literal(), "test:foo");

        assert_eq!(RecordId::new("test", "foo-bar").unwrap().literal(), "test:⟨foo-bar⟩");
        assert_eq!(RecordId::new("test", "foo bar").unwrap().literal(), "test:⟨foo bar⟩");
    }

    #[test]
    fn test_numeric_kind() {
        let id = RecordId::new("example", 123).unwrap();
        assert_eq!(id.kind(), IdKind::Numeric);
        assert_eq!(id.literal(), "example:123");

        let from_str = RecordId::new("example", "123").unwrap();
        assert_eq!(from_str.kind(), IdKind::Numeric);
        assert_eq!(from_str.literal(), "example:123");
        assert_eq!(id, from_str);

        assert_eq!(RecordId::new("t", -5).unwrap().literal(), "t:-5");
    }

    #[test]
    fn test_into_value_undoes_inference() {
        let values = [
            Value::from("foo-bar"),
            Value::Int(7),
            Value::from(vec![1, 2]),
            Value::from(Object::from([("a", "b")])),
        ];
        for value in values {
            let id = IdValue::infer(value.clone()).unwrap();
            assert_eq!(id.into_value(), value);
        }
        // Digit-only text comes back as the integer it was inferred to be.
        assert_eq!(IdValue::infer(Value::from("42")).unwrap().into_value(), Value::Int(42));
    }

    #[test]
    fn test_non_canonical_digits_stay_text() {
        let id = RecordId::new("t", "007").unwrap();
        assert_eq!(id.kind(), IdKind::Text);
        assert_eq!(id.literal(), "t:⟨007⟩");

        let huge = RecordId::new("t", "99999999999999999999").unwrap();
        assert_eq!(huge.kind(), IdKind::Text);
        assert_eq!(huge.literal(), "t:⟨99999999999999999999⟩");
    }

    #[test]
    fn test_explicit_text_digits_are_delimited() {
        let id = RecordId::text("test", "42");
        assert_eq!(id.kind(), IdKind::Text);
        assert_eq!(id.literal(), "test:⟨42⟩");
        assert_ne!(id, RecordId::new("test", 42).unwrap());
    }

    #[test]
    fn test_empty_text_is_delimited() {
        assert_eq!(RecordId::new("t", "").unwrap().literal(), "t:⟨⟩");
    }

    #[test]
    fn test_array_kind() {
        let id = RecordId::new("test", vec!["foo", "bar"]).unwrap();
        assert_eq!(id.kind(), IdKind::Array);
        assert_eq!(id.literal(), "test:[\"foo\",\"bar\"]");
    }

    #[test]
    fn test_object_kind() {
        let id = RecordId::new("example", Object::from([("foo", "bar")])).unwrap();
        assert_eq!(id.kind(), IdKind::Object);
        assert_eq!(id.literal(), "example:{foo:\"bar\"}");

        let nested = Object::new().with("foo", Object::from([("bar", "baz")]));
        let id = RecordId::new("test", nested).unwrap();
        assert_eq!(id.literal(), "test:{foo:{bar:\"baz\"}}");
    }

    #[test]
    fn test_unsupported_kinds() {
        assert_eq!(
            RecordId::new("t", 1.5).unwrap_err(),
            ThingError::InvalidRecordIdKind { kind: "float" }
        );
        assert_eq!(
            RecordId::new("t", true).unwrap_err(),
            ThingError::InvalidRecordIdKind { kind: "bool" }
        );
        assert_eq!(
            RecordId::new("t", Value::None).unwrap_err(),
            ThingError::InvalidRecordIdKind { kind: "none" }
        );
    }

    #[test]
    fn test_nested_unsupported_kinds() {
        let err = RecordId::new("t", vec![Value::Float(1.0)]).unwrap_err();
        assert_eq!(err, ThingError::UnsupportedLiteralType { kind: "float" });

        let err = RecordId::new("t", Object::from([("flag", true)])).unwrap_err();
        assert_eq!(err, ThingError::UnsupportedLiteralType { kind: "bool" });
    }

    #[test]
    fn test_from_text() {
        let id = RecordId::from_text("test:foo-bar", false).unwrap();
        assert_eq!(id, RecordId::new("test", "foo-bar").unwrap());

        let id = RecordId::from_text("test:42", false).unwrap();
        assert_eq!(id.kind(), IdKind::Numeric);

        let id = RecordId::from_text("complex table name:foo", false).unwrap();
        assert_eq!(id.table().literal(), "⟨complex table name⟩");
    }

    #[test]
    fn test_from_text_already_escaped() {
        let id = RecordId::from_text("test:⟨42⟩", true).unwrap();
        assert_eq!(id.kind(), IdKind::Text);
        assert_eq!(id.literal(), "test:⟨42⟩");

        let id = RecordId::from_text("test:⟨foo:bar⟩", true).unwrap();
        assert_eq!(id.id(), &IdValue::Text("foo:bar".to_string()));
    }

    #[test]
    fn test_from_text_rejects_missing_parts() {
        for input in ["nocolon", ":id", "table:", "⟨a:b⟩"] {
            assert_eq!(
                RecordId::from_text(input, false).unwrap_err(),
                ThingError::InvalidRecordIdString {
                    input: input.to_string()
                }
            );
        }
    }

    #[test]
    fn test_split_top_level() {
        assert_eq!(split_top_level("a:b:c"), Some(("a", "b:c")));
        assert_eq!(split_top_level("⟨a:b⟩:c"), Some(("⟨a:b⟩", "c")));
        assert_eq!(split_top_level("`a:b`"), None);
        assert_eq!(split_top_level("⟨a\\⟩:b⟩"), None);
        assert_eq!(split_top_level("abc"), None);
    }

    #[test]
    fn test_with_table() {
        let id = RecordId::new("a", 1).unwrap();
        let moved = id.with_table("b-c");
        assert_eq!(moved.literal(), "⟨b-c⟩:1");
        assert_eq!(id.literal(), "a:1");
    }

    #[test]
    fn test_generators_are_text() {
        let random = RecordId::random("t");
        assert_eq!(random.kind(), IdKind::Text);
        let IdValue::Text(text) = random.id() else {
            panic!("expected text id");
        };
        assert_eq!(text.len(), 20);

        assert_eq!(RecordId::sortable("t").kind(), IdKind::Text);

        let uuid = RecordId::time_ordered("t", None);
        assert_eq!(uuid.kind(), IdKind::Text);
        assert!(uuid.literal().starts_with("t:⟨"));
    }
}
