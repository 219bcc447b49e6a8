//! References to tables or records, as placed on the wire.

use std::fmt;
use std::str::FromStr;

use crate::codec::ext::{encode_scalar, ExtPayload};
use crate::error::ThingError;
use crate::model::record_id::split_top_level;
use crate::model::{RecordId, Scalar, Table};

/// A reference to either a table or a single record.
#[derive(Debug, Clone, PartialEq)]
pub enum Thing {
    Table(Table),
    Record(RecordId),
}

impl Thing {
    /// Resolves any supported input into a `Thing`.
    pub fn new(input: ThingInput<'_>) -> Result<Thing, ThingError> {
        match input {
            ThingInput::Text(text) => Thing::parse(text),
            ThingInput::Convertible(source) => Ok(source.to_thing()),
        }
    }

    /// Parses a table or record literal.
    ///
    /// Splits on the first colon outside `⟨…⟩` or backtick delimiters. Without
    /// such a colon the whole text names a table. The id side is read as a
    /// literal, so already-escaped ids parse back to what they were built from.
    ///
    /// ```rust
    /// use surrealdb_rpc::{IdKind, Thing};
    ///
    /// let thing = Thing::parse("person:⟨tobie-h⟩").unwrap();
    /// assert_eq!(thing.record_id().unwrap().kind(), IdKind::Text);
    ///
    /// assert!(Thing::parse("⟨a:b⟩").unwrap().is_table());
    /// ```
    pub fn parse(text: &str) -> Result<Thing, ThingError> {
        match split_top_level(text) {
            Some(_) => RecordId::from_text(text, true).map(Thing::Record),
            None => Ok(Thing::Table(Table::from_literal(text))),
        }
    }

    /// Returns the table this thing belongs to.
    pub fn table(&self) -> &Table {
        match self {
            Thing::Table(table) => table,
            Thing::Record(record) => record.table(),
        }
    }

    /// Returns the record id, if this is a record reference.
    pub fn record_id(&self) -> Option<&RecordId> {
        match self {
            Thing::Table(_) => None,
            Thing::Record(record) => Some(record),
        }
    }

    /// Returns true if this references a whole table.
    pub fn is_table(&self) -> bool {
        matches!(self, Thing::Table(_))
    }

    /// Returns the wire literal.
    pub fn literal(&self) -> String {
        match self {
            Thing::Table(table) => table.literal().to_string(),
            Thing::Record(record) => record.literal(),
        }
    }
}

impl fmt::Display for Thing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Thing::Table(table) => table.fmt(f),
            Thing::Record(record) => record.fmt(f),
        }
    }
}

impl FromStr for Thing {
    type Err = ThingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Thing::parse(s)
    }
}

impl From<Table> for Thing {
    fn from(table: Table) -> Self {
        Thing::Table(table)
    }
}

impl From<RecordId> for Thing {
    fn from(record: RecordId) -> Self {
        Thing::Record(record)
    }
}

/// Types that know which table or record they refer to.
pub trait ConvertibleToThing {
    fn to_thing(&self) -> Thing;
}

impl ConvertibleToThing for Thing {
    fn to_thing(&self) -> Thing {
        self.clone()
    }
}

impl ConvertibleToThing for Table {
    fn to_thing(&self) -> Thing {
        Thing::Table(self.clone())
    }
}

impl ConvertibleToThing for RecordId {
    fn to_thing(&self) -> Thing {
        Thing::Record(self.clone())
    }
}

/// Inputs accepted wherever a table or record is expected.
#[derive(Clone, Copy)]
pub enum ThingInput<'a> {
    /// A table name or `table:id` literal.
    Text(&'a str),
    Convertible(&'a dyn ConvertibleToThing),
}

impl<'a> From<&'a str> for ThingInput<'a> {
    fn from(text: &'a str) -> Self {
        ThingInput::Text(text)
    }
}

impl<'a> From<&'a String> for ThingInput<'a> {
    fn from(text: &'a String) -> Self {
        ThingInput::Text(text)
    }
}

impl<'a> From<&'a Thing> for ThingInput<'a> {
    fn from(thing: &'a Thing) -> Self {
        ThingInput::Convertible(thing)
    }
}

impl<'a> From<&'a Table> for ThingInput<'a> {
    fn from(table: &'a Table) -> Self {
        ThingInput::Convertible(table)
    }
}

impl<'a> From<&'a RecordId> for ThingInput<'a> {
    fn from(record: &'a RecordId) -> Self {
        ThingInput::Convertible(record)
    }
}

/// One or several references, as taken by select, update, delete and relate calls.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    One(Thing),
    Many(Vec<Thing>),
}

impl Target {
    /// Resolves a single input.
    pub fn one<'a>(input: impl Into<ThingInput<'a>>) -> Result<Target, ThingError> {
        Thing::new(input.into()).map(Target::One)
    }

    /// Resolves a list of inputs, failing on the first invalid one.
    pub fn many<'a, I>(inputs: I) -> Result<Target, ThingError>
    where
        I: IntoIterator,
        I::Item: Into<ThingInput<'a>>,
    {
        inputs
            .into_iter()
            .map(|input| Thing::new(input.into()))
            .collect::<Result<Vec<_>, _>>()
            .map(Target::Many)
    }

    /// Returns the referenced things.
    pub fn things(&self) -> &[Thing] {
        match self {
            Target::One(thing) => std::slice::from_ref(thing),
            Target::Many(things) => things,
        }
    }

    /// Encodes every thing as an extension payload.
    pub fn encode(&self) -> Vec<ExtPayload> {
        self.things()
            .iter()
            .map(|thing| encode_scalar(&Scalar::Thing(thing.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IdKind, IdValue, Object};

    #[test]
    fn test_parse_table() {
        assert_eq!(Thing::parse("example").unwrap(), Thing::Table(Table::new("example")));
        let thing = Thing::parse("⟨a:b⟩").unwrap();
        assert!(thing.is_table());
        assert_eq!(thing.literal(), "⟨a:b⟩");
    }

    #[test]
    fn test_parse_record() {
        let thing = Thing::parse("test:foo").unwrap();
        assert_eq!(thing, Thing::from(RecordId::new("test", "foo").unwrap()));
        assert_eq!(thing.table().literal(), "test");
    }

    #[test]
    fn test_parse_matches_constructor() {
        let cases: Vec<(&str, RecordId)> = vec![
            ("test:foo-bar", RecordId::new("test", "foo-bar").unwrap()),
            ("test:foo bar", RecordId::new("test", "foo bar").unwrap()),
            ("test:1.0", RecordId::new("test", "1.0").unwrap()),
            ("test:42", RecordId::new("test", 42).unwrap()),
            ("complex table name:foo", RecordId::new("complex table name", "foo").unwrap()),
        ];
        for (text, expected) in cases {
            assert_eq!(Thing::parse(text).unwrap(), Thing::Record(expected), "{text}");
        }
    }

    #[test]
    fn test_parse_delimited_digits_stay_text() {
        let thing = Thing::parse("test:⟨42⟩").unwrap();
        let record = thing.record_id().unwrap();
        assert_eq!(record.kind(), IdKind::Text);
        assert_eq!(thing.literal(), "test:⟨42⟩");
    }

    #[test]
    fn test_parse_text_that_looks_like_float() {
        assert_eq!(Thing::parse("test:1.0").unwrap().literal(), "test:⟨1.0⟩");
    }

    #[test]
    fn test_parse_composite_ids() {
        let thing = Thing::parse("test:{foo:\"bar\"}").unwrap();
        assert_eq!(
            thing.record_id().unwrap().id(),
            &IdValue::Object(Object::from([("foo", "bar")]))
        );

        let thing = Thing::parse("test:[\"foo\",{bar:\"baz\"}]").unwrap();
        assert_eq!(thing.record_id().unwrap().kind(), IdKind::Array);
    }

    #[test]
    fn test_parse_empty_sides() {
        assert!(matches!(
            Thing::parse("table:"),
            Err(ThingError::InvalidRecordIdString { .. })
        ));
        assert!(matches!(
            Thing::parse(":id"),
            Err(ThingError::InvalidRecordIdString { .. })
        ));
    }

    #[test]
    fn test_new_from_inputs() {
        let record = RecordId::new("test", 1).unwrap();
        assert_eq!(
            Thing::new(ThingInput::from(&record)).unwrap(),
            Thing::Record(record.clone())
        );
        assert_eq!(Thing::new("test:1".into()).unwrap(), Thing::Record(record));

        let table = Table::new("test");
        assert_eq!(Thing::new((&table).into()).unwrap(), Thing::Table(table));
    }

    #[test]
    fn test_custom_convertible() {
        struct User {
            id: i64,
        }
        impl ConvertibleToThing for User {
            fn to_thing(&self) -> Thing {
                Thing::Record(RecordId::text("user", format!("u{}", self.id)))
            }
        }

        let user = User { id: 7 };
        let thing = Thing::new(ThingInput::Convertible(&user)).unwrap();
        assert_eq!(thing.literal(), "user:u7");
    }

    #[test]
    fn test_target() {
        let one = Target::one("test:1").unwrap();
        assert_eq!(one.things().len(), 1);

        let many = Target::many(["test:1", "test:2", "other"]).unwrap();
        assert_eq!(many.things().len(), 3);
        assert!(many.things()[2].is_table());

        let payloads = many.encode();
        assert_eq!(payloads.len(), 3);
        assert!(payloads.iter().all(|p| p.tag == 6));
        assert_eq!(payloads[1].data, b"test:2");

        assert!(Target::many(["ok:1", "bad:"]).is_err());
    }

    #[test]
    fn test_multi_token_names_stay_one_token() {
        let record = RecordId::new("t", "⟨a⟩ OR ⟨b⟩").unwrap();
        assert_eq!(record.literal(), "t:⟨⟨a\\⟩ OR ⟨b\\⟩⟩");
        assert_eq!(Thing::parse(&record.literal()).unwrap(), Thing::Record(record));

        let table = Table::new("⟨x⟩:⟨y⟩");
        let parsed = Thing::parse(table.literal()).unwrap();
        assert!(parsed.is_table());
        assert_eq!(parsed, Thing::Table(table));
    }
}
