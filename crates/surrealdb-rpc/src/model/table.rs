//! Table references.

use std::fmt;

use crate::model::escape::{auto_escape, undelimit, Delimiter};

/// A named table.
///
/// The name is stored in its escaped form, so comparisons and the wire
/// literal both use the canonical text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Table {
    name: String,
}

impl Table {
    /// Creates a table from a raw name, escaping it if necessary.
    pub fn new(name: &str) -> Self {
        Self {
            name: auto_escape(name, Delimiter::Angle).into_owned(),
        }
    }

    /// Creates a table from its literal form.
    ///
    /// A fully delimited literal (`⟨a:b⟩`) is unwrapped and re-escaped, so
    /// both `Table::from_literal("⟨a-b⟩")` and `Table::new("a-b")` compare equal.
    pub fn from_literal(literal: &str) -> Self {
        match undelimit(literal) {
            Some(raw) => Self::new(&raw),
            None => Self::new(literal),
        }
    }

    /// Returns the escaped name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name without delimiters.
    pub fn raw_name(&self) -> String {
        undelimit(&self.name).unwrap_or_else(|| self.name.clone())
    }

    /// Returns a table with a different name.
    pub fn renamed(&self, name: &str) -> Table {
        Table::new(name)
    }

    /// Returns the wire literal, which is the escaped name.
    pub fn literal(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Table {
    fn from(name: &str) -> Self {
        Table::new(name)
    }
}

impl From<String> for Table {
    fn from(name: String) -> Self {
        Table::new(&name)
    }
}

impl From<&Table> for Table {
    fn from(table: &Table) -> Self {
        table.clone()
    }
}
