//! Error types for entity construction, literal formatting and extension decoding.

use thiserror::Error;

/// Error while constructing, formatting or parsing a table or record reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThingError {
    #[error("valid record ID types are: string, integer, array and object; got: {kind}")]
    InvalidRecordIdKind { kind: &'static str },

    #[error(
        "record ID strings must be composed of a table name and a record ID separated by a colon; got: {input:?}"
    )]
    InvalidRecordIdString { input: String },

    #[error("cannot render a {kind} value as a query literal")]
    UnsupportedLiteralType { kind: &'static str },

    #[error("literal nesting exceeds maximum depth {max}")]
    LiteralTooDeep { max: usize },

    #[error("malformed literal at byte {position}: {context}")]
    LiteralSyntax {
        position: usize,
        context: &'static str,
    },
}

/// Error while parsing the textual form of a duration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("duration string is empty")]
    Empty,

    #[error("years are not supported in durations")]
    UnsupportedYears,

    #[error("duration component {number:?} has no unit suffix")]
    MissingUnit { number: String },

    #[error("unknown duration unit {unit:?}")]
    UnknownUnit { unit: String },

    #[error("expected digits before {context}")]
    InvalidNumber { context: String },

    #[error("duration unit {unit:?} is repeated or out of order")]
    UnitOutOfOrder { unit: &'static str },

    #[error("duration exceeds the representable range")]
    Overflow,
}

/// Error while decoding an extension-tagged payload.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("unknown extension tag: {tag}")]
    UnknownExtensionTag { tag: u8 },

    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("extension tag {tag} carries an unexpected {len}-byte payload")]
    UnexpectedPayload { tag: u8, len: usize },

    #[error("invalid UUID {text:?}: {message}")]
    InvalidUuid { text: String, message: String },

    #[error("invalid decimal {text:?}: {message}")]
    InvalidDecimal { text: String, message: String },

    #[error("invalid duration: {0}")]
    InvalidDuration(#[from] DurationParseError),

    #[error("invalid datetime {text:?}: {message}")]
    InvalidDateTime { text: String, message: String },

    #[error("invalid record reference: {0}")]
    InvalidThing(#[from] ThingError),
}

impl DecodeError {
    /// Returns true if the error means the peer speaks a different protocol version.
    pub fn is_protocol_mismatch(&self) -> bool {
        matches!(self, DecodeError::UnknownExtensionTag { .. })
    }
}
