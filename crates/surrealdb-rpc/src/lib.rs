//! Record identifiers, query literals and extension scalars for the SurrealDB RPC protocol.
//!
//! This crate is the data-model layer beneath an RPC client. It decides how
//! table names and record ids are written into query text, and how the
//! protocol's extension-typed scalars map to and from tagged payloads.
//! Transport, request correlation and authentication live elsewhere.
//!
//! # Quick Start
//!
//! ```rust
//! use surrealdb_rpc::codec::{decode_scalar, encode_scalar};
//! use surrealdb_rpc::{IdKind, Object, RecordId, Scalar, Table, Thing};
//!
//! // Names are escaped only when they need to be
//! assert_eq!(Table::new("example").literal(), "example");
//! assert_eq!(Table::new("complex-name").literal(), "⟨complex-name⟩");
//!
//! // The id kind follows the shape of the value
//! let numeric = RecordId::new("example", "123").unwrap();
//! assert_eq!(numeric.kind(), IdKind::Numeric);
//! assert_eq!(numeric.literal(), "example:123");
//!
//! let object = RecordId::new("example", Object::from([("foo", "bar")])).unwrap();
//! assert_eq!(object.literal(), "example:{foo:\"bar\"}");
//!
//! // Things go over the wire as tag 6
//! let payload = encode_scalar(&Scalar::Thing(Thing::from(object.clone())));
//! assert_eq!(payload.tag, 6);
//!
//! // And come back as the same record
//! let decoded = decode_scalar(payload.tag, &payload.data).unwrap();
//! assert_eq!(decoded, Scalar::Thing(Thing::from(object)));
//! ```
//!
//! # Modules
//!
//! - [`model`]: Escaping rules, tables, record ids, things and scalars
//! - [`codec`]: Literal formatter/parser and the extension scalar codec
//! - [`util`]: Duration and timestamp text grammars
//! - [`validate`]: Shape checks for `table:id` strings
//! - [`error`]: Error types
//! - [`limits`]: Decoder limits and generated id lengths
//!
//! # Diagnostics
//!
//! Lossy or suspicious conversions are reported through [`tracing`] at warn
//! level and never fail the operation: escaping text that is already
//! delimited, and dropping sub-microsecond precision from durations.
//!
//! # Extension Tags
//!
//! Tags 1 to 6 are fixed by the protocol: null, UUID, decimal, duration,
//! datetime and thing. Any other tag is rejected with
//! [`DecodeError::UnknownExtensionTag`].

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod util;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{decode_scalar, encode_scalar, encode_thing, ExtPayload, LiteralOptions};
pub use error::{DecodeError, DurationParseError, ThingError};
pub use model::escape::{auto_escape, auto_quote, is_simple, Delimiter};
pub use model::{
    ConvertibleToThing, ExtTag, IdKind, IdValue, Object, RecordId, Scalar, Table, Target, Thing,
    ThingInput, Value,
};
pub use validate::{is_record_id_str, is_table_name_str, validate_record_id_str};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
