//! Wire encodings: extension scalars and query literals.

pub mod ext;
pub mod literal;
pub mod reader;

pub use ext::{decode_scalar, encode_scalar, encode_thing, ExtPayload};
pub use literal::{format_value, format_value_with, parse_id, parse_value, LiteralOptions};
pub use reader::Reader;
