//! Extension scalar encoding/decoding.
//!
//! Every scalar travels as a one-byte tag plus a UTF-8 text payload:
//!
//! | tag | kind     | payload                                  |
//! |-----|----------|------------------------------------------|
//! | 1   | null     | empty                                    |
//! | 2   | uuid     | hyphenated lowercase text                |
//! | 3   | decimal  | decimal text, optional `dec` suffix      |
//! | 4   | duration | unit-suffixed text (`1d30s250us`)        |
//! | 5   | datetime | RFC 3339 in UTC                          |
//! | 6   | thing    | table or record literal                  |

use std::str::FromStr;

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::error::DecodeError;
use crate::limits::MAX_PAYLOAD_LEN;
use crate::model::{ExtTag, Scalar, Thing};
use crate::util::{format_datetime, format_duration, parse_datetime, parse_duration};

/// Suffix the server may append to decimal text.
const DECIMAL_SUFFIX: &str = "dec";

/// A tagged extension payload, ready to be framed by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtPayload {
    pub tag: u8,
    pub data: Vec<u8>,
}

impl ExtPayload {
    /// Splits into `(tag, payload)`.
    pub fn into_parts(self) -> (u8, Vec<u8>) {
        (self.tag, self.data)
    }

    /// Decodes this payload.
    pub fn decode(&self) -> Result<Scalar, DecodeError> {
        decode_scalar(self.tag, &self.data)
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a scalar as its tag and text payload.
///
/// ```rust
/// use std::time::Duration;
/// use surrealdb_rpc::codec::encode_scalar;
/// use surrealdb_rpc::Scalar;
///
/// let payload = encode_scalar(&Scalar::Duration(Duration::from_secs(90)));
/// assert_eq!(payload.tag, 4);
/// assert_eq!(payload.data, b"90s");
/// ```
pub fn encode_scalar(scalar: &Scalar) -> ExtPayload {
    let text = match scalar {
        Scalar::Null => String::new(),
        Scalar::Uuid(uuid) => uuid.hyphenated().to_string(),
        Scalar::Decimal(decimal) => decimal.to_string(),
        Scalar::Duration(duration) => format_duration(*duration),
        Scalar::DateTime(datetime) => format_datetime(datetime),
        Scalar::Thing(thing) => encode_thing(thing),
    };
    ExtPayload {
        tag: scalar.tag().as_u8(),
        data: text.into_bytes(),
    }
}

/// Returns the wire literal of a table or record reference.
pub fn encode_thing(thing: &Thing) -> String {
    thing.literal()
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a tagged payload.
///
/// Fails with [`DecodeError::UnknownExtensionTag`] for tags outside 1..=6,
/// which means the peer speaks a different protocol version.
pub fn decode_scalar(tag: u8, data: &[u8]) -> Result<Scalar, DecodeError> {
    tracing::trace!(tag, len = data.len(), "decoding extension payload");

    let kind = ExtTag::from_u8(tag).ok_or(DecodeError::UnknownExtensionTag { tag })?;
    if data.len() > MAX_PAYLOAD_LEN {
        return Err(DecodeError::LengthExceedsLimit {
            field: "extension payload",
            len: data.len(),
            max: MAX_PAYLOAD_LEN,
        });
    }

    match kind {
        ExtTag::Null => decode_null(data),
        ExtTag::Uuid => decode_uuid(read_text(data, "uuid")?),
        ExtTag::Decimal => decode_decimal(read_text(data, "decimal")?),
        ExtTag::Duration => Ok(Scalar::Duration(parse_duration(read_text(data, "duration")?)?)),
        ExtTag::DateTime => decode_datetime(read_text(data, "datetime")?),
        ExtTag::Thing => Ok(Scalar::Thing(Thing::parse(read_text(data, "thing")?)?)),
    }
}

#[inline]
fn read_text<'a>(data: &'a [u8], field: &'static str) -> Result<&'a str, DecodeError> {
    std::str::from_utf8(data).map_err(|_| DecodeError::InvalidUtf8 { field })
}

fn decode_null(data: &[u8]) -> Result<Scalar, DecodeError> {
    if !data.is_empty() {
        return Err(DecodeError::UnexpectedPayload {
            tag: ExtTag::Null.as_u8(),
            len: data.len(),
        });
    }
    Ok(Scalar::Null)
}

fn decode_uuid(text: &str) -> Result<Scalar, DecodeError> {
    Uuid::parse_str(text)
        .map(Scalar::Uuid)
        .map_err(|e| DecodeError::InvalidUuid {
            text: text.to_string(),
            message: e.to_string(),
        })
}

fn decode_decimal(text: &str) -> Result<Scalar, DecodeError> {
    let digits = text.strip_suffix(DECIMAL_SUFFIX).unwrap_or(text);
    BigDecimal::from_str(digits)
        .map(Scalar::Decimal)
        .map_err(|e| DecodeError::InvalidDecimal {
            text: text.to_string(),
            message: e.to_string(),
        })
}

fn decode_datetime(text: &str) -> Result<Scalar, DecodeError> {
    parse_datetime(text)
        .map(Scalar::DateTime)
        .map_err(|e| DecodeError::InvalidDateTime {
            text: text.to_string(),
            message: e.message,
        })
}
