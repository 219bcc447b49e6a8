//! Extension scalar values and their wire tags.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use std::time::Duration;
use uuid::Uuid;

use crate::model::{id, Thing};

/// Extension type tags.
///
/// These numbers are shared with the server and must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExtTag {
    Null = 1,
    Uuid = 2,
    Decimal = 3,
    Duration = 4,
    DateTime = 5,
    Thing = 6,
}

impl ExtTag {
    /// Returns the tag for `byte`, or `None` if it is not a known tag.
    pub fn from_u8(byte: u8) -> Option<ExtTag> {
        match byte {
            1 => Some(ExtTag::Null),
            2 => Some(ExtTag::Uuid),
            3 => Some(ExtTag::Decimal),
            4 => Some(ExtTag::Duration),
            5 => Some(ExtTag::DateTime),
            6 => Some(ExtTag::Thing),
            _ => None,
        }
    }

    /// Returns the wire byte.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// A value carried as an extension type.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Uuid(Uuid),
    Decimal(BigDecimal),
    Duration(Duration),
    DateTime(DateTime<Utc>),
    Thing(Thing),
}

impl Scalar {
    /// Returns the extension tag for this value.
    pub fn tag(&self) -> ExtTag {
        match self {
            Scalar::Null => ExtTag::Null,
            Scalar::Uuid(_) => ExtTag::Uuid,
            Scalar::Decimal(_) => ExtTag::Decimal,
            Scalar::Duration(_) => ExtTag::Duration,
            Scalar::DateTime(_) => ExtTag::DateTime,
            Scalar::Thing(_) => ExtTag::Thing,
        }
    }

    /// A new time-ordered (v7) UUID. This is the default generation policy.
    pub fn new_uuid() -> Scalar {
        Scalar::Uuid(id::uuid_v7(None))
    }

    /// A new random (v4) UUID.
    pub fn new_uuid_v4() -> Scalar {
        Scalar::Uuid(id::uuid_v4())
    }
}

impl From<Uuid> for Scalar {
    fn from(v: Uuid) -> Self {
        Scalar::Uuid(v)
    }
}

impl From<BigDecimal> for Scalar {
    fn from(v: BigDecimal) -> Self {
        Scalar::Decimal(v)
    }
}

impl From<Duration> for Scalar {
    fn from(v: Duration) -> Self {
        Scalar::Duration(v)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(v: DateTime<Utc>) -> Self {
        Scalar::DateTime(v)
    }
}

impl From<Thing> for Scalar {
    fn from(v: Thing) -> Self {
        Scalar::Thing(v)
    }
}
