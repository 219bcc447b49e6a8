//! Entity model: tables, record ids, things and extension scalars.

pub mod escape;
pub mod id;
pub mod record_id;
pub mod scalar;
pub mod table;
pub mod thing;
pub mod value;

pub use escape::{auto_escape, auto_quote, is_simple, Delimiter};
pub use record_id::{IdKind, IdValue, RecordId};
pub use scalar::{ExtTag, Scalar};
pub use table::Table;
pub use thing::{ConvertibleToThing, Target, Thing, ThingInput};
pub use value::{Object, Value};
