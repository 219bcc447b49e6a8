//! Text grammars for extension scalars.

pub mod datetime;
pub mod duration;

pub use datetime::{format_datetime, parse_datetime, DateTimeParseError};
pub use duration::{format_duration, parse_duration};
