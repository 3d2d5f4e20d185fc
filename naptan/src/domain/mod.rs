//! Domain types for NaPTAN stop data.
//!
//! A raw CSV row becomes a [`Stop`] through [`Stop::from_fields`], which
//! converts the numeric and timestamp columns and rejects rows that cannot
//! form a record. Everything here is pure: no I/O, no shared state.

mod area;
mod error;
mod schema;
mod stop;
mod stop_list;
mod timestamp;

pub use area::{area_prefix, format_area_codes};
pub use error::StopError;
pub use schema::{CSV_HEADERS, FIELD_COUNT, FIELD_NAMES};
pub use stop::Stop;
pub use stop_list::{StopFilter, StopList, StopTable};
pub use timestamp::{Timestamp, format_timestamp, parse_timestamp, parse_timestamp_value};

#[cfg(test)]
pub(crate) use stop::test_support;
