//! NaPTAN API client.
//!
//! The Department for Transport publishes every access node in England,
//! Scotland and Wales at `https://naptan.api.dft.gov.uk/v1/access-nodes`,
//! filterable by ATCO area code. This module fetches the CSV form and
//! decodes it into a [`StopList`](crate::domain::StopList).

mod client;
mod decode;
mod error;

pub use client::{NaptanClient, NaptanConfig};
pub(crate) use client::specific_stops_query;
pub use decode::decode_stops;
pub use error::ApiError;

#[cfg(test)]
pub(crate) use client::test_server;
