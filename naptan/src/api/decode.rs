//! Decoding of access-node CSV responses.

use tracing::{debug, warn};

use crate::domain::{CSV_HEADERS, Stop, StopList};

use super::error::ApiError;

/// Decode an access-node CSV body into stops.
///
/// The first row is the header and is discarded; columns are taken by
/// position. A row that cannot become a [`Stop`] aborts decoding with
/// [`ApiError::Row`], unless `skip_invalid` is set, in which case the row
/// is logged and dropped.
pub fn decode_stops(body: &[u8], skip_invalid: bool) -> Result<StopList, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body);

    let headers = reader.headers()?;
    if !headers.iter().eq(CSV_HEADERS) {
        warn!(
            columns = headers.len(),
            "access-node header differs from the expected layout"
        );
    }

    let mut stops = Vec::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |pos| pos.line());
        let fields: Vec<&str> = record.iter().collect();

        match Stop::from_fields(&fields) {
            Ok(stop) => stops.push(stop),
            Err(source) if skip_invalid => {
                warn!(line, error = %source, "skipping invalid access-node row");
                skipped += 1;
            }
            Err(source) => return Err(ApiError::Row { line, source }),
        }
    }

    debug!(stops = stops.len(), skipped, "decoded access-node CSV");
    Ok(stops.into_iter().collect())
}
