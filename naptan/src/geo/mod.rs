//! Reprojection of stop locations.
//!
//! Every access node carries a British National Grid easting and northing;
//! WGS84 longitude and latitude are sometimes missing. Missing locations
//! are filled in from the grid reference with the OSTN15 transform.

use std::sync::Arc;

use lonlat_bng::convert_osgb36_to_ll;
use tracing::debug;

use crate::domain::{Stop, StopList};

/// Convert a British National Grid reference to `(longitude, latitude)`.
///
/// Returns `None` when the point falls outside the OSTN15 grid.
pub fn osgb36_to_wgs84(easting: i64, northing: i64) -> Option<(f64, f64)> {
    convert_osgb36_to_ll(easting as f64, northing as f64).ok()
}

/// Whether a stop's grid reference is on the British National Grid.
///
/// Northern Irish stops use the Irish grid, which OSTN15 does not cover.
fn on_british_grid(stop: &Stop) -> bool {
    !stop.grid_type.starts_with('I')
}

/// Fill in missing WGS84 locations from grid references.
///
/// Stops that already have both coordinates are shared unchanged. Others
/// are replaced by a located copy when the reprojection succeeds, and kept
/// as they are when it does not.
pub fn fill_coordinates(stops: &StopList) -> StopList {
    stops
        .iter_shared()
        .map(|stop| {
            if stop.coordinates().is_some() || !on_british_grid(stop) {
                return Arc::clone(stop);
            }
            match osgb36_to_wgs84(stop.easting, stop.northing) {
                Some((longitude, latitude)) => Arc::new(stop.with_coordinates(longitude, latitude)),
                None => {
                    debug!(
                        atco_code = %stop.atco_code,
                        easting = stop.easting,
                        northing = stop.northing,
                        "grid reference outside OSTN15 coverage"
                    );
                    Arc::clone(stop)
                }
            }
        })
        .collect()
}
