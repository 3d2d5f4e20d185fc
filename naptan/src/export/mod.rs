//! Export of stop lists to GeoJSON and to an HTML map.
//!
//! Both exports place stops by WGS84 longitude and latitude and leave out
//! stops without them; run [`fill_coordinates`](crate::geo::fill_coordinates)
//! first to locate stops from their grid references.

mod error;
mod geojson;
mod map;

pub use error::ExportError;
pub use self::geojson::{save_geojson, to_geojson};
pub use map::{MarkerView, StopMapTemplate, render_map, save_map};
