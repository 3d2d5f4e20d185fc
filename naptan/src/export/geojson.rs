//! GeoJSON export.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use geojson::{Feature, FeatureCollection, Geometry, feature::Id};
use tracing::debug;

use crate::domain::{Stop, StopList};

use super::error::ExportError;

fn to_feature(stop: &Stop) -> Option<Feature> {
    let (longitude, latitude) = stop.coordinates()?;
    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::Point(vec![
            longitude, latitude,
        ]))),
        id: Some(Id::String(stop.atco_code.clone())),
        properties: Some(stop.to_map()),
        foreign_members: None,
    })
}

/// Build a feature collection with one point per located stop.
///
/// Feature ids are ATCO codes and properties are the stop's fields.
pub fn to_geojson(stops: &StopList) -> FeatureCollection {
    let features: Vec<Feature> = stops.iter().filter_map(to_feature).collect();
    let skipped = stops.len() - features.len();
    if skipped > 0 {
        debug!(skipped, "left stops without coordinates out of GeoJSON");
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Write the GeoJSON feature collection to a file.
pub fn save_geojson(stops: &StopList, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, &to_geojson(stops))?;
    Ok(())
}
