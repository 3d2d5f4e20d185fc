//! HTML map of stops.

use std::path::Path;

use askama::Template;

use crate::domain::{Stop, StopList};

use super::error::ExportError;

/// Centre of Great Britain, used when there is nothing to show.
const DEFAULT_CENTER: (f64, f64) = (54.0, -2.5);

/// Standalone Leaflet page with a marker per stop.
#[derive(Template)]
#[template(path = "stop_map.html")]
pub struct StopMapTemplate {
    pub title: String,
    pub center_lat: f64,
    pub center_lon: f64,
    pub markers: Vec<MarkerView>,
}

/// Marker view model for the map template.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub latitude: f64,
    pub longitude: f64,
    pub atco_code: String,
    pub name: String,
    pub indicator: String,
    pub stop_type: String,
    pub status: String,
}

impl MarkerView {
    /// Marker for a located stop.
    pub fn from_stop(stop: &Stop) -> Option<Self> {
        let (longitude, latitude) = stop.coordinates()?;
        Some(Self {
            latitude,
            longitude,
            atco_code: stop.atco_code.clone(),
            name: stop.common_name.clone(),
            indicator: stop.indicator.clone(),
            stop_type: stop.stop_type.clone(),
            status: stop.status.clone(),
        })
    }

    /// Marker colour by lifecycle status.
    pub fn color(&self) -> &'static str {
        match self.status.as_str() {
            "active" => "#1f6feb",
            "inactive" => "#8b949e",
            "pending" => "#d29922",
            _ => "#cf222e",
        }
    }
}

impl StopMapTemplate {
    /// Build the page for a stop list.
    pub fn from_stops(title: impl Into<String>, stops: &StopList) -> Self {
        let markers: Vec<MarkerView> = stops.iter().filter_map(MarkerView::from_stop).collect();

        let (center_lat, center_lon) = if markers.is_empty() {
            DEFAULT_CENTER
        } else {
            let n = markers.len() as f64;
            (
                markers.iter().map(|m| m.latitude).sum::<f64>() / n,
                markers.iter().map(|m| m.longitude).sum::<f64>() / n,
            )
        };

        Self {
            title: title.into(),
            center_lat,
            center_lon,
            markers,
        }
    }
}

/// Render a stop list as a standalone HTML map.
pub fn render_map(stops: &StopList) -> Result<String, ExportError> {
    Ok(StopMapTemplate::from_stops("NaPTAN stops", stops).render()?)
}

/// Render the map and write it to a file.
pub fn save_map(stops: &StopList, path: impl AsRef<Path>) -> Result<(), ExportError> {
    std::fs::write(path, render_map(stops)?)?;
    Ok(())
}
