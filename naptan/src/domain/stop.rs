//! The NaPTAN stop record.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use super::error::StopError;
use super::schema::{FIELD_COUNT, FIELD_NAMES};
use super::timestamp::{Timestamp, format_timestamp, parse_timestamp};

/// One public-transport access node, as published in NaPTAN.
///
/// Built once per CSV row by [`Stop::from_fields`] and never changed after.
/// Lists of stops share records behind `Arc`, so filtering never copies or
/// edits them.
///
/// Text columns are kept exactly as given (empty stays empty). Only seven
/// columns are converted:
///
/// | Field | Type | Empty | Bad |
/// |---|---|---|---|
/// | `easting`, `northing`, `administrative_area_code` | `i64` | error | error |
/// | `longitude`, `latitude` | `Option<f64>` | `None` | error |
/// | `revision_number` | `Option<i64>` | `None` | error |
/// | `creation_datetime`, `modification_datetime` | `Option<Timestamp>` | `None` | `None` |
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Unique stop identifier (e.g. "068000000754")
    pub atco_code: String,
    /// Public SMS code
    pub naptan_code: String,
    pub plate_code: String,
    pub cleardown_code: String,
    pub common_name: String,
    pub common_name_lang: String,
    pub short_common_name: String,
    pub short_common_name_lang: String,
    pub landmark: String,
    pub landmark_lang: String,
    pub street: String,
    pub street_lang: String,
    pub crossing: String,
    pub crossing_lang: String,
    /// Position relative to the landmark (e.g. "opp", "Stop B")
    pub indicator: String,
    pub indicator_lang: String,
    /// Compass bearing of travel (e.g. "NE")
    pub bearing: String,
    pub nptg_locality_code: String,
    pub locality_name: String,
    pub parent_locality_name: String,
    pub grand_parent_locality_name: String,
    pub town: String,
    pub town_lang: String,
    pub suburb: String,
    pub suburb_lang: String,
    pub locality_centre: String,
    /// Grid the easting/northing pair is on
    pub grid_type: String,
    /// British National Grid easting, in metres
    pub easting: i64,
    /// British National Grid northing, in metres
    pub northing: i64,
    /// WGS84 longitude
    pub longitude: Option<f64>,
    /// WGS84 latitude
    pub latitude: Option<f64>,
    /// Stop classification code (e.g. "BCT", "RSE")
    pub stop_type: String,
    pub bus_stop_type: String,
    pub timing_status: String,
    pub default_wait_time: String,
    pub notes: String,
    pub notes_lang: String,
    pub administrative_area_code: i64,
    pub creation_datetime: Option<Timestamp>,
    pub modification_datetime: Option<Timestamp>,
    pub revision_number: Option<i64>,
    /// Last modification kind (e.g. "new", "revise")
    pub modification: String,
    /// Lifecycle status (e.g. "active", "inactive")
    pub status: String,
}

fn required_int(field: &'static str, value: &str) -> Result<i64, StopError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| StopError::InvalidInteger {
            field,
            value: value.to_string(),
        })
}

fn optional_int(field: &'static str, value: &str) -> Result<Option<i64>, StopError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    required_int(field, value).map(Some)
}

fn optional_float(field: &'static str, value: &str) -> Result<Option<f64>, StopError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    // NaN and infinities are not locations
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(Some(number)),
        _ => Err(StopError::InvalidFloat {
            field,
            value: value.to_string(),
        }),
    }
}

impl Stop {
    /// Build a stop from one raw row, in [`FIELD_NAMES`] order.
    ///
    /// Fails when the row does not have exactly [`FIELD_COUNT`] values, or
    /// when a numeric column cannot be converted (see the table on
    /// [`Stop`]). Conversions run in column order and the first failure is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use naptan::domain::{FIELD_COUNT, Stop, StopError};
    ///
    /// let short = vec![""; 3];
    /// assert_eq!(
    ///     Stop::from_fields(&short),
    ///     Err(StopError::FieldCount { expected: FIELD_COUNT, found: 3 })
    /// );
    /// ```
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, StopError> {
        let [
            atco_code,
            naptan_code,
            plate_code,
            cleardown_code,
            common_name,
            common_name_lang,
            short_common_name,
            short_common_name_lang,
            landmark,
            landmark_lang,
            street,
            street_lang,
            crossing,
            crossing_lang,
            indicator,
            indicator_lang,
            bearing,
            nptg_locality_code,
            locality_name,
            parent_locality_name,
            grand_parent_locality_name,
            town,
            town_lang,
            suburb,
            suburb_lang,
            locality_centre,
            grid_type,
            easting,
            northing,
            longitude,
            latitude,
            stop_type,
            bus_stop_type,
            timing_status,
            default_wait_time,
            notes,
            notes_lang,
            administrative_area_code,
            creation_datetime,
            modification_datetime,
            revision_number,
            modification,
            status,
        ] = fields
        else {
            return Err(StopError::FieldCount {
                expected: FIELD_COUNT,
                found: fields.len(),
            });
        };

        let text = |s: &S| s.as_ref().to_string();

        Ok(Self {
            atco_code: text(atco_code),
            naptan_code: text(naptan_code),
            plate_code: text(plate_code),
            cleardown_code: text(cleardown_code),
            common_name: text(common_name),
            common_name_lang: text(common_name_lang),
            short_common_name: text(short_common_name),
            short_common_name_lang: text(short_common_name_lang),
            landmark: text(landmark),
            landmark_lang: text(landmark_lang),
            street: text(street),
            street_lang: text(street_lang),
            crossing: text(crossing),
            crossing_lang: text(crossing_lang),
            indicator: text(indicator),
            indicator_lang: text(indicator_lang),
            bearing: text(bearing),
            nptg_locality_code: text(nptg_locality_code),
            locality_name: text(locality_name),
            parent_locality_name: text(parent_locality_name),
            grand_parent_locality_name: text(grand_parent_locality_name),
            town: text(town),
            town_lang: text(town_lang),
            suburb: text(suburb),
            suburb_lang: text(suburb_lang),
            locality_centre: text(locality_centre),
            grid_type: text(grid_type),
            easting: required_int("easting", easting.as_ref())?,
            northing: required_int("northing", northing.as_ref())?,
            longitude: optional_float("longitude", longitude.as_ref())?,
            latitude: optional_float("latitude", latitude.as_ref())?,
            stop_type: text(stop_type),
            bus_stop_type: text(bus_stop_type),
            timing_status: text(timing_status),
            default_wait_time: text(default_wait_time),
            notes: text(notes),
            notes_lang: text(notes_lang),
            administrative_area_code: required_int(
                "administrative_area_code",
                administrative_area_code.as_ref(),
            )?,
            creation_datetime: parse_timestamp(creation_datetime.as_ref()),
            modification_datetime: parse_timestamp(modification_datetime.as_ref()),
            revision_number: optional_int("revision_number", revision_number.as_ref())?,
            modification: text(modification),
            status: text(status),
        })
    }

    /// Location as `(longitude, latitude)`, when both are known.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.longitude?, self.latitude?))
    }

    /// A copy of this stop with its WGS84 location replaced.
    pub fn with_coordinates(&self, longitude: f64, latitude: f64) -> Self {
        Self {
            longitude: Some(longitude),
            latitude: Some(latitude),
            ..self.clone()
        }
    }

    /// Field values as JSON, in [`FIELD_NAMES`] order.
    ///
    /// Missing values are `null` and timestamps are RFC 3339 strings.
    fn values(&self) -> [Value; FIELD_COUNT] {
        let text = |s: &str| Value::String(s.to_string());
        let timestamp = |ts: &Option<Timestamp>| {
            ts.as_ref()
                .map_or(Value::Null, |ts| Value::String(format_timestamp(ts)))
        };

        [
            text(&self.atco_code),
            text(&self.naptan_code),
            text(&self.plate_code),
            text(&self.cleardown_code),
            text(&self.common_name),
            text(&self.common_name_lang),
            text(&self.short_common_name),
            text(&self.short_common_name_lang),
            text(&self.landmark),
            text(&self.landmark_lang),
            text(&self.street),
            text(&self.street_lang),
            text(&self.crossing),
            text(&self.crossing_lang),
            text(&self.indicator),
            text(&self.indicator_lang),
            text(&self.bearing),
            text(&self.nptg_locality_code),
            text(&self.locality_name),
            text(&self.parent_locality_name),
            text(&self.grand_parent_locality_name),
            text(&self.town),
            text(&self.town_lang),
            text(&self.suburb),
            text(&self.suburb_lang),
            text(&self.locality_centre),
            text(&self.grid_type),
            Value::from(self.easting),
            Value::from(self.northing),
            self.longitude.map_or(Value::Null, Value::from),
            self.latitude.map_or(Value::Null, Value::from),
            text(&self.stop_type),
            text(&self.bus_stop_type),
            text(&self.timing_status),
            text(&self.default_wait_time),
            text(&self.notes),
            text(&self.notes_lang),
            Value::from(self.administrative_area_code),
            timestamp(&self.creation_datetime),
            timestamp(&self.modification_datetime),
            self.revision_number.map_or(Value::Null, Value::from),
            text(&self.modification),
            text(&self.status),
        ]
    }

    /// All fields as a plain map keyed by field name.
    pub fn to_map(&self) -> Map<String, Value> {
        FIELD_NAMES
            .iter()
            .zip(self.values())
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    /// All fields rendered back to strings, in [`FIELD_NAMES`] order.
    ///
    /// Missing values become empty strings.
    pub fn to_row(&self) -> Vec<String> {
        self.values()
            .into_iter()
            .map(|value| match value {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect()
    }
}

impl Serialize for Stop {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELD_COUNT))?;
        for (name, value) in FIELD_NAMES.iter().zip(self.values()) {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}
