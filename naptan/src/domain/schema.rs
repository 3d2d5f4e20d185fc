//! Column layout of the NaPTAN access-node CSV.

/// Number of columns in every access-node row.
pub const FIELD_COUNT: usize = 43;

/// Record field names, in column order.
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "atco_code",
    "naptan_code",
    "plate_code",
    "cleardown_code",
    "common_name",
    "common_name_lang",
    "short_common_name",
    "short_common_name_lang",
    "landmark",
    "landmark_lang",
    "street",
    "street_lang",
    "crossing",
    "crossing_lang",
    "indicator",
    "indicator_lang",
    "bearing",
    "nptg_locality_code",
    "locality_name",
    "parent_locality_name",
    "grand_parent_locality_name",
    "town",
    "town_lang",
    "suburb",
    "suburb_lang",
    "locality_centre",
    "grid_type",
    "easting",
    "northing",
    "longitude",
    "latitude",
    "stop_type",
    "bus_stop_type",
    "timing_status",
    "default_wait_time",
    "notes",
    "notes_lang",
    "administrative_area_code",
    "creation_datetime",
    "modification_datetime",
    "revision_number",
    "modification",
    "status",
];

/// Column headers as the API writes them, in the same order as
/// [`FIELD_NAMES`].
pub const CSV_HEADERS: [&str; FIELD_COUNT] = [
    "ATCOCode",
    "NaptanCode",
    "PlateCode",
    "CleardownCode",
    "CommonName",
    "CommonNameLang",
    "ShortCommonName",
    "ShortCommonNameLang",
    "Landmark",
    "LandmarkLang",
    "Street",
    "StreetLang",
    "Crossing",
    "CrossingLang",
    "Indicator",
    "IndicatorLang",
    "Bearing",
    "NptgLocalityCode",
    "LocalityName",
    "ParentLocalityName",
    "GrandParentLocalityName",
    "Town",
    "TownLang",
    "Suburb",
    "SuburbLang",
    "LocalityCentre",
    "GridType",
    "Easting",
    "Northing",
    "Longitude",
    "Latitude",
    "StopType",
    "BusStopType",
    "TimingStatus",
    "DefaultWaitTime",
    "Notes",
    "NotesLang",
    "AdministrativeAreaCode",
    "CreationDateTime",
    "ModificationDateTime",
    "RevisionNumber",
    "Modification",
    "Status",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = FIELD_NAMES.iter().collect();
        assert_eq!(names.len(), FIELD_COUNT);
        let headers: HashSet<_> = CSV_HEADERS.iter().collect();
        assert_eq!(headers.len(), FIELD_COUNT);
    }

    #[test]
    fn headers_line_up_with_names() {
        // Lowercased header is the field name without underscores
        for (name, header) in FIELD_NAMES.iter().zip(CSV_HEADERS) {
            let squashed = name.replace('_', "");
            assert_eq!(squashed, header.to_lowercase(), "{name} vs {header}");
        }
    }
}
