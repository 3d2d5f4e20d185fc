//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::StopFilter;

/// Response body format for `/stops`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Map keyed by ATCO code
    #[default]
    Json,
    /// Column names plus rows
    Table,
    /// CSV with the API's headers
    Csv,
}

/// Query string shared by the stop endpoints.
///
/// All list parameters are comma-separated.
#[derive(Debug, Default, Deserialize)]
pub struct StopsQuery {
    /// Area codes to fetch (e.g. "068,110")
    pub areas: Option<String>,

    /// ATCO codes to keep
    pub atco: Option<String>,

    /// Stop types to keep (e.g. "BCT,RSE")
    pub stop_type: Option<String>,

    /// Statuses to keep (e.g. "active")
    pub status: Option<String>,

    /// Output format for `/stops`
    #[serde(default)]
    pub format: OutputFormat,
}

/// Split a comma-separated parameter, dropping blanks.
///
/// Returns `None` when the parameter is missing or holds nothing.
pub fn split_list(param: Option<&str>) -> Option<Vec<String>> {
    let items: Vec<String> = param?
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    (!items.is_empty()).then_some(items)
}

impl StopsQuery {
    /// Area codes requested, if any.
    pub fn areas(&self) -> Option<Vec<String>> {
        split_list(self.areas.as_deref())
    }

    /// ATCO codes requested, if any.
    pub fn atco_codes(&self) -> Option<Vec<String>> {
        split_list(self.atco.as_deref())
    }

    /// Filter built from the `atco`, `stop_type` and `status` parameters.
    pub fn filter(&self) -> StopFilter {
        let mut filter = StopFilter::new();
        if let Some(codes) = self.atco_codes() {
            filter = filter.atco_codes(codes);
        }
        if let Some(types) = split_list(self.stop_type.as_deref()) {
            filter = filter.stop_types(types);
        }
        if let Some(statuses) = split_list(self.status.as_deref()) {
            filter = filter.statuses(statuses);
        }
        filter
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_drops_blanks() {
        assert_eq!(
            split_list(Some(" BCT, RSE,,")),
            Some(vec!["BCT".to_string(), "RSE".to_string()])
        );
        assert_eq!(split_list(Some(" , ")), None);
        assert_eq!(split_list(None), None);
    }

    #[test]
    fn filter_from_query() {
        let query = StopsQuery {
            stop_type: Some("BCT,BCS".into()),
            status: Some("active".into()),
            ..Default::default()
        };
        assert_eq!(
            query.filter(),
            StopFilter::new().stop_types(["BCT", "BCS"]).statuses(["active"])
        );
        assert!(StopsQuery::default().filter().is_empty());
    }
}
