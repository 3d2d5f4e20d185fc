//! NaPTAN access-node HTTP client.

use tracing::{debug, info};

use crate::domain::{StopFilter, StopList, format_area_codes};

use super::decode::decode_stops;
use super::error::ApiError;

/// Default base URL for the NaPTAN API.
const DEFAULT_BASE_URL: &str = "https://naptan.api.dft.gov.uk/v1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the NaPTAN client.
#[derive(Debug, Clone)]
pub struct NaptanConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Drop rows that cannot become stops instead of failing the request
    pub skip_invalid_rows: bool,
}

impl NaptanConfig {
    /// Create a config pointing at the public API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            skip_invalid_rows: false,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Skip invalid rows rather than failing the whole response.
    pub fn with_skip_invalid_rows(mut self, skip: bool) -> Self {
        self.skip_invalid_rows = skip;
        self
    }
}

impl Default for NaptanConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the NaPTAN access-node API.
#[derive(Debug, Clone)]
pub struct NaptanClient {
    http: reqwest::Client,
    endpoint: reqwest::Url,
    skip_invalid_rows: bool,
}

impl NaptanClient {
    /// Create a new NaPTAN client.
    pub fn new(config: NaptanConfig) -> Result<Self, ApiError> {
        let endpoint = format!("{}/access-nodes", config.base_url.trim_end_matches('/'));
        let endpoint = reqwest::Url::parse(&endpoint)
            .map_err(|e| ApiError::InvalidConfig(format!("base URL {:?}: {e}", config.base_url)))?;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint,
            skip_invalid_rows: config.skip_invalid_rows,
        })
    }

    /// Fetch stops for a pre-formatted area query such as `"068,110"`.
    ///
    /// An empty query asks for the whole country.
    pub async fn get_stops_for_areas(&self, area_query: &str) -> Result<StopList, ApiError> {
        debug!(areas = area_query, "requesting access nodes");

        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[("atcoAreaCodes", area_query), ("dataFormat", "csv")])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = match body.trim() {
                "" => status.canonical_reason().unwrap_or("unknown").to_string(),
                text => text.to_string(),
            };
            return Err(ApiError::Api {
                status: status.as_u16(),
                reason,
            });
        }

        let body = response.bytes().await?;
        let stops = decode_stops(&body, self.skip_invalid_rows)?;

        info!(
            areas = area_query,
            stops = stops.len(),
            "fetched access nodes"
        );
        Ok(stops)
    }

    /// Fetch every stop in the national dataset.
    pub async fn get_all_stops(&self) -> Result<StopList, ApiError> {
        self.get_stops_for_areas("").await
    }

    /// Fetch every stop in the given areas.
    ///
    /// Codes may be area codes (`"68"`, `"250"`) or full ATCO codes; only
    /// the area prefix is used.
    pub async fn get_area_stops<I, S>(&self, area_codes: I) -> Result<StopList, ApiError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.get_stops_for_areas(&format_area_codes(area_codes))
            .await
    }

    /// Fetch just the named stops.
    ///
    /// The areas of the given ATCO codes are fetched and then narrowed to
    /// the codes asked for. Codes not in the dataset are silently missing
    /// from the result, which may be empty.
    pub async fn get_specific_stops<I, S>(&self, atco_codes: I) -> Result<StopList, ApiError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some((area_query, filter)) = specific_stops_query(atco_codes) else {
            return Ok(StopList::new());
        };
        let stops = self.get_stops_for_areas(&area_query).await?;
        Ok(stops.filter(&filter))
    }
}

/// Area query and filter for a specific-stops lookup.
///
/// Returns `None` when no codes are given, since an empty area query would
/// fetch the whole country only to keep nothing.
pub(crate) fn specific_stops_query<I, S>(atco_codes: I) -> Option<(String, StopFilter)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let codes: Vec<String> = atco_codes
        .into_iter()
        .map(|c| c.as_ref().to_string())
        .collect();
    if codes.is_empty() {
        return None;
    }
    let area_query = format_area_codes(&codes);
    Some((area_query, StopFilter::new().atco_codes(codes)))
}


#[cfg(test)]
mod tests {
    use super::test_server::*;
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn config_defaults() {
        let config = NaptanConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.skip_invalid_rows);
    }

    #[test]
    fn config_builders() {
        let config = NaptanConfig::new()
            .with_base_url("http://localhost:8080")
            .with_timeout(5)
            .with_skip_invalid_rows(true);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
        assert!(config.skip_invalid_rows);
    }

    #[test]
    fn endpoint_joins_base_url() {
        let client = NaptanClient::new(NaptanConfig::new()).unwrap();
        assert_eq!(
            client.endpoint.as_str(),
            "https://naptan.api.dft.gov.uk/v1/access-nodes"
        );

        let client =
            NaptanClient::new(NaptanConfig::new().with_base_url("http://localhost:9000/")).unwrap();
        assert_eq!(client.endpoint.as_str(), "http://localhost:9000/access-nodes");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let result = NaptanClient::new(NaptanConfig::new().with_base_url("not a url"));
        assert!(matches!(result, Err(ApiError::InvalidConfig(_))));
    }

    #[test]
    fn specific_query_uses_areas_of_codes() {
        let (query, filter) =
            specific_stops_query(["068000000754", "1100EXT10", "250020084"]).unwrap();
        assert_eq!(query, "068,110,250");
        assert_eq!(
            filter,
            StopFilter::new().atco_codes(["068000000754", "1100EXT10", "250020084"])
        );
        assert!(specific_stops_query(Vec::<String>::new()).is_none());
    }

    #[tokio::test]
    async fn good_request_decodes_stops() {
        let (base_url, seen) = fake_api(StatusCode::OK, GOOD_RESPONSE).await;
        let client = NaptanClient::new(NaptanConfig::new().with_base_url(base_url)).unwrap();

        let stops = client.get_all_stops().await.unwrap();
        assert_eq!(stops.len(), 8);
        assert_eq!(stops[0].atco_code, "068000000754");
        assert_eq!(stops[1].easting, 392181);
        assert_eq!(seen.last("atcoAreaCodes").as_deref(), Some(""));
        assert_eq!(seen.last("dataFormat").as_deref(), Some("csv"));
    }

    #[tokio::test]
    async fn bad_request_is_api_error() {
        let (base_url, _) = fake_api(
            StatusCode::BAD_REQUEST,
            "Atco area codes or data format are incorrectly formatted",
        )
        .await;
        let client = NaptanClient::new(NaptanConfig::new().with_base_url(base_url)).unwrap();

        match client.get_stops_for_areas("abc").await {
            Err(ApiError::Api { status, reason }) => {
                assert_eq!(status, 400);
                assert_eq!(
                    reason,
                    "Atco area codes or data format are incorrectly formatted"
                );
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_error_body_falls_back_to_reason_phrase() {
        let (base_url, _) = fake_api(StatusCode::SERVICE_UNAVAILABLE, "").await;
        let client = NaptanClient::new(NaptanConfig::new().with_base_url(base_url)).unwrap();

        match client.get_all_stops().await {
            Err(ApiError::Api { status, reason }) => {
                assert_eq!(status, 503);
                assert_eq!(reason, "Service Unavailable");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn area_stops_sends_formatted_areas() {
        let (base_url, seen) = fake_api(StatusCode::OK, GOOD_RESPONSE).await;
        let client = NaptanClient::new(NaptanConfig::new().with_base_url(base_url)).unwrap();

        let stops = client.get_area_stops(["250", "110", "68"]).await.unwrap();
        assert_eq!(stops.len(), 8);
        assert_eq!(stops[4].atco_code, "1100DEC11184");
        assert_eq!(stops[5].common_name, "Bedland's Lane");
        assert_eq!(seen.last("atcoAreaCodes").as_deref(), Some("068,110,250"));
    }

    #[tokio::test]
    async fn specific_stops_keeps_only_requested() {
        let (base_url, _) = fake_api(StatusCode::OK, GOOD_RESPONSE).await;
        let client = NaptanClient::new(NaptanConfig::new().with_base_url(base_url)).unwrap();

        let stops = client
            .get_specific_stops(["068000000754", "1100EXT10", "250020084"])
            .await
            .unwrap();
        assert_eq!(stops.len(), 3);
        assert_eq!(stops[0].atco_code, "068000000754");
        assert_eq!(stops[1].atco_code, "1100EXT10");
        assert_eq!(stops[2].atco_code, "250020084");
    }

    #[tokio::test]
    async fn specific_stops_not_present_is_empty() {
        let (base_url, _) = fake_api(StatusCode::OK, GOOD_RESPONSE).await;
        let client = NaptanClient::new(NaptanConfig::new().with_base_url(base_url)).unwrap();

        let stops = client
            .get_specific_stops(["2500DCL4061", "1100DEA10138", "068000000322"])
            .await
            .unwrap();
        assert!(stops.is_empty());
    }

    #[tokio::test]
    async fn no_specific_stops_skips_request() {
        let (base_url, seen) = fake_api(StatusCode::OK, GOOD_RESPONSE).await;
        let client = NaptanClient::new(NaptanConfig::new().with_base_url(base_url)).unwrap();

        let stops = client.get_specific_stops(Vec::<&str>::new()).await.unwrap();
        assert!(stops.is_empty());
        assert_eq!(seen.count(), 0);
    }
}
