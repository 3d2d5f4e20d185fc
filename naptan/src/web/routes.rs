//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::api::ApiError;
use crate::domain::StopList;
use crate::export::{ExportError, StopMapTemplate, to_geojson};
use crate::geo::fill_coordinates;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stops", get(stops))
        .route("/stops/geojson", get(stops_geojson))
        .route("/map", get(map_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Fetch and filter the stops a query asks for.
///
/// `areas` picks what to fetch; without it the areas come from `atco`,
/// and without either the national dataset is used.
async fn load_stops(state: &AppState, query: &StopsQuery) -> Result<StopList, AppError> {
    let stops = match (query.areas(), query.atco_codes()) {
        (Some(areas), _) => {
            if let Some(bad) = areas
                .iter()
                .find(|a| !a.chars().all(|c| c.is_ascii_alphanumeric()))
            {
                return Err(AppError::BadRequest {
                    message: format!("Invalid area code: {bad}"),
                });
            }
            state.naptan.get_area_stops(&areas).await?
        }
        (None, Some(codes)) => state.naptan.get_specific_stops(&codes).await?,
        (None, None) => state.naptan.get_all_stops().await?,
    };

    Ok(stops.filter(&query.filter()))
}

/// Stops as a JSON map, a table, or CSV.
async fn stops(
    State(state): State<AppState>,
    Query(query): Query<StopsQuery>,
) -> Result<Response, AppError> {
    let stops = load_stops(&state, &query).await?;

    match query.format {
        OutputFormat::Json => Ok(Json(stops.to_map()).into_response()),
        OutputFormat::Table => Ok(Json(stops.to_table()).into_response()),
        OutputFormat::Csv => {
            let mut body = Vec::new();
            stops
                .write_csv(&mut body)
                .map_err(|e| AppError::Internal {
                    message: format!("CSV error: {e}"),
                })?;
            Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body).into_response())
        }
    }
}

/// Stops as a GeoJSON feature collection.
async fn stops_geojson(
    State(state): State<AppState>,
    Query(query): Query<StopsQuery>,
) -> Result<Response, AppError> {
    let stops = fill_coordinates(&load_stops(&state, &query).await?);
    let body = serde_json::to_string(&to_geojson(&stops)).map_err(ExportError::from)?;
    Ok(([(header::CONTENT_TYPE, "application/geo+json")], body).into_response())
}

/// Stops on an HTML map.
async fn map_page(
    State(state): State<AppState>,
    Query(query): Query<StopsQuery>,
) -> Result<Html<String>, AppError> {
    use askama::Template;

    let stops = fill_coordinates(&load_stops(&state, &query).await?);
    let title = match query.areas.as_deref().or(query.atco.as_deref()) {
        Some(what) => format!("NaPTAN stops: {what}"),
        None => "NaPTAN stops".to_string(),
    };
    let html = StopMapTemplate::from_stops(title, &stops)
        .render()
        .map_err(ExportError::from)?;
    Ok(Html(html))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::InvalidConfig(_) => AppError::Internal {
                message: e.to_string(),
            },
            _ => AppError::Upstream {
                message: e.to_string(),
            },
        }
    }
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
