//! Web layer for browsing NaPTAN stops.
//!
//! Serves filtered stop lists as JSON, CSV and GeoJSON, and as an HTML map.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
