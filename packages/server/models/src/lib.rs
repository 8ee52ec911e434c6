#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the arrest map server.
//!
//! Location groups and statistics are served as the aggregated model types
//! themselves; this crate holds only the shapes specific to the HTTP layer.

use arrest_map_arrest_models::Stats;
use serde::{Deserialize, Serialize};

/// Query parameters for the locations endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationQueryParams {
    /// Exact category to filter by. Omitted or `"all"` returns everything.
    pub category: Option<String>,
}

/// Data embedded in the index page for the initial render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialPageData<'a> {
    /// Distinct categories, sorted.
    pub categories: &'a [String],
    /// Global statistics.
    pub stats: &'a Stats,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Human-readable error message.
    pub error: String,
}
