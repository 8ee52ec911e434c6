//! HTTP handler functions for the arrest map API.

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use arrest_map_analytics::filter_by_category;
use arrest_map_arrest_models::Dataset;
use arrest_map_server_models::{ApiError, ApiHealth, LocationQueryParams};

use crate::AppState;
use crate::page::render_index;

/// Fetches the dataset, or an error response if it cannot be built.
async fn dataset(state: &AppState) -> Result<Arc<Dataset>, HttpResponse> {
    state.cache.get_or_load().await.map_err(|e| {
        log::error!("Failed to load dataset: {e}");
        internal_error("Failed to load dataset")
    })
}

fn internal_error(message: &str) -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiError {
        error: message.to_string(),
    })
}

/// `GET /`
///
/// Renders the map page with the category list and statistics embedded.
pub async fn index(state: web::Data<AppState>) -> HttpResponse {
    let dataset = match dataset(&state).await {
        Ok(d) => d,
        Err(response) => return response,
    };

    match render_index(&dataset.categories, &dataset.stats) {
        Ok(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            log::error!("Failed to render index page: {e}");
            internal_error("Failed to render page")
        }
    }
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/locations`
///
/// Returns every location group, or only the people in a single category
/// when `category` is given and not `"all"`.
pub async fn locations(
    state: web::Data<AppState>,
    params: web::Query<LocationQueryParams>,
) -> HttpResponse {
    let dataset = match dataset(&state).await {
        Ok(d) => d,
        Err(response) => return response,
    };

    let category = params.category.as_deref();
    let groups = filter_by_category(&dataset.locations, category);

    log::debug!(
        "Serving {} of {} locations for category {category:?}",
        groups.len(),
        dataset.locations.len()
    );

    HttpResponse::Ok().json(groups)
}

/// `GET /api/stats`
pub async fn stats(state: web::Data<AppState>) -> HttpResponse {
    match dataset(&state).await {
        Ok(d) => HttpResponse::Ok().json(&d.stats),
        Err(response) => response,
    }
}

/// `GET /api/categories`
///
/// Returns the distinct crime categories, sorted.
pub async fn categories(state: web::Data<AppState>) -> HttpResponse {
    match dataset(&state).await {
        Ok(d) => HttpResponse::Ok().json(&d.categories),
        Err(response) => response,
    }
}
