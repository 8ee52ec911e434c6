#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the arrest map application.
//!
//! Serves the aggregated arrest locations and statistics as JSON, renders
//! the map page shell, and serves the client assets and mugshot images.
//! The dataset is built once before the server binds and shared read-only
//! across workers through [`cache::DatasetCache`].

pub mod cache;
pub mod config;
mod handlers;
pub mod page;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};

use crate::cache::DatasetCache;
use crate::config::ServerConfig;

/// Shared application state.
pub struct AppState {
    /// Aggregated dataset, computed once.
    pub cache: Arc<DatasetCache>,
}

/// Registers the page and API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index)).service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/locations", web::get().to(handlers::locations))
            .route("/stats", web::get().to(handlers::stats))
            .route("/categories", web::get().to(handlers::categories)),
    );
}

/// Starts the arrest map API server.
///
/// Reads [`ServerConfig`] from the environment, builds the dataset from the
/// configured geocode table and records file, and starts the Actix-Web HTTP
/// server. The caller provides the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the input files cannot be loaded,
/// or if the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = ServerConfig::from_env();
    log::debug!("Server configuration: {config:?}");

    let cache = Arc::new(DatasetCache::new(
        &config.geocode_path,
        &config.records_path,
    ));

    log::info!("Loading arrest data...");
    let dataset = cache.get_or_load().await.map_err(|e| {
        log::error!("Failed to load arrest data: {e}");
        std::io::Error::other(e)
    })?;
    log::info!(
        "Serving {} people across {} locations",
        dataset.people_count(),
        dataset.locations.len()
    );

    let state = web::Data::new(AppState { cache });

    let ServerConfig {
        bind_addr,
        port,
        mugshots_dir,
        static_dir,
        ..
    } = config;

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
            // Mugshot images, addressed by file name
            .service(Files::new("/mugshots", &mugshots_dir))
            // Client bundle
            .service(Files::new("/static", &static_dir))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
