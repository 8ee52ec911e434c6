#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Arrest map server binary.
//!
//! Configure with `BIND_ADDR`, `PORT`, `GEOCODE_PATH`, `RECORDS_PATH`,
//! `MUGSHOTS_DIR`, and `STATIC_DIR`; log verbosity with `RUST_LOG`.

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    arrest_map_server::run_server().await
}
