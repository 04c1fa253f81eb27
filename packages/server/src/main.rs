#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the shooting dashboard.
//!
//! Loads the incident CSV at startup, runs the enrichment pipeline
//! once, and serves the filter domains, the per-filter chart tables,
//! and the district boundary `GeoJSON` the choropleth renderer joins
//! against. The enriched record set is read-only between refreshes;
//! `POST /api/refresh` builds a new set and swaps it in atomically.

mod handlers;

use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use geojson::FeatureCollection;
use shotmap_analytics::Dashboard;
use shotmap_models::DistrictPolicy;
use shotmap_pipeline::enrich_incidents;
use shotmap_source::{DEFAULT_BOUNDARIES_URL, DEFAULT_SHOOTINGS_CSV_URL};

/// Shared application state.
pub struct AppState {
    /// Update orchestrator over the enriched record set. Writers only
    /// appear during a refresh, which swaps in a fully built set.
    pub dashboard: RwLock<Dashboard>,
    /// District boundary polygons, passed through to the choropleth.
    pub boundaries: FeatureCollection,
    /// CSV export URL, kept for refreshes.
    pub csv_url: String,
    /// Missing-district policy for this deployment.
    pub policy: DistrictPolicy,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let csv_url = std::env::var("SHOOTINGS_CSV_URL")
        .unwrap_or_else(|_| DEFAULT_SHOOTINGS_CSV_URL.to_string());
    let boundaries_url =
        std::env::var("BOUNDARIES_GEOJSON_URL").unwrap_or_else(|_| DEFAULT_BOUNDARIES_URL.to_string());
    let policy: DistrictPolicy = std::env::var("DISTRICT_POLICY")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or_default();

    log::info!("loading shooting incident data (district policy: {policy})");
    let raw = shotmap_source::fetch_shootings_csv(&csv_url)
        .await
        .expect("Failed to fetch shootings CSV");
    let enriched = enrich_incidents(raw, policy).expect("Failed to enrich shooting records");

    let boundaries = shotmap_source::boundaries::fetch_boundaries(&boundaries_url)
        .await
        .expect("Failed to fetch district boundaries");

    let state = web::Data::new(AppState {
        dashboard: RwLock::new(Dashboard::new(enriched)),
        boundaries,
        csv_url,
        policy,
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/filters", web::get().to(handlers::filters))
                    .route("/charts", web::get().to(handlers::charts))
                    .route(
                        "/district-boundaries",
                        web::get().to(handlers::district_boundaries),
                    )
                    .route("/refresh", web::post().to(handlers::refresh)),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
