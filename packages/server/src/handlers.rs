//! HTTP handler functions for the shooting dashboard API.

use actix_web::{HttpResponse, web};
use shotmap_models::{DistrictSelection, YearSelection};
use shotmap_pipeline::enrich_incidents;
use shotmap_server_models::{ApiFilterDomains, ApiHealth, ChartQueryParams};

use crate::AppState;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let record_count = state
        .dashboard
        .read()
        .expect("dashboard lock poisoned")
        .record_count();
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        record_count,
    })
}

/// `GET /api/filters`
///
/// Returns the dropdown value domains: "ALL" plus the sorted distinct
/// years and district codes present in the data.
pub async fn filters(state: web::Data<AppState>) -> HttpResponse {
    let dashboard = state.dashboard.read().expect("dashboard lock poisoned");

    let years = std::iter::once("ALL".to_string())
        .chain(dashboard.year_domain().iter().map(ToString::to_string))
        .collect();
    let districts = std::iter::once("ALL".to_string())
        .chain(dashboard.district_domain().iter().map(ToString::to_string))
        .collect();

    HttpResponse::Ok().json(ApiFilterDomains { years, districts })
}

/// `GET /api/charts?year=&district=`
///
/// Computes all five chart tables for the selected filter pair. Absent
/// or malformed parameters clamp to "ALL"; an out-of-domain selection
/// yields empty tables. A failed update returns an error so the client
/// keeps its previous chart state rather than rendering a mixture of
/// old and new tables.
pub async fn charts(
    state: web::Data<AppState>,
    params: web::Query<ChartQueryParams>,
) -> HttpResponse {
    let year = params
        .year
        .as_deref()
        .map_or(YearSelection::All, YearSelection::parse);
    let district = params
        .district
        .as_deref()
        .map_or(DistrictSelection::All, DistrictSelection::parse);

    let result = state
        .dashboard
        .read()
        .expect("dashboard lock poisoned")
        .update(year, district);

    match result {
        Ok(bundle) => HttpResponse::Ok().json(bundle),
        Err(e) => {
            log::error!("chart update failed for year={year} district={district}: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to compute chart tables"
            }))
        }
    }
}

/// `GET /api/district-boundaries`
///
/// Passes the boundary `FeatureCollection` through to the choropleth
/// renderer unchanged.
pub async fn district_boundaries(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.boundaries)
}

/// `POST /api/refresh`
///
/// Re-fetches the CSV export, re-runs the enrichment pipeline, and
/// swaps the new record set in atomically. On any failure the previous
/// set stays in service.
pub async fn refresh(state: web::Data<AppState>) -> HttpResponse {
    let raw = match shotmap_source::fetch_shootings_csv(&state.csv_url).await {
        Ok(raw) => raw,
        Err(e) => {
            log::error!("refresh fetch failed: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to fetch shootings CSV"
            }));
        }
    };

    let enriched = match enrich_incidents(raw, state.policy) {
        Ok(enriched) => enriched,
        Err(e) => {
            log::error!("refresh enrichment failed: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to enrich shooting records"
            }));
        }
    };

    let record_count = enriched.len();
    state
        .dashboard
        .write()
        .expect("dashboard lock poisoned")
        .rebuild(enriched);

    HttpResponse::Ok().json(serde_json::json!({ "recordCount": record_count }))
}
