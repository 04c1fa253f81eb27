//! Police-district boundary fetch for the choropleth renderer.
//!
//! The boundary `FeatureCollection` keys each polygon by its
//! `DISTRICT_` property; the analytics core never reads the geometry,
//! it is passed through to the rendering collaborator.

use geojson::{FeatureCollection, GeoJson};

use crate::SourceError;

/// The feature property carrying the district code.
pub const DISTRICT_KEY: &str = "DISTRICT_";

/// Parses a boundary `FeatureCollection` from `GeoJSON` text.
///
/// # Errors
///
/// Returns [`SourceError::GeoJson`] if the text is not a valid
/// `FeatureCollection`.
pub fn parse_boundaries(text: &str) -> Result<FeatureCollection, SourceError> {
    let geojson: GeoJson = text.parse()?;
    FeatureCollection::try_from(geojson).map_err(Into::into)
}

/// Fetches and parses the district boundary `FeatureCollection`.
///
/// # Errors
///
/// Returns [`SourceError`] if the download or the parse fails.
pub async fn fetch_boundaries(url: &str) -> Result<FeatureCollection, SourceError> {
    log::info!("downloading district boundaries from {url}");
    let body = reqwest::get(url).await?.error_for_status()?.text().await?;
    let collection = parse_boundaries(&body)?;
    log::info!("parsed {} district boundary features", collection.features.len());
    Ok(collection)
}

/// Extracts the district codes present in a boundary collection.
///
/// The upstream service has emitted `DISTRICT_` both as a JSON number
/// and as a numeric string across vintages; both forms are accepted.
/// Features without a usable code are skipped.
#[must_use]
pub fn district_codes(collection: &FeatureCollection) -> Vec<u16> {
    let mut codes: Vec<u16> = collection
        .features
        .iter()
        .filter_map(|feature| {
            let value = feature.properties.as_ref()?.get(DISTRICT_KEY)?;
            match value {
                serde_json::Value::Number(n) => n.as_u64().and_then(|v| u16::try_from(v).ok()),
                serde_json::Value::String(s) => s.trim().parse::<u16>().ok(),
                _ => None,
            }
        })
        .collect();
    codes.sort_unstable();
    codes.dedup();
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARY_SNIPPET: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "DISTRICT_": 22, "DIV_CODE": "NWD" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-75.17, 40.0], [-75.15, 40.0], [-75.15, 40.02], [-75.17, 40.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "DISTRICT_": "14", "DIV_CODE": "NWD" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-75.2, 40.05], [-75.18, 40.05], [-75.18, 40.07], [-75.2, 40.05]]]
                }
            }
        ]
    }"#;

    #[test]
    fn parses_feature_collection() {
        let collection = parse_boundaries(BOUNDARY_SNIPPET).unwrap();
        assert_eq!(collection.features.len(), 2);
    }

    #[test]
    fn extracts_district_codes_from_both_property_forms() {
        let collection = parse_boundaries(BOUNDARY_SNIPPET).unwrap();
        assert_eq!(district_codes(&collection), vec![14, 22]);
    }

    #[test]
    fn rejects_non_geojson_text() {
        assert!(parse_boundaries("{\"hello\": 1}").is_err());
    }
}
