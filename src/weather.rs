//! Weather location lookup results.
//!
//! Only the response shape is handled here; the HTTP request is made by the
//! host.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status code the lookup service uses for success
pub const LOOKUP_OK: &str = "200";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("malformed location lookup response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A place the weather widget can be pointed at
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub country: String,
    /// First-level administrative area (province, state)
    pub region1: String,
    /// Second-level administrative area (city, county)
    pub region2: String,
    pub lat: String,
    pub lon: String,
}

#[derive(Deserialize)]
struct LookupResponse {
    code: String,
    #[serde(default)]
    location: Vec<RawLocation>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawLocation {
    id: String,
    name: String,
    country: String,
    adm1: String,
    adm2: String,
    lat: String,
    lon: String,
}

impl From<RawLocation> for Location {
    fn from(raw: RawLocation) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            country: raw.country,
            region1: raw.adm1,
            region2: raw.adm2,
            lat: raw.lat,
            lon: raw.lon,
        }
    }
}

/// Parse a location lookup body. A non-success status yields no locations.
pub fn parse_location_lookup(body: &str) -> Result<Vec<Location>, WeatherError> {
    let response: LookupResponse = serde_json::from_str(body)?;
    if response.code != LOOKUP_OK {
        log::debug!("Location lookup returned code {}", response.code);
        return Ok(Vec::new());
    }
    Ok(response.location.into_iter().map(Location::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_lookup() {
        let body = r#"{
            "code": "200",
            "location": [{
                "id": "101010100", "name": "Beijing", "country": "China",
                "adm1": "Beijing", "adm2": "Beijing",
                "lat": "39.90499", "lon": "116.40529", "tz": "Asia/Shanghai"
            }]
        }"#;
        let locations = parse_location_lookup(body).unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].id, "101010100");
        assert_eq!(locations[0].region1, "Beijing");
        assert_eq!(locations[0].lon, "116.40529");
    }

    #[test]
    fn test_failure_code_yields_nothing() {
        let locations = parse_location_lookup(r#"{"code": "404"}"#).unwrap();
        assert!(locations.is_empty());
    }

    #[test]
    fn test_missing_fields_are_blank() {
        let locations = parse_location_lookup(r#"{"code": "200", "location": [{"name": "Oslo"}]}"#)
            .unwrap();
        assert_eq!(locations[0].name, "Oslo");
        assert_eq!(locations[0].region2, "");
    }

    #[test]
    fn test_malformed_body_is_an_error() {
        assert!(parse_location_lookup("<html>").is_err());
        assert!(parse_location_lookup(r#"{"location": []}"#).is_err());
    }
}
