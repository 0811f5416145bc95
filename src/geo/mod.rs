//! Geolocation capability: the lookup seam injected into the report
//! builder, plus the HTTP client used by the binary.
//!
//! The core never fails a run on a lookup problem: any error surfacing
//! from [`Geolocate::locate`] is downgraded to zero coordinates at the
//! enrichment site.

use serde::Deserialize;

use crate::domain::{Coordinates, ShippingAddress};

/// Looks up geographic coordinates for a structured shipping address.
pub trait Geolocate {
    fn locate(&self, address: &ShippingAddress) -> Result<Coordinates, GeoError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error("geolocation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("no geolocation result for the given address")]
    NoResult,

    #[error("geolocation response was malformed: {0}")]
    Malformed(String),
}

/// Client for an OpenStreetMap-style search endpoint returning a JSON
/// array of hits with stringly-typed `lat`/`lon` fields.
pub struct OsmGeocoder {
    client: reqwest::blocking::Client,
    search_url: String,
}

impl OsmGeocoder {
    pub fn new(search_url: impl Into<String>) -> Result<Self, GeoError> {
        // Nominatim rejects requests without an identifying user agent
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("order-report-rs/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            search_url: search_url.into(),
        })
    }
}

impl Geolocate for OsmGeocoder {
    fn locate(&self, address: &ShippingAddress) -> Result<Coordinates, GeoError> {
        let query = [
            address.street.as_str(),
            address.suburb.as_str(),
            address.state.as_str(),
            address.postcode.as_str(),
        ]
        .join(" ");

        let hits: Vec<SearchHit> = self
            .client
            .get(&self.search_url)
            .query(&[("format", "json"), ("q", query.as_str())])
            .send()?
            .error_for_status()?
            .json()?;

        let hit = hits.into_iter().next().ok_or(GeoError::NoResult)?;
        Ok(Coordinates {
            latitude: parse_coordinate("lat", &hit.lat)?,
            longitude: parse_coordinate("lon", &hit.lon)?,
        })
    }
}

#[derive(Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

fn parse_coordinate(field: &str, raw: &str) -> Result<f64, GeoError> {
    raw.parse()
        .map_err(|_| GeoError::Malformed(format!("{field} '{raw}' is not numeric")))
}
