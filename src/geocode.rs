//! HTTP geocoder adapter for billing-address fallback.
//!
//! Talks to a Nominatim-compatible `/search` endpoint. The public
//! Nominatim server allows one request per second per client, so requests
//! from one geocoder (and its clones) are spaced by `min_request_interval`.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::traits::Geocoder;
use crate::types::Coordinate;

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("geocoder request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("geocoder returned an unusable result: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Minimum gap between the starts of two consecutive requests.
    pub min_request_interval: Duration,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("crew-route-planner/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
            min_request_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    config: GeocoderConfig,
    client: reqwest::blocking::Client,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimGeocoder {
    pub fn new(config: GeocoderConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            config,
            client,
            last_request: Arc::new(Mutex::new(None)),
        })
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError> {
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));

        // Held for the whole request: one request in flight per geocoder.
        let mut last_request = self
            .last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(wait) = remaining_wait(*last_request, self.config.min_request_interval, Instant::now()) {
            tracing::trace!(wait_ms = wait.as_millis() as u64, "spacing geocoder requests");
            thread::sleep(wait);
        }
        *last_request = Some(Instant::now());

        let places = self
            .client
            .get(url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Vec<SearchResult>>())?;

        let Some(place) = places.into_iter().next() else {
            tracing::debug!(address, "geocoder found no match");
            return Ok(None);
        };

        let latitude = parse_degrees(&place.lat)?;
        let longitude = parse_degrees(&place.lon)?;
        tracing::debug!(address, latitude, longitude, "geocoded address");

        // Range checking is left to the resolver so it can report InvalidCoordinate.
        Ok(Some(Coordinate {
            latitude,
            longitude,
        }))
    }
}

/// Geocoder for hosts without a geocoding service; never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeocoder;

impl Geocoder for NoGeocoder {
    fn geocode(&self, _address: &str) -> Result<Option<Coordinate>, GeocodeError> {
        Ok(None)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
}

/// Time still to wait before a request may start, if any.
fn remaining_wait(last: Option<Instant>, interval: Duration, now: Instant) -> Option<Duration> {
    let elapsed = now.saturating_duration_since(last?);
    interval.checked_sub(elapsed).filter(|wait| !wait.is_zero())
}

fn parse_degrees(raw: &str) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| GeocodeError::InvalidResponse(format!("not a coordinate: {raw:?}")))
}
