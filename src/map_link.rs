//! Deep links into turn-by-turn navigation.
//!
//! Links carry addresses rather than coordinates; the navigation app
//! geocodes them itself.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

pub const DEFAULT_MAP_BASE_URL: &str = "https://www.google.com/maps/dir/";
pub const DEFAULT_TRAVEL_MODE: &str = "driving";

/// Separator between waypoints in a directions link.
const WAYPOINT_SEPARATOR: &str = "|";

/// Everything except the characters `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone)]
pub struct MapLinkComposer {
    pub base_url: String,
    pub travel_mode: String,
}

impl Default for MapLinkComposer {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MAP_BASE_URL.to_string(),
            travel_mode: DEFAULT_TRAVEL_MODE.to_string(),
        }
    }
}

impl MapLinkComposer {
    pub fn new(base_url: impl Into<String>, travel_mode: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            travel_mode: travel_mode.into(),
        }
    }

    /// Builds a directions link for the addresses in visiting order.
    ///
    /// One address gives a destination-only link; two or more use the
    /// first as origin, the last as destination and the rest as waypoints.
    pub fn compose<S: AsRef<str>>(&self, ordered_addresses: &[S]) -> Option<String> {
        let (destination, rest) = ordered_addresses.split_last()?;

        let mut url = format!("{}?api=1", self.base_url);
        if let Some((origin, waypoints)) = rest.split_first() {
            url.push_str("&origin=");
            url.push_str(&encode(origin.as_ref()));
            url.push_str("&destination=");
            url.push_str(&encode(destination.as_ref()));
            if !waypoints.is_empty() {
                let joined = waypoints
                    .iter()
                    .map(|w| encode(w.as_ref()))
                    .collect::<Vec<_>>()
                    .join(WAYPOINT_SEPARATOR);
                url.push_str("&waypoints=");
                url.push_str(&joined);
            }
        } else {
            url.push_str("&destination=");
            url.push_str(&encode(destination.as_ref()));
        }
        url.push_str("&travelmode=");
        url.push_str(&encode(&self.travel_mode));

        Some(url)
    }
}

/// Composes a link with the default provider settings.
pub fn compose_map_url<S: AsRef<str>>(ordered_addresses: &[S]) -> Option<String> {
    MapLinkComposer::default().compose(ordered_addresses)
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}
