//! Geographic location inference.
//!
//! Devices report positions under many naming schemes. Two passes are made
//! over a message:
//!
//! 1. **Grouped keys**: keys of the form `gps_<n>` (as emitted by CayenneLPP
//!    decoders) holding a nested object with `latitude`, `longitude` and
//!    `altitude`. Candidates are visited in ascending order of `n`.
//! 2. **Flat keys**: a fixed priority list of latitude/longitude/altitude
//!    key triples at the top level, followed by an accuracy lookup.
//!
//! Every returned [`Location`] satisfies [`Location::is_valid`].

use std::cmp::Ordering;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::inference::Inferrer;
use crate::message::{number_field, Message};

/// Matches grouped position keys such as `gps_5`.
static GPS_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^gps_([0-9]+)$").unwrap());

/// Flat latitude/longitude/altitude key triples, in priority order.
const FLAT_KEYS: &[(&str, &str, &str)] = &[
    ("lat", "lon", "alt"),
    ("lat", "lng", "alt"),
    ("lat", "long", "alt"),
    ("latitude", "longitude", "altitude"),
    ("Latitude", "Longitude", "Altitude"),
    ("latitudeDeg", "longitudeDeg", "altitude"),
    ("latitudeDeg", "longitudeDeg", "height"),
    ("gps_lat", "gps_lng", "gps_alt"),
    ("gps_lat", "gps_lng", "gpsalt"),
];

/// Accuracy keys in metres, in priority order.
const ACCURACY_KEYS: &[&str] = &["acc", "accuracy", "hacc"];

/// Horizontal dilution of precision keys, read as accuracy by the lenient policy.
const HDOP_KEYS: &[&str] = &["hdop", "gps_hdop"];

/// A geographic location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Altitude in metres.
    pub altitude: f64,
    /// Horizontal accuracy in metres (0 when unknown).
    pub accuracy: f64,
}

impl Location {
    /// Whether the location is well defined.
    ///
    /// All fields must be finite, latitude within [-90, 90] and longitude
    /// within [-180, 180].
    pub fn is_valid(&self) -> bool {
        let finite = [self.latitude, self.longitude, self.altitude, self.accuracy]
            .iter()
            .all(|v| v.is_finite());

        finite
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6} {:.6} {:.6}m ±{:.6}m",
            self.latitude, self.longitude, self.altitude, self.accuracy
        )
    }
}

/// How permissive location inference is about accuracy sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationPolicy {
    /// Accuracy is only read from metre-valued keys.
    #[default]
    Strict,
    /// HDOP keys are also accepted as an accuracy proxy.
    Lenient,
}

/// Configuration for location inference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Accuracy policy.
    pub policy: LocationPolicy,
}

/// Infers a [`Location`] from a message.
#[derive(Debug, Clone, Default)]
pub struct LocationInferrer {
    config: LocationConfig,
}

impl LocationInferrer {
    /// Create a location inferrer with the strict policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a location inferrer with the given configuration.
    pub fn with_config(config: LocationConfig) -> Self {
        Self { config }
    }

    /// Set the accuracy policy.
    pub fn with_policy(mut self, policy: LocationPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Get the active configuration.
    pub fn config(&self) -> &LocationConfig {
        &self.config
    }

    /// Grouped `gps_<n>` keys in ascending numeric order of `n`.
    fn grouped_keys(message: &Message) -> Vec<(&str, &str)> {
        let mut keys: Vec<(&str, &str)> = message
            .keys()
            .filter_map(|key| {
                let caps = GPS_KEY.captures(key)?;
                let digits = caps.get(1)?.as_str();
                Some((key, digits))
            })
            .collect();

        keys.sort_by(|(ka, da), (kb, db)| compare_decimal(da, db).then_with(|| ka.cmp(kb)));
        keys
    }

    fn infer_grouped(&self, message: &Message) -> Option<Location> {
        for (key, _) in Self::grouped_keys(message) {
            let Some(group) = message.object(key) else {
                tracing::debug!(key, "grouped position key is not an object");
                continue;
            };

            let location = grouped_location(group);
            if location.is_valid() {
                tracing::trace!(key, %location, "location inferred from grouped key");
                return Some(location);
            }
            tracing::debug!(key, %location, "grouped position out of range");
        }
        None
    }

    fn infer_flat(&self, message: &Message) -> Option<Location> {
        let mut location = FLAT_KEYS.iter().find_map(|&(lat_key, lon_key, alt_key)| {
            let latitude = message.number(lat_key)?;
            let longitude = message.number(lon_key)?;
            // 0,0 is what receivers report without a fix.
            if latitude == 0.0 && longitude == 0.0 {
                return None;
            }
            Some(Location {
                latitude,
                longitude,
                altitude: message.number(alt_key).unwrap_or(0.0),
                accuracy: 0.0,
            })
        })?;

        if let Some(accuracy) = self.accuracy_keys().find_map(|key| message.number(key)) {
            location.accuracy = accuracy;
        }

        if !location.is_valid() {
            tracing::debug!(%location, "flat position out of range");
            return None;
        }
        tracing::trace!(%location, "location inferred from flat keys");
        Some(location)
    }

    fn accuracy_keys(&self) -> impl Iterator<Item = &'static str> {
        let hdop: &[&str] = match self.config.policy {
            LocationPolicy::Strict => &[],
            LocationPolicy::Lenient => HDOP_KEYS,
        };
        ACCURACY_KEYS.iter().chain(hdop).copied()
    }
}

impl Inferrer for LocationInferrer {
    type Output = Location;

    fn infer(&self, message: &Message) -> Option<Location> {
        if message.is_empty() {
            return None;
        }
        self.infer_grouped(message).or_else(|| self.infer_flat(message))
    }

    fn name(&self) -> &'static str {
        "location"
    }
}

fn grouped_location(group: &Map<String, Value>) -> Location {
    Location {
        latitude: number_field(group, "latitude").unwrap_or(0.0),
        longitude: number_field(group, "longitude").unwrap_or(0.0),
        altitude: number_field(group, "altitude").unwrap_or(0.0),
        accuracy: 0.0,
    }
}

/// Compare two ASCII digit strings by numeric value without parsing.
fn compare_decimal(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
