//! WiFi access point inference.
//!
//! Two conventions are recognized, tried in this order:
//!
//! | Array key       | BSSID field | RSSI field |
//! |-----------------|-------------|------------|
//! | `access_points` | `bssid`     | `rssi`     |
//! | `wifi`          | `mac`       | `rssi`     |
//!
//! The first convention whose array key holds an array decides the result.
//! Every element of that array must parse, otherwise nothing is returned.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::BssidError;
use crate::inference::Inferrer;
use crate::message::{number_field, string_field, Message};

/// Hardware address of a WiFi access point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bssid([u8; 6]);

impl Bssid {
    /// Create a BSSID from raw bytes.
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl FromStr for Bssid {
    type Err = BssidError;

    /// Parse a hexadecimal BSSID.
    ///
    /// `-` and `:` separators are removed anywhere in the string and hex
    /// digits are case-insensitive, so `14:60:80:9A:19:58`,
    /// `14-60-80-9a-19-58` and `1460809a1958` are equivalent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.chars().filter(|c| !matches!(c, '-' | ':')).collect();
        let bytes = hex::decode(digits)?;
        let bytes: [u8; 6] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| BssidError::InvalidLength(bytes.len()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Bssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl Serialize for Bssid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Bssid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Signal observation of a single access point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccessPoint {
    /// Access point hardware address.
    pub bssid: Bssid,
    /// Received signal strength in dBm.
    pub rssi: f64,
}

/// A key-naming convention for access point arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WifiConvention {
    /// Top-level key holding the array.
    pub array_key: &'static str,
    /// Element key holding the BSSID string.
    pub bssid_key: &'static str,
    /// Element key holding the RSSI number.
    pub rssi_key: &'static str,
}

impl WifiConvention {
    /// Parse every element of `items`, failing on the first bad one.
    fn parse(&self, items: &[Value]) -> Option<Vec<AccessPoint>> {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let point = self.parse_item(item);
                if point.is_none() {
                    tracing::debug!(
                        array = self.array_key,
                        index,
                        "rejecting access point array on malformed element"
                    );
                }
                point
            })
            .collect()
    }

    fn parse_item(&self, item: &Value) -> Option<AccessPoint> {
        let fields = item.as_object()?;
        let bssid = string_field(fields, self.bssid_key)?.parse().ok()?;
        let rssi = number_field(fields, self.rssi_key)?;
        Some(AccessPoint { bssid, rssi })
    }
}

const CONVENTIONS: &[WifiConvention] = &[
    WifiConvention {
        array_key: "access_points",
        bssid_key: "bssid",
        rssi_key: "rssi",
    },
    WifiConvention {
        array_key: "wifi",
        bssid_key: "mac",
        rssi_key: "rssi",
    },
];

/// Infers WiFi access point observations from a message.
#[derive(Debug, Clone, Default)]
pub struct WifiInferrer;

impl WifiInferrer {
    /// Create a WiFi inferrer.
    pub fn new() -> Self {
        Self
    }

    /// The recognized conventions in priority order.
    pub fn conventions(&self) -> &'static [WifiConvention] {
        CONVENTIONS
    }
}

impl Inferrer for WifiInferrer {
    type Output = Vec<AccessPoint>;

    fn infer(&self, message: &Message) -> Option<Vec<AccessPoint>> {
        if message.is_empty() {
            return None;
        }

        let (convention, items) = CONVENTIONS
            .iter()
            .find_map(|c| message.array(c.array_key).map(|items| (c, items)))?;

        let points = convention.parse(items)?;
        tracing::trace!(
            array = convention.array_key,
            count = points.len(),
            "access points inferred"
        );
        Some(points)
    }

    fn name(&self) -> &'static str {
        "wifi"
    }
}
