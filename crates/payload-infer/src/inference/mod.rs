//! Inference engine for telemetry embedded in decoded messages.
//!
//! Each inferrer is independent: it reads a [`Message`], recognizes one
//! telemetry type, and either returns a fully validated value or `None`.

mod gnss;
mod location;
mod wifi;

pub use gnss::{GnssInferrer, GnssPayload};
pub use location::{Location, LocationConfig, LocationInferrer, LocationPolicy};
pub use wifi::{AccessPoint, Bssid, WifiConvention, WifiInferrer};

use crate::message::Message;

/// Trait for telemetry inferrers.
pub trait Inferrer: Send + Sync {
    /// The telemetry value produced on success.
    type Output;

    /// Infer the telemetry value from a message, or `None` if not present.
    fn infer(&self, message: &Message) -> Option<Self::Output>;

    /// Get the inferrer name.
    fn name(&self) -> &'static str;
}

/// Infer a location using the default (strict) policy.
pub fn infer_location(message: &Message) -> Option<Location> {
    LocationInferrer::new().infer(message)
}

/// Infer WiFi access point observations.
pub fn infer_access_points(message: &Message) -> Option<Vec<AccessPoint>> {
    WifiInferrer::new().infer(message)
}

/// Infer a raw GNSS navigation payload.
pub fn infer_gnss(message: &Message) -> Option<GnssPayload> {
    GnssInferrer::new().infer(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_inferrers_are_send_sync() {
        assert_send_sync::<LocationInferrer>();
        assert_send_sync::<WifiInferrer>();
        assert_send_sync::<GnssInferrer>();
    }

    #[test]
    fn test_inferrer_names() {
        assert_eq!(LocationInferrer::new().name(), "location");
        assert_eq!(WifiInferrer::new().name(), "wifi");
        assert_eq!(GnssInferrer::new().name(), "gnss");
    }

    #[test]
    fn test_empty_message_found_nothing() {
        let message = Message::new();
        assert_eq!(infer_location(&message), None);
        assert_eq!(infer_access_points(&message), None);
        assert_eq!(infer_gnss(&message), None);
    }
}
