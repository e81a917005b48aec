//! Inference results as printed by the CLI.

use payload_infer::{
    AccessPoint, GnssInferrer, Inferrer, Location, LocationConfig, LocationInferrer, Message,
    WifiInferrer,
};
use serde::Serialize;

use crate::cli::TelemetryKind;

/// Telemetry found in one message. Types that were not requested or not
/// found are `None`.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub location: Option<Location>,
    pub access_points: Option<Vec<AccessPoint>>,
    /// Navigation payload, hex encoded.
    pub gnss: Option<String>,
}

impl Report {
    /// Whether nothing was found.
    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.access_points.is_none() && self.gnss.is_none()
    }
}

/// The requested telemetry types, defaulting to all of them.
pub fn selected(only: &[TelemetryKind]) -> Vec<TelemetryKind> {
    if only.is_empty() {
        TelemetryKind::ALL.to_vec()
    } else {
        TelemetryKind::ALL
            .into_iter()
            .filter(|kind| only.contains(kind))
            .collect()
    }
}

/// Run the requested inferrers over a message.
pub fn infer(message: &Message, kinds: &[TelemetryKind], config: LocationConfig) -> Report {
    let mut report = Report::default();

    for kind in kinds {
        match kind {
            TelemetryKind::Location => {
                report.location = LocationInferrer::with_config(config).infer(message);
            }
            TelemetryKind::Wifi => {
                report.access_points = WifiInferrer::new().infer(message);
            }
            TelemetryKind::Gnss => {
                report.gnss = GnssInferrer::new().infer(message).map(hex::encode);
            }
        }
        tracing::debug!(inferrer = %kind, "inferrer finished");
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use payload_infer::LocationPolicy;
    use serde_json::json;

    fn message(value: serde_json::Value) -> Message {
        Message::try_from(value).unwrap()
    }

    #[test]
    fn test_selected_defaults_to_all() {
        assert_eq!(selected(&[]), TelemetryKind::ALL.to_vec());
        assert_eq!(
            selected(&[TelemetryKind::Gnss, TelemetryKind::Location, TelemetryKind::Gnss]),
            vec![TelemetryKind::Location, TelemetryKind::Gnss]
        );
    }

    #[test]
    fn test_infer_all() {
        let m = message(json!({
            "lat": 1.0,
            "lon": 2.0,
            "wifi": [{"mac": "a0b3ccd358e6", "rssi": -92}],
            "nav": "AABB"
        }));
        let report = infer(&m, &selected(&[]), LocationConfig::default());

        assert_eq!(report.location.map(|l| l.longitude), Some(2.0));
        assert_eq!(report.access_points.map(|p| p.len()), Some(1));
        assert_eq!(report.gnss.as_deref(), Some("aabb"));
    }

    #[test]
    fn test_infer_only_selected() {
        let m = message(json!({"lat": 1.0, "lon": 2.0, "nav": "aabb"}));
        let report = infer(&m, &[TelemetryKind::Gnss], LocationConfig::default());

        assert!(report.location.is_none());
        assert_eq!(report.gnss.as_deref(), Some("aabb"));
    }

    #[test]
    fn test_infer_uses_location_config() {
        let m = message(json!({"lat": 1.0, "lon": 2.0, "hdop": 1.5}));
        let lenient = LocationConfig {
            policy: LocationPolicy::Lenient,
        };

        let report = infer(&m, &[TelemetryKind::Location], lenient);
        assert_eq!(report.location.map(|l| l.accuracy), Some(1.5));
    }

    #[test]
    fn test_report_json_shape() {
        let report = infer(
            &message(json!({"other": 1})),
            &selected(&[]),
            LocationConfig::default(),
        );
        assert!(report.is_empty());
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({"location": null, "access_points": null, "gnss": null})
        );
    }
}
