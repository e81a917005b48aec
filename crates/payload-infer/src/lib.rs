//! payload-infer: rule-based telemetry inference for decoded device messages.
//!
//! Upstream payload decoders produce loosely-typed key/value documents whose
//! shape depends on the device vendor and firmware. This crate recognizes the
//! key-naming conventions that carry known telemetry and turns them into
//! strongly-typed values.
//!
//! # Core Principles
//!
//! - **Pure**: Inferrers hold no mutable state and perform no I/O
//! - **All-or-nothing**: A result is either fully validated or absent
//! - **Deterministic**: Competing keys are resolved in a fixed priority order
//!
//! # Example
//!
//! ```
//! use payload_infer::{infer_location, Message};
//!
//! let message: Message = r#"{"lat": 52.37, "lon": 4.89, "acc": 12.5}"#.parse().unwrap();
//! let location = infer_location(&message).unwrap();
//!
//! assert_eq!(location.latitude, 52.37);
//! assert_eq!(location.accuracy, 12.5);
//! ```

pub mod error;
pub mod inference;
pub mod message;

pub use error::{BssidError, PayloadError, Result};
pub use inference::{
    infer_access_points, infer_gnss, infer_location, AccessPoint, Bssid, GnssInferrer,
    GnssPayload, Inferrer, Location, LocationConfig, LocationInferrer, LocationPolicy,
    WifiConvention, WifiInferrer,
};
pub use message::Message;
