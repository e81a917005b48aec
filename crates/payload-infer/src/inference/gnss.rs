//! Raw GNSS navigation payload inference.

use crate::inference::Inferrer;
use crate::message::Message;

/// Vendor-specific raw navigation data.
pub type GnssPayload = Vec<u8>;

/// Keys checked for hexadecimal navigation payloads.
const NAV_KEYS: &[&str] = &["nav"];

/// Infers a hex-encoded GNSS payload from a message.
#[derive(Debug, Clone, Default)]
pub struct GnssInferrer;

impl GnssInferrer {
    /// Create a GNSS inferrer.
    pub fn new() -> Self {
        Self
    }
}

impl Inferrer for GnssInferrer {
    type Output = GnssPayload;

    fn infer(&self, message: &Message) -> Option<GnssPayload> {
        if message.is_empty() {
            return None;
        }

        NAV_KEYS.iter().find_map(|&key| {
            let encoded = message.string(key)?;
            match hex::decode(encoded) {
                Ok(payload) => Some(payload),
                Err(err) => {
                    tracing::debug!(key, error = %err, "navigation payload is not valid hex");
                    None
                }
            }
        })
    }

    fn name(&self) -> &'static str {
        "gnss"
    }
}
