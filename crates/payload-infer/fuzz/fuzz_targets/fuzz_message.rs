//! Fuzz target for message loading and inference.
//!
//! This fuzzer tests that:
//! 1. Message parsing never panics on arbitrary bytes
//! 2. None of the inferrers panic on any parsed message
//! 3. A found location is always valid

#![no_main]

use libfuzzer_sys::fuzz_target;
use payload_infer::{
    infer_access_points, infer_gnss, Inferrer, LocationInferrer, LocationPolicy, Message,
};

fuzz_target!(|data: &[u8]| {
    let Ok(message) = Message::from_json_slice(data) else {
        return;
    };

    for policy in [LocationPolicy::Strict, LocationPolicy::Lenient] {
        if let Some(location) = LocationInferrer::new().with_policy(policy).infer(&message) {
            assert!(location.is_valid());
        }
    }

    let _ = infer_access_points(&message);
    let _ = infer_gnss(&message);
});
