//! Device descriptors. Static; the auction engine only ever reads them.

use serde::{Deserialize, Serialize};

/// A device whose capacity windows are auctioned as slots.
///
/// Descriptor fields are free-form strings; nothing in the engine
/// interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Device {
    pub device_id: String,
    pub hash: String,
    pub salt: String,
    pub balance: String,
    /// Advertised capacity.
    pub size: String,
    pub lat: String,
    pub long: String,
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Device {
    pub fn dummy(device_id: &str) -> Self {
        Self {
            device_id: device_id.to_string(),
            hash: "h".to_string(),
            salt: "s".to_string(),
            balance: "0".to_string(),
            size: "1920x1080".to_string(),
            lat: "52.37".to_string(),
            long: "4.89".to_string(),
        }
    }
}
