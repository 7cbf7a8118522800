//! Mobile device registrations used for push notifications.

use serde::{Deserialize, Serialize};

/// An Android device, addressed by its push registration ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AndroidDevice {
    pub registration_id: String,
}

impl AndroidDevice {
    pub fn new(registration_id: impl Into<String>) -> Self {
        Self {
            registration_id: registration_id.into(),
        }
    }
}

/// An iOS device, addressed by its APNs device token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IosDevice {
    pub device_token: Vec<u8>,
}

impl IosDevice {
    pub fn new(device_token: impl Into<Vec<u8>>) -> Self {
        Self {
            device_token: device_token.into(),
        }
    }
}

/// A device of either platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MobileDevice {
    Android(AndroidDevice),
    Ios(IosDevice),
}

impl MobileDevice {
    pub fn platform(&self) -> &'static str {
        match self {
            Self::Android(_) => "android",
            Self::Ios(_) => "ios",
        }
    }
}

impl From<AndroidDevice> for MobileDevice {
    fn from(device: AndroidDevice) -> Self {
        Self::Android(device)
    }
}

impl From<IosDevice> for MobileDevice {
    fn from(device: IosDevice) -> Self {
        Self::Ios(device)
    }
}
