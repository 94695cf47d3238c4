//! Logical device kinds.

use std::fmt;
use std::str::FromStr;

/// A logical audio endpoint the app can route output to.
///
/// `DeviceKind` is identity only. Which concrete headset or accessory is
/// behind a kind is the OS's business.
///
/// The string form (`"phone"`, `"speaker"`, `"headset"`, `"bluetooth"`) is the
/// identifier handed to application code.
///
/// # Example
///
/// ```
/// use audio_route::DeviceKind;
///
/// let kind: DeviceKind = "bluetooth".parse().unwrap();
/// assert_eq!(kind, DeviceKind::Bluetooth);
/// assert_eq!(kind.to_string(), "bluetooth");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeviceKind {
    /// Built-in receiver (the earpiece).
    Phone,
    /// Built-in loudspeaker.
    Speaker,
    /// Wired headphones or headset.
    Headset,
    /// Any Bluetooth audio accessory.
    Bluetooth,
}

impl DeviceKind {
    /// Every kind, in the priority order used when listing available devices.
    pub const PRIORITY: [DeviceKind; 4] = [
        DeviceKind::Headset,
        DeviceKind::Bluetooth,
        DeviceKind::Speaker,
        DeviceKind::Phone,
    ];

    /// Returns the identifier string for this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Speaker => "speaker",
            Self::Headset => "headset",
            Self::Bluetooth => "bluetooth",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known device identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown audio device identifier: {0}")]
pub struct UnknownDeviceKind(pub String);

impl FromStr for DeviceKind {
    type Err = UnknownDeviceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "phone" => Ok(Self::Phone),
            "speaker" => Ok(Self::Speaker),
            "headset" => Ok(Self::Headset),
            "bluetooth" => Ok(Self::Bluetooth),
            _ => Err(UnknownDeviceKind(s.to_string())),
        }
    }
}
