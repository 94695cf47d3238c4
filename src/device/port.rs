//! Raw endpoint model and the capability classifier.

use std::sync::Arc;

use super::DeviceKind;

/// Port type as reported by the OS audio layer.
///
/// Parsed from the platform's port-type identifiers with
/// [`PortType::from_raw`]. Identifiers this crate does not know are kept
/// verbatim in [`PortType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PortType {
    /// Built-in receiver (earpiece).
    BuiltInReceiver,
    /// Built-in loudspeaker.
    BuiltInSpeaker,
    /// Built-in microphone.
    BuiltInMic,
    /// Wired headphones (output).
    Headphones,
    /// Wired headset microphone (input).
    HeadsetMic,
    /// Bluetooth A2DP output.
    BluetoothA2dp,
    /// Bluetooth hands-free profile (input and output).
    BluetoothHfp,
    /// Bluetooth Low Energy audio output.
    BluetoothLe,
    /// Line-level output.
    LineOut,
    /// HDMI output.
    Hdmi,
    /// `AirPlay` output.
    AirPlay,
    /// USB audio interface.
    UsbAudio,
    /// Car audio system.
    CarAudio,
    /// Any port type not listed above.
    Other(Arc<str>),
}

impl PortType {
    /// Parses a raw platform port-type identifier.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "Receiver" => Self::BuiltInReceiver,
            "Speaker" => Self::BuiltInSpeaker,
            "MicrophoneBuiltIn" => Self::BuiltInMic,
            "Headphones" => Self::Headphones,
            "MicrophoneWired" | "HeadsetMicrophone" => Self::HeadsetMic,
            "BluetoothA2DPOutput" => Self::BluetoothA2dp,
            "BluetoothHFP" => Self::BluetoothHfp,
            "BluetoothLE" | "BluetoothLEOutput" => Self::BluetoothLe,
            "LineOut" => Self::LineOut,
            "HDMIOutput" => Self::Hdmi,
            "AirPlay" => Self::AirPlay,
            "USBAudio" => Self::UsbAudio,
            "CarAudio" => Self::CarAudio,
            other => Self::Other(Arc::from(other)),
        }
    }

    /// Returns the platform identifier for this port type.
    pub fn as_raw(&self) -> &str {
        match self {
            Self::BuiltInReceiver => "Receiver",
            Self::BuiltInSpeaker => "Speaker",
            Self::BuiltInMic => "MicrophoneBuiltIn",
            Self::Headphones => "Headphones",
            Self::HeadsetMic => "MicrophoneWired",
            Self::BluetoothA2dp => "BluetoothA2DPOutput",
            Self::BluetoothHfp => "BluetoothHFP",
            Self::BluetoothLe => "BluetoothLEOutput",
            Self::LineOut => "LineOut",
            Self::Hdmi => "HDMIOutput",
            Self::AirPlay => "AirPlay",
            Self::UsbAudio => "USBAudio",
            Self::CarAudio => "CarAudio",
            Self::Other(raw) => raw.as_ref(),
        }
    }
}

/// Maps a port type to the logical device kind it belongs to.
///
/// Pure and total. All Bluetooth transports (A2DP, hands-free, LE) collapse
/// to [`DeviceKind::Bluetooth`]; ports with no controllable counterpart
/// (built-in mic, HDMI, `AirPlay`, ...) return `None`.
///
/// # Example
///
/// ```
/// use audio_route::{classify, DeviceKind, PortType};
///
/// assert_eq!(classify(&PortType::BluetoothHfp), Some(DeviceKind::Bluetooth));
/// assert_eq!(classify(&PortType::Hdmi), None);
/// ```
pub fn classify(port_type: &PortType) -> Option<DeviceKind> {
    match port_type {
        PortType::BuiltInReceiver => Some(DeviceKind::Phone),
        PortType::BuiltInSpeaker => Some(DeviceKind::Speaker),
        PortType::Headphones | PortType::HeadsetMic => Some(DeviceKind::Headset),
        PortType::BluetoothA2dp | PortType::BluetoothHfp | PortType::BluetoothLe => {
            Some(DeviceKind::Bluetooth)
        }
        _ => None,
    }
}

/// A single input or output endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPort {
    /// What kind of port this is.
    pub port_type: PortType,
    /// Human-readable name, e.g. "AirPods Pro".
    pub name: String,
}

impl AudioPort {
    /// Creates a port.
    pub fn new(port_type: PortType, name: impl Into<String>) -> Self {
        Self {
            port_type,
            name: name.into(),
        }
    }

    /// Returns the device kind this port belongs to, if any.
    pub fn kind(&self) -> Option<DeviceKind> {
        classify(&self.port_type)
    }

    /// Returns `true` if this port is any Bluetooth transport.
    pub fn is_bluetooth(&self) -> bool {
        self.kind() == Some(DeviceKind::Bluetooth)
    }
}

/// Snapshot of the session's current inputs and outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteDescription {
    /// Active output ports, first is the primary one.
    pub outputs: Vec<AudioPort>,
    /// Active input ports.
    pub inputs: Vec<AudioPort>,
}

impl RouteDescription {
    /// Creates a route description.
    pub fn new(outputs: Vec<AudioPort>, inputs: Vec<AudioPort>) -> Self {
        Self { outputs, inputs }
    }

    /// Classifies the first output port.
    pub fn primary_output(&self) -> Option<DeviceKind> {
        self.outputs.first().and_then(AudioPort::kind)
    }

    /// Returns `true` if any output classifies as `kind`.
    pub fn has_output(&self, kind: DeviceKind) -> bool {
        self.outputs.iter().any(|port| port.kind() == Some(kind))
    }
}

/// Returns `true` if any of `ports` is a Bluetooth transport.
pub fn any_bluetooth(ports: &[AudioPort]) -> bool {
    ports.iter().any(AudioPort::is_bluetooth)
}
