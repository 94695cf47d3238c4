//! Device kinds, raw ports, and availability tracking.

mod availability;
mod kind;
mod port;

pub use availability::AvailabilitySet;
pub use kind::{DeviceKind, UnknownDeviceKind};
pub use port::{any_bluetooth, classify, AudioPort, PortType, RouteDescription};
