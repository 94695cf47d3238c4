//! Notifications pushed by the OS audio layer.

use crate::device::RouteDescription;

/// Why the OS changed the audio route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteChangeReason {
    /// The OS gave no specific reason.
    Unknown,
    /// A device was connected, e.g. headphones plugged in.
    NewDeviceAvailable,
    /// A device went away, e.g. headphones unplugged.
    OldDeviceUnavailable,
    /// The session category changed.
    CategoryChange,
    /// The output was overridden by the OS or the app.
    Override,
    /// The device woke from sleep.
    WakeFromSleep,
    /// No route fits the current category.
    NoSuitableRouteForCategory,
    /// The set of inputs/outputs changed without a device change.
    RouteConfigurationChange,
}

impl RouteChangeReason {
    /// Parses the platform's raw reason code.
    ///
    /// Returns `None` for codes the platform does not define.
    pub fn from_raw(code: u64) -> Option<Self> {
        match code {
            0 => Some(Self::Unknown),
            1 => Some(Self::NewDeviceAvailable),
            2 => Some(Self::OldDeviceUnavailable),
            3 => Some(Self::CategoryChange),
            4 => Some(Self::Override),
            6 => Some(Self::WakeFromSleep),
            7 => Some(Self::NoSuitableRouteForCategory),
            8 => Some(Self::RouteConfigurationChange),
            _ => None,
        }
    }
}

/// A route-change notification.
///
/// Either field may be missing in what the OS delivers. A notification with
/// no reason is logged and ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteChangeEvent {
    /// Why the route changed.
    pub reason: Option<RouteChangeReason>,
    /// The route in effect before the change.
    pub previous_route: Option<RouteDescription>,
}

impl RouteChangeEvent {
    /// Creates an event with both fields present.
    pub fn new(reason: RouteChangeReason, previous_route: RouteDescription) -> Self {
        Self {
            reason: Some(reason),
            previous_route: Some(previous_route),
        }
    }
}

/// Interruption state carried by an [`InterruptionEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptionState {
    /// The session was suspended, e.g. by an incoming call.
    Began,
    /// The interruption is over.
    Ended,
    /// A raw state the platform may add later.
    Unknown(u64),
}

impl InterruptionState {
    /// Parses the platform's raw interruption type.
    pub fn from_raw(code: u64) -> Self {
        match code {
            1 => Self::Began,
            0 => Self::Ended,
            other => Self::Unknown(other),
        }
    }
}

/// An interruption notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptionEvent {
    /// What happened.
    pub state: InterruptionState,
}

impl InterruptionEvent {
    /// Creates an event for `state`.
    pub fn new(state: InterruptionState) -> Self {
        Self { state }
    }
}

/// Anything the OS audio layer pushes at the manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotification {
    /// The audio route changed.
    RouteChange(RouteChangeEvent),
    /// The session was interrupted or resumed.
    Interruption(InterruptionEvent),
}

impl From<RouteChangeEvent> for SessionNotification {
    fn from(event: RouteChangeEvent) -> Self {
        Self::RouteChange(event)
    }
}

impl From<InterruptionEvent> for SessionNotification {
    fn from(event: InterruptionEvent) -> Self {
        Self::Interruption(event)
    }
}
