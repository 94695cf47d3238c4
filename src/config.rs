//! Configuration for the route manager.

/// Hardware and queueing settings for an
/// [`AudioRouteManager`](crate::AudioRouteManager).
///
/// Use [`RouteConfig::default()`] for a phone-class device.
///
/// # Example
///
/// ```
/// use audio_route::RouteConfig;
///
/// // iPod-class hardware has no earpiece
/// let config = RouteConfig {
///     has_receiver: false,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct RouteConfig {
    /// Whether the device has a built-in receiver (earpiece).
    ///
    /// When `false`, Phone is never reported as available.
    /// Default: `true`
    pub has_receiver: bool,

    /// Capacity of the queue between the OS notification callback and the
    /// reactor thread.
    ///
    /// [`AudioSession`](crate::AudioSession) implementations must not drop
    /// notifications when the queue is full. A session that has to drop one
    /// should follow up with
    /// [`rescan_devices()`](crate::AudioRouteManager::rescan_devices) once
    /// the queue drains, or availability goes stale.
    /// Default: 32
    pub notification_capacity: usize,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            has_receiver: true,
            notification_capacity: 32,
        }
    }
}
