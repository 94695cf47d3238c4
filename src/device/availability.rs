//! The set of device kinds currently believed to be connected.

use super::port::{any_bluetooth, AudioPort};
use super::DeviceKind;

/// The manager's belief about which device kinds are usable right now.
///
/// Speaker is always available. Phone is available unless the hardware has
/// no receiver, which is fixed at construction. Headset and Bluetooth are
/// only ever set from port evidence passed into [`rescan`](Self::rescan) or
/// the `mark_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilitySet {
    has_receiver: bool,
    headset: bool,
    bluetooth: bool,
}

impl AvailabilitySet {
    /// Creates a set with only the built-in devices available.
    pub fn new(has_receiver: bool) -> Self {
        Self {
            has_receiver,
            headset: false,
            bluetooth: false,
        }
    }

    /// Returns `true` if `kind` is currently available.
    pub fn contains(&self, kind: DeviceKind) -> bool {
        match kind {
            DeviceKind::Phone => self.has_receiver,
            DeviceKind::Speaker => true,
            DeviceKind::Headset => self.headset,
            DeviceKind::Bluetooth => self.bluetooth,
        }
    }

    /// Available kinds in priority order: Headset, Bluetooth, Speaker, Phone.
    pub fn to_vec(&self) -> Vec<DeviceKind> {
        DeviceKind::PRIORITY
            .into_iter()
            .filter(|kind| self.contains(*kind))
            .collect()
    }

    /// Replaces the volatile entries from a freshly resolved route.
    ///
    /// Headset comes from the outputs only. Bluetooth is present if either
    /// an output or any available input is Bluetooth, so input-only
    /// accessories still count.
    pub fn rescan(&mut self, outputs: &[AudioPort], inputs: &[AudioPort]) {
        self.headset = outputs
            .iter()
            .any(|port| port.kind() == Some(DeviceKind::Headset));
        self.bluetooth = any_bluetooth(outputs) || any_bluetooth(inputs);
    }

    /// Marks a volatile kind available. Built-in kinds are left untouched.
    pub fn mark_available(&mut self, kind: DeviceKind) {
        match kind {
            DeviceKind::Headset => self.headset = true,
            DeviceKind::Bluetooth => self.bluetooth = true,
            DeviceKind::Phone | DeviceKind::Speaker => {}
        }
    }

    /// Marks a volatile kind unavailable. Built-in kinds are left untouched.
    pub fn mark_unavailable(&mut self, kind: DeviceKind) {
        match kind {
            DeviceKind::Headset => self.headset = false,
            DeviceKind::Bluetooth => self.bluetooth = false,
            DeviceKind::Phone | DeviceKind::Speaker => {}
        }
    }

    /// Re-derives Bluetooth from the live outputs and the inputs still
    /// attached.
    ///
    /// Returns the resulting Bluetooth availability.
    pub fn recheck_bluetooth(
        &mut self,
        outputs: &[AudioPort],
        available_inputs: &[AudioPort],
    ) -> bool {
        self.bluetooth = any_bluetooth(outputs) || any_bluetooth(available_inputs);
        self.bluetooth
    }
}

impl Default for AvailabilitySet {
    fn default() -> Self {
        Self::new(true)
    }
}
