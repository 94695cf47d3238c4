//! Reacting to OS route-change notifications.

use crate::category::{apply_intent, SessionIntent};
use crate::device::{any_bluetooth, AvailabilitySet, DeviceKind};
use crate::session::{AudioSession, RouteChangeEvent, RouteChangeReason};

/// Updates `availability` for one route change.
///
/// | reason               | previous output | effect                                          |
/// |----------------------|-----------------|-------------------------------------------------|
/// | OldDeviceUnavailable | Headset         | drop Headset, re-apply intent, reactivate       |
/// | OldDeviceUnavailable | Bluetooth       | recheck Bluetooth against live outputs/inputs   |
/// | OldDeviceUnavailable | other           | drop Headset if nothing attached still shows it |
/// | NewDeviceAvailable   | any             | mark the new output (or a Bluetooth input)      |
/// | Override             | Bluetooth       | recheck Bluetooth against live outputs/inputs   |
///
/// Everything else is ignored. Never fails; problems are logged.
pub(crate) fn react(
    session: &dyn AudioSession,
    availability: &mut AvailabilitySet,
    intent: &SessionIntent,
    event: &RouteChangeEvent,
) {
    let Some(reason) = event.reason else {
        tracing::debug!("route change without a reason, ignoring");
        return;
    };
    let previous_output = event
        .previous_route
        .as_ref()
        .and_then(|route| route.primary_output());

    tracing::debug!(?reason, ?previous_output, "audio route changed");

    match (reason, previous_output) {
        (RouteChangeReason::OldDeviceUnavailable, Some(DeviceKind::Headset)) => {
            headset_removed(session, availability, intent);
        }
        (
            RouteChangeReason::OldDeviceUnavailable | RouteChangeReason::Override,
            Some(DeviceKind::Bluetooth),
        ) => recheck_bluetooth(session, availability, reason),
        (RouteChangeReason::NewDeviceAvailable, _) => {
            mark_new_device(session, availability);
        }
        (RouteChangeReason::OldDeviceUnavailable, Some(_)) => {
            // A forced speaker hides the headset from the previous route.
            if availability.contains(DeviceKind::Headset) && !headset_attached(session) {
                headset_removed(session, availability, intent);
            }
        }
        (RouteChangeReason::OldDeviceUnavailable | RouteChangeReason::Override, None) => {
            tracing::debug!(?reason, "route change without a known previous output, ignoring");
        }
        _ => {
            tracing::trace!(?reason, "route change needs no availability update");
        }
    }
}

fn headset_removed(
    session: &dyn AudioSession,
    availability: &mut AvailabilitySet,
    intent: &SessionIntent,
) {
    availability.mark_unavailable(DeviceKind::Headset);
    tracing::info!("headset disconnected");

    // Pulling headphones mid-session can leave the OS on a
    // playback-only route with the built-in mic.
    apply_intent(session, intent);
    if let Err(e) = session.set_active(true) {
        tracing::warn!(
            backend = session.name(),
            error = %e,
            "failed to reactivate session after headset removal"
        );
    }
}

/// A wired output on the live route or a headset mic among the inputs.
fn headset_attached(session: &dyn AudioSession) -> bool {
    session.current_route().has_output(DeviceKind::Headset)
        || session
            .available_inputs()
            .unwrap_or_default()
            .iter()
            .any(|port| port.kind() == Some(DeviceKind::Headset))
}

/// Bluetooth stays available while a Bluetooth output or input is still
/// attached.
fn recheck_bluetooth(
    session: &dyn AudioSession,
    availability: &mut AvailabilitySet,
    reason: RouteChangeReason,
) {
    let outputs = session.current_route().outputs;
    let inputs = session.available_inputs().unwrap_or_default();
    if availability.recheck_bluetooth(&outputs, &inputs) {
        tracing::info!(?reason, "a Bluetooth device went away but another remains");
    } else {
        tracing::info!(?reason, "Bluetooth disconnected");
    }
}

fn mark_new_device(session: &dyn AudioSession, availability: &mut AvailabilitySet) {
    match session.current_route().primary_output() {
        Some(DeviceKind::Bluetooth) => {
            availability.mark_available(DeviceKind::Bluetooth);
            tracing::info!("Bluetooth output connected");
        }
        Some(DeviceKind::Headset) => {
            availability.mark_available(DeviceKind::Headset);
            tracing::info!("headset connected");
        }
        other => {
            let inputs = session.available_inputs().unwrap_or_default();
            if any_bluetooth(&inputs) {
                availability.mark_available(DeviceKind::Bluetooth);
                tracing::info!("Bluetooth input connected");
            } else {
                tracing::debug!(output = ?other, "new device is not a tracked kind");
            }
        }
    }
}
