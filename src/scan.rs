//! Full device rescan.

use crate::device::AvailabilitySet;
use crate::session::AudioSession;

/// Rebuilds `availability` from the route the OS resolves on a fresh
/// activation.
///
/// The session is cycled off, on, and off again. Activating from a clean
/// inactive state makes the OS resolve the real default route instead of a
/// stale speaker fallback. Each step is best-effort: failures are logged and
/// the scan carries on with whatever route the OS reports.
pub(crate) fn full_rescan(session: &dyn AudioSession, availability: &mut AvailabilitySet) {
    if let Err(e) = session.set_active(false) {
        tracing::warn!(backend = session.name(), error = %e, "rescan: failed to deactivate session");
    }
    if let Err(e) = session.set_active(true) {
        tracing::warn!(backend = session.name(), error = %e, "rescan: failed to activate session");
    }

    let route = session.current_route();
    let inputs = session.available_inputs().unwrap_or_default();
    availability.rescan(&route.outputs, &inputs);

    if let Err(e) = session.set_active(false) {
        tracing::warn!(backend = session.name(), error = %e, "rescan: failed to deactivate session");
    }

    tracing::info!(devices = ?availability.to_vec(), "audio devices rescanned");
}
