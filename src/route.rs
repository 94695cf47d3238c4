//! Route control: reading the active output and steering it.
//!
//! Only two output states are controllable: the OS default, or the speaker
//! forced on. Everything else (headset, Bluetooth) is the OS's default
//! choice when that device is present.

use crate::category::{negotiate, SessionIntent};
use crate::device::DeviceKind;
use crate::session::{AudioSession, OutputOverride, SessionCategory};
use crate::AudioRouteError;

/// Classifies the first output of the live route. `None` means unknown.
pub(crate) fn current_route(session: &dyn AudioSession) -> Option<DeviceKind> {
    session.current_route().primary_output()
}

/// The override that realizes `route`.
pub(crate) fn override_for(route: DeviceKind) -> OutputOverride {
    if route == DeviceKind::Speaker {
        OutputOverride::ForceSpeaker
    } else {
        OutputOverride::Default
    }
}

/// Drives the session towards `route`.
///
/// `applied` is the override last accepted by the session. It is updated
/// when the change goes through and put back on the session when
/// reactivation fails.
///
/// Setting the route that is already active touches nothing. Only the final
/// reactivation can fail the operation; category and override failures are
/// logged and the change continues.
pub(crate) fn set_desired_route(
    session: &dyn AudioSession,
    intent: &SessionIntent,
    applied: &mut OutputOverride,
    route: DeviceKind,
) -> Result<(), AudioRouteError> {
    let previous = current_route(session);
    if previous == Some(route) {
        tracing::debug!(%route, "route already active");
        return Ok(());
    }

    let input_available = session.is_input_available();
    if intent.category.requires_input() && !input_available {
        tracing::warn!(%route, "cannot change route: recording requested without an input");
        return Err(AudioRouteError::RecordingUnsupported);
    }

    tracing::info!(from = ?previous, to = %route, "changing audio route");

    if let Err(e) = session.set_active(false) {
        tracing::warn!(backend = session.name(), error = %e, "failed to deactivate session before route change");
    }

    // Output redirection needs the record-capable category whenever an input exists.
    let _ = negotiate(session, SessionCategory::PlaybackAndRecord, input_available);

    let directive = override_for(route);
    let accepted = match session.override_output_port(directive) {
        Ok(()) => directive,
        Err(e) => {
            tracing::warn!(
                backend = session.name(),
                ?directive,
                error = %e,
                "failed to override output port"
            );
            *applied
        }
    };

    if let Err(source) = session.set_active(true) {
        tracing::error!(
            backend = session.name(),
            %route,
            error = %source,
            "failed to reactivate session after route change"
        );
        if let Err(e) = session.override_output_port(*applied) {
            tracing::warn!(
                directive = ?*applied,
                error = %e,
                "failed to restore previous output override"
            );
        }
        return Err(AudioRouteError::ActivationFailed { source });
    }

    *applied = accepted;
    Ok(())
}
