//! Forwarding interruptions to the registered delegate.

use crate::event::{InterruptionDelegate, InterruptionSignal};
use crate::session::{InterruptionEvent, InterruptionState};

/// Maps an OS interruption state to a signal. Unknown states map to `None`.
pub(crate) fn signal_for(event: &InterruptionEvent) -> Option<InterruptionSignal> {
    match event.state {
        InterruptionState::Began => Some(InterruptionSignal::Began),
        InterruptionState::Ended => Some(InterruptionSignal::Ended),
        InterruptionState::Unknown(_) => None,
    }
}

pub(crate) fn react(delegate: Option<&dyn InterruptionDelegate>, event: &InterruptionEvent) {
    let Some(signal) = signal_for(event) else {
        tracing::debug!(state = ?event.state, "unknown interruption state, ignoring");
        return;
    };
    tracing::info!(?signal, "audio session interruption");

    let Some(delegate) = delegate else {
        return;
    };
    match signal {
        InterruptionSignal::Began => delegate.interruption_began(),
        InterruptionSignal::Ended => delegate.interruption_ended(),
    }
}
