//! Category negotiation.
//!
//! Picks the OS category for a declared intent. A record intent on hardware
//! without an input degrades to playback-only instead of failing.

use crate::session::{AudioSession, CategoryOptions, SessionCategory, SessionMode};
use crate::AudioRouteError;

/// What the app wants from the audio session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionIntent {
    /// Playback only, or playback and record.
    pub category: SessionCategory,
    /// Mode tag passed to the OS.
    pub mode: SessionMode,
}

impl SessionIntent {
    /// Creates an intent.
    pub fn new(category: SessionCategory, mode: SessionMode) -> Self {
        Self { category, mode }
    }
}

/// A category the OS accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedCategory {
    /// The category now in effect.
    pub category: SessionCategory,
    /// The options it was applied with.
    pub options: CategoryOptions,
}

impl AppliedCategory {
    /// Returns `true` if the OS got less than `requested`.
    pub fn is_degraded_from(&self, requested: SessionCategory) -> bool {
        self.category != requested
    }
}

/// Applies the category that fits `requested` on hardware with or without
/// an input.
///
/// Recording with Bluetooth input allowed when both the intent and the
/// hardware support it; otherwise playback with other audio ducked.
pub(crate) fn negotiate(
    session: &dyn AudioSession,
    requested: SessionCategory,
    input_available: bool,
) -> Result<AppliedCategory, AudioRouteError> {
    let applied = if requested.requires_input() && input_available {
        AppliedCategory {
            category: SessionCategory::PlaybackAndRecord,
            options: CategoryOptions::RECORD,
        }
    } else {
        AppliedCategory {
            category: SessionCategory::PlaybackOnly,
            options: CategoryOptions::PLAYBACK,
        }
    };

    if applied.is_degraded_from(requested) {
        tracing::warn!(
            ?requested,
            "no audio input available, falling back to playback-only category"
        );
    }

    session
        .set_category(applied.category, applied.options)
        .map_err(|source| {
            tracing::error!(
                backend = session.name(),
                category = ?applied.category,
                error = %source,
                "failed to apply session category"
            );
            AudioRouteError::CategoryApplyFailed { source }
        })?;

    tracing::debug!(category = ?applied.category, options = ?applied.options, "session category applied");
    Ok(applied)
}

/// Re-applies category and mode for `intent`. Failures are logged only.
pub(crate) fn apply_intent(session: &dyn AudioSession, intent: &SessionIntent) {
    // Failure is already logged inside negotiate.
    let _ = negotiate(session, intent.category, session.is_input_available());

    if let Err(e) = session.set_mode(intent.mode) {
        tracing::warn!(
            backend = session.name(),
            mode = ?intent.mode,
            error = %e,
            "failed to apply session mode"
        );
    }
}
