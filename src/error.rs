//! Error types for audio-route.
//!
//! Errors are split into two categories:
//! - **Session errors** ([`SessionError`]): a single OS call was rejected.
//!   The manager logs these and degrades instead of propagating them.
//! - **Route errors** ([`AudioRouteError`]): failures surfaced to the caller
//!   so it can retry or inform the user.

/// A call into the OS audio session was rejected.
///
/// These are produced by [`AudioSession`](crate::AudioSession)
/// implementations. Most of them are logged and swallowed by the manager;
/// see [`AudioRouteError`] for the ones that reach the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The session could not be activated or deactivated.
    ///
    /// Usually resource contention with another app holding the hardware.
    #[error("session activation failed: {reason}")]
    Activation {
        /// Description of what the OS reported.
        reason: String,
    },

    /// The requested category was rejected, typically a hardware constraint.
    #[error("category rejected: {reason}")]
    Category {
        /// Description of what the OS reported.
        reason: String,
    },

    /// The requested mode was rejected.
    #[error("mode rejected: {reason}")]
    Mode {
        /// Description of what the OS reported.
        reason: String,
    },

    /// The output port override was rejected.
    #[error("output override rejected: {reason}")]
    Override {
        /// Description of what the OS reported.
        reason: String,
    },
}

impl SessionError {
    /// Creates an activation error with the given reason.
    pub fn activation(reason: impl Into<String>) -> Self {
        Self::Activation {
            reason: reason.into(),
        }
    }

    /// Creates a category error with the given reason.
    pub fn category(reason: impl Into<String>) -> Self {
        Self::Category {
            reason: reason.into(),
        }
    }

    /// Creates a mode error with the given reason.
    pub fn mode(reason: impl Into<String>) -> Self {
        Self::Mode {
            reason: reason.into(),
        }
    }

    /// Creates an override error with the given reason.
    pub fn override_rejected(reason: impl Into<String>) -> Self {
        Self::Override {
            reason: reason.into(),
        }
    }
}

/// Failures surfaced to application code by
/// [`AudioRouteManager`](crate::AudioRouteManager).
#[derive(Debug, thiserror::Error)]
pub enum AudioRouteError {
    /// The session intent requires recording but the device has no input.
    ///
    /// Returned before any OS state is mutated.
    #[error("recording requested but no audio input is available")]
    RecordingUnsupported,

    /// The final session reactivation of a route change failed.
    ///
    /// The previously active route is left in place.
    #[error("could not reactivate audio session: {source}")]
    ActivationFailed {
        /// The rejected activation call.
        #[source]
        source: SessionError,
    },

    /// The OS rejected the negotiated category.
    ///
    /// The requested intent is still recorded on the manager.
    #[error("could not apply session category: {source}")]
    CategoryApplyFailed {
        /// The rejected category call.
        #[source]
        source: SessionError,
    },

    /// The notification reactor thread could not be started.
    #[error("failed to start notification reactor: {0}")]
    ReactorSpawnFailed(#[source] std::io::Error),
}
