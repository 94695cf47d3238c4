//! Interruption signals delivered to application code.
//!
//! The OS interrupts the audio session for things like phone calls. The
//! manager turns those notifications into [`InterruptionSignal`]s and hands
//! them to one registered [`InterruptionDelegate`].

use std::sync::Arc;

/// The two interruption signals an app can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterruptionSignal {
    /// Audio was suspended by the OS.
    Began,
    /// The interruption is over; the app may resume.
    Ended,
}

/// Receives interruption signals.
///
/// Callbacks run on the thread that delivered the notification, while the
/// manager's lock is held. Don't call back into the manager from here;
/// hand work off to another thread or task instead.
///
/// # Example
///
/// ```
/// use audio_route::InterruptionDelegate;
///
/// struct Player;
///
/// impl InterruptionDelegate for Player {
///     fn interruption_began(&self) {
///         // pause playback
///     }
///
///     fn interruption_ended(&self) {
///         // resume playback
///     }
/// }
/// ```
pub trait InterruptionDelegate: Send + Sync {
    /// The OS suspended the session.
    fn interruption_began(&self);

    /// The interruption ended.
    fn interruption_ended(&self);
}

struct CallbackDelegate<F> {
    callback: F,
}

impl<F> InterruptionDelegate for CallbackDelegate<F>
where
    F: Fn(InterruptionSignal) + Send + Sync,
{
    fn interruption_began(&self) {
        (self.callback)(InterruptionSignal::Began);
    }

    fn interruption_ended(&self) {
        (self.callback)(InterruptionSignal::Ended);
    }
}

/// Creates an [`InterruptionDelegate`] from a closure.
///
/// # Example
///
/// ```
/// use audio_route::{interruption_callback, InterruptionDelegate, InterruptionSignal};
///
/// let delegate = interruption_callback(|signal| {
///     if signal == InterruptionSignal::Began {
///         println!("paused by the system");
///     }
/// });
/// delegate.interruption_began();
/// ```
pub fn interruption_callback<F>(f: F) -> Arc<dyn InterruptionDelegate>
where
    F: Fn(InterruptionSignal) + Send + Sync + 'static,
{
    Arc::new(CallbackDelegate { callback: f })
}
