//! Builder pattern for `AudioRouteManager`.

use std::sync::Arc;

use crate::event::{interruption_callback, InterruptionDelegate, InterruptionSignal};
use crate::session::AudioSession;
use crate::{AudioRouteManager, RouteConfig};

/// Builder for configuring an [`AudioRouteManager`].
///
/// Use [`AudioRouteManager::builder()`] to create one.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use audio_route::{AudioRouteManager, InterruptionSignal, MockAudioSession};
///
/// let manager = AudioRouteManager::builder(Arc::new(MockAudioSession::without_input()))
///     .has_receiver(false)
///     .on_interruption(|signal| {
///         if signal == InterruptionSignal::Began {
///             // pause playback
///         }
///     })
///     .build();
/// ```
#[must_use]
pub struct AudioRouteManagerBuilder {
    session: Arc<dyn AudioSession>,
    config: RouteConfig,
    delegate: Option<Arc<dyn InterruptionDelegate>>,
}

impl AudioRouteManagerBuilder {
    /// Creates a builder around an explicitly owned session handle.
    pub fn new(session: Arc<dyn AudioSession>) -> Self {
        Self {
            session,
            config: RouteConfig::default(),
            delegate: None,
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: RouteConfig) -> Self {
        self.config = config;
        self
    }

    /// Declares whether the hardware has a built-in receiver.
    pub fn has_receiver(mut self, has_receiver: bool) -> Self {
        self.config.has_receiver = has_receiver;
        self
    }

    /// Sets the notification queue capacity.
    pub fn notification_capacity(mut self, capacity: usize) -> Self {
        self.config.notification_capacity = capacity;
        self
    }

    /// Registers the interruption delegate.
    pub fn interruption_delegate(mut self, delegate: Arc<dyn InterruptionDelegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Registers a closure as the interruption delegate.
    pub fn on_interruption<F>(self, f: F) -> Self
    where
        F: Fn(InterruptionSignal) + Send + Sync + 'static,
    {
        self.interruption_delegate(interruption_callback(f))
    }

    /// Builds the manager. Nothing touches the session until
    /// [`start()`](AudioRouteManager::start).
    pub fn build(self) -> AudioRouteManager {
        AudioRouteManager::from_parts(self.session, self.config, self.delegate)
    }
}
