//! The audio route manager.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::builder::AudioRouteManagerBuilder;
use crate::category::{apply_intent, negotiate, SessionIntent};
use crate::device::{AvailabilitySet, DeviceKind};
use crate::event::InterruptionDelegate;
use crate::reactor::{self, ReactorHandle};
use crate::route;
use crate::scan::full_rescan;
use crate::session::{
    AudioSession, OutputOverride, SessionCategory, SessionMode, SessionNotification,
};
use crate::{AudioRouteError, RouteConfig};

/// Mutable state, only touched with the manager's lock held.
struct RouteState {
    availability: AvailabilitySet,
    intent: SessionIntent,
    /// Last override the session accepted from us.
    output_override: OutputOverride,
    delegate: Option<Arc<dyn InterruptionDelegate>>,
}

struct Inner {
    session: Arc<dyn AudioSession>,
    config: RouteConfig,
    state: Mutex<RouteState>,
}

/// Tracks available audio devices and steers the output route.
///
/// One manager owns one [`AudioSession`]. Application calls and OS
/// notifications are serialized through a single lock, so a rescan or a
/// route change always runs to completion before the next one starts.
///
/// The manager is a cheap handle; clones share the same state.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use audio_route::{AudioRouteManager, DeviceKind, MockAudioSession, SessionCategory, SessionMode};
///
/// let session = Arc::new(MockAudioSession::new());
/// let manager = AudioRouteManager::new(session);
/// let _reactor = manager
///     .start(SessionCategory::PlaybackAndRecord, SessionMode::VoiceChat)
///     .unwrap();
///
/// assert_eq!(manager.audio_route(), Some(DeviceKind::Phone));
/// manager.set_audio_route(DeviceKind::Speaker).unwrap();
/// assert_eq!(manager.audio_route(), Some(DeviceKind::Speaker));
/// ```
#[derive(Clone)]
pub struct AudioRouteManager {
    inner: Arc<Inner>,
}

impl AudioRouteManager {
    /// Creates a manager with default configuration.
    pub fn new(session: Arc<dyn AudioSession>) -> Self {
        Self::builder(session).build()
    }

    /// Returns a builder for configuring the manager.
    pub fn builder(session: Arc<dyn AudioSession>) -> AudioRouteManagerBuilder {
        AudioRouteManagerBuilder::new(session)
    }

    pub(crate) fn from_parts(
        session: Arc<dyn AudioSession>,
        config: RouteConfig,
        delegate: Option<Arc<dyn InterruptionDelegate>>,
    ) -> Self {
        let availability = AvailabilitySet::new(config.has_receiver);
        Self {
            inner: Arc::new(Inner {
                session,
                config,
                state: Mutex::new(RouteState {
                    availability,
                    intent: SessionIntent::default(),
                    output_override: OutputOverride::Default,
                    delegate,
                }),
            }),
        }
    }

    /// Scans devices, applies the intent, and starts listening for OS
    /// notifications.
    ///
    /// Call once. Calling again subscribes a second reactor.
    ///
    /// # Errors
    ///
    /// Only fails if the reactor thread can't be spawned. Session failures
    /// during the scan and category setup are logged and tolerated.
    pub fn start(
        &self,
        category: SessionCategory,
        mode: SessionMode,
    ) -> Result<ReactorHandle, AudioRouteError> {
        let session = self.inner.session.as_ref();
        {
            let mut state = self.inner.state.lock();
            state.intent = SessionIntent::new(category, mode);
            full_rescan(session, &mut state.availability);
            apply_intent(session, &state.intent);
        }

        let (tx, rx) = mpsc::channel(self.inner.config.notification_capacity.max(1));
        session.subscribe(tx);

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let handle = reactor::spawn(rx, move |notification| match weak.upgrade() {
            Some(inner) => {
                AudioRouteManager { inner }.handle_notification(notification);
                true
            }
            None => false,
        })
        .map_err(AudioRouteError::ReactorSpawnFailed)?;

        tracing::info!(
            backend = session.name(),
            ?category,
            ?mode,
            "audio route manager started"
        );
        Ok(handle)
    }

    /// Handles one OS notification.
    ///
    /// The reactor started by [`start()`](Self::start) calls this; hosts
    /// that deliver notifications on their own thread may call it directly.
    pub fn handle_notification(&self, notification: SessionNotification) {
        let mut state = self.inner.state.lock();
        let state = &mut *state;
        match notification {
            SessionNotification::RouteChange(event) => reactor::route_change::react(
                self.inner.session.as_ref(),
                &mut state.availability,
                &state.intent,
                &event,
            ),
            SessionNotification::Interruption(event) => {
                reactor::interruption::react(state.delegate.as_deref(), &event);
            }
        }
    }

    /// Changes the category intent and applies it.
    ///
    /// Does nothing if the OS already reports `category`. The intent is
    /// recorded even when applying it fails.
    ///
    /// # Errors
    ///
    /// - [`AudioRouteError::CategoryApplyFailed`] if the OS rejected it
    /// - [`AudioRouteError::RecordingUnsupported`] if recording was asked for
    ///   but the device has no input, so playback-only was applied instead
    pub fn change_category(&self, category: SessionCategory) -> Result<(), AudioRouteError> {
        let session = self.inner.session.as_ref();
        let mut state = self.inner.state.lock();
        state.intent.category = category;

        if session.category() == category {
            tracing::debug!(?category, "category already active");
            return Ok(());
        }

        let applied = negotiate(session, category, session.is_input_available())?;
        if applied.is_degraded_from(category) {
            return Err(AudioRouteError::RecordingUnsupported);
        }
        Ok(())
    }

    /// Re-applies the current category and mode. Failures are logged.
    pub fn refresh_audio_session(&self) {
        let state = self.inner.state.lock();
        apply_intent(self.inner.session.as_ref(), &state.intent);
    }

    /// Deactivates, reactivates and re-reads the route to rebuild the set of
    /// available devices. Returns the result in priority order.
    pub fn rescan_devices(&self) -> Vec<DeviceKind> {
        let mut state = self.inner.state.lock();
        full_rescan(self.inner.session.as_ref(), &mut state.availability);
        state.availability.to_vec()
    }

    /// The device currently receiving output, or `None` if it's not one of
    /// the tracked kinds.
    pub fn audio_route(&self) -> Option<DeviceKind> {
        let _state = self.inner.state.lock();
        route::current_route(self.inner.session.as_ref())
    }

    /// Routes output to `route`.
    ///
    /// Only [`DeviceKind::Speaker`] forces anything; any other kind clears
    /// the speaker override and lets the OS pick. Setting the active route
    /// again is a no-op.
    ///
    /// # Errors
    ///
    /// - [`AudioRouteError::RecordingUnsupported`] if the intent records
    ///   and there is no input. Nothing is changed.
    /// - [`AudioRouteError::ActivationFailed`] if the session could not be
    ///   reactivated. The previous route is kept.
    pub fn set_audio_route(&self, route: DeviceKind) -> Result<(), AudioRouteError> {
        let mut state = self.inner.state.lock();
        let state = &mut *state;
        route::set_desired_route(
            self.inner.session.as_ref(),
            &state.intent,
            &mut state.output_override,
            route,
        )
    }

    /// Available devices in priority order: Headset, Bluetooth, Speaker, Phone.
    pub fn available_audio_devices(&self) -> Vec<DeviceKind> {
        self.inner.state.lock().availability.to_vec()
    }

    /// The recorded category and mode intent.
    pub fn intent(&self) -> SessionIntent {
        self.inner.state.lock().intent
    }

    /// Registers the interruption delegate, replacing any previous one.
    pub fn set_interruption_delegate(&self, delegate: Arc<dyn InterruptionDelegate>) {
        self.inner.state.lock().delegate = Some(delegate);
    }

    /// Removes the interruption delegate.
    pub fn clear_interruption_delegate(&self) {
        self.inner.state.lock().delegate = None;
    }
}

impl std::fmt::Debug for AudioRouteManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("AudioRouteManager")
            .field("backend", &self.inner.session.name())
            .field("intent", &state.intent)
            .field("available", &state.availability.to_vec())
            .finish_non_exhaustive()
    }
}
