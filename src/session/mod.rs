//! The OS audio session seam.
//!
//! [`AudioSession`] is the only way the manager talks to the platform. A real
//! implementation wraps the OS session object; [`MockAudioSession`] is an
//! in-memory stand-in for tests and demos.

pub mod mock;
mod notification;

pub use mock::{MockAudioSession, MockFailure, SessionCall};
pub use notification::{
    InterruptionEvent, InterruptionState, RouteChangeEvent, RouteChangeReason,
    SessionNotification,
};

use tokio::sync::mpsc;

use crate::device::{AudioPort, RouteDescription};
use crate::SessionError;

/// What the app intends to do with audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionCategory {
    /// Output only.
    #[default]
    PlaybackOnly,
    /// Output plus microphone capture.
    PlaybackAndRecord,
}

impl SessionCategory {
    /// Returns `true` if this category needs an input port.
    #[must_use]
    pub fn requires_input(&self) -> bool {
        matches!(self, Self::PlaybackAndRecord)
    }
}

/// Options applied together with a [`SessionCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CategoryOptions {
    /// Accept Bluetooth hands-free accessories as inputs.
    pub allow_bluetooth: bool,
    /// Lower other apps' audio while this session plays.
    pub duck_others: bool,
}

impl CategoryOptions {
    /// Options used with [`SessionCategory::PlaybackAndRecord`].
    pub const RECORD: Self = Self {
        allow_bluetooth: true,
        duck_others: false,
    };

    /// Options used with [`SessionCategory::PlaybackOnly`].
    pub const PLAYBACK: Self = Self {
        allow_bluetooth: false,
        duck_others: true,
    };
}

/// Session mode tag. Passed through to the OS untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionMode {
    /// No special processing.
    #[default]
    Default,
    /// Two-way voice communication.
    VoiceChat,
    /// Two-way video communication.
    VideoChat,
    /// In-game voice chat.
    GameChat,
    /// Long-form spoken content such as podcasts.
    SpokenAudio,
    /// Minimal signal processing for measurement.
    Measurement,
    /// Film and TV playback.
    MoviePlayback,
    /// Recording video with audio.
    VideoRecording,
}

/// The two output states the app can control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputOverride {
    /// Let the OS pick the output.
    #[default]
    Default,
    /// Force the built-in loudspeaker.
    ForceSpeaker,
}

/// Handle to the platform audio session.
///
/// Implementations must be callable from any thread. The manager serializes
/// its own calls, but reads may race with the OS changing the route.
pub trait AudioSession: Send + Sync {
    /// The route currently in effect.
    fn current_route(&self) -> RouteDescription;

    /// Inputs that could be used right now, or `None` if the OS can't say.
    fn available_inputs(&self) -> Option<Vec<AudioPort>>;

    /// Returns `true` if any audio input exists.
    fn is_input_available(&self) -> bool;

    /// The category the OS currently has applied.
    fn category(&self) -> SessionCategory;

    /// Activates or deactivates the session.
    fn set_active(&self, active: bool) -> Result<(), SessionError>;

    /// Applies a category with options.
    fn set_category(
        &self,
        category: SessionCategory,
        options: CategoryOptions,
    ) -> Result<(), SessionError>;

    /// Applies a mode.
    fn set_mode(&self, mode: SessionMode) -> Result<(), SessionError>;

    /// Forces the speaker or restores the OS-chosen output.
    fn override_output_port(&self, output: OutputOverride) -> Result<(), SessionError>;

    /// Registers the channel that route-change and interruption
    /// notifications are pushed into.
    ///
    /// Every notification must be delivered, in order. Wait for capacity
    /// rather than dropping; availability is only updated incrementally, so
    /// a lost `OldDeviceUnavailable` leaves a stale entry until the next
    /// full rescan.
    fn subscribe(&self, sender: mpsc::Sender<SessionNotification>);

    /// Backend name for logging/debugging.
    fn name(&self) -> &'static str {
        "AudioSession"
    }
}
