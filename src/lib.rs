//! # audio-route
//!
//! **Note:** This crate is under active development. The API may change before 1.0.
//!
//! Audio output routing for devices whose endpoints come and go at runtime.
//!
//! `audio-route` keeps track of which audio endpoints are physically present
//! (receiver, speaker, wired headset, Bluetooth), negotiates a session
//! category that fits the app's intent and the hardware, and re-synchronizes
//! both whenever the OS reports a route change or an interruption.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use audio_route::{
//!     AudioRouteManager, DeviceKind, MockAudioSession, SessionCategory, SessionMode,
//! };
//!
//! // In an app this is the platform session; the mock stands in here.
//! let session = Arc::new(MockAudioSession::new());
//!
//! let manager = AudioRouteManager::builder(session)
//!     .on_interruption(|signal| tracing::info!(?signal, "interrupted"))
//!     .build();
//! let _reactor = manager.start(SessionCategory::PlaybackAndRecord, SessionMode::VoiceChat)?;
//!
//! println!("available: {:?}", manager.available_audio_devices());
//! manager.set_audio_route(DeviceKind::Speaker)?;
//! # Ok::<(), audio_route::AudioRouteError>(())
//! ```
//!
//! ## Architecture
//!
//! - **Session seam**: [`AudioSession`] is the only contact with the OS. It is
//!   passed in explicitly so tests can substitute [`MockAudioSession`].
//! - **Single lock**: availability, intent and the delegate live behind one
//!   mutex. Application calls and notification reactions take turns.
//! - **Reactor thread**: OS notifications go through a bounded queue to one
//!   thread that applies them in order.

#![warn(missing_docs)]
// unwrap/expect allowed in tests only
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
#![allow(clippy::missing_panics_doc)]

mod builder;
mod category;
mod config;
pub mod device;
mod error;
mod event;
mod manager;
mod reactor;
mod route;
mod scan;
pub mod session;

pub use builder::AudioRouteManagerBuilder;
pub use category::{AppliedCategory, SessionIntent};
pub use config::RouteConfig;
pub use device::{classify, AudioPort, AvailabilitySet, DeviceKind, PortType, RouteDescription};
pub use error::{AudioRouteError, SessionError};
pub use event::{interruption_callback, InterruptionDelegate, InterruptionSignal};
pub use manager::AudioRouteManager;
pub use reactor::ReactorHandle;
pub use session::{
    AudioSession, CategoryOptions, InterruptionEvent, InterruptionState, MockAudioSession,
    MockFailure, OutputOverride, RouteChangeEvent, RouteChangeReason, SessionCall,
    SessionCategory, SessionMode, SessionNotification,
};
