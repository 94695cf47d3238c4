//! In-memory audio session for testing without a device.

use std::collections::HashSet;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::{
    AudioSession, CategoryOptions, OutputOverride, RouteChangeEvent, RouteChangeReason,
    SessionCategory, SessionMode, SessionNotification,
};
use crate::device::{AudioPort, PortType, RouteDescription};
use crate::SessionError;

/// A mutating call received by [`MockAudioSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCall {
    /// `set_active(bool)`
    SetActive(bool),
    /// `set_category(category, options)`
    SetCategory(SessionCategory, CategoryOptions),
    /// `set_mode(mode)`
    SetMode(SessionMode),
    /// `override_output_port(output)`
    OverrideOutput(OutputOverride),
}

/// Operations that can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockFailure {
    /// `set_active(true)`
    Activate,
    /// `set_active(false)`
    Deactivate,
    /// `set_category`
    Category,
    /// `set_mode`
    Mode,
    /// `override_output_port`
    Override,
}

struct MockState {
    builtin_output: AudioPort,
    outputs: Vec<AudioPort>,
    inputs: Vec<AudioPort>,
    category: SessionCategory,
    mode: SessionMode,
    active: bool,
    output_override: OutputOverride,
    failures: HashSet<MockFailure>,
    calls: Vec<SessionCall>,
    sender: Option<mpsc::Sender<SessionNotification>>,
}

/// A fake OS audio session that simulates device hot-plugging.
///
/// Every mutating call is recorded and can be inspected with
/// [`calls()`](Self::calls). Individual operations can be made to fail with
/// [`fail()`](Self::fail).
///
/// The `attach_*`/`detach_*` helpers change the simulated hardware and
/// return the route-change event the OS would deliver. They don't deliver
/// it: hand it to the manager directly or push it through
/// [`emit()`](Self::emit).
///
/// # Example
///
/// ```
/// use audio_route::{AudioPort, AudioSession, DeviceKind, MockAudioSession, PortType};
///
/// let session = MockAudioSession::new();
/// assert_eq!(session.current_route().primary_output(), Some(DeviceKind::Phone));
///
/// let _event = session.attach_output(AudioPort::new(PortType::Headphones, "Headphones"));
/// assert_eq!(session.current_route().primary_output(), Some(DeviceKind::Headset));
/// ```
pub struct MockAudioSession {
    state: Mutex<MockState>,
}

impl MockAudioSession {
    /// A phone: receiver output and a built-in microphone.
    pub fn new() -> Self {
        Self::with_ports(
            AudioPort::new(PortType::BuiltInReceiver, "Receiver"),
            vec![AudioPort::new(PortType::BuiltInMic, "iPhone Microphone")],
        )
    }

    /// A receiver-less device with no microphone, such as an older iPod.
    pub fn without_input() -> Self {
        Self::with_ports(AudioPort::new(PortType::BuiltInSpeaker, "Speaker"), Vec::new())
    }

    /// A device whose default output is `builtin_output` with the given inputs.
    pub fn with_ports(builtin_output: AudioPort, inputs: Vec<AudioPort>) -> Self {
        Self {
            state: Mutex::new(MockState {
                outputs: vec![builtin_output.clone()],
                builtin_output,
                inputs,
                category: SessionCategory::default(),
                mode: SessionMode::default(),
                active: false,
                output_override: OutputOverride::default(),
                failures: HashSet::new(),
                calls: Vec::new(),
                sender: None,
            }),
        }
    }

    /// Makes `op` fail until [`succeed()`](Self::succeed) is called.
    pub fn fail(&self, op: MockFailure) {
        self.state.lock().failures.insert(op);
    }

    /// Makes `op` succeed again.
    pub fn succeed(&self, op: MockFailure) {
        self.state.lock().failures.remove(&op);
    }

    /// Returns all mutating calls received so far.
    pub fn calls(&self) -> Vec<SessionCall> {
        self.state.lock().calls.clone()
    }

    /// Forgets recorded calls.
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Returns `true` if the session is active.
    pub fn is_active(&self) -> bool {
        self.state.lock().active
    }

    /// Returns the last override applied.
    pub fn output_override(&self) -> OutputOverride {
        self.state.lock().output_override
    }

    /// Returns the last mode applied.
    pub fn mode(&self) -> SessionMode {
        self.state.lock().mode
    }

    /// Connects an output. It becomes the primary output.
    pub fn attach_output(&self, port: AudioPort) -> RouteChangeEvent {
        self.change(RouteChangeReason::NewDeviceAvailable, |state| {
            state.outputs.retain(|p| *p != state.builtin_output);
            state.outputs.insert(0, port);
        })
    }

    /// Disconnects every output of `port_type`.
    ///
    /// Falls back to the built-in output when nothing else is left.
    pub fn detach_output(&self, port_type: &PortType) -> RouteChangeEvent {
        self.change(RouteChangeReason::OldDeviceUnavailable, |state| {
            state.outputs.retain(|p| p.port_type != *port_type);
            if state.outputs.is_empty() {
                state.outputs.push(state.builtin_output.clone());
            }
        })
    }

    /// Connects an input.
    pub fn attach_input(&self, port: AudioPort) -> RouteChangeEvent {
        self.change(RouteChangeReason::NewDeviceAvailable, |state| {
            state.inputs.push(port);
        })
    }

    /// Disconnects every input of `port_type`.
    pub fn detach_input(&self, port_type: &PortType) -> RouteChangeEvent {
        self.change(RouteChangeReason::OldDeviceUnavailable, |state| {
            state.inputs.retain(|p| p.port_type != *port_type);
        })
    }

    /// Pushes a notification into the subscribed channel.
    ///
    /// Returns `false` if nobody subscribed or the queue is full. A `false`
    /// return is a lost notification; see [`AudioSession::subscribe`].
    pub fn emit(&self, notification: impl Into<SessionNotification>) -> bool {
        match &self.state.lock().sender {
            Some(sender) => sender.try_send(notification.into()).is_ok(),
            None => false,
        }
    }

    /// Drops the notification sender, which ends the manager's listener.
    pub fn close(&self) {
        self.state.lock().sender = None;
    }

    fn change(
        &self,
        reason: RouteChangeReason,
        mutate: impl FnOnce(&mut MockState),
    ) -> RouteChangeEvent {
        let mut state = self.state.lock();
        let previous = Self::route_of(&state);
        mutate(&mut state);
        RouteChangeEvent::new(reason, previous)
    }

    fn route_of(state: &MockState) -> RouteDescription {
        let outputs = match state.output_override {
            OutputOverride::ForceSpeaker => {
                vec![AudioPort::new(PortType::BuiltInSpeaker, "Speaker")]
            }
            OutputOverride::Default => state.outputs.clone(),
        };
        RouteDescription::new(outputs, state.inputs.iter().take(1).cloned().collect())
    }

    fn check(state: &MockState, op: MockFailure) -> Result<(), SessionError> {
        if !state.failures.contains(&op) {
            return Ok(());
        }
        Err(match op {
            MockFailure::Activate | MockFailure::Deactivate => {
                SessionError::activation("mock activation failure")
            }
            MockFailure::Category => SessionError::category("mock category failure"),
            MockFailure::Mode => SessionError::mode("mock mode failure"),
            MockFailure::Override => SessionError::override_rejected("mock override failure"),
        })
    }
}

impl Default for MockAudioSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSession for MockAudioSession {
    fn current_route(&self) -> RouteDescription {
        Self::route_of(&self.state.lock())
    }

    fn available_inputs(&self) -> Option<Vec<AudioPort>> {
        Some(self.state.lock().inputs.clone())
    }

    fn is_input_available(&self) -> bool {
        !self.state.lock().inputs.is_empty()
    }

    fn category(&self) -> SessionCategory {
        self.state.lock().category
    }

    fn set_active(&self, active: bool) -> Result<(), SessionError> {
        let mut state = self.state.lock();
        state.calls.push(SessionCall::SetActive(active));
        let op = if active {
            MockFailure::Activate
        } else {
            MockFailure::Deactivate
        };
        Self::check(&state, op)?;
        state.active = active;
        Ok(())
    }

    fn set_category(
        &self,
        category: SessionCategory,
        options: CategoryOptions,
    ) -> Result<(), SessionError> {
        let mut state = self.state.lock();
        state.calls.push(SessionCall::SetCategory(category, options));
        Self::check(&state, MockFailure::Category)?;
        if category.requires_input() && state.inputs.is_empty() {
            return Err(SessionError::category("no input hardware for record category"));
        }
        state.category = category;
        Ok(())
    }

    fn set_mode(&self, mode: SessionMode) -> Result<(), SessionError> {
        let mut state = self.state.lock();
        state.calls.push(SessionCall::SetMode(mode));
        Self::check(&state, MockFailure::Mode)?;
        state.mode = mode;
        Ok(())
    }

    fn override_output_port(&self, output: OutputOverride) -> Result<(), SessionError> {
        let mut state = self.state.lock();
        state.calls.push(SessionCall::OverrideOutput(output));
        Self::check(&state, MockFailure::Override)?;
        state.output_override = output;
        Ok(())
    }

    fn subscribe(&self, sender: mpsc::Sender<SessionNotification>) {
        self.state.lock().sender = Some(sender);
    }

    fn name(&self) -> &'static str {
        "MockAudioSession"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DeviceKind;

    #[test]
    fn test_mock_default_route() {
        let session = MockAudioSession::new();
        let route = session.current_route();
        assert_eq!(route.primary_output(), Some(DeviceKind::Phone));
        assert!(session.is_input_available());
        assert!(!session.is_active());
    }

    #[test]
    fn test_mock_records_calls() {
        let session = MockAudioSession::new();
        session.set_active(true).unwrap();
        session.set_mode(SessionMode::VoiceChat).unwrap();

        assert_eq!(
            session.calls(),
            vec![
                SessionCall::SetActive(true),
                SessionCall::SetMode(SessionMode::VoiceChat)
            ]
        );
        session.clear_calls();
        assert!(session.calls().is_empty());
    }

    #[test]
    fn test_mock_failure_injection() {
        let session = MockAudioSession::new();
        session.fail(MockFailure::Activate);
        assert!(session.set_active(true).is_err());
        assert!(session.set_active(false).is_ok());

        session.succeed(MockFailure::Activate);
        assert!(session.set_active(true).is_ok());
    }

    #[test]
    fn test_mock_rejects_record_without_input() {
        let session = MockAudioSession::without_input();
        let result =
            session.set_category(SessionCategory::PlaybackAndRecord, CategoryOptions::RECORD);
        assert!(matches!(result, Err(SessionError::Category { .. })));
        assert_eq!(session.category(), SessionCategory::PlaybackOnly);
    }

    #[test]
    fn test_mock_speaker_override() {
        let session = MockAudioSession::new();
        session
            .override_output_port(OutputOverride::ForceSpeaker)
            .unwrap();
        assert_eq!(
            session.current_route().primary_output(),
            Some(DeviceKind::Speaker)
        );

        session.override_output_port(OutputOverride::Default).unwrap();
        assert_eq!(
            session.current_route().primary_output(),
            Some(DeviceKind::Phone)
        );
    }

    #[test]
    fn test_mock_hotplug_events() {
        let session = MockAudioSession::new();
        let event = session.attach_output(AudioPort::new(PortType::Headphones, "Headphones"));
        assert_eq!(event.reason, Some(RouteChangeReason::NewDeviceAvailable));
        assert_eq!(
            event.previous_route.unwrap().primary_output(),
            Some(DeviceKind::Phone)
        );

        let event = session.detach_output(&PortType::Headphones);
        assert_eq!(event.reason, Some(RouteChangeReason::OldDeviceUnavailable));
        assert_eq!(
            event.previous_route.unwrap().primary_output(),
            Some(DeviceKind::Headset)
        );
        assert_eq!(
            session.current_route().primary_output(),
            Some(DeviceKind::Phone)
        );
    }

    #[test]
    fn test_mock_emit_requires_subscriber() {
        let session = MockAudioSession::new();
        assert!(!session.emit(RouteChangeEvent::default()));

        let (tx, mut rx) = mpsc::channel(4);
        session.subscribe(tx);
        assert!(session.emit(RouteChangeEvent::default()));
        assert!(matches!(
            rx.try_recv(),
            Ok(SessionNotification::RouteChange(_))
        ));

        session.close();
        assert!(!session.emit(RouteChangeEvent::default()));
    }
}
