//! Integration tests for audio-route.
//!
//! All tests run against `MockAudioSession`; no audio hardware is needed.

use std::sync::Arc;
use std::time::{Duration, Instant};

use audio_route::{
    AudioPort, AudioRouteError, AudioRouteManager, AudioSession, DeviceKind, InterruptionEvent,
    InterruptionSignal, InterruptionState, MockAudioSession, OutputOverride, PortType,
    RouteChangeEvent, RouteChangeReason, RouteDescription, SessionCall, SessionCategory,
    SessionMode,
};
use parking_lot::Mutex;

fn started(session: &Arc<MockAudioSession>, category: SessionCategory) -> AudioRouteManager {
    let manager = AudioRouteManager::new(session.clone());
    let _reactor = manager.start(category, SessionMode::Default).unwrap();
    session.clear_calls();
    manager
}

fn headphones() -> AudioPort {
    AudioPort::new(PortType::Headphones, "Headphones")
}

/// Polls `condition` until it holds or a second has passed.
fn wait_for(condition: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(1);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    condition()
}

#[test]
fn test_headset_unplug_renegotiates_and_reactivates() {
    let session = Arc::new(MockAudioSession::new());
    let _ = session.attach_output(headphones());
    let manager = started(&session, SessionCategory::PlaybackAndRecord);

    assert_eq!(manager.audio_route(), Some(DeviceKind::Headset));
    assert!(manager
        .available_audio_devices()
        .contains(&DeviceKind::Headset));

    let event = session.detach_output(&PortType::Headphones);
    manager.handle_notification(event.into());

    assert!(!manager
        .available_audio_devices()
        .contains(&DeviceKind::Headset));
    let calls = session.calls();
    assert!(calls
        .iter()
        .any(|c| matches!(c, SessionCall::SetCategory(SessionCategory::PlaybackAndRecord, _))));
    assert_eq!(calls.last(), Some(&SessionCall::SetActive(true)));
    assert!(session.is_active());
}

#[test]
fn test_one_of_two_bluetooth_accessories_disconnects() {
    let session = Arc::new(MockAudioSession::new());
    let _ = session.attach_output(AudioPort::new(PortType::BluetoothA2dp, "Speaker Box"));
    let _ = session.attach_input(AudioPort::new(PortType::BluetoothHfp, "Car Kit"));
    let manager = started(&session, SessionCategory::PlaybackOnly);
    assert!(manager
        .available_audio_devices()
        .contains(&DeviceKind::Bluetooth));

    let event = session.detach_output(&PortType::BluetoothA2dp);
    manager.handle_notification(event.into());

    assert!(manager
        .available_audio_devices()
        .contains(&DeviceKind::Bluetooth));

    // The hands-free kit was the active output when it went away.
    let _ = session.detach_input(&PortType::BluetoothHfp);
    let event = RouteChangeEvent::new(
        RouteChangeReason::OldDeviceUnavailable,
        RouteDescription::new(vec![AudioPort::new(PortType::BluetoothHfp, "Car Kit")], vec![]),
    );
    manager.handle_notification(event.into());
    assert!(!manager
        .available_audio_devices()
        .contains(&DeviceKind::Bluetooth));
}

#[test]
fn test_one_of_two_bluetooth_outputs_disconnects() {
    let session = Arc::new(MockAudioSession::new());
    let _ = session.attach_output(AudioPort::new(PortType::BluetoothA2dp, "Speaker Box"));
    let _ = session.attach_output(AudioPort::new(PortType::BluetoothLe, "Buds"));
    let manager = started(&session, SessionCategory::PlaybackOnly);

    manager.handle_notification(session.detach_output(&PortType::BluetoothLe).into());

    assert_eq!(manager.audio_route(), Some(DeviceKind::Bluetooth));
    assert_eq!(
        manager.available_audio_devices(),
        vec![DeviceKind::Bluetooth, DeviceKind::Speaker, DeviceKind::Phone]
    );
}

#[test]
fn test_headset_unplugged_while_speaker_forced() {
    let session = Arc::new(MockAudioSession::new());
    let _ = session.attach_output(headphones());
    let manager = started(&session, SessionCategory::PlaybackAndRecord);

    manager.set_audio_route(DeviceKind::Speaker).unwrap();
    session.clear_calls();

    manager.handle_notification(session.detach_output(&PortType::Headphones).into());

    let after_unplug = manager.available_audio_devices();
    assert_eq!(after_unplug, vec![DeviceKind::Speaker, DeviceKind::Phone]);
    assert_eq!(manager.rescan_devices(), after_unplug);

    let calls = session.calls();
    assert!(calls
        .iter()
        .any(|c| matches!(c, SessionCall::SetCategory(SessionCategory::PlaybackAndRecord, _))));
}

#[test]
fn test_rescan_recovers_from_lost_notification() {
    let session = Arc::new(MockAudioSession::new());
    let _ = session.attach_output(headphones());
    let manager = started(&session, SessionCategory::PlaybackOnly);

    // The unplug notification never reaches the manager.
    let _ = session.detach_output(&PortType::Headphones);
    assert!(manager
        .available_audio_devices()
        .contains(&DeviceKind::Headset));

    assert_eq!(
        manager.rescan_devices(),
        vec![DeviceKind::Speaker, DeviceKind::Phone]
    );
}

#[test]
fn test_no_input_device_degrades_and_rejects_recording() {
    let session = Arc::new(MockAudioSession::without_input());
    let manager = AudioRouteManager::builder(session.clone())
        .has_receiver(false)
        .build();
    let _reactor = manager
        .start(SessionCategory::PlaybackAndRecord, SessionMode::Default)
        .unwrap();

    assert!(!session.is_input_available());
    assert_eq!(session.category(), SessionCategory::PlaybackOnly);

    let result = manager.change_category(SessionCategory::PlaybackAndRecord);
    assert!(matches!(result, Err(AudioRouteError::RecordingUnsupported)));
    assert_eq!(
        manager.intent().category,
        SessionCategory::PlaybackAndRecord
    );
    assert_eq!(session.category(), SessionCategory::PlaybackOnly);
}

#[test]
fn test_force_speaker_from_receiver() {
    let session = Arc::new(MockAudioSession::new());
    let manager = started(&session, SessionCategory::PlaybackAndRecord);
    assert_eq!(manager.audio_route(), Some(DeviceKind::Phone));

    manager.set_audio_route(DeviceKind::Speaker).unwrap();

    let calls = session.calls();
    assert_eq!(calls.first(), Some(&SessionCall::SetActive(false)));
    assert!(calls.contains(&SessionCall::OverrideOutput(OutputOverride::ForceSpeaker)));
    assert_eq!(calls.last(), Some(&SessionCall::SetActive(true)));
    assert_eq!(manager.audio_route(), Some(DeviceKind::Speaker));

    manager.set_audio_route(DeviceKind::Phone).unwrap();
    assert_eq!(session.output_override(), OutputOverride::Default);
    assert_eq!(manager.audio_route(), Some(DeviceKind::Phone));
}

#[test]
fn test_setting_current_route_makes_no_session_calls() {
    let session = Arc::new(MockAudioSession::new());
    let _ = session.attach_output(headphones());
    let manager = started(&session, SessionCategory::PlaybackOnly);

    manager.set_audio_route(DeviceKind::Headset).unwrap();
    assert!(session.calls().is_empty());
}

#[test]
fn test_change_category_twice_applies_once() {
    let session = Arc::new(MockAudioSession::new());
    let manager = started(&session, SessionCategory::PlaybackOnly);

    manager
        .change_category(SessionCategory::PlaybackAndRecord)
        .unwrap();
    manager
        .change_category(SessionCategory::PlaybackAndRecord)
        .unwrap();

    assert_eq!(
        session
            .calls()
            .iter()
            .filter(|c| matches!(c, SessionCall::SetCategory(..)))
            .count(),
        1
    );
}

#[test]
fn test_builtins_survive_every_rescan() {
    let layouts: Vec<(Vec<AudioPort>, Vec<AudioPort>)> = vec![
        (vec![headphones()], vec![]),
        (
            vec![AudioPort::new(PortType::BluetoothA2dp, "Buds")],
            vec![AudioPort::new(PortType::BluetoothHfp, "Buds")],
        ),
        (vec![AudioPort::new(PortType::Hdmi, "TV")], vec![]),
    ];

    for (outputs, inputs) in layouts {
        let session = Arc::new(MockAudioSession::new());
        for port in outputs {
            let _ = session.attach_output(port);
        }
        for port in inputs {
            let _ = session.attach_input(port);
        }
        let manager = AudioRouteManager::new(session.clone());

        let devices = manager.rescan_devices();
        assert!(devices.contains(&DeviceKind::Speaker));
        assert!(devices.contains(&DeviceKind::Phone));
    }
}

#[test]
fn test_bluetooth_input_keeps_bluetooth_across_event_sequences() {
    let session = Arc::new(MockAudioSession::new());
    let _ = session.attach_input(AudioPort::new(PortType::BluetoothHfp, "Headset Mic"));
    let manager = started(&session, SessionCategory::PlaybackAndRecord);

    let bt_route = RouteDescription::new(
        vec![AudioPort::new(PortType::BluetoothA2dp, "Buds")],
        vec![],
    );
    let events = [
        RouteChangeEvent::new(RouteChangeReason::OldDeviceUnavailable, bt_route.clone()),
        RouteChangeEvent::new(RouteChangeReason::Override, bt_route.clone()),
        RouteChangeEvent::new(
            RouteChangeReason::OldDeviceUnavailable,
            RouteDescription::new(vec![headphones()], vec![]),
        ),
        RouteChangeEvent::new(RouteChangeReason::CategoryChange, bt_route),
        RouteChangeEvent::default(),
    ];

    for event in events {
        manager.handle_notification(event.into());
        assert!(manager
            .available_audio_devices()
            .contains(&DeviceKind::Bluetooth));
    }
}

#[test]
fn test_available_devices_priority_order() {
    let session = Arc::new(MockAudioSession::new());
    let _ = session.attach_output(headphones());
    let _ = session.attach_input(AudioPort::new(PortType::BluetoothHfp, "Car Kit"));
    let manager = started(&session, SessionCategory::PlaybackOnly);

    assert_eq!(
        manager.available_audio_devices(),
        vec![
            DeviceKind::Headset,
            DeviceKind::Bluetooth,
            DeviceKind::Speaker,
            DeviceKind::Phone
        ]
    );
}

#[test]
fn test_notifications_flow_through_reactor_thread() {
    let session = Arc::new(MockAudioSession::new());
    let signals = Arc::new(Mutex::new(Vec::new()));
    let signals_clone = signals.clone();

    let manager = AudioRouteManager::builder(session.clone())
        .on_interruption(move |signal| signals_clone.lock().push(signal))
        .build();
    let reactor = manager
        .start(SessionCategory::PlaybackOnly, SessionMode::Default)
        .unwrap();

    assert!(session.emit(session.attach_output(headphones())));
    assert!(session.emit(InterruptionEvent::new(InterruptionState::Began)));
    assert!(session.emit(InterruptionEvent::new(InterruptionState::Unknown(3))));
    assert!(session.emit(InterruptionEvent::new(InterruptionState::Ended)));

    session.close();
    reactor.join();

    assert!(manager
        .available_audio_devices()
        .contains(&DeviceKind::Headset));
    assert_eq!(
        *signals.lock(),
        vec![InterruptionSignal::Began, InterruptionSignal::Ended]
    );
}

#[test]
fn test_reactor_exits_when_manager_dropped() {
    let session = Arc::new(MockAudioSession::new());
    let manager = AudioRouteManager::new(session.clone());
    let reactor = manager
        .start(SessionCategory::PlaybackOnly, SessionMode::Default)
        .unwrap();

    drop(manager);
    assert!(session.emit(RouteChangeEvent::default()));
    assert!(wait_for(|| reactor.is_finished()));
}

#[test]
fn test_concurrent_callers_and_notifications() {
    let session = Arc::new(MockAudioSession::new());
    let manager = started(&session, SessionCategory::PlaybackAndRecord);

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let manager = manager.clone();
            let session = session.clone();
            std::thread::spawn(move || {
                for _ in 0..25 {
                    if i % 2 == 0 {
                        let _ = manager.set_audio_route(DeviceKind::Speaker);
                        let _ = manager.set_audio_route(DeviceKind::Phone);
                    } else {
                        let event = RouteChangeEvent::new(
                            RouteChangeReason::NewDeviceAvailable,
                            session.current_route(),
                        );
                        manager.handle_notification(event.into());
                        let _ = manager.available_audio_devices();
                    }
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    let devices = manager.available_audio_devices();
    assert!(devices.contains(&DeviceKind::Speaker));
    assert!(devices.contains(&DeviceKind::Phone));
    assert!(!devices.contains(&DeviceKind::Headset));
    assert!(!devices.contains(&DeviceKind::Bluetooth));
}
