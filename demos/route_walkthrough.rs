//! Walks the route manager through a typical session using the mock backend.
//!
//! Plugs in a headset, forces the speaker, connects and drops Bluetooth
//! accessories, and simulates a phone call interruption.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=audio_route=debug cargo run --example route_walkthrough
//! ```

use std::sync::Arc;

use audio_route::{
    AudioPort, AudioRouteManager, DeviceKind, InterruptionEvent, InterruptionState,
    MockAudioSession, PortType, SessionCategory, SessionMode,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let session = Arc::new(MockAudioSession::new());
    let manager = AudioRouteManager::builder(session.clone())
        .on_interruption(|signal| println!("Interruption: {signal:?}"))
        .build();
    let reactor = manager.start(SessionCategory::PlaybackAndRecord, SessionMode::VoiceChat)?;

    println!("Route Walkthrough");
    println!("=================");
    println!("route: {:?}", manager.audio_route());
    println!("available: {:?}", manager.available_audio_devices());
    println!();

    println!("Plugging in headphones...");
    manager.handle_notification(
        session
            .attach_output(AudioPort::new(PortType::Headphones, "Headphones"))
            .into(),
    );
    println!("route: {:?}", manager.audio_route());
    println!("available: {:?}", manager.available_audio_devices());
    println!();

    println!("Forcing the speaker...");
    manager.set_audio_route(DeviceKind::Speaker)?;
    println!("route: {:?}", manager.audio_route());
    manager.set_audio_route(DeviceKind::Headset)?;
    println!("back to: {:?}", manager.audio_route());
    println!();

    println!("Unplugging headphones...");
    manager.handle_notification(session.detach_output(&PortType::Headphones).into());
    println!("available: {:?}", manager.available_audio_devices());
    println!();

    println!("Connecting Bluetooth speaker and a hands-free mic...");
    manager.handle_notification(
        session
            .attach_output(AudioPort::new(PortType::BluetoothA2dp, "Speaker Box"))
            .into(),
    );
    let _ = session.attach_input(AudioPort::new(PortType::BluetoothHfp, "Car Kit"));
    println!("available: {:?}", manager.available_audio_devices());

    println!("Turning off the Bluetooth speaker...");
    manager.handle_notification(session.detach_output(&PortType::BluetoothA2dp).into());
    println!("available (mic still connected): {:?}", manager.available_audio_devices());
    println!();

    println!("Incoming call...");
    session.emit(InterruptionEvent::new(InterruptionState::Began));
    session.emit(InterruptionEvent::new(InterruptionState::Ended));

    session.close();
    reactor.join();

    println!();
    println!("Done!");
    Ok(())
}
