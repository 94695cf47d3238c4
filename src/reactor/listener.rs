//! Thread that drains OS notifications into the manager.

use std::thread::{self, JoinHandle};

use tokio::sync::mpsc;

use crate::session::SessionNotification;

const REACTOR_THREAD_NAME: &str = "audio-route-reactor";

/// Handle to the notification reactor thread started by
/// [`AudioRouteManager::start()`](crate::AudioRouteManager::start).
///
/// The thread runs until the session drops its notification sender or the
/// manager is dropped. Dropping the handle detaches the thread.
#[derive(Debug)]
pub struct ReactorHandle {
    thread: Option<JoinHandle<()>>,
}

impl ReactorHandle {
    /// Returns `true` once the reactor thread has exited.
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Blocks until the reactor thread exits.
    pub fn join(mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("audio route reactor thread panicked");
            }
        }
    }
}

/// Spawns the reactor thread.
///
/// `handle` runs once per notification, in arrival order. Returning `false`
/// stops the thread.
pub(crate) fn spawn<F>(
    mut notifications: mpsc::Receiver<SessionNotification>,
    mut handle: F,
) -> std::io::Result<ReactorHandle>
where
    F: FnMut(SessionNotification) -> bool + Send + 'static,
{
    let thread = thread::Builder::new()
        .name(REACTOR_THREAD_NAME.to_string())
        .spawn(move || {
            while let Some(notification) = notifications.blocking_recv() {
                if !handle(notification) {
                    tracing::debug!("route manager dropped, stopping reactor");
                    return;
                }
            }
            tracing::debug!("notification channel closed, stopping reactor");
        })?;

    Ok(ReactorHandle {
        thread: Some(thread),
    })
}
