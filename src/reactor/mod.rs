//! Reactions to OS notifications.
//!
//! Notifications arrive on an OS-owned thread and are queued into a bounded
//! channel. A single reactor thread drains the queue and handles each one
//! under the manager's lock, so reactions never interleave with each other
//! or with application calls.

pub(crate) mod interruption;
mod listener;
pub(crate) mod route_change;

pub use listener::ReactorHandle;
pub(crate) use listener::spawn;
