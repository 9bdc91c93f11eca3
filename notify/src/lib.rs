//! Ordered, single-slot delivery of user notifications.
//!
//! [`NotificationQueue`] is the clock-free state machine: it decides what
//! is on screen and hands back a [`DisplayTimer`] every time it shows
//! something. [`NotificationCenter`] runs that machine on tokio, arming the
//! timers and publishing the current slot to observers through a
//! [`NotifierHandle`].
#![deny(clippy::unwrap_used, clippy::expect_used)]

mod center;
mod queue;

pub use center::NotificationCenter;
pub use center::NotifierHandle;
pub use queue::DisplayTimer;
pub use queue::NotificationQueue;
pub use queue::QueueSnapshot;

pub use mcpanel_protocol::notification::DisplayedNotification;
pub use mcpanel_protocol::notification::NotificationMessage;
pub use mcpanel_protocol::notification::Severity;
