use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;

/// How long a regular notification stays on screen.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(30);

/// Duration for short confirmations such as "logged out".
pub const FAST_DURATION: Duration = Duration::from_secs(10);

/// Duration for messages that jump the queue.
pub const URGENT_DURATION: Duration = Duration::from_secs(10);

/// Visual severity of a notification. The names follow the colour classes
/// the panel front-end styles alerts with.
#[derive(Debug, Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    #[default]
    Info,
    Light,
    Dark,
}

/// A message waiting to be shown to the user.
///
/// `text` is usually a localisation key (`auth.logout`) that the renderer
/// resolves; the queue itself never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub text: String,
    pub severity: Severity,
    pub duration: Duration,
}

impl NotificationMessage {
    pub fn new(text: impl Into<String>, severity: Severity, duration: Duration) -> Self {
        Self {
            text: text.into(),
            severity,
            duration,
        }
    }

    /// Informational message shown for [`DEFAULT_DURATION`].
    pub fn notify(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Info, DEFAULT_DURATION)
    }

    /// Informational message shown for [`FAST_DURATION`].
    pub fn notify_fast(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Info, FAST_DURATION)
    }

    /// Warning meant to pre-empt whatever is on screen.
    pub fn urgent(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Warning, URGENT_DURATION)
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// A message that is currently on screen, tagged with the sequence id it
/// was given when it was shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedNotification {
    pub sequence_id: u64,
    pub message: NotificationMessage,
}
