use std::collections::VecDeque;
use std::time::Duration;

use mcpanel_protocol::notification::DisplayedNotification;
use mcpanel_protocol::notification::NotificationMessage;

/// Request to dismiss the message shown under `sequence_id` once
/// `duration` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayTimer {
    pub sequence_id: u64,
    pub duration: Duration,
}

/// Point-in-time copy of the queue for renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueSnapshot {
    pub current: Option<DisplayedNotification>,
    pub backlog: Vec<NotificationMessage>,
}

/// Backlog plus a single "currently displayed" slot.
///
/// The queue has no notion of time. Each transition that puts a message on
/// screen returns the [`DisplayTimer`] the caller has to arm, and the caller
/// reports expiry back through [`NotificationQueue::timer_elapsed`]. Only
/// the timer carrying the latest sequence id is authoritative; any older
/// timer that still fires is ignored.
#[derive(Debug)]
pub struct NotificationQueue {
    backlog: VecDeque<NotificationMessage>,
    current: Option<DisplayedNotification>,
    next_sequence_id: u64,
    accepting_next: bool,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self {
            backlog: VecDeque::new(),
            current: None,
            next_sequence_id: 0,
            accepting_next: true,
        }
    }

    /// Shows `message` right away when nothing is pending, otherwise
    /// appends it to the backlog.
    pub fn push(&mut self, message: NotificationMessage) -> Option<DisplayTimer> {
        if self.accepting_next {
            Some(self.show(message))
        } else {
            self.backlog.push_back(message);
            None
        }
    }

    /// Shows `message` immediately, replacing whatever is on screen. The
    /// backlog is left as is and resumes draining after this message.
    pub fn urgent(&mut self, message: NotificationMessage) -> DisplayTimer {
        self.show(message)
    }

    /// Dismisses the current message and advances to the backlog head.
    pub fn consume(&mut self) -> Option<DisplayTimer> {
        self.current = None;
        match self.backlog.pop_front() {
            Some(next) => Some(self.show(next)),
            None => {
                self.accepting_next = true;
                None
            }
        }
    }

    /// Reports that the timer armed for `sequence_id` has fired.
    pub fn timer_elapsed(&mut self, sequence_id: u64) -> Option<DisplayTimer> {
        if sequence_id != self.next_sequence_id {
            tracing::trace!(
                sequence_id,
                live = self.next_sequence_id,
                "ignoring superseded notification timer"
            );
            return None;
        }
        self.accepting_next = true;
        self.consume()
    }

    pub fn current(&self) -> Option<&DisplayedNotification> {
        self.current.as_ref()
    }

    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    pub fn next_sequence_id(&self) -> u64 {
        self.next_sequence_id
    }

    /// True when the next `push` would be shown immediately.
    pub fn is_idle(&self) -> bool {
        self.accepting_next
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            current: self.current.clone(),
            backlog: self.backlog.iter().cloned().collect(),
        }
    }

    fn show(&mut self, message: NotificationMessage) -> DisplayTimer {
        self.next_sequence_id += 1;
        self.accepting_next = false;
        let timer = DisplayTimer {
            sequence_id: self.next_sequence_id,
            duration: message.duration,
        };
        self.current = Some(DisplayedNotification {
            sequence_id: self.next_sequence_id,
            message,
        });
        timer
    }
}
