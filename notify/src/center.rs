use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::sync::Weak;

use mcpanel_protocol::notification::DisplayedNotification;
use mcpanel_protocol::notification::NotificationMessage;
use tokio::sync::mpsc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::queue::DisplayTimer;
use crate::queue::NotificationQueue;
use crate::queue::QueueSnapshot;

/// Timer forwarded to the timer loop, with its deadline fixed at the moment
/// the message was shown.
#[derive(Debug, Clone, Copy)]
struct ArmedTimer {
    sequence_id: u64,
    deadline: Instant,
}

#[derive(Debug)]
struct Shared {
    queue: Mutex<NotificationQueue>,
    current_tx: watch::Sender<Option<DisplayedNotification>>,
    timer_tx: UnboundedSender<ArmedTimer>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, NotificationQueue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `op` against the queue, then publishes the resulting slot and
    /// arms the returned timer, all under the queue lock so observers and
    /// the timer loop see transitions in the order they happened.
    fn apply(&self, op: impl FnOnce(&mut NotificationQueue) -> Option<DisplayTimer>) {
        let mut queue = self.lock();
        let timer = op(&mut queue);
        let current = queue.current().cloned();
        if let Some(timer) = timer {
            // A duration too large to represent as a deadline never expires;
            // the message stays until it is consumed or pre-empted.
            match Instant::now().checked_add(timer.duration) {
                Some(deadline) => {
                    let armed = ArmedTimer {
                        sequence_id: timer.sequence_id,
                        deadline,
                    };
                    if let Err(e) = self.timer_tx.send(armed) {
                        tracing::error!("notification timer loop is gone: {e}");
                    }
                }
                None => tracing::debug!(
                    sequence_id = timer.sequence_id,
                    "notification duration out of range; not arming a timer"
                ),
            }
        }
        self.current_tx.send_if_modified(|slot| {
            if *slot == current {
                false
            } else {
                *slot = current;
                true
            }
        });
    }
}

/// Owns the tokio task that dismisses notifications when their time is up.
///
/// Application code talks to the queue through [`NotifierHandle`]s handed
/// out by [`NotificationCenter::handle`]; there is no global instance.
#[derive(Debug)]
pub struct NotificationCenter {
    handle: NotifierHandle,
    timers: JoinHandle<()>,
}

impl NotificationCenter {
    /// Starts the timer loop on the current tokio runtime.
    pub fn spawn() -> Self {
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        let (current_tx, _) = watch::channel(None);
        let shared = Arc::new(Shared {
            queue: Mutex::new(NotificationQueue::new()),
            current_tx,
            timer_tx,
        });
        let timers = tokio::spawn(run_timers(Arc::downgrade(&shared), timer_rx));
        Self {
            handle: NotifierHandle { shared },
            timers,
        }
    }

    pub fn handle(&self) -> NotifierHandle {
        self.handle.clone()
    }

    /// Stops the timer loop. Messages already on screen stay there until
    /// someone calls [`NotifierHandle::consume`].
    pub fn shutdown(self) {
        self.timers.abort();
    }
}

/// Cloneable entry point into the notification queue.
#[derive(Clone, Debug)]
pub struct NotifierHandle {
    shared: Arc<Shared>,
}

impl NotifierHandle {
    /// Shows `message` now if the queue is idle, otherwise queues it behind
    /// the messages already waiting.
    pub fn push(&self, message: NotificationMessage) {
        tracing::debug!(text = %message.text, severity = %message.severity, "notification pushed");
        self.shared.apply(|queue| queue.push(message));
    }

    /// Replaces whatever is on screen with `message` without touching the
    /// backlog.
    pub fn urgent(&self, message: NotificationMessage) {
        tracing::debug!(text = %message.text, severity = %message.severity, "urgent notification");
        self.shared.apply(|queue| Some(queue.urgent(message)));
    }

    /// Dismisses the current message, e.g. when the user closes it.
    pub fn consume(&self) {
        self.shared.apply(NotificationQueue::consume);
    }

    pub fn notify(&self, text: impl Into<String>) {
        self.push(NotificationMessage::notify(text));
    }

    pub fn notify_fast(&self, text: impl Into<String>) {
        self.push(NotificationMessage::notify_fast(text));
    }

    /// Urgent warning, see [`NotificationMessage::urgent`].
    pub fn alert(&self, text: impl Into<String>) {
        self.urgent(NotificationMessage::urgent(text));
    }

    pub fn current(&self) -> Option<DisplayedNotification> {
        self.shared.lock().current().cloned()
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        self.shared.lock().snapshot()
    }

    /// Receiver that changes every time the displayed slot changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<DisplayedNotification>> {
        self.shared.current_tx.subscribe()
    }
}

async fn run_timers(shared: Weak<Shared>, mut timer_rx: UnboundedReceiver<ArmedTimer>) {
    // Only the latest timer can still be authoritative, so one slot is enough.
    let mut armed: Option<ArmedTimer> = None;
    loop {
        let deadline = armed.map(|timer| timer.deadline);
        tokio::select! {
            received = timer_rx.recv() => match received {
                Some(timer) => armed = Some(timer),
                None => break,
            },
            () = sleep_until(deadline) => {
                let Some(timer) = armed.take() else {
                    continue;
                };
                let Some(shared) = shared.upgrade() else {
                    break;
                };
                shared.apply(|queue| queue.timer_elapsed(timer.sequence_id));
            }
        }
    }
    tracing::trace!("notification timer loop finished");
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
