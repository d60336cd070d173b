/*
[INPUT]:  Operation failures and a dismiss delay
[OUTPUT]: User-facing error messages and a single restartable dismiss timer
[POS]:    Store layer - transient error notification
[UPDATE]: When error kinds or dismiss behavior change
*/

use std::fmt;
use std::sync::{Mutex as StdMutex, PoisonError};
use std::time::Duration;

use tokio::task::AbortHandle;

/// Default time an error stays visible
pub const DEFAULT_ERROR_DISMISS: Duration = Duration::from_millis(3000);

/// The coarse errors a user can see; transport detail never reaches the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMessage {
    Load,
    Empty,
    Add,
    Delete,
    Update,
}

impl ErrorMessage {
    pub fn text(self) -> &'static str {
        match self {
            ErrorMessage::Load => "Unable to load todos",
            ErrorMessage::Empty => "Title should not be empty",
            ErrorMessage::Add => "Unable to add a todo",
            ErrorMessage::Delete => "Unable to delete a todo",
            ErrorMessage::Update => "Unable to update a todo",
        }
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// At most one live timer; restarting aborts the previous one
#[derive(Debug)]
pub(crate) struct DismissTimer {
    ttl: Duration,
    current: StdMutex<Option<AbortHandle>>,
}

impl DismissTimer {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            current: StdMutex::new(None),
        }
    }

    /// Run `on_expiry` after the delay unless restarted or cancelled first.
    ///
    /// Must be called from inside a tokio runtime.
    pub(crate) fn restart<F>(&self, on_expiry: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let ttl = self.ttl;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            on_expiry();
        });
        let previous = self.slot().replace(handle.abort_handle());
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    pub(crate) fn cancel(&self) {
        if let Some(previous) = self.slot().take() {
            previous.abort();
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<AbortHandle>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for DismissTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
