//! # Scheduled Actions
//!
//! A delayed `Action` delivered to the event loop's channel. Used for the
//! startup delay. The task is aborted when the handle is cancelled or dropped,
//! so nothing is delivered after the owner has gone away.

use log::{debug, warn};
use std::sync::mpsc;
use std::time::Duration;

use tokio::task::AbortHandle;

use crate::core::action::Action;

pub struct ScheduledAction {
    handle: AbortHandle,
}

impl ScheduledAction {
    /// Sends `action` on `tx` once `delay` has elapsed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(delay: Duration, action: Action, tx: mpsc::Sender<Action>) -> Self {
        debug!("Scheduling {:?} in {}ms", action, delay.as_millis());
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(action).is_err() {
                warn!("Failed to deliver scheduled action: receiver dropped");
            }
        });
        Self {
            handle: task.abort_handle(),
        }
    }

    /// Cancels the pending action. No-op if it already fired.
    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            debug!("Cancelling scheduled action");
        }
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledAction {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
