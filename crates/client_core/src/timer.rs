use std::{future::Future, time::Duration};

use tokio::task::JoinHandle;
use tracing::debug;

/// A deferred callback that runs at most once.
///
/// The callback is moved into the spawned task, so it cannot be invoked a
/// second time. Cancelling or dropping the timer before the delay elapses
/// aborts the task and the callback never runs.
#[derive(Debug)]
pub struct OneShotTimer {
    label: &'static str,
    handle: Option<JoinHandle<()>>,
}

impl OneShotTimer {
    pub fn schedule<F, Fut>(label: &'static str, delay: Duration, callback: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        debug!(timer = label, delay_ms = delay.as_millis() as u64, "scheduled timer");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback().await;
        });
        Self {
            label,
            handle: Some(handle),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                debug!(timer = self.label, "cancelled timer");
            }
            handle.abort();
        }
    }
}

impl Drop for OneShotTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "tests/timer_tests.rs"]
mod tests;
