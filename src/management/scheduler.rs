use std::{future::Future, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

/// A cancellable repeating task.
///
/// Every `period` the tick closure is called and the future it returns is
/// spawned as its own task, so a slow tick never delays the next one. The
/// first tick fires one full period after [`RepeatingTask::spawn`].
///
/// Cancelling stops further ticks but leaves already spawned tick futures
/// running to completion.
pub struct RepeatingTask {
    handle: JoinHandle<()>,
}

impl RepeatingTask {
    /// Must be called from within a tokio runtime.
    pub fn spawn<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tokio::spawn(tick());
            }
        });

        RepeatingTask { handle }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
