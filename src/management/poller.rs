use std::{
    sync::{
        Arc, Mutex, MutexGuard,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use serde::Serialize;
use tokio::sync::watch;

use crate::{
    config,
    management::RepeatingTask,
    spotify::{self, PlayerApi, SpotifyError, TokenBroker},
    types::{Credentials, Observation, PlaybackState},
    warning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PollerPhase {
    Idle,
    Polling,
    Stopped,
}

/// Keeps a live view of what is currently playing.
///
/// Every tick refreshes the access token, queries the player endpoint and
/// publishes the resulting [`PlaybackState`] to a `watch` slot. Ticks are not
/// serialized against each other. Each cycle carries a sequence number and a
/// completion only replaces the published observation if it is newer, so a
/// slow response can never overwrite fresher data.
///
/// Failed cycles are reported and leave the last published snapshot in place.
pub struct PlaybackPoller {
    inner: Arc<PollerInner>,
    period: Duration,
    timer: Mutex<Option<RepeatingTask>>,
}

struct PollerInner {
    broker: TokenBroker,
    player: PlayerApi,
    credentials: Credentials,
    phase: Mutex<PollerPhase>,
    sequence: AtomicU64,
    slot: watch::Sender<Observation>,
}

impl PlaybackPoller {
    pub fn new(
        broker: TokenBroker,
        player: PlayerApi,
        credentials: Credentials,
        period: Duration,
    ) -> Self {
        let (slot, _) = watch::channel(Observation::default());
        PlaybackPoller {
            inner: Arc::new(PollerInner {
                broker,
                player,
                credentials,
                phase: Mutex::new(PollerPhase::Idle),
                sequence: AtomicU64::new(0),
                slot,
            }),
            period,
            timer: Mutex::new(None),
        }
    }

    /// Builds a poller from the environment configuration.
    pub fn from_config() -> Result<Self, SpotifyError> {
        let client = spotify::http_client(config::request_timeout())?;
        Ok(Self::new(
            TokenBroker::from_config(client.clone()),
            PlayerApi::from_config(client),
            config::credentials(),
            config::poll_interval(),
        ))
    }

    pub fn with_interval(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn interval(&self) -> Duration {
        self.period
    }

    pub fn phase(&self) -> PollerPhase {
        self.inner.phase()
    }

    /// Starts the repeating tick. Must be called from within a tokio runtime.
    ///
    /// Only an idle poller can start; returns `false` otherwise.
    pub fn start(&self) -> bool {
        let mut phase = lock(&self.inner.phase);
        if *phase != PollerPhase::Idle {
            return false;
        }
        *phase = PollerPhase::Polling;

        let inner = Arc::clone(&self.inner);
        let task = RepeatingTask::spawn(self.period, move || Arc::clone(&inner).tick());
        *lock(&self.timer) = Some(task);
        true
    }

    /// Cancels the timer. Cycles already in flight finish their requests but
    /// can no longer publish.
    ///
    /// Returns `false` without doing anything unless the poller is polling.
    pub fn stop(&self) -> bool {
        let mut phase = lock(&self.inner.phase);
        if *phase != PollerPhase::Polling {
            return false;
        }
        *phase = PollerPhase::Stopped;

        if let Some(task) = lock(&self.timer).take() {
            task.cancel();
        }
        true
    }

    /// Runs a single cycle outside the timer.
    ///
    /// Returns whether the result was published. A stopped poller makes no
    /// requests and returns `Ok(false)`.
    pub async fn poll_once(&self) -> Result<bool, SpotifyError> {
        if self.inner.phase() == PollerPhase::Stopped {
            return Ok(false);
        }
        let sequence = self.inner.next_sequence();
        self.inner.cycle(sequence).await
    }

    pub fn subscribe(&self) -> watch::Receiver<Observation> {
        self.inner.slot.subscribe()
    }

    pub fn observation(&self) -> Observation {
        self.inner.slot.borrow().clone()
    }

    /// Latest published snapshot, if any cycle has succeeded yet.
    pub fn current(&self) -> Option<PlaybackState> {
        self.inner.slot.borrow().state.clone()
    }

    /// Publishes `state` as the result of cycle `sequence`.
    ///
    /// Refused if the poller is stopped or a newer cycle already published.
    pub fn publish(&self, sequence: u64, state: PlaybackState) -> bool {
        self.inner.publish(sequence, state)
    }
}

impl PollerInner {
    fn phase(&self) -> PollerPhase {
        *lock(&self.phase)
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn tick(self: Arc<Self>) {
        // A tick may have been spawned just before the timer was cancelled.
        if self.phase() != PollerPhase::Polling {
            return;
        }

        let sequence = self.next_sequence();
        if let Err(e) = self.cycle(sequence).await {
            warning!("Poll cycle {} failed, keeping last snapshot. Err: {}", sequence, e);
        }
    }

    async fn cycle(&self, sequence: u64) -> Result<bool, SpotifyError> {
        let token = self.broker.refresh(&self.credentials).await?;
        let state = self.player.currently_playing(&token).await?;
        Ok(self.publish(sequence, state))
    }

    fn publish(&self, sequence: u64, state: PlaybackState) -> bool {
        self.slot.send_if_modified(|current| {
            if self.phase() == PollerPhase::Stopped || sequence <= current.sequence {
                return false;
            }
            current.sequence = sequence;
            current.state = Some(state);
            true
        })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
