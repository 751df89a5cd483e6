//! Notification Bus — decouples match computation from its side effects.
//!
//! Publishers enqueue `MatchComputedEvent`s without blocking. A single worker task,
//! spawned by `start()`, drains the queue in FIFO order and hands each event to every
//! subscriber in turn. A subscriber that returns `Err` or panics is logged and skipped;
//! the worker and the other subscribers carry on.
//!
//! Lifecycle: `Stopped` (initial, events queue up) → `start()` → `Running` → `stop()`
//! → `Stopped`. `stop()` fixes a deadline of now + `drain_timeout`. The worker keeps
//! delivering until the queue is empty or the deadline passes, whichever comes first.
//! A handler still running at the deadline is aborted, and its event counts as dropped
//! together with everything still queued.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, error, info, warn};

use crate::errors::BusError;
use crate::notifications::events::MatchComputedEvent;

const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

type Event = Arc<MatchComputedEvent>;
/// `None` while running; `Some(deadline)` once `stop()` has been called.
type Shutdown = Option<Instant>;

// ────────────────────────────────────────────────────────────────────────────
// Public types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusConfig {
    /// `None` = unbounded. `Some(n)` rejects publishes once `n` events are pending.
    pub queue_capacity: Option<usize>,
    pub drain_timeout: Duration,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            queue_capacity: None,
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusState {
    Stopped,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Reacts to completed matches. Runs on the bus worker, one event at a time.
#[async_trait]
pub trait MatchSubscriber: Send + Sync {
    fn name(&self) -> &str;

    async fn on_match(&self, event: Arc<MatchComputedEvent>) -> anyhow::Result<()>;
}

/// Adapts a plain closure into a subscriber.
struct FnSubscriber<F> {
    name: String,
    handler: F,
}

#[async_trait]
impl<F> MatchSubscriber for FnSubscriber<F>
where
    F: Fn(&MatchComputedEvent) -> anyhow::Result<()> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn on_match(&self, event: Arc<MatchComputedEvent>) -> anyhow::Result<()> {
        (self.handler)(&event)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Bus
// ────────────────────────────────────────────────────────────────────────────

enum Worker {
    Idle(mpsc::UnboundedReceiver<Event>),
    Running {
        shutdown: watch::Sender<Shutdown>,
        handle: JoinHandle<mpsc::UnboundedReceiver<Event>>,
    },
    Stopping,
}

struct Channel {
    sender: mpsc::UnboundedSender<Event>,
    worker: Worker,
}

/// State shared with the worker task.
#[derive(Default)]
struct Shared {
    subscribers: RwLock<Vec<(SubscriptionId, Arc<dyn MatchSubscriber>)>>,
    queued: AtomicUsize,
    dropped: AtomicU64,
}

impl Shared {
    fn snapshot(&self) -> Vec<Arc<dyn MatchSubscriber>> {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, s)| Arc::clone(s))
            .collect()
    }
}

pub struct NotificationBus {
    config: BusConfig,
    shared: Arc<Shared>,
    channel: Mutex<Channel>,
    next_id: AtomicU64,
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(BusConfig::default())
    }
}

impl NotificationBus {
    pub fn new(config: BusConfig) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            config,
            shared: Arc::new(Shared::default()),
            channel: Mutex::new(Channel {
                sender,
                worker: Worker::Idle(receiver),
            }),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn subscribe(&self, subscriber: Arc<dyn MatchSubscriber>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        debug!(subscriber = subscriber.name(), "Subscriber registered");
        self.shared
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, subscriber));
        id
    }

    pub fn subscribe_fn<F>(&self, name: impl Into<String>, handler: F) -> SubscriptionId
    where
        F: Fn(&MatchComputedEvent) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(FnSubscriber {
            name: name.into(),
            handler,
        }))
    }

    /// Returns `false` when the id was never registered or is already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self
            .shared
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Events accepted but not yet picked up by the worker.
    pub fn queued(&self) -> usize {
        self.shared.queued.load(Ordering::SeqCst)
    }

    /// Events discarded by drain timeouts since the bus was created.
    pub fn dropped(&self) -> u64 {
        self.shared.dropped.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> BusState {
        match self.lock_channel().worker {
            Worker::Idle(_) => BusState::Stopped,
            Worker::Running { .. } | Worker::Stopping => BusState::Running,
        }
    }

    /// Enqueues an event. Never blocks and never waits on subscribers.
    pub fn publish(&self, event: MatchComputedEvent) -> Result<(), BusError> {
        self.reserve_slot()?;

        let channel = self.lock_channel();
        if channel.sender.send(Arc::new(event)).is_err() {
            self.shared.queued.fetch_sub(1, Ordering::SeqCst);
            return Err(BusError::WorkerFailed("event channel closed".to_string()));
        }
        Ok(())
    }

    /// Spawns the worker task. Must be called from within a tokio runtime.
    pub fn start(&self) -> Result<(), BusError> {
        let mut channel = self.lock_channel();
        let receiver = match std::mem::replace(&mut channel.worker, Worker::Stopping) {
            Worker::Idle(receiver) => receiver,
            other => {
                channel.worker = other;
                return Err(BusError::AlreadyRunning);
            }
        };

        let (shutdown, shutdown_rx) = watch::channel(None);
        let handle = tokio::spawn(run_worker(Arc::clone(&self.shared), receiver, shutdown_rx));
        channel.worker = Worker::Running { shutdown, handle };

        info!(
            pending = self.queued(),
            subscribers = self.subscriber_count(),
            "Notification bus started"
        );
        Ok(())
    }

    /// Stops the worker. Returns no later than `drain_timeout` after the call, plus
    /// scheduling slack, even when a handler never completes.
    pub async fn stop(&self) -> Result<(), BusError> {
        let (shutdown, handle) = {
            let mut channel = self.lock_channel();
            match std::mem::replace(&mut channel.worker, Worker::Stopping) {
                Worker::Running { shutdown, handle } => (shutdown, handle),
                other => {
                    channel.worker = other;
                    return Err(BusError::NotRunning);
                }
            }
        };

        // The worker may already have exited if every sender is gone.
        let _ = shutdown.send(Some(Instant::now() + self.config.drain_timeout));

        match handle.await {
            Ok(receiver) => {
                self.lock_channel().worker = Worker::Idle(receiver);
                info!("Notification bus stopped");
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "Notification bus worker failed; resetting queue");
                let (sender, receiver) = mpsc::unbounded_channel();
                let mut channel = self.lock_channel();
                channel.sender = sender;
                channel.worker = Worker::Idle(receiver);
                self.shared.queued.store(0, Ordering::SeqCst);
                Err(BusError::WorkerFailed(err.to_string()))
            }
        }
    }

    fn reserve_slot(&self) -> Result<(), BusError> {
        let queued = &self.shared.queued;
        match self.config.queue_capacity {
            None => {
                queued.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            Some(capacity) => queued
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                    (n < capacity).then_some(n + 1)
                })
                .map(|_| ())
                .map_err(|_| {
                    warn!(capacity, "Notification queue full; event rejected");
                    BusError::QueueFull { capacity }
                }),
        }
    }

    fn lock_channel(&self) -> MutexGuard<'_, Channel> {
        self.channel.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Worker
// ────────────────────────────────────────────────────────────────────────────

async fn run_worker(
    shared: Arc<Shared>,
    mut receiver: mpsc::UnboundedReceiver<Event>,
    mut shutdown: watch::Receiver<Shutdown>,
) -> mpsc::UnboundedReceiver<Event> {
    let mut interrupted: Option<Vec<String>> = None;

    let deadline = loop {
        let requested = *shutdown.borrow_and_update();
        if let Some(deadline) = requested {
            break deadline;
        }
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                // Bus dropped without stop(); nobody is left to deliver to.
                if changed.is_err() {
                    return receiver;
                }
            }
            next = receiver.recv() => {
                let Some(event) = next else {
                    return receiver;
                };
                shared.queued.fetch_sub(1, Ordering::SeqCst);
                if let Delivery::Interrupted(missed) = deliver(&shared, event, &mut shutdown).await {
                    interrupted = Some(missed);
                }
            }
        }
    };

    while interrupted.is_none() && Instant::now() < deadline {
        let Ok(event) = receiver.try_recv() else {
            break;
        };
        shared.queued.fetch_sub(1, Ordering::SeqCst);
        if let Delivery::Interrupted(missed) = deliver(&shared, event, &mut shutdown).await {
            interrupted = Some(missed);
        }
    }

    let mut dropped = 0u64;
    while receiver.try_recv().is_ok() {
        shared.queued.fetch_sub(1, Ordering::SeqCst);
        dropped += 1;
    }
    let missed = interrupted.unwrap_or_default();
    if !missed.is_empty() {
        dropped += 1;
    }
    if dropped > 0 {
        shared.dropped.fetch_add(dropped, Ordering::SeqCst);
        warn!(
            dropped,
            interrupted_before = ?missed,
            "Drain deadline reached; dropping undelivered events"
        );
    }

    receiver
}

enum Delivery {
    Complete,
    /// The deadline passed mid-event. Holds the subscribers that never got it.
    Interrupted(Vec<String>),
}

/// Hands one event to every subscriber in registration order. Each handler runs in
/// its own task so a panic is contained to that handler. Once a shutdown deadline is
/// set, a handler still running when it passes is aborted.
async fn deliver(
    shared: &Shared,
    event: Event,
    shutdown: &mut watch::Receiver<Shutdown>,
) -> Delivery {
    let subscribers = shared.snapshot();

    for (position, subscriber) in subscribers.iter().enumerate() {
        let handler = Arc::clone(subscriber);
        let payload = Arc::clone(&event);
        let mut task = tokio::spawn(async move { handler.on_match(payload).await });

        let outcome = loop {
            let deadline = *shutdown.borrow_and_update();
            match deadline {
                Some(deadline) => break timeout_at(deadline, &mut task).await.ok(),
                None => tokio::select! {
                    finished = &mut task => break Some(finished),
                    changed = shutdown.changed() => {
                        if changed.is_err() {
                            break Some((&mut task).await);
                        }
                    }
                },
            }
        };

        match outcome {
            Some(Ok(Ok(()))) => {}
            Some(Ok(Err(err))) => error!(
                subscriber = subscriber.name(),
                error = %err,
                "Subscriber failed to handle match event"
            ),
            Some(Err(err)) => error!(
                subscriber = subscriber.name(),
                error = %err,
                "Subscriber panicked while handling match event"
            ),
            None => {
                task.abort();
                return Delivery::Interrupted(
                    subscribers[position..]
                        .iter()
                        .map(|s| s.name().to_string())
                        .collect(),
                );
            }
        }
    }

    Delivery::Complete
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
