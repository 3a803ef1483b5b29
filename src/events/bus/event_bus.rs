// src/events/bus/event_bus.rs
//
// In-process notification bus.
//
// DESIGN PRINCIPLES:
// 1. Two channels - operation events and toast events never share subscribers
// 2. Per-subscriber FIFO - each subscriber owns a queue and a worker task
// 3. Isolated - a failing, panicking or hung subscriber only affects itself
// 4. Non-blocking publish - hand-off never waits on a subscriber and never drops
// 5. Observable - every publish is logged

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::cancellation::CancellationSignal;
use crate::config::BusSettings;
use crate::error::{AppError, AppResult};
use crate::events::publisher::{AppOperationEventPublisher, AppToastEventPublisher};
use crate::events::types::{AppEvent, AppOperationEvent, AppToastEvent};

type HandlerFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

/// Type-erased async subscriber
type EventHandler<E> = Arc<dyn Fn(E) -> HandlerFuture + Send + Sync>;

/// Publishes kept in the in-memory log
const EVENT_LOG_CAPACITY: usize = 256;

/// Which of the two independent channels a subscription belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Operation,
    Toast,
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelKind::Operation => write!(f, "operation"),
            ChannelKind::Toast => write!(f, "toast"),
        }
    }
}

/// Handle returned by `subscribe_*`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    channel: ChannelKind,
    id: u64,
}

impl Subscription {
    pub fn channel(&self) -> ChannelKind {
        self.channel
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// A logged publish for debugging and tracing
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub channel: ChannelKind,
    pub event_type: String,
    pub occurred_at: String,
    /// Subscribers registered when the publish started
    pub subscriber_count: usize,
    /// Subscribers whose queue accepted the event
    pub delivered: usize,
}

struct SubscriberSlot<E> {
    id: u64,
    sender: mpsc::UnboundedSender<E>,
    /// Events queued or in flight for this subscriber
    pending: Arc<AtomicUsize>,
    worker: JoinHandle<()>,
}

struct Target<E> {
    id: u64,
    sender: mpsc::UnboundedSender<E>,
    pending: Arc<AtomicUsize>,
}

struct DispatchReport {
    subscriber_count: usize,
    delivered: usize,
}

/// Aborts the wrapped task when dropped, including when the owning worker
/// is itself aborted.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// One channel: its subscriber registry and dispatch step
struct Channel<E> {
    kind: ChannelKind,
    subscribers: RwLock<Vec<SubscriberSlot<E>>>,
    settings: BusSettings,
}

impl<E: AppEvent> Channel<E> {
    fn new(kind: ChannelKind, settings: BusSettings) -> Self {
        Self {
            kind,
            subscribers: RwLock::new(Vec::new()),
            settings,
        }
    }

    fn subscribe(&self, id: u64, handler: EventHandler<E>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let pending = Arc::new(AtomicUsize::new(0));
        let worker = tokio::spawn(run_subscriber(
            SubscriberContext {
                kind: self.kind,
                id,
                pending: Arc::clone(&pending),
                handler_timeout: self.settings.handler_timeout,
            },
            handler,
            receiver,
        ));

        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SubscriberSlot {
                id,
                sender,
                pending,
                worker,
            });

        log::debug!("{} subscriber {} registered", self.kind, id);
    }

    /// Dropping the sender lets the worker drain its queue and stop.
    fn unsubscribe(&self, id: u64) -> bool {
        let mut subscribers = self
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        match subscribers.iter().position(|slot| slot.id == id) {
            Some(index) => {
                subscribers.remove(index);
                log::debug!("{} subscriber {} removed", self.kind, id);
                true
            }
            None => false,
        }
    }

    fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Snapshot of current senders; the lock is never held across an await.
    fn targets(&self) -> Vec<Target<E>> {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|slot| Target {
                id: slot.id,
                sender: slot.sender.clone(),
                pending: Arc::clone(&slot.pending),
            })
            .collect()
    }

    /// Hands the event to every subscriber registered right now. Never waits
    /// on a subscriber; cancellation is observed between hand-offs.
    fn dispatch(&self, event: &E, cancel: &CancellationSignal) -> AppResult<DispatchReport> {
        cancel.check()?;

        let targets = self.targets();
        let subscriber_count = targets.len();
        let mut delivered = 0;

        for target in targets {
            if cancel.is_cancelled() {
                log::debug!(
                    "{} publish of {} cancelled after {} of {} subscribers",
                    self.kind,
                    event.event_type(),
                    delivered,
                    subscriber_count
                );
                return Err(AppError::Cancelled);
            }

            // counted before the send so the worker never sees zero while busy
            let backlog = target.pending.fetch_add(1, Ordering::SeqCst) + 1;
            if target.sender.send(event.clone()).is_err() {
                target.pending.fetch_sub(1, Ordering::SeqCst);
                log::debug!("{} subscriber {} already stopped; skipped", self.kind, target.id);
                continue;
            }

            delivered += 1;
            if backlog == self.settings.backlog_warning {
                log::warn!(
                    "{} subscriber {} is falling behind: {} events pending",
                    self.kind,
                    target.id,
                    backlog
                );
            }
        }

        Ok(DispatchReport {
            subscriber_count,
            delivered,
        })
    }

    fn take_workers(&self) -> Vec<JoinHandle<()>> {
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .map(|slot| slot.worker)
            .collect()
    }
}

struct SubscriberContext {
    kind: ChannelKind,
    id: u64,
    pending: Arc<AtomicUsize>,
    handler_timeout: Duration,
}

/// Worker loop for one subscriber. Each event is handled in its own task so
/// a panic is caught at the join boundary and the loop keeps going. A call
/// running past `handler_timeout` is aborted and the next event is taken.
async fn run_subscriber<E: AppEvent>(
    ctx: SubscriberContext,
    handler: EventHandler<E>,
    mut receiver: mpsc::UnboundedReceiver<E>,
) {
    let SubscriberContext {
        kind,
        id,
        pending,
        handler_timeout,
    } = ctx;

    while let Some(event) = receiver.recv().await {
        let event_type = event.event_type();
        let handler = Arc::clone(&handler);
        let mut call = AbortOnDrop(tokio::spawn(async move { handler(event).await }));

        match tokio::time::timeout(handler_timeout, &mut call.0).await {
            Ok(Ok(Ok(()))) => {}
            Ok(Ok(Err(e))) => {
                log::warn!("{} subscriber {} failed on {}: {:#}", kind, id, event_type, e);
            }
            Ok(Err(e)) if e.is_panic() => {
                log::warn!("{} subscriber {} panicked on {}", kind, id, event_type);
            }
            Ok(Err(e)) => {
                log::warn!("{} subscriber {} aborted on {}: {}", kind, id, event_type, e);
            }
            Err(_) => {
                log::warn!(
                    "{} subscriber {} did not finish {} within {:?}; abandoned",
                    kind,
                    id,
                    event_type,
                    handler_timeout
                );
            }
        }

        drop(call);
        pending.fetch_sub(1, Ordering::SeqCst);
    }

    log::debug!("{} subscriber {} stopped", kind, id);
}

fn erase<E, F, Fut>(handler: F) -> EventHandler<E>
where
    E: AppEvent,
    F: Fn(E) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(move |event: E| Box::pin(handler(event)) as HandlerFuture)
}

/// The Notification Bus
///
/// Operations publish through `AppOperationEventPublisher` /
/// `AppToastEventPublisher`; UI-facing collaborators subscribe here.
///
/// Key characteristics:
/// - Async hand-off; publish returns once every queue accepted the event
/// - At-least-once per subscriber registered at publish time, no replay
/// - Subscription and publish may run concurrently
///
/// `subscribe_*` spawn worker tasks and must run inside a Tokio runtime.
pub struct EventBus {
    operations: Arc<Channel<AppOperationEvent>>,
    toasts: Arc<Channel<AppToastEvent>>,
    next_id: Arc<AtomicU64>,
    event_log: Arc<RwLock<VecDeque<EventLogEntry>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_settings(BusSettings::default())
    }

    pub fn with_settings(settings: BusSettings) -> Self {
        Self {
            operations: Arc::new(Channel::new(ChannelKind::Operation, settings.clone())),
            toasts: Arc::new(Channel::new(ChannelKind::Toast, settings)),
            next_id: Arc::new(AtomicU64::new(1)),
            event_log: Arc::new(RwLock::new(VecDeque::new())),
        }
    }

    /// Subscribe to operation-lifecycle events
    ///
    /// The handler sees events in publish order. Errors it returns are logged
    /// and discarded.
    ///
    /// Example:
    /// ```ignore
    /// bus.subscribe_operations(|event| async move {
    ///     println!("{}: {}", event.action, event.message);
    ///     Ok(())
    /// });
    /// ```
    pub fn subscribe_operations<F, Fut>(&self, handler: F) -> Subscription
    where
        F: Fn(AppOperationEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.operations.subscribe(id, erase(handler));
        Subscription {
            channel: ChannelKind::Operation,
            id,
        }
    }

    /// Subscribe to toast events
    pub fn subscribe_toasts<F, Fut>(&self, handler: F) -> Subscription
    where
        F: Fn(AppToastEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.toasts.subscribe(id, erase(handler));
        Subscription {
            channel: ChannelKind::Toast,
            id,
        }
    }

    /// Stops future deliveries. Events already queued for the subscriber are
    /// still handled. Returns false if the subscription was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        match subscription.channel {
            ChannelKind::Operation => self.operations.unsubscribe(subscription.id),
            ChannelKind::Toast => self.toasts.unsubscribe(subscription.id),
        }
    }

    pub fn operation_subscriber_count(&self) -> usize {
        self.operations.subscriber_count()
    }

    pub fn toast_subscriber_count(&self) -> usize {
        self.toasts.subscriber_count()
    }

    /// Get the event log (for debugging), oldest first
    pub fn get_event_log(&self) -> Vec<EventLogEntry> {
        self.event_log
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Clear the event log
    pub fn clear_event_log(&self) {
        self.event_log
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Removes every subscriber and waits for their queues to drain.
    ///
    /// Workers still running after `drain_timeout` are aborted together with
    /// the handler call they are waiting on.
    pub async fn shutdown(&self, drain_timeout: Duration) {
        let mut workers = self.operations.take_workers();
        workers.extend(self.toasts.take_workers());

        log::info!("Shutting down event bus ({} subscribers)", workers.len());

        let deadline = Instant::now() + drain_timeout;
        for mut worker in workers {
            if tokio::time::timeout_at(deadline, &mut worker).await.is_err() {
                log::warn!("Event bus subscriber did not drain in {:?}; aborting", drain_timeout);
                worker.abort();
            }
        }
    }

    fn record<E: AppEvent>(&self, channel: ChannelKind, event: &E, report: &DispatchReport) {
        let entry = EventLogEntry {
            channel,
            event_type: event.event_type().to_string(),
            occurred_at: event.occurred_at().to_rfc3339(),
            subscriber_count: report.subscriber_count,
            delivered: report.delivered,
        };

        log::debug!(
            "[EVENT] {} on {} | {}/{} subscribers",
            entry.event_type,
            channel,
            entry.delivered,
            entry.subscriber_count
        );

        let mut log = self
            .event_log
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if log.len() == EVENT_LOG_CAPACITY {
            log.pop_front();
        }
        log.push_back(entry);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

// Make EventBus cloneable (shared reference)
impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            operations: Arc::clone(&self.operations),
            toasts: Arc::clone(&self.toasts),
            next_id: Arc::clone(&self.next_id),
            event_log: Arc::clone(&self.event_log),
        }
    }
}

#[async_trait]
impl AppOperationEventPublisher for EventBus {
    async fn publish_operation(
        &self,
        event: AppOperationEvent,
        cancel: &CancellationSignal,
    ) -> AppResult<()> {
        let report = self.operations.dispatch(&event, cancel)?;
        self.record(ChannelKind::Operation, &event, &report);
        Ok(())
    }
}

#[async_trait]
impl AppToastEventPublisher for EventBus {
    async fn publish_toast(&self, event: AppToastEvent, cancel: &CancellationSignal) -> AppResult<()> {
        let report = self.toasts.dispatch(&event, cancel)?;
        self.record(ChannelKind::Toast, &event, &report);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancellation::CancellationSource;
    use std::sync::atomic::AtomicBool;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

    const WAIT: Duration = Duration::from_secs(2);

    fn recording_handler<E: AppEvent>(
        tx: UnboundedSender<E>,
    ) -> impl Fn(E) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>> + Send + Sync + 'static
    {
        move |event| {
            let tx = tx.clone();
            Box::pin(async move {
                tx.send(event).ok();
                Ok(())
            })
        }
    }

    async fn next<E>(rx: &mut UnboundedReceiver<E>) -> E {
        tokio::time::timeout(WAIT, rx.recv())
            .await
            .expect("timed out waiting for event")
            .expect("channel closed")
    }

    async fn failing(_: AppOperationEvent) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("renderer offline"))
    }

    async fn panicking(_: AppOperationEvent) -> anyhow::Result<()> {
        panic!("Intentional panic")
    }

    async fn ignore(_: AppOperationEvent) -> anyhow::Result<()> {
        Ok(())
    }

    fn op(action: &str) -> AppOperationEvent {
        AppOperationEvent::succeeded("station", action, format!("{} done", action))
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_noop() {
        let bus = EventBus::new();

        bus.publish_operation(op("refresh"), &CancellationSignal::none())
            .await
            .unwrap();
        bus.publish_toast(AppToastEvent::success("ok"), &CancellationSignal::none())
            .await
            .unwrap();

        let log = bus.get_event_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].subscriber_count, 0);
        assert_eq!(log[1].channel, ChannelKind::Toast);
    }

    #[tokio::test]
    async fn test_events_arrive_in_publish_order() {
        let bus = EventBus::new();
        let (tx, mut rx) = unbounded_channel();
        bus.subscribe_operations(recording_handler(tx));

        for i in 0..20 {
            bus.publish_operation(op(&format!("step-{}", i)), &CancellationSignal::none())
                .await
                .unwrap();
        }

        for i in 0..20 {
            assert_eq!(next(&mut rx).await.action, format!("step-{}", i));
        }
    }

    #[tokio::test]
    async fn test_failing_subscriber_does_not_block_others() {
        let bus = EventBus::new();

        bus.subscribe_operations(failing);
        bus.subscribe_operations(panicking);

        let (tx, mut rx) = unbounded_channel();
        bus.subscribe_operations(recording_handler(tx));

        bus.publish_operation(op("first"), &CancellationSignal::none())
            .await
            .unwrap();
        bus.publish_operation(op("second"), &CancellationSignal::none())
            .await
            .unwrap();

        assert_eq!(next(&mut rx).await.action, "first");
        assert_eq!(next(&mut rx).await.action, "second");
    }

    #[tokio::test]
    async fn test_channels_are_independent() {
        let bus = EventBus::new();
        let (op_tx, mut op_rx) = unbounded_channel();
        let (toast_tx, mut toast_rx) = unbounded_channel();
        bus.subscribe_operations(recording_handler(op_tx));
        bus.subscribe_toasts(recording_handler(toast_tx));

        bus.publish_toast(AppToastEvent::failure("disk full"), &CancellationSignal::none())
            .await
            .unwrap();
        bus.publish_operation(op("refresh"), &CancellationSignal::none())
            .await
            .unwrap();

        assert_eq!(next(&mut toast_rx).await.message, "disk full");
        assert_eq!(next(&mut op_rx).await.action, "refresh");

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(toast_rx.try_recv().is_err());
        assert!(op_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_late_subscriber_gets_no_replay() {
        let bus = EventBus::new();
        bus.publish_operation(op("before"), &CancellationSignal::none())
            .await
            .unwrap();

        let (tx, mut rx) = unbounded_channel();
        bus.subscribe_operations(recording_handler(tx));
        bus.publish_operation(op("after"), &CancellationSignal::none())
            .await
            .unwrap();

        assert_eq!(next(&mut rx).await.action, "after");
    }

    #[tokio::test]
    async fn test_cancelled_publish_delivers_nothing() {
        let bus = EventBus::new();
        let (tx, mut rx) = unbounded_channel();
        bus.subscribe_operations(recording_handler(tx));

        let source = CancellationSource::new();
        source.cancel();

        let result = bus.publish_operation(op("refresh"), &source.signal()).await;
        assert!(matches!(result, Err(AppError::Cancelled)));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_err());
        assert!(bus.get_event_log().is_empty());
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let (tx, mut rx) = unbounded_channel();
        let subscription = bus.subscribe_toasts(recording_handler(tx));
        assert_eq!(bus.toast_subscriber_count(), 1);

        assert!(bus.unsubscribe(subscription));
        assert!(!bus.unsubscribe(subscription));
        assert_eq!(bus.toast_subscriber_count(), 0);

        bus.publish_toast(AppToastEvent::success("ignored"), &CancellationSignal::none())
            .await
            .unwrap();

        let closed = tokio::time::timeout(WAIT, rx.recv()).await.unwrap();
        assert!(closed.is_none(), "worker should stop once unsubscribed");
    }

    #[tokio::test]
    async fn test_hung_subscriber_does_not_hold_up_others() {
        let bus = EventBus::with_settings(BusSettings {
            backlog_warning: 1,
            handler_timeout: Duration::from_millis(30),
        });

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        bus.subscribe_operations(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            std::future::pending::<anyhow::Result<()>>()
        });
        let (tx, mut rx) = unbounded_channel();
        bus.subscribe_operations(recording_handler(tx));

        let started = Instant::now();
        for i in 0..4 {
            bus.publish_operation(op(&format!("n{}", i)), &CancellationSignal::none())
                .await
                .unwrap();
        }
        assert!(started.elapsed() < Duration::from_secs(1));

        for i in 0..4 {
            assert_eq!(next(&mut rx).await.action, format!("n{}", i));
        }

        let log = bus.get_event_log();
        assert_eq!(log.last().unwrap().subscriber_count, 2);
        assert_eq!(log.last().unwrap().delivered, 2);

        // each stuck call is abandoned after the handler timeout
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_slow_subscriber_receives_every_event() {
        let bus = EventBus::with_settings(BusSettings {
            backlog_warning: 1,
            handler_timeout: Duration::from_secs(5),
        });

        let handled = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&handled);
        bus.subscribe_operations(move |_| {
            let counter = Arc::clone(&counter);
            async move {
                tokio::time::sleep(Duration::from_millis(60)).await;
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<(), anyhow::Error>(())
            }
        });

        let started = Instant::now();
        for i in 0..6 {
            bus.publish_operation(op(&format!("s{}", i)), &CancellationSignal::none())
                .await
                .unwrap();
        }
        assert!(started.elapsed() < Duration::from_millis(60));
        assert!(bus.get_event_log().iter().all(|entry| entry.delivered == 1));

        bus.shutdown(Duration::from_secs(5)).await;
        assert_eq!(handled.load(Ordering::SeqCst), 6);
    }

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_shutdown_aborts_running_handler() {
        let bus = EventBus::with_settings(BusSettings {
            backlog_warning: 64,
            handler_timeout: Duration::from_secs(60),
        });

        let dropped = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&dropped);
        bus.subscribe_toasts(move |_| {
            let guard = DropFlag(Arc::clone(&flag));
            async move {
                let _guard = guard;
                std::future::pending::<()>().await;
                Ok::<(), anyhow::Error>(())
            }
        });

        bus.publish_toast(AppToastEvent::success("stuck"), &CancellationSignal::none())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!dropped.load(Ordering::SeqCst));

        bus.shutdown(Duration::from_millis(50)).await;
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_subscribe_while_publishing() {
        let bus = EventBus::new();
        let publisher = bus.clone();

        let publishing = tokio::spawn(async move {
            for i in 0..50 {
                publisher
                    .publish_operation(op(&format!("p{}", i)), &CancellationSignal::none())
                    .await
                    .unwrap();
                tokio::task::yield_now().await;
            }
        });

        for _ in 0..10 {
            bus.subscribe_operations(ignore);
            tokio::task::yield_now().await;
        }

        publishing.await.unwrap();
        assert_eq!(bus.operation_subscriber_count(), 10);
        assert_eq!(bus.get_event_log().len(), 50);
    }

    #[tokio::test]
    async fn test_shutdown_drains_queued_events() {
        let bus = EventBus::new();
        let handled = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&handled);
        bus.subscribe_toasts(move |_| {
            let counter = Arc::clone(&counter);
            async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<(), anyhow::Error>(())
            }
        });

        for i in 0..5 {
            bus.publish_toast(AppToastEvent::success(format!("t{}", i)), &CancellationSignal::none())
                .await
                .unwrap();
        }

        bus.shutdown(WAIT).await;

        assert_eq!(handled.load(Ordering::SeqCst), 5);
        assert_eq!(bus.toast_subscriber_count(), 0);
    }
}
