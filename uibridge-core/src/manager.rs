use serde_json::Value;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::SystemTime;
use tokio::sync::oneshot;

use crate::command::{self, AdjacentPosition, Command, NodeId};
use crate::queue::{Append, BatchQueue};
use crate::{
    no_op_observer, Batch, Blob, BridgeConfig, BridgeError, BridgeResult, ConfigError,
    FrameScheduler, HostTransport, Observation, ObserverFn,
};

struct Shared {
    queue: Mutex<BatchQueue>,
    // Held for the whole take-and-send of a flush and for direct calls, so
    // payloads reach the host in the order their commands were appended.
    send_gate: Mutex<()>,
    transport: Arc<dyn HostTransport>,
    scheduler: Arc<dyn FrameScheduler>,
    observer: ObserverFn,
}

/// Dispatcher for UI mutations bound for a host renderer.
///
/// Mutations are appended to a [`BatchQueue`] and shipped as one `batchUpdate` on
/// the next scheduled frame. Direct calls ([`UiManager::method`],
/// [`UiManager::to_blob`]) force the pending batch out first so the host sees
/// every earlier mutation before handling them.
///
/// Cloning is cheap and every clone drives the same queue. Observers run
/// synchronously and must not call back into the manager.
#[derive(Clone)]
pub struct UiManager {
    shared: Arc<Shared>,
}

impl UiManager {
    /// Build a manager, rejecting configs that fail [`BridgeConfig::validate`].
    pub fn new(
        transport: Arc<dyn HostTransport>,
        scheduler: Arc<dyn FrameScheduler>,
        config: &BridgeConfig,
        observer: ObserverFn,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(transport, scheduler, config, observer))
    }

    /// Default config, no observer.
    pub fn with_defaults(
        transport: Arc<dyn HostTransport>,
        scheduler: Arc<dyn FrameScheduler>,
    ) -> Self {
        Self::build(transport, scheduler, &BridgeConfig::default(), no_op_observer())
    }

    fn build(
        transport: Arc<dyn HostTransport>,
        scheduler: Arc<dyn FrameScheduler>,
        config: &BridgeConfig,
        observer: ObserverFn,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                queue: Mutex::new(BatchQueue::with_capacity(config.initial_capacity)),
                send_gate: Mutex::new(()),
                transport,
                scheduler,
                observer,
            }),
        }
    }

    // Queue state is consistent at every unlock, so a poisoned lock is still usable.
    fn queue(&self) -> MutexGuard<'_, BatchQueue> {
        self.shared
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn gate(&self) -> MutexGuard<'_, ()> {
        self.shared
            .send_gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn observe(&self, observation: Observation<'_>) {
        (self.shared.observer)(&observation);
    }

    /// Queue `cmd` and make sure exactly one flush is scheduled for it.
    pub fn append(&self, cmd: Command) {
        self.enqueue(cmd, true);
    }

    /// Queue `cmd` without requesting a frame; it rides along with whatever
    /// flush happens next.
    pub fn append_deferred(&self, cmd: Command) {
        self.enqueue(cmd, false);
    }

    fn enqueue(&self, cmd: Command, request_update: bool) {
        let outcome = {
            let mut queue = self.queue();
            if queue.is_disposed() {
                tracing::trace!(
                    target: "uibridge::queue",
                    opcode = cmd.opcode(),
                    "bridge disposed; dropping command"
                );
                return;
            }
            self.observe(Observation::Enqueued {
                ts: SystemTime::now(),
                data: &cmd,
            });
            queue.push(cmd, request_update)
        };

        if let Append::ScheduleFlush(epoch) = outcome {
            // Outside the queue lock: a scheduler may run the callback inline.
            let shared = Arc::downgrade(&self.shared);
            self.shared
                .scheduler
                .schedule_batch_flush(Box::new(move || Self::scheduled_flush(shared, epoch)));
        }
    }

    fn scheduled_flush(shared: Weak<Shared>, epoch: u64) {
        let Some(shared) = shared.upgrade() else {
            return;
        };
        let manager = UiManager { shared };
        let gate = manager.gate();
        let batch = {
            let mut queue = manager.queue();
            if !queue.is_current(epoch) {
                tracing::trace!(
                    target: "uibridge::flush",
                    epoch,
                    "stale frame callback; batch already flushed"
                );
                return;
            }
            queue.take()
        };
        manager.deliver(batch, &gate);
    }

    /// Send everything queued as one batch, then leave the queue empty.
    ///
    /// Transport and serialization failures are logged and swallowed; the batch
    /// is lost either way and is never resent.
    pub fn flush(&self) {
        let gate = self.gate();
        let batch = self.queue().take();
        self.deliver(batch, &gate);
    }

    /// Flush right now, bypassing the scheduler, if anything is waiting.
    /// The frame callback already scheduled for it becomes a no-op.
    pub fn force_flush(&self) {
        let gate = self.gate();
        self.force_flush_gated(&gate);
    }

    fn force_flush_gated(&self, gate: &MutexGuard<'_, ()>) {
        let batch = {
            let mut queue = self.queue();
            if !queue.is_flush_pending() && queue.is_empty() {
                return;
            }
            queue.take()
        };
        self.deliver(batch, gate);
    }

    fn deliver(&self, batch: Batch, _gate: &MutexGuard<'_, ()>) {
        if batch.is_empty() {
            return;
        }
        let commands = batch.len();
        let outcome = batch
            .to_payload()
            .map_err(BridgeError::from)
            .and_then(|payload| self.shared.transport.send(&payload).map_err(BridgeError::from));

        match outcome {
            Ok(_) => self.observe(Observation::Flushed {
                ts: SystemTime::now(),
                commands,
            }),
            Err(error) => {
                tracing::error!(
                    target: "uibridge::flush",
                    commands,
                    %error,
                    "batch update failed; batch dropped"
                );
                self.observe(Observation::FlushFailed {
                    ts: SystemTime::now(),
                    commands,
                    error: &error,
                });
            }
        }
    }

    /// Invoke `name` on host node `id` and return the host's raw reply.
    ///
    /// Pending mutations are flushed first. Unlike batched sends, failures reach
    /// the caller.
    pub fn method(
        &self,
        id: impl Into<NodeId>,
        name: impl Into<String>,
        params: Vec<Value>,
    ) -> BridgeResult<String> {
        let cmd = command::method(id, name, params);
        let gate = self.gate();
        if self.is_disposed() {
            return Err(BridgeError::Disposed);
        }
        self.force_flush_gated(&gate);

        let payload = cmd.to_payload()?;
        self.observe(Observation::Direct {
            ts: SystemTime::now(),
            data: &cmd,
        });
        let reply = self.shared.transport.send(&payload)?;
        Ok(reply)
    }

    /// Snapshot host node `node_id` at `device_pixel_ratio` after flushing pending
    /// mutations.
    ///
    /// Resolves once the host invokes the capture callback. There is no timeout;
    /// dropping the future abandons the result.
    pub async fn to_blob(
        &self,
        node_id: impl Into<NodeId>,
        device_pixel_ratio: f64,
    ) -> BridgeResult<Blob> {
        let node = node_id.into();
        let rx = {
            let gate = self.gate();
            if self.is_disposed() {
                return Err(BridgeError::Disposed);
            }
            self.force_flush_gated(&gate);

            let (tx, rx) = oneshot::channel();
            self.observe(Observation::Capture {
                ts: SystemTime::now(),
                node,
                scale: device_pixel_ratio,
            });
            self.shared.transport.capture_to_image(
                node,
                device_pixel_ratio,
                Box::new(move |result| {
                    let _ = tx.send(result);
                }),
            );
            rx
        };

        match rx.await {
            Ok(Ok(bytes)) => Ok(Blob::new(bytes)),
            Ok(Err(message)) => Err(BridgeError::Capture(message)),
            Err(_) => Err(BridgeError::CaptureDropped),
        }
    }

    /// Tear the bridge down. Pending commands are discarded, later appends are
    /// dropped and direct calls fail with [`BridgeError::Disposed`].
    pub fn dispose(&self) {
        let dropped = self.queue().dispose();
        tracing::debug!(target: "uibridge::queue", dropped, "bridge disposed");
    }

    pub fn pending_len(&self) -> usize {
        self.queue().len()
    }

    pub fn is_flush_pending(&self) -> bool {
        self.queue().is_flush_pending()
    }

    pub fn is_disposed(&self) -> bool {
        self.queue().is_disposed()
    }

    pub fn create_element(&self, id: impl Into<NodeId>, tag: impl Into<String>) {
        self.append(command::create_element(id, tag));
    }

    pub fn create_text_node(&self, id: impl Into<NodeId>, data: impl Into<String>) {
        self.append(command::create_text_node(id, data));
    }

    pub fn create_comment(&self, id: impl Into<NodeId>, data: impl Into<String>) {
        self.append(command::create_comment(id, data));
    }

    pub fn insert_adjacent_node(
        &self,
        parent: impl Into<NodeId>,
        position: AdjacentPosition,
        node: impl Into<NodeId>,
    ) {
        self.append(command::insert_adjacent_node(parent, position, node));
    }

    pub fn remove_node(&self, id: impl Into<NodeId>) {
        self.append(command::remove_node(id));
    }

    pub fn set_property(
        &self,
        id: impl Into<NodeId>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) {
        self.append(command::set_property(id, key, value));
    }

    pub fn remove_property(&self, id: impl Into<NodeId>, key: impl Into<String>) {
        self.append(command::remove_property(id, key));
    }

    pub fn set_style(
        &self,
        id: impl Into<NodeId>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.append(command::set_style(id, key, value));
    }

    pub fn add_event(&self, id: impl Into<NodeId>, event: impl Into<String>) {
        self.append(command::add_event(id, event));
    }

    pub fn remove_event(&self, id: impl Into<NodeId>, event: impl Into<String>) {
        self.append(command::remove_event(id, event));
    }
}

impl fmt::Debug for UiManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queue = self.queue();
        f.debug_struct("UiManager")
            .field("pending", &queue.len())
            .field("flush_pending", &queue.is_flush_pending())
            .field("disposed", &queue.is_disposed())
            .finish()
    }
}
