//! Push-mode channel: full-snapshot subscriptions over the task store.
//!
//! # Responsibility
//! - Stream the current ordered task list to each subscribed owner,
//!   re-delivering a replacement snapshot after every mutation.
//! - Track subscription lifecycle: Disconnected -> Subscribing ->
//!   Streaming -> Disconnected.
//!
//! # Invariants
//! - Every delivery is a full list that supersedes the previous one; no
//!   incremental diffs.
//! - A delivery error ends the stream for the affected subscriber; there
//!   is no automatic reconnect.
//! - Cancellation (or dropping the handle) releases the hub entry; no
//!   live subscription outlives its consumer.

use crate::auth::session::IdentityResolver;
use crate::model::task::{Task, TaskId, TaskPatch, UserId};
use crate::repo::task_repo::TaskRepository;
use crate::service::task_service::TaskService;
use crate::sync::channel::{ChannelError, ChannelResult, TaskChannel};
use log::{info, warn};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

/// One delivered item: a full task list, or the error that ended the
/// stream.
pub type SnapshotDelivery = ChannelResult<Vec<Task>>;

/// Subscription lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    /// Not registered: never subscribed, cancelled, or ended by an error.
    Disconnected,
    /// Registered, initial snapshot not yet delivered.
    Subscribing,
    /// Initial snapshot delivered; replacement snapshots follow mutations.
    Streaming,
}

struct HubEntry {
    id: u64,
    owner: UserId,
    state: SubscriptionState,
    sender: Sender<SnapshotDelivery>,
}

/// Registry of live subscriptions, keyed by subscriber id.
#[derive(Default)]
struct SnapshotHub {
    entries: Vec<HubEntry>,
    next_id: u64,
}

impl SnapshotHub {
    fn register(&mut self, owner: UserId, sender: Sender<SnapshotDelivery>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(HubEntry {
            id,
            owner,
            state: SubscriptionState::Subscribing,
            sender,
        });
        id
    }

    fn mark_streaming(&mut self, id: u64) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) {
            entry.state = SubscriptionState::Streaming;
        }
    }

    fn remove(&mut self, id: u64) {
        self.entries.retain(|entry| entry.id != id);
    }

    /// Sends one delivery to a single entry; a gone consumer releases it.
    fn deliver_to(&mut self, id: u64, delivery: SnapshotDelivery) {
        let send_failed = match self.entries.iter().find(|entry| entry.id == id) {
            Some(entry) => entry.sender.send(delivery).is_err(),
            None => false,
        };
        if send_failed {
            self.remove(id);
        }
    }

    fn state_of(&self, id: u64) -> SubscriptionState {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.state)
            .unwrap_or(SubscriptionState::Disconnected)
    }

    /// Sends one delivery to every subscriber of `owner`.
    ///
    /// Entries whose consumer went away are released; an error delivery
    /// ends the stream for every subscriber it reaches.
    fn broadcast(&mut self, owner: &UserId, delivery: &SnapshotDelivery) -> usize {
        let mut delivered = 0;
        self.entries.retain_mut(|entry| {
            if &entry.owner != owner {
                return true;
            }
            if entry.sender.send(delivery.clone()).is_err() {
                return false;
            }
            delivered += 1;
            delivery.is_ok()
        });
        delivered
    }
}

/// Snapshot-streaming channel over the task store.
///
/// Implements the same four operations as pull mode; every successful
/// mutation additionally fans a replacement snapshot out to the mutated
/// owner's subscribers.
pub struct PushChannel<R: TaskRepository> {
    service: TaskService<R>,
    identity: Arc<dyn IdentityResolver>,
    hub: Arc<Mutex<SnapshotHub>>,
}

impl<R: TaskRepository> PushChannel<R> {
    /// Composes a push channel from an injected store and identity source.
    pub fn new(service: TaskService<R>, identity: Arc<dyn IdentityResolver>) -> Self {
        Self {
            service,
            identity,
            hub: Arc::new(Mutex::new(SnapshotHub::default())),
        }
    }

    /// Opens a subscription for the resolved caller.
    ///
    /// # Contract
    /// - Fails `Unauthorized` when no identity resolves.
    /// - On success the subscription is Streaming and its first pending
    ///   delivery is the full current ordered task list.
    /// - A failed initial load leaves nothing registered and surfaces the
    ///   error to the caller.
    pub fn subscribe(&self) -> ChannelResult<Subscription> {
        let owner = self
            .identity
            .current_identity()
            .ok_or(ChannelError::Unauthorized)?;

        let (sender, receiver) = mpsc::channel();
        let id = lock_hub(&self.hub).register(owner.clone(), sender);

        match self.service.list_tasks(Some(&owner)) {
            Ok(tasks) => {
                let mut hub = lock_hub(&self.hub);
                hub.deliver_to(id, Ok(tasks));
                hub.mark_streaming(id);
            }
            Err(err) => {
                lock_hub(&self.hub).remove(id);
                return Err(err.into());
            }
        }

        info!("event=subscribe module=sync status=ok owner={owner} subscription={id}");
        Ok(Subscription {
            id,
            receiver,
            hub: Arc::clone(&self.hub),
        })
    }

    /// Recomputes the owner's list and delivers it to their subscribers.
    ///
    /// A recomputation failure is delivered as the stream-ending error;
    /// the triggering mutation itself already succeeded.
    fn publish_snapshot(&self, owner: &UserId) {
        let delivery: SnapshotDelivery = self
            .service
            .list_tasks(Some(owner))
            .map_err(ChannelError::from);
        let failed = delivery.is_err();
        let delivered = lock_hub(&self.hub).broadcast(owner, &delivery);

        if failed {
            warn!("event=snapshot_publish module=sync status=error owner={owner} subscribers={delivered}");
        } else {
            info!("event=snapshot_publish module=sync status=ok owner={owner} subscribers={delivered}");
        }
    }
}

impl<R: TaskRepository> TaskChannel for PushChannel<R> {
    fn list_tasks(&self) -> ChannelResult<Vec<Task>> {
        let identity = self.identity.current_identity();
        Ok(self.service.list_tasks(identity.as_ref())?)
    }

    fn create_task(&self, title: &str) -> ChannelResult<Task> {
        let identity = self.identity.current_identity();
        let task = self.service.create_task(identity.as_ref(), title)?;
        self.publish_snapshot(&task.owner_id);
        Ok(task)
    }

    fn update_task(&self, task_id: TaskId, patch: &TaskPatch) -> ChannelResult<Task> {
        let identity = self.identity.current_identity();
        let task = self.service.update_task(identity.as_ref(), task_id, patch)?;
        self.publish_snapshot(&task.owner_id);
        Ok(task)
    }

    fn delete_task(&self, task_id: TaskId) -> ChannelResult<()> {
        let identity = self.identity.current_identity();
        self.service.delete_task(identity.as_ref(), task_id)?;
        // The guard only lets owners delete, so the resolved identity is
        // the owner whose subscribers must see the shrunken list.
        if let Some(owner) = identity {
            self.publish_snapshot(&owner);
        }
        Ok(())
    }
}

/// Consumer handle for one snapshot stream.
pub struct Subscription {
    id: u64,
    receiver: Receiver<SnapshotDelivery>,
    hub: Arc<Mutex<SnapshotHub>>,
}

impl Subscription {
    /// Current lifecycle state as tracked by the hub.
    pub fn state(&self) -> SubscriptionState {
        lock_hub(&self.hub).state_of(self.id)
    }

    /// Takes the next pending delivery without blocking.
    ///
    /// Deliveries arrive in order; each one fully supersedes the previous.
    pub fn try_next(&self) -> Option<SnapshotDelivery> {
        self.receiver.try_recv().ok()
    }

    /// Stops listening; no further deliveries reach this consumer.
    pub fn cancel(self) {
        // Dropping the handle releases the hub entry and the receiver.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        lock_hub(&self.hub).remove(self.id);
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

// A poisoned hub lock only means a panic elsewhere mid-broadcast; the
// entry table is still structurally sound, so recover instead of
// propagating the panic.
fn lock_hub(hub: &Arc<Mutex<SnapshotHub>>) -> MutexGuard<'_, SnapshotHub> {
    hub.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
