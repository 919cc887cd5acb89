/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::task::TaskTracker;
use tracing::{instrument, trace};

use crate::common::config::CONFIG;
use crate::common::{Lifecycle, LifecycleCell, SinkId};
use crate::message::{Delivery, Outbox, PostError};
use crate::traits::Sink;

/// State shared by every clone of one actor's handle and by the actor task itself.
#[derive(Debug)]
pub(crate) struct HandleState {
    id: SinkId,
    name: String,
    closing: AtomicBool,
    lifecycle: LifecycleCell,
}

/// Cloneable reference to a running (or not yet started) actor.
///
/// A handle is the producer side of the actor's mailbox: any number of clones
/// may `send` concurrently from any thread or task. It is also how callers
/// shut the actor down (`close`) and wait for it (`join`).
///
/// Once every handle obtained from `start` (and every clone of one) has been
/// dropped, the actor handles what is already queued and stops.
pub struct ActorHandle<M> {
    state: Arc<HandleState>,
    outbox: Outbox<M>,
    tracker: TaskTracker,
}

impl<M> Clone for ActorHandle<M> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            outbox: self.outbox.clone(),
            tracker: self.tracker.clone(),
        }
    }
}

impl<M> Debug for ActorHandle<M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorHandle")
            .field("id", &self.state.id)
            .field("name", &self.state.name)
            .field("lifecycle", &self.lifecycle())
            .finish_non_exhaustive()
    }
}

impl<M> PartialEq for ActorHandle<M> {
    fn eq(&self, other: &Self) -> bool {
        self.state.id == other.state.id
    }
}

impl<M> Eq for ActorHandle<M> {}

impl<M> Hash for ActorHandle<M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.state.id.hash(state);
    }
}

impl<M> ActorHandle<M> {
    pub(crate) fn new(name: String, outbox: Outbox<M>, tracker: TaskTracker) -> Self {
        Self {
            state: Arc::new(HandleState {
                id: SinkId::next(),
                name,
                closing: AtomicBool::new(false),
                lifecycle: LifecycleCell::new(),
            }),
            outbox,
            tracker,
        }
    }

    /// The actor's identity; shared by every clone of this handle.
    #[inline]
    pub fn id(&self) -> SinkId {
        self.state.id
    }

    /// The actor's name as given by its [`ActorConfig`](crate::actor::ActorConfig).
    #[inline]
    pub fn name(&self) -> &str {
        &self.state.name
    }

    /// Current lifecycle state.
    #[inline]
    pub fn lifecycle(&self) -> Lifecycle {
        self.state.lifecycle.get()
    }

    /// `true` once the dispatch loop has exited.
    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.lifecycle() == Lifecycle::Terminated
    }

    /// `true` once `close` has been called or the actor has terminated.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state.closing.load(Ordering::Acquire)
    }

    /// Enqueues `message` on the actor's mailbox.
    ///
    /// Never blocks: the mailbox is unbounded. Messages from one producer are
    /// handled in the order they were sent.
    ///
    /// # Errors
    ///
    /// [`PostError::Closed`] if `close` was already called on this actor or the
    /// actor has terminated. The message is handed back to nobody and dropped.
    pub fn send(&self, message: M) -> Result<(), PostError> {
        if self.is_closed() {
            trace!(actor = self.name(), "rejecting message sent after close");
            return Err(self.closed_error());
        }
        if self.outbox.post(Delivery::Message(message)) {
            Ok(())
        } else {
            Err(self.closed_error())
        }
    }

    /// Asks the actor to shut down once it has handled everything queued so far.
    ///
    /// Enqueues the shutdown sentinel the first time it is called; later calls
    /// do nothing. Does not wait; use [`join`](Self::join) for that.
    #[instrument(skip(self), fields(actor = %self.state.name))]
    pub fn close(&self) {
        if self.state.closing.swap(true, Ordering::AcqRel) {
            trace!("close already requested");
            return;
        }
        if !self.outbox.post(Delivery::Shutdown) {
            trace!("mailbox already closed, nothing to signal");
        }
    }

    /// Waits until the actor has terminated.
    ///
    /// Safe to call from any task, concurrently and repeatedly; every caller is
    /// released once the dispatch loop has exited. Waits indefinitely for an
    /// actor that is never closed.
    pub async fn join(&self) {
        self.tracker.wait().await;
    }

    /// Like [`join`](Self::join), but gives up after `after`.
    ///
    /// # Errors
    ///
    /// [`PostError::JoinTimeout`] if the actor is still running when the time is up.
    pub async fn join_timeout(&self, after: Duration) -> Result<(), PostError> {
        tokio::time::timeout(after, self.join())
            .await
            .map_err(|_| PostError::JoinTimeout {
                actor: self.state.name.clone(),
                after,
            })
    }

    /// Closes the actor and waits for it, bounded by the configured shutdown timeout.
    ///
    /// # Errors
    ///
    /// [`PostError::JoinTimeout`] if the actor does not drain its mailbox in time.
    #[instrument(skip(self), fields(actor = %self.state.name))]
    pub async fn stop(&self) -> Result<(), PostError> {
        self.close();
        trace!("waiting for actor to drain");
        self.join_timeout(CONFIG.actor_shutdown_timeout()).await
    }

    /// A handle to the same actor that does not keep its mailbox open.
    pub(crate) fn downgrade(&self) -> Self {
        Self {
            state: self.state.clone(),
            outbox: self.outbox.downgrade(),
            tracker: self.tracker.clone(),
        }
    }

    pub(crate) fn tracker(&self) -> &TaskTracker {
        &self.tracker
    }

    pub(crate) fn set_lifecycle(&self, lifecycle: Lifecycle) {
        if lifecycle == Lifecycle::Terminated {
            self.state.closing.store(true, Ordering::Release);
        }
        self.state.lifecycle.set(lifecycle);
    }

    fn closed_error(&self) -> PostError {
        PostError::Closed {
            actor: self.state.name.clone(),
        }
    }
}

impl<M: Send + 'static> Sink<M> for ActorHandle<M> {
    #[inline]
    fn sink_id(&self) -> SinkId {
        self.id()
    }

    #[inline]
    fn accept(&self, message: M) -> Result<(), PostError> {
        self.send(message)
    }
}
