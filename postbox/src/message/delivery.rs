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

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, WeakUnboundedSender};

/// What actually travels through a mailbox.
///
/// `Shutdown` is the sentinel. It is private to the crate, so no application
/// message can ever be mistaken for it, and only `ActorHandle::close` enqueues it.
#[derive(Debug)]
pub(crate) enum Delivery<M> {
    Message(M),
    Shutdown,
}

/// Why [`Inbox::recv`] stopped handing out messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ActorExit {
    /// The sentinel was dequeued.
    Shutdown,
    /// Every owning sender is gone; nothing can arrive any more.
    Disconnected,
    /// A handler failed and the actor's policy is to stop on failure.
    Failed,
}

/// The producing end of an actor's mailbox.
///
/// Handles given to callers own their sender. The copy a running actor keeps
/// for itself does not, so the mailbox disconnects once every caller's handle
/// is gone.
pub(crate) enum Outbox<M> {
    Owning(UnboundedSender<Delivery<M>>),
    NonOwning(WeakUnboundedSender<Delivery<M>>),
}

impl<M> Outbox<M> {
    /// Enqueues `delivery`; `false` if the mailbox can no longer receive.
    pub(crate) fn post(&self, delivery: Delivery<M>) -> bool {
        match self {
            Self::Owning(sender) => sender.send(delivery).is_ok(),
            Self::NonOwning(weak) => weak
                .upgrade()
                .is_some_and(|sender| sender.send(delivery).is_ok()),
        }
    }

    pub(crate) fn downgrade(&self) -> Self {
        match self {
            Self::Owning(sender) => Self::NonOwning(sender.downgrade()),
            Self::NonOwning(weak) => Self::NonOwning(weak.clone()),
        }
    }
}

impl<M> Clone for Outbox<M> {
    fn clone(&self) -> Self {
        match self {
            Self::Owning(sender) => Self::Owning(sender.clone()),
            Self::NonOwning(weak) => Self::NonOwning(weak.clone()),
        }
    }
}

/// The consuming end of an actor's mailbox. Owned by exactly one actor task.
#[derive(Debug)]
pub(crate) struct Inbox<M> {
    receiver: UnboundedReceiver<Delivery<M>>,
}

impl<M> Inbox<M> {
    pub(crate) fn new(receiver: UnboundedReceiver<Delivery<M>>) -> Self {
        Self { receiver }
    }

    /// Waits for the next message.
    ///
    /// The sentinel is converted into `Err(ActorExit::Shutdown)` and is never
    /// returned to the caller as a message.
    pub(crate) async fn recv(&mut self) -> Result<M, ActorExit> {
        match self.receiver.recv().await {
            Some(Delivery::Message(message)) => Ok(message),
            Some(Delivery::Shutdown) => Err(ActorExit::Shutdown),
            None => Err(ActorExit::Disconnected),
        }
    }

    /// Closes the mailbox and discards whatever is still queued.
    ///
    /// Returns how many ordinary messages were thrown away. Further sends fail.
    pub(crate) fn close_and_drain(&mut self) -> usize {
        self.receiver.close();
        let mut discarded = 0;
        while let Ok(delivery) = self.receiver.try_recv() {
            if matches!(delivery, Delivery::Message(_)) {
                discarded += 1;
            }
        }
        discarded
    }
}
