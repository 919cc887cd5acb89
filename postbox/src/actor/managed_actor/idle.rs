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

use std::marker::PhantomData;

use tokio::sync::mpsc;
use tokio_util::task::TaskTracker;
use tracing::{error, instrument, trace};

use crate::actor::managed_actor::{Started, TerminationGuard};
use crate::actor::{ActorConfig, ManagedActor};
use crate::common::{ActorHandle, Lifecycle};
use crate::message::{Inbox, Outbox};
use crate::traits::Actor;

/// Type-state marker for an actor that has been built but not started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Idle;

impl<A: Actor> ManagedActor<Idle, A> {
    /// Wraps `model` in an idle actor using the default [`ActorConfig`].
    pub fn new(model: A) -> Self {
        Self::with_config(model, ActorConfig::default())
    }

    /// Wraps `model` in an idle actor with an explicit configuration.
    ///
    /// The mailbox exists from this point on; the returned actor's
    /// [`handle`](ManagedActor::handle) already accepts messages.
    pub fn with_config(model: A, config: ActorConfig) -> Self {
        let (outbox, receiver) = mpsc::unbounded_channel();
        let handle = ActorHandle::new(
            config.name().to_string(),
            Outbox::Owning(outbox),
            TaskTracker::new(),
        );
        trace!(actor = %handle.name(), id = %handle.id(), "actor created");
        Self {
            _guard: TerminationGuard::new(handle.downgrade()),
            handle,
            config,
            model,
            inbox: Inbox::new(receiver),
            _actor_state: PhantomData,
        }
    }

    /// Mutable access to the model before it moves onto the actor task.
    pub fn model_mut(&mut self) -> &mut A {
        &mut self.model
    }

    /// Starts the dispatch task and returns the actor's handle.
    ///
    /// `before_start` runs here, on the caller's task; a failure is logged and
    /// the actor starts anyway. The dispatch loop itself runs on a new tokio task.
    #[instrument(skip(self), fields(actor = %self.handle.name()))]
    pub async fn start(mut self) -> ActorHandle<A::Message> {
        if let Err(err) = self.model.before_start().await {
            error!(error = %err, "before_start hook failed");
        }

        let handle = self.handle.clone();
        let actor: ManagedActor<Started, A> = self.into();

        handle.set_lifecycle(Lifecycle::Running);
        trace!("spawning dispatch task");
        handle.tracker().spawn(actor.wake());
        // The tracker only ever holds the dispatch task; closing it now lets
        // `join` complete as soon as that task ends.
        handle.tracker().close();

        handle
    }
}

impl<A: Actor + Default> Default for ManagedActor<Idle, A> {
    fn default() -> Self {
        Self::new(A::default())
    }
}

impl<A: Actor> From<ManagedActor<Idle, A>> for ManagedActor<Started, A> {
    fn from(value: ManagedActor<Idle, A>) -> Self {
        Self {
            // The running actor must not keep its own mailbox open.
            handle: value.handle.downgrade(),
            config: value.config,
            model: value.model,
            inbox: value.inbox,
            _guard: value._guard,
            _actor_state: PhantomData,
        }
    }
}
