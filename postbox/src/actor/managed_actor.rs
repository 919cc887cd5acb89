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
use std::marker::PhantomData;

pub use idle::Idle;
pub use started::Started;
use tracing::trace;

use crate::actor::ActorConfig;
use crate::common::{ActorHandle, Lifecycle};
use crate::message::Inbox;
use crate::traits::Actor;

mod idle;
mod started;

/// An actor together with the mailbox it drains.
///
/// `ManagedActor` uses a type-state parameter to separate configuration
/// ([`Idle`]) from processing ([`Started`]). `start` consumes the idle value,
/// so an actor can be started at most once; trying twice does not compile.
///
/// Messages may be sent through [`handle`](Self::handle) before `start`.
/// They wait in the mailbox and are processed, in order, once the actor runs.
pub struct ManagedActor<ActorState, A: Actor> {
    pub(crate) handle: ActorHandle<A::Message>,
    pub(crate) config: ActorConfig,
    /// The user-supplied behaviour and state.
    pub model: A,
    pub(crate) inbox: Inbox<A::Message>,
    pub(crate) _guard: TerminationGuard<A::Message>,
    _actor_state: PhantomData<ActorState>,
}

impl<ActorState, A: Actor> ManagedActor<ActorState, A> {
    /// The handle other code uses to reach this actor.
    pub fn handle(&self) -> &ActorHandle<A::Message> {
        &self.handle
    }

    /// The actor's name, taken from its configuration.
    pub fn name(&self) -> &str {
        self.handle.name()
    }

    /// The configuration the actor was built with.
    pub fn config(&self) -> &ActorConfig {
        &self.config
    }
}

impl<ActorState, A: Actor + Debug> Debug for ManagedActor<ActorState, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedActor")
            .field("handle", &self.handle)
            .field("config", &self.config)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Marks the actor terminated when its owning `ManagedActor` goes away.
///
/// Dropping covers every way an actor can end: the dispatch task returning,
/// the runtime cancelling that task, or an idle actor being discarded before
/// `start`. Closing the tracker releases anyone blocked in `join`.
pub(crate) struct TerminationGuard<M> {
    handle: ActorHandle<M>,
}

impl<M> TerminationGuard<M> {
    pub(crate) fn new(handle: ActorHandle<M>) -> Self {
        Self { handle }
    }
}

impl<M> Drop for TerminationGuard<M> {
    fn drop(&mut self) {
        if !self.handle.is_terminated() {
            trace!(actor = self.handle.name(), "actor terminated");
        }
        self.handle.set_lifecycle(Lifecycle::Terminated);
        self.handle.tracker().close();
    }
}
