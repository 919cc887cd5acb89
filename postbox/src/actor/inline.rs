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

use parking_lot::Mutex;
use tracing::{error, trace};

use crate::common::SinkId;
use crate::message::PostError;
use crate::traits::Sink;

/// Message handling for an [`InlineActor`].
///
/// Unlike [`Actor`](crate::traits::Actor), a behaviour runs synchronously on
/// whichever thread calls `send`; there is no mailbox and no task.
pub trait Behavior: Send {
    type Message;

    fn receive(&mut self, message: Self::Message) -> anyhow::Result<()>;

    /// Called once by `close` on a primed actor.
    fn terminate(&mut self) {}
}

/// Where an [`InlineActor`] is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineState {
    /// Built, not yet primed. Sends are rejected.
    Fresh,
    /// Accepting messages.
    Primed,
    /// Closed for good.
    Closed,
}

struct Inner<B> {
    state: InlineState,
    behavior: B,
}

/// An actor without a thread of its own.
///
/// Each `send` runs the behaviour to completion on the caller before
/// returning. Concurrent senders are serialized by a lock, so the behaviour
/// still sees one message at a time. A behaviour must not send to its own
/// actor from inside `receive`.
pub struct InlineActor<B> {
    id: SinkId,
    name: String,
    inner: Mutex<Inner<B>>,
}

impl<B: Behavior> InlineActor<B> {
    /// Wraps `behavior` in a fresh actor that must be primed before it accepts messages.
    pub fn new(name: impl Into<String>, behavior: B) -> Self {
        Self {
            id: SinkId::next(),
            name: name.into(),
            inner: Mutex::new(Inner {
                state: InlineState::Fresh,
                behavior,
            }),
        }
    }

    /// Builds and primes in one step.
    pub fn primed(name: impl Into<String>, behavior: B) -> Self {
        let actor = Self::new(name, behavior);
        actor.inner.lock().state = InlineState::Primed;
        actor
    }

    /// The actor's identity as a sink.
    pub fn id(&self) -> SinkId {
        self.id
    }

    /// The name given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The actor's current lifecycle state.
    pub fn state(&self) -> InlineState {
        self.inner.lock().state
    }

    /// Readies the actor to accept messages.
    ///
    /// # Errors
    ///
    /// [`PostError::AlreadyPrimed`] on a second call, [`PostError::Closed`]
    /// after `close`.
    pub fn prime(&self) -> Result<(), PostError> {
        let mut inner = self.inner.lock();
        match inner.state {
            InlineState::Fresh => {
                inner.state = InlineState::Primed;
                trace!(actor = %self.name, "inline actor primed");
                Ok(())
            }
            InlineState::Primed => Err(PostError::AlreadyPrimed {
                actor: self.name.clone(),
            }),
            InlineState::Closed => Err(self.closed_error()),
        }
    }

    /// Runs the behaviour on `message` before returning.
    ///
    /// A behaviour error is logged and the actor stays primed.
    ///
    /// # Errors
    ///
    /// [`PostError::NotStarted`] before `prime`, [`PostError::Closed`] after `close`.
    pub fn send(&self, message: B::Message) -> Result<(), PostError> {
        let mut inner = self.inner.lock();
        match inner.state {
            InlineState::Fresh => Err(PostError::NotStarted {
                actor: self.name.clone(),
            }),
            InlineState::Closed => Err(self.closed_error()),
            InlineState::Primed => {
                if let Err(err) = inner.behavior.receive(message) {
                    error!(actor = %self.name, error = %err, "inline message handling failed");
                }
                Ok(())
            }
        }
    }

    /// Stops accepting messages. Idempotent.
    ///
    /// `terminate` runs only if the actor was primed; closing a fresh actor
    /// just retires it.
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        let previous = std::mem::replace(&mut inner.state, InlineState::Closed);
        if previous == InlineState::Primed {
            inner.behavior.terminate();
            trace!(actor = %self.name, "inline actor closed");
        }
    }

    /// Runs `f` with shared access to the behaviour.
    pub fn inspect<R>(&self, f: impl FnOnce(&B) -> R) -> R {
        f(&self.inner.lock().behavior)
    }

    /// Consumes the actor and returns its behaviour.
    pub fn into_inner(self) -> B {
        self.inner.into_inner().behavior
    }

    fn closed_error(&self) -> PostError {
        PostError::Closed {
            actor: self.name.clone(),
        }
    }
}

impl<B> Debug for InlineActor<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineActor")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<B: Behavior> Sink<B::Message> for InlineActor<B> {
    fn sink_id(&self) -> SinkId {
        self.id
    }

    fn accept(&self, message: B::Message) -> Result<(), PostError> {
        self.send(message)
    }
}
