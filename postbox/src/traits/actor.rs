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

use async_trait::async_trait;
use tracing::trace;

use crate::common::ActorHandle;

/// User-supplied behaviour of an actor.
///
/// The framework owns the mailbox and the dispatch loop; an implementation only
/// decides what to do with each message. Messages arrive one at a time, in the
/// order a single producer sent them, on the actor's own task, so `handle` has
/// exclusive access to `self` and needs no locking.
///
/// Routing by message kind is done with an enum and a `match` inside `handle`:
///
/// ```ignore
/// enum Command {
///     A(i32),
///     B(String, String),
/// }
///
/// #[async_trait]
/// impl Actor for Tagged {
///     type Message = Command;
///
///     async fn handle(&mut self, message: Command, _: &ActorHandle<Command>) -> anyhow::Result<()> {
///         match message {
///             Command::A(x) => self.do_a(x),
///             Command::B(x, y) => self.do_b(x, y),
///         }
///         Ok(())
///     }
/// }
/// ```
///
/// Errors returned (and panics raised) from `handle` stay on the actor task; what
/// happens next is decided by the actor's
/// [`FailurePolicy`](crate::common::FailurePolicy).
#[async_trait]
pub trait Actor: Send + 'static {
    /// The type carried by this actor's mailbox.
    type Message: Send + 'static;

    /// Processes one message. The default discards it.
    ///
    /// `myself` is this actor's own handle, for posting follow-up messages to
    /// itself. It does not keep the actor alive, and neither do its clones.
    async fn handle(
        &mut self,
        message: Self::Message,
        myself: &ActorHandle<Self::Message>,
    ) -> anyhow::Result<()> {
        drop(message);
        trace!(actor = myself.name(), "discarding message");
        Ok(())
    }

    /// Runs inside `start`, on the caller's task, before the dispatch task is spawned.
    async fn before_start(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs on the actor task before the first message is taken.
    async fn after_start(&mut self, _myself: &ActorHandle<Self::Message>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs on the actor task after the loop has exited, just before the actor
    /// is marked terminated.
    async fn after_stop(&mut self, _myself: &ActorHandle<Self::Message>) -> anyhow::Result<()> {
        Ok(())
    }
}
