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

use std::sync::Arc;

use crate::common::SinkId;
use crate::message::PostError;

/// Anything that can accept a delivered message.
///
/// Actors (through [`ActorHandle`](crate::common::ActorHandle)), exchanges, inline
/// actors and plain closures (through [`sink_fn`](crate::common::sink_fn)) are
/// all sinks, so an [`Exchange`](crate::common::Exchange) can fan out to any mix
/// of them.
///
/// `accept` is called synchronously on the publisher's thread and must not block
/// for long; sinks that do real work should hand the message to their own task.
pub trait Sink<M>: Send + Sync {
    /// Identity used for subscription bookkeeping.
    fn sink_id(&self) -> SinkId;

    /// Takes one message.
    ///
    /// # Errors
    ///
    /// Returns an error when the sink can no longer take messages, for example
    /// an actor that has been closed.
    fn accept(&self, message: M) -> Result<(), PostError>;
}

impl<M, S: Sink<M> + ?Sized> Sink<M> for Arc<S> {
    #[inline]
    fn sink_id(&self) -> SinkId {
        (**self).sink_id()
    }

    #[inline]
    fn accept(&self, message: M) -> Result<(), PostError> {
        (**self).accept(message)
    }
}

impl<M, S: Sink<M> + ?Sized> Sink<M> for Box<S> {
    #[inline]
    fn sink_id(&self) -> SinkId {
        (**self).sink_id()
    }

    #[inline]
    fn accept(&self, message: M) -> Result<(), PostError> {
        (**self).accept(message)
    }
}
